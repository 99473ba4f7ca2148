//! Nil-likeness of values.

use crate::value::Value;

/// Returns whether `value` is absent or an unset reference.
///
/// Sequences, mappings, pointers, functions, channels and interfaces are nil-like
/// when their backing storage is unset. Every other value, including zero-valued
/// numbers and structs, is never nil-like.
pub fn is_nil_like(value: &Value) -> bool {
    match value {
        Value::Absent => true,
        Value::Seq { items, .. } => items.is_none(),
        Value::Map { entries, .. } => entries.is_none(),
        Value::Ref { pointee, .. } => pointee.is_none(),
        Value::Func { addr, .. } => addr.is_none(),
        Value::Chan { handle, .. } => handle.is_none(),
        Value::Dyn { inner, .. } => match inner {
            Some(inner) => is_nil_like(inner),
            None => true,
        },
        Value::Bool(_)
        | Value::Int { .. }
        | Value::Uint { .. }
        | Value::Float { .. }
        | Value::Str(_)
        | Value::Bytes(_)
        | Value::Error(_)
        | Value::Struct { .. }
        | Value::Array { .. } => false,
    }
}
