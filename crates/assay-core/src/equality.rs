//! Structural equality between values of the same runtime type.

use crate::value::{IntWidth, Type, Value};

/// Returns whether both values are floats holding NaN.
///
/// NaN never equals itself under [`deep_equal`]; the comparator consults this
/// check first so that two NaN floats compare equal at the top level.
pub fn both_nan(left: &Value, right: &Value) -> bool {
    match (left.as_float(), right.as_float()) {
        (Some(left), Some(right)) => left.is_nan() && right.is_nan(),
        _ => false,
    }
}

fn items_equal(left: &[Value], right: &[Value]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .all(|(left, right)| deep_equal(left, right))
}

fn bytes_equal(bytes: &[u8], items: &[Value]) -> bool {
    bytes.len() == items.len()
        && bytes.iter().zip(items).all(|(byte, item)| {
            matches!(
                item.concrete(),
                Value::Uint { width: IntWidth::W8, value } if *value == u64::from(*byte)
            )
        })
}

/// Pairs every left entry with a distinct right entry.
fn entries_equal(left: &[(Value, Value)], right: &[(Value, Value)]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    let mut taken = vec![false; right.len()];
    left.iter().all(|(key, value)| {
        let slot = right
            .iter()
            .zip(&taken)
            .position(|((other_key, other_value), used)| {
                !used && deep_equal(key, other_key) && deep_equal(value, other_value)
            });
        match slot {
            Some(idx) => {
                taken[idx] = true;
                true
            }
            None => false,
        }
    })
}

/// Recursive structural equality.
///
/// Types must match exactly, except that byte values and `u8` sequences are one
/// type. Floats use IEEE equality at every depth. An unset reference never equals
/// a populated one, even when the populated one is empty. An unset interface
/// equals the absent value. Mappings compare as multisets of entries. Functions
/// are equal only when both are unset; channels are equal when they share an
/// identity.
pub fn deep_equal(left: &Value, right: &Value) -> bool {
    match (left.concrete(), right.concrete()) {
        (Value::Absent, Value::Absent) => true,
        (Value::Bool(left), Value::Bool(right)) => left == right,
        (
            Value::Int {
                width: left_width,
                value: left,
            },
            Value::Int {
                width: right_width,
                value: right,
            },
        ) => left_width == right_width && left == right,
        (
            Value::Uint {
                width: left_width,
                value: left,
            },
            Value::Uint {
                width: right_width,
                value: right,
            },
        ) => left_width == right_width && left == right,
        (
            Value::Float {
                width: left_width,
                value: left,
            },
            Value::Float {
                width: right_width,
                value: right,
            },
        ) => left_width == right_width && left == right,
        (Value::Str(left), Value::Str(right)) => left == right,
        (Value::Bytes(left), Value::Bytes(right)) => left == right,
        (
            Value::Bytes(bytes),
            Value::Seq {
                elem: Type::Uint(IntWidth::W8),
                items: Some(items),
            },
        )
        | (
            Value::Seq {
                elem: Type::Uint(IntWidth::W8),
                items: Some(items),
            },
            Value::Bytes(bytes),
        ) => bytes_equal(bytes, items),
        (Value::Error(left), Value::Error(right)) => left == right,
        (
            Value::Struct {
                name: left_name,
                fields: left_fields,
            },
            Value::Struct {
                name: right_name,
                fields: right_fields,
            },
        ) => {
            left_name == right_name
                && left_fields.len() == right_fields.len()
                && left_fields.iter().zip(right_fields).all(
                    |((left_field, left_value), (right_field, right_value))| {
                        left_field == right_field && deep_equal(left_value, right_value)
                    },
                )
        }
        (
            Value::Seq {
                elem: left_elem,
                items: left_items,
            },
            Value::Seq {
                elem: right_elem,
                items: right_items,
            },
        ) => {
            left_elem == right_elem
                && match (left_items, right_items) {
                    (None, None) => true,
                    (Some(left), Some(right)) => items_equal(left, right),
                    _ => false,
                }
        }
        (
            Value::Array {
                elem: left_elem,
                items: left_items,
            },
            Value::Array {
                elem: right_elem,
                items: right_items,
            },
        ) => left_elem == right_elem && items_equal(left_items, right_items),
        (
            Value::Map {
                key: left_key,
                value: left_value,
                entries: left_entries,
            },
            Value::Map {
                key: right_key,
                value: right_value,
                entries: right_entries,
            },
        ) => {
            left_key == right_key
                && left_value == right_value
                && match (left_entries, right_entries) {
                    (None, None) => true,
                    (Some(left), Some(right)) => entries_equal(left, right),
                    _ => false,
                }
        }
        (
            Value::Ref {
                target: left_target,
                pointee: left_pointee,
            },
            Value::Ref {
                target: right_target,
                pointee: right_pointee,
            },
        ) => {
            left_target == right_target
                && match (left_pointee, right_pointee) {
                    (None, None) => true,
                    (Some(left), Some(right)) => deep_equal(left, right),
                    _ => false,
                }
        }
        (
            Value::Func {
                signature: left_sig,
                addr: left_addr,
            },
            Value::Func {
                signature: right_sig,
                addr: right_addr,
            },
        ) => left_sig == right_sig && left_addr.is_none() && right_addr.is_none(),
        (
            Value::Chan {
                elem: left_elem,
                handle: left_handle,
            },
            Value::Chan {
                elem: right_elem,
                handle: right_handle,
            },
        ) => {
            left_elem == right_elem
                && match (left_handle, right_handle) {
                    (None, None) => true,
                    (Some(left), Some(right)) => left.id == right.id,
                    _ => false,
                }
        }
        (
            Value::Dyn {
                iface: left_iface,
                inner: None,
            },
            Value::Dyn {
                iface: right_iface,
                inner: None,
            },
        ) => left_iface == right_iface,
        (Value::Dyn { inner: None, .. }, Value::Absent)
        | (Value::Absent, Value::Dyn { inner: None, .. }) => true,
        _ => false,
    }
}
