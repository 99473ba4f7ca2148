//! Dynamically typed values compared by the assertion engine.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::errors::{AssayError, ErrorInfo};
use crate::nil::is_nil_like;

/// Bit width of an integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IntWidth {
    /// 8-bit integer.
    W8,
    /// 16-bit integer.
    W16,
    /// 32-bit integer.
    W32,
    /// 64-bit integer (also used for `isize`/`usize`).
    W64,
}

impl IntWidth {
    /// Returns the number of bits stored by the width.
    pub fn bits(self) -> u32 {
        match self {
            IntWidth::W8 => 8,
            IntWidth::W16 => 16,
            IntWidth::W32 => 32,
            IntWidth::W64 => 64,
        }
    }
}

/// Precision of a floating point type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FloatWidth {
    /// Single precision.
    F32,
    /// Double precision.
    F64,
}

/// Runtime type descriptor of a [`Value`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "of", rename_all = "snake_case")]
pub enum Type {
    /// Boolean.
    Bool,
    /// Signed integer of the given width.
    Int(IntWidth),
    /// Unsigned integer of the given width.
    Uint(IntWidth),
    /// Floating point number of the given precision.
    Float(FloatWidth),
    /// UTF-8 string.
    Str,
    /// Byte sequence.
    Bytes,
    /// Concrete error carrying a message.
    Error,
    /// Named struct.
    Struct(String),
    /// Growable sequence of elements.
    Seq(Box<Type>),
    /// Fixed-length array of elements.
    Array(Box<Type>, usize),
    /// Mapping from keys to values.
    Map(Box<Type>, Box<Type>),
    /// Pointer to a target type.
    Ref(Box<Type>),
    /// Function with the given signature.
    Func(String),
    /// Channel carrying elements.
    Chan(Box<Type>),
    /// Dynamic interface (for example `any` or `error`).
    Dyn(String),
}

impl Type {
    /// Returns the coarse kind of the type.
    pub fn kind(&self) -> Kind {
        match self {
            Type::Bool => Kind::Bool,
            Type::Int(_) => Kind::Int,
            Type::Uint(_) => Kind::Uint,
            Type::Float(_) => Kind::Float,
            Type::Str => Kind::String,
            Type::Bytes => Kind::Bytes,
            Type::Error => Kind::Error,
            Type::Struct(_) => Kind::Struct,
            Type::Seq(_) => Kind::Sequence,
            Type::Array(_, _) => Kind::Array,
            Type::Map(_, _) => Kind::Mapping,
            Type::Ref(_) => Kind::Pointer,
            Type::Func(_) => Kind::Function,
            Type::Chan(_) => Kind::Channel,
            Type::Dyn(_) => Kind::Interface,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => write!(f, "bool"),
            Type::Int(width) => write!(f, "int{}", width.bits()),
            Type::Uint(width) => write!(f, "uint{}", width.bits()),
            Type::Float(FloatWidth::F32) => write!(f, "float32"),
            Type::Float(FloatWidth::F64) => write!(f, "float64"),
            Type::Str => write!(f, "string"),
            Type::Bytes => write!(f, "[]byte"),
            Type::Error => write!(f, "error"),
            Type::Struct(name) => write!(f, "{name}"),
            Type::Seq(elem) => write!(f, "[]{elem}"),
            Type::Array(elem, len) => write!(f, "[{len}]{elem}"),
            Type::Map(key, value) => write!(f, "map[{key}]{value}"),
            Type::Ref(target) => write!(f, "*{target}"),
            Type::Func(signature) => write!(f, "{signature}"),
            Type::Chan(elem) => write!(f, "chan {elem}"),
            Type::Dyn(name) => write!(f, "{name}"),
        }
    }
}

/// Coarse classification of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// The literal absent value.
    Absent,
    /// Boolean.
    Bool,
    /// Signed integer.
    Int,
    /// Unsigned integer.
    Uint,
    /// Floating point number.
    Float,
    /// UTF-8 string.
    String,
    /// Byte sequence.
    Bytes,
    /// Concrete error.
    Error,
    /// Named struct.
    Struct,
    /// Growable sequence.
    Sequence,
    /// Fixed-length array.
    Array,
    /// Key/value mapping.
    Mapping,
    /// Pointer.
    Pointer,
    /// Function.
    Function,
    /// Channel.
    Channel,
    /// Dynamic interface.
    Interface,
}

impl Kind {
    /// Returns whether values of this kind are references whose backing storage may be unset.
    pub fn is_reference(self) -> bool {
        matches!(
            self,
            Kind::Sequence
                | Kind::Mapping
                | Kind::Pointer
                | Kind::Function
                | Kind::Channel
                | Kind::Interface
        )
    }

    /// Returns whether the kind is a signed, unsigned or floating point number.
    pub fn is_numeric(self) -> bool {
        matches!(self, Kind::Int | Kind::Uint | Kind::Float)
    }

    /// Returns whether `len` is defined for values of this kind.
    pub fn is_measurable(self) -> bool {
        matches!(
            self,
            Kind::Sequence
                | Kind::Array
                | Kind::Mapping
                | Kind::String
                | Kind::Bytes
                | Kind::Channel
        )
    }
}

/// Live channel state: an identity plus the elements currently buffered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChanHandle {
    /// Identity of the channel; two handles with the same id are the same channel.
    pub id: u64,
    /// Elements waiting in the channel buffer.
    pub queued: Vec<Value>,
}

/// Dynamically typed datum passed to assertions.
///
/// Reference kinds carry an `Option` backing store where `None` is the unset
/// state. `PartialEq` compares representations; assertions use
/// [`crate::compare::compare`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Value {
    /// The literal absent value.
    Absent,
    /// Boolean.
    Bool(bool),
    /// Signed integer, already wrapped to `width`.
    Int {
        /// Width of the integer type.
        width: IntWidth,
        /// Stored value.
        value: i64,
    },
    /// Unsigned integer, already wrapped to `width`.
    Uint {
        /// Width of the integer type.
        width: IntWidth,
        /// Stored value.
        value: u64,
    },
    /// Floating point number, already rounded to `width`.
    Float {
        /// Precision of the float type.
        width: FloatWidth,
        /// Stored value.
        value: f64,
    },
    /// UTF-8 string.
    Str(String),
    /// Byte sequence.
    Bytes(Vec<u8>),
    /// Concrete error with its message text.
    Error(String),
    /// Named struct with ordered fields.
    Struct {
        /// Struct type name.
        name: String,
        /// Field names and values in declaration order.
        fields: Vec<(String, Value)>,
    },
    /// Growable sequence.
    Seq {
        /// Element type.
        elem: Type,
        /// Elements, or `None` when unset.
        items: Option<Vec<Value>>,
    },
    /// Fixed-length array.
    Array {
        /// Element type.
        elem: Type,
        /// Elements.
        items: Vec<Value>,
    },
    /// Key/value mapping.
    Map {
        /// Key type.
        key: Type,
        /// Value type.
        value: Type,
        /// Entries, or `None` when unset.
        entries: Option<Vec<(Value, Value)>>,
    },
    /// Pointer.
    Ref {
        /// Pointee type.
        target: Type,
        /// Pointee, or `None` when unset.
        pointee: Option<Box<Value>>,
    },
    /// Function.
    Func {
        /// Function signature.
        signature: String,
        /// Code address, or `None` when unset.
        addr: Option<u64>,
    },
    /// Channel.
    Chan {
        /// Element type.
        elem: Type,
        /// Channel state, or `None` when unset.
        handle: Option<ChanHandle>,
    },
    /// Dynamic interface holding a concrete value.
    Dyn {
        /// Interface name.
        iface: String,
        /// Held value, or `None` when unset.
        inner: Option<Box<Value>>,
    },
}

impl Value {
    /// 64-bit signed integer.
    pub fn int(value: i64) -> Self {
        Value::Int {
            width: IntWidth::W64,
            value,
        }
    }

    /// 64-bit unsigned integer.
    pub fn uint(value: u64) -> Self {
        Value::Uint {
            width: IntWidth::W64,
            value,
        }
    }

    /// Double precision float.
    pub fn float(value: f64) -> Self {
        Value::Float {
            width: FloatWidth::F64,
            value,
        }
    }

    /// Single precision float.
    pub fn float32(value: f32) -> Self {
        Value::Float {
            width: FloatWidth::F32,
            value: f64::from(value),
        }
    }

    /// UTF-8 string.
    pub fn str(value: impl Into<String>) -> Self {
        Value::Str(value.into())
    }

    /// Struct with the given name and fields.
    pub fn structure<N, I>(name: impl Into<String>, fields: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Value)>,
    {
        Value::Struct {
            name: name.into(),
            fields: fields
                .into_iter()
                .map(|(field, value)| (field.into(), value))
                .collect(),
        }
    }

    /// Populated sequence.
    pub fn seq(elem: Type, items: Vec<Value>) -> Self {
        Value::Seq {
            elem,
            items: Some(items),
        }
    }

    /// Unset sequence.
    pub fn nil_seq(elem: Type) -> Self {
        Value::Seq { elem, items: None }
    }

    /// Populated mapping.
    pub fn map(key: Type, value: Type, entries: Vec<(Value, Value)>) -> Self {
        Value::Map {
            key,
            value,
            entries: Some(entries),
        }
    }

    /// Unset mapping.
    pub fn nil_map(key: Type, value: Type) -> Self {
        Value::Map {
            key,
            value,
            entries: None,
        }
    }

    /// Pointer to `pointee`, typed by the pointee's runtime type.
    pub fn pointer_to(pointee: Value) -> Self {
        let target = pointee.type_of().unwrap_or_else(|| Type::Dyn("any".into()));
        Value::Ref {
            target,
            pointee: Some(Box::new(pointee)),
        }
    }

    /// Unset pointer.
    pub fn nil_pointer(target: Type) -> Self {
        Value::Ref {
            target,
            pointee: None,
        }
    }

    /// Function located at `addr`.
    pub fn func(signature: impl Into<String>, addr: u64) -> Self {
        Value::Func {
            signature: signature.into(),
            addr: Some(addr),
        }
    }

    /// Unset function.
    pub fn nil_func(signature: impl Into<String>) -> Self {
        Value::Func {
            signature: signature.into(),
            addr: None,
        }
    }

    /// Open channel with identity `id` and the given buffered elements.
    pub fn chan(elem: Type, id: u64, queued: Vec<Value>) -> Self {
        Value::Chan {
            elem,
            handle: Some(ChanHandle { id, queued }),
        }
    }

    /// Unset channel.
    pub fn nil_chan(elem: Type) -> Self {
        Value::Chan { elem, handle: None }
    }

    /// Interface `iface` holding `inner`.
    pub fn boxed(iface: impl Into<String>, inner: Value) -> Self {
        Value::Dyn {
            iface: iface.into(),
            inner: Some(Box::new(inner)),
        }
    }

    /// Unset interface.
    pub fn nil_interface(iface: impl Into<String>) -> Self {
        Value::Dyn {
            iface: iface.into(),
            inner: None,
        }
    }

    /// Unset `error` interface.
    pub fn nil_error() -> Self {
        Value::nil_interface("error")
    }

    /// Concrete error value carrying the error's display text.
    pub fn from_error(err: &(dyn std::error::Error + '_)) -> Self {
        Value::boxed("error", Value::Error(err.to_string()))
    }

    /// Returns the value held behind populated interfaces.
    pub fn concrete(&self) -> &Value {
        let mut current = self;
        while let Value::Dyn {
            inner: Some(inner), ..
        } = current
        {
            current = inner.as_ref();
        }
        current
    }

    /// Returns the kind of the concrete value.
    pub fn kind(&self) -> Kind {
        match self.concrete().type_of() {
            Some(ty) => ty.kind(),
            None => Kind::Absent,
        }
    }

    /// Returns the runtime type of the concrete value, or `None` for [`Value::Absent`].
    pub fn type_of(&self) -> Option<Type> {
        let ty = match self.concrete() {
            Value::Absent => return None,
            Value::Bool(_) => Type::Bool,
            Value::Int { width, .. } => Type::Int(*width),
            Value::Uint { width, .. } => Type::Uint(*width),
            Value::Float { width, .. } => Type::Float(*width),
            Value::Str(_) => Type::Str,
            Value::Bytes(_) => Type::Bytes,
            Value::Error(_) => Type::Error,
            Value::Struct { name, .. } => Type::Struct(name.clone()),
            Value::Seq { elem, .. } => Type::Seq(Box::new(elem.clone())),
            Value::Array { elem, items } => Type::Array(Box::new(elem.clone()), items.len()),
            Value::Map { key, value, .. } => {
                Type::Map(Box::new(key.clone()), Box::new(value.clone()))
            }
            Value::Ref { target, .. } => Type::Ref(Box::new(target.clone())),
            Value::Func { signature, .. } => Type::Func(signature.clone()),
            Value::Chan { elem, .. } => Type::Chan(Box::new(elem.clone())),
            Value::Dyn { iface, .. } => Type::Dyn(iface.clone()),
        };
        Some(ty)
    }

    /// Returns whether the value is absent or an unset reference.
    pub fn is_nil_like(&self) -> bool {
        is_nil_like(self)
    }

    /// Returns the float stored in a concrete float value.
    pub fn as_float(&self) -> Option<f64> {
        match self.concrete() {
            Value::Float { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Returns the message text of an error value.
    pub fn error_text(&self) -> Option<&str> {
        match self.concrete() {
            Value::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Returns the length of the value after following one level of pointer indirection.
    pub fn len(&self) -> Result<usize, AssayError> {
        let target = match self.concrete() {
            Value::Ref {
                pointee: Some(pointee),
                ..
            } => pointee.concrete(),
            other => other,
        };
        match target {
            Value::Seq { items, .. } => Ok(items.as_ref().map_or(0, Vec::len)),
            Value::Array { items, .. } => Ok(items.len()),
            Value::Map { entries, .. } => Ok(entries.as_ref().map_or(0, Vec::len)),
            Value::Str(text) => Ok(text.len()),
            Value::Bytes(bytes) => Ok(bytes.len()),
            Value::Chan { handle, .. } => Ok(handle.as_ref().map_or(0, |h| h.queued.len())),
            other => Err(AssayError::Usage(
                ErrorInfo::new(
                    "assay.len_unsupported",
                    format!("Cannot get the length of {other}"),
                )
                .with_context("kind", format!("{:?}", other.kind())),
            )),
        }
    }

    /// Returns whether the value is measurable and has length zero.
    pub fn is_empty(&self) -> bool {
        matches!(self.len(), Ok(0))
    }
}

fn write_joined<'a>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = &'a Value>,
) -> fmt::Result {
    for (idx, item) in items.into_iter().enumerate() {
        if idx > 0 {
            write!(f, " ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn write_float(f: &mut fmt::Formatter<'_>, width: FloatWidth, value: f64) -> fmt::Result {
    if value.is_nan() {
        write!(f, "NaN")
    } else if value.is_infinite() {
        write!(f, "{}Inf", if value > 0.0 { "+" } else { "-" })
    } else {
        match width {
            FloatWidth::F32 => write!(f, "{}", value as f32),
            FloatWidth::F64 => write!(f, "{value}"),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil_like() {
            return write!(f, "<nil>");
        }
        match self.concrete() {
            Value::Absent => write!(f, "<nil>"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Int { value, .. } => write!(f, "{value}"),
            Value::Uint { value, .. } => write!(f, "{value}"),
            Value::Float { width, value } => write_float(f, *width, *value),
            Value::Str(text) => write!(f, "{text}"),
            Value::Bytes(bytes) => {
                write!(f, "[")?;
                for (idx, byte) in bytes.iter().enumerate() {
                    if idx > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{byte}")?;
                }
                write!(f, "]")
            }
            Value::Error(message) => write!(f, "{message}"),
            Value::Struct { fields, .. } => {
                write!(f, "{{")?;
                write_joined(f, fields.iter().map(|(_, value)| value))?;
                write!(f, "}}")
            }
            Value::Seq { items, .. } => {
                write!(f, "[")?;
                write_joined(f, items.iter().flatten())?;
                write!(f, "]")
            }
            Value::Array { items, .. } => {
                write!(f, "[")?;
                write_joined(f, items)?;
                write!(f, "]")
            }
            Value::Map { entries, .. } => {
                let mut rendered: Vec<String> = entries
                    .iter()
                    .flatten()
                    .map(|(key, value)| format!("{key}:{value}"))
                    .collect();
                rendered.sort();
                write!(f, "map[{}]", rendered.join(" "))
            }
            Value::Ref { pointee, .. } => match pointee {
                Some(pointee) => write!(f, "&{pointee}"),
                None => write!(f, "<nil>"),
            },
            Value::Func { signature, addr } => match addr {
                Some(addr) => write!(f, "{signature}@{addr:#x}"),
                None => write!(f, "<nil>"),
            },
            Value::Chan { elem, handle } => match handle {
                Some(handle) => write!(f, "chan {elem}#{}", handle.id),
                None => write!(f, "<nil>"),
            },
            Value::Dyn { .. } => write!(f, "<nil>"),
        }
    }
}
