//! Conversion of an expected value into the actual value's runtime type.

use crate::value::{FloatWidth, IntWidth, Type, Value};

#[derive(Debug, Clone, Copy)]
enum Number {
    Signed(i64),
    Unsigned(u64),
    Real(f64),
}

impl Number {
    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Int { value, .. } => Some(Number::Signed(*value)),
            Value::Uint { value, .. } => Some(Number::Unsigned(*value)),
            Value::Float { value, .. } => Some(Number::Real(*value)),
            _ => None,
        }
    }

    fn to_signed(self, width: IntWidth) -> i64 {
        let raw = match self {
            Number::Signed(value) => value,
            Number::Unsigned(value) => value as i64,
            Number::Real(value) => value.trunc() as i64,
        };
        wrap_signed(raw, width)
    }

    fn to_unsigned(self, width: IntWidth) -> u64 {
        let raw = match self {
            Number::Signed(value) => value as u64,
            Number::Unsigned(value) => value,
            Number::Real(value) if value < 0.0 => (value.trunc() as i64) as u64,
            Number::Real(value) => value.trunc() as u64,
        };
        wrap_unsigned(raw, width)
    }

    fn to_real(self, width: FloatWidth) -> f64 {
        let raw = match self {
            Number::Signed(value) => value as f64,
            Number::Unsigned(value) => value as f64,
            Number::Real(value) => value,
        };
        round_float(raw, width)
    }
}

/// Truncates `value` to the two's complement range of `width`.
pub fn wrap_signed(value: i64, width: IntWidth) -> i64 {
    match width {
        IntWidth::W8 => i64::from(value as i8),
        IntWidth::W16 => i64::from(value as i16),
        IntWidth::W32 => i64::from(value as i32),
        IntWidth::W64 => value,
    }
}

/// Truncates `value` to the unsigned range of `width`.
pub fn wrap_unsigned(value: u64, width: IntWidth) -> u64 {
    match width {
        IntWidth::W8 => u64::from(value as u8),
        IntWidth::W16 => u64::from(value as u16),
        IntWidth::W32 => u64::from(value as u32),
        IntWidth::W64 => value,
    }
}

/// Rounds `value` to the precision of `width`.
pub fn round_float(value: f64, width: FloatWidth) -> f64 {
    match width {
        FloatWidth::F32 => f64::from(value as f32),
        FloatWidth::F64 => value,
    }
}

/// Returns whether `ty` is a sequence of `u8`, the shape `Vec<u8>` and `&[u8]` reflect to.
fn is_byte_seq(ty: &Type) -> bool {
    matches!(ty, Type::Seq(elem) if **elem == Type::Uint(IntWidth::W8))
}

/// Raw bytes of a string, a byte value or a `u8` sequence. An unset sequence has none.
fn byte_view(value: &Value) -> Option<Vec<u8>> {
    match value {
        Value::Str(text) => Some(text.as_bytes().to_vec()),
        Value::Bytes(bytes) => Some(bytes.clone()),
        Value::Seq {
            elem: Type::Uint(IntWidth::W8),
            items,
        } => items
            .iter()
            .flatten()
            .map(|item| match item.concrete() {
                Value::Uint { value, .. } => Some(*value as u8),
                _ => None,
            })
            .collect(),
        _ => None,
    }
}

/// Converts `value` into `target`, or returns `None` when the types are unrelated.
///
/// Identical types always convert. Numbers convert between every numeric type,
/// wrapping integers to the target width and truncating floats toward zero.
/// Strings, byte values and `u8` sequences convert into each other.
pub fn convert(value: &Value, target: &Type) -> Option<Value> {
    let value = value.concrete();
    let source = value.type_of()?;
    if &source == target {
        return Some(value.clone());
    }
    if let Some(number) = Number::of(value) {
        return match target {
            Type::Int(width) => Some(Value::Int {
                width: *width,
                value: number.to_signed(*width),
            }),
            Type::Uint(width) => Some(Value::Uint {
                width: *width,
                value: number.to_unsigned(*width),
            }),
            Type::Float(width) => Some(Value::Float {
                width: *width,
                value: number.to_real(*width),
            }),
            _ => None,
        };
    }
    let bytes = byte_view(value)?;
    match target {
        Type::Str => Some(Value::Str(String::from_utf8_lossy(&bytes).into_owned())),
        Type::Bytes => Some(Value::Bytes(bytes)),
        ty if is_byte_seq(ty) => Some(Value::seq(
            Type::Uint(IntWidth::W8),
            bytes
                .into_iter()
                .map(|byte| Value::Uint {
                    width: IntWidth::W8,
                    value: u64::from(byte),
                })
                .collect(),
        )),
        _ => None,
    }
}

impl Value {
    /// Converts the value into `target`; see [`convert`].
    pub fn convert_to(&self, target: &Type) -> Option<Value> {
        convert(self, target)
    }
}
