//! Adapters turning Rust values into [`Value`]s.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

use crate::value::{FloatWidth, IntWidth, Type, Value};

/// Types that can be inspected by the comparator.
pub trait Reflect {
    /// Static type used for elements of containers holding `Self`.
    fn reflect_type() -> Type
    where
        Self: Sized;

    /// Returns the dynamic view of `self`.
    fn reflect(&self) -> Value;
}

macro_rules! reflect_signed {
    ($($ty:ty => $width:expr),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn reflect_type() -> Type {
                    Type::Int($width)
                }

                fn reflect(&self) -> Value {
                    Value::Int { width: $width, value: *self as i64 }
                }
            }
        )*
    };
}

macro_rules! reflect_unsigned {
    ($($ty:ty => $width:expr),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn reflect_type() -> Type {
                    Type::Uint($width)
                }

                fn reflect(&self) -> Value {
                    Value::Uint { width: $width, value: *self as u64 }
                }
            }
        )*
    };
}

reflect_signed! {
    i8 => IntWidth::W8,
    i16 => IntWidth::W16,
    i32 => IntWidth::W32,
    i64 => IntWidth::W64,
    isize => IntWidth::W64,
}

reflect_unsigned! {
    u8 => IntWidth::W8,
    u16 => IntWidth::W16,
    u32 => IntWidth::W32,
    u64 => IntWidth::W64,
    usize => IntWidth::W64,
}

impl Reflect for bool {
    fn reflect_type() -> Type {
        Type::Bool
    }

    fn reflect(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Reflect for f32 {
    fn reflect_type() -> Type {
        Type::Float(FloatWidth::F32)
    }

    fn reflect(&self) -> Value {
        Value::float32(*self)
    }
}

impl Reflect for f64 {
    fn reflect_type() -> Type {
        Type::Float(FloatWidth::F64)
    }

    fn reflect(&self) -> Value {
        Value::float(*self)
    }
}

impl Reflect for String {
    fn reflect_type() -> Type {
        Type::Str
    }

    fn reflect(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl<'a> Reflect for &'a str {
    fn reflect_type() -> Type {
        Type::Str
    }

    fn reflect(&self) -> Value {
        Value::Str((*self).to_owned())
    }
}

/// The unit type is an empty struct.
impl Reflect for () {
    fn reflect_type() -> Type {
        Type::Struct("()".into())
    }

    fn reflect(&self) -> Value {
        Value::Struct {
            name: "()".into(),
            fields: Vec::new(),
        }
    }
}

/// Values are already dynamic; containers of them hold `any`.
impl Reflect for Value {
    fn reflect_type() -> Type {
        Type::Dyn("any".into())
    }

    fn reflect(&self) -> Value {
        self.clone()
    }
}

/// A borrow is a pointer to the borrowed value.
impl<'a, T: Reflect> Reflect for &'a T {
    fn reflect_type() -> Type {
        Type::Ref(Box::new(T::reflect_type()))
    }

    fn reflect(&self) -> Value {
        Value::Ref {
            target: T::reflect_type(),
            pointee: Some(Box::new((**self).reflect())),
        }
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn reflect_type() -> Type {
        Type::Seq(Box::new(T::reflect_type()))
    }

    fn reflect(&self) -> Value {
        Value::seq(T::reflect_type(), self.iter().map(Reflect::reflect).collect())
    }
}

impl<'a, T: Reflect> Reflect for &'a [T] {
    fn reflect_type() -> Type {
        Type::Seq(Box::new(T::reflect_type()))
    }

    fn reflect(&self) -> Value {
        Value::seq(T::reflect_type(), self.iter().map(Reflect::reflect).collect())
    }
}

/// `None` is an unset sequence.
impl<T: Reflect> Reflect for Option<Vec<T>> {
    fn reflect_type() -> Type {
        Type::Seq(Box::new(T::reflect_type()))
    }

    fn reflect(&self) -> Value {
        match self {
            Some(items) => items.reflect(),
            None => Value::nil_seq(T::reflect_type()),
        }
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn reflect_type() -> Type {
        Type::Array(Box::new(T::reflect_type()), N)
    }

    fn reflect(&self) -> Value {
        Value::Array {
            elem: T::reflect_type(),
            items: self.iter().map(Reflect::reflect).collect(),
        }
    }
}

impl<K: Reflect, V: Reflect, S: BuildHasher> Reflect for HashMap<K, V, S> {
    fn reflect_type() -> Type {
        Type::Map(Box::new(K::reflect_type()), Box::new(V::reflect_type()))
    }

    fn reflect(&self) -> Value {
        Value::map(
            K::reflect_type(),
            V::reflect_type(),
            self.iter()
                .map(|(key, value)| (key.reflect(), value.reflect()))
                .collect(),
        )
    }
}

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
    fn reflect_type() -> Type {
        Type::Map(Box::new(K::reflect_type()), Box::new(V::reflect_type()))
    }

    fn reflect(&self) -> Value {
        Value::map(
            K::reflect_type(),
            V::reflect_type(),
            self.iter()
                .map(|(key, value)| (key.reflect(), value.reflect()))
                .collect(),
        )
    }
}

macro_rules! reflect_pointer {
    ($($ptr:ident),* $(,)?) => {
        $(
            impl<T: Reflect> Reflect for $ptr<T> {
                fn reflect_type() -> Type {
                    Type::Ref(Box::new(T::reflect_type()))
                }

                fn reflect(&self) -> Value {
                    Value::Ref {
                        target: T::reflect_type(),
                        pointee: Some(Box::new((**self).reflect())),
                    }
                }
            }

            /// `None` is an unset pointer.
            impl<T: Reflect> Reflect for Option<$ptr<T>> {
                fn reflect_type() -> Type {
                    Type::Ref(Box::new(T::reflect_type()))
                }

                fn reflect(&self) -> Value {
                    match self {
                        Some(pointer) => pointer.reflect(),
                        None => Value::nil_pointer(T::reflect_type()),
                    }
                }
            }
        )*
    };
}

reflect_pointer!(Box, Rc, Arc);

impl Reflect for fn() {
    fn reflect_type() -> Type {
        Type::Func("fn()".into())
    }

    fn reflect(&self) -> Value {
        Value::func("fn()", *self as usize as u64)
    }
}

/// `None` is an unset function.
impl Reflect for Option<fn()> {
    fn reflect_type() -> Type {
        Type::Func("fn()".into())
    }

    fn reflect(&self) -> Value {
        match self {
            Some(func) => func.reflect(),
            None => Value::nil_func("fn()"),
        }
    }
}
