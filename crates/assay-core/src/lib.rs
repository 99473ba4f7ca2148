#![deny(missing_docs)]
#![doc = "Value model and comparison engine for the assay assertion toolkit."]

pub mod compare;
pub mod convert;
pub mod equality;
pub mod errors;
pub mod nil;
pub mod reflect;
pub mod value;

pub use compare::{compare, evaluate, Comparison, Outcome, Polarity};
pub use convert::convert;
pub use equality::{both_nan, deep_equal};
pub use errors::{AssayError, ErrorInfo};
pub use nil::is_nil_like;
pub use reflect::Reflect;
pub use value::{ChanHandle, FloatWidth, IntWidth, Kind, Type, Value};
