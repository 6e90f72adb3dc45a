//! [`Record`], the contract a flat struct satisfies to take part in
//! transcoding, and [`FieldValue`], which classifies each field type into a
//! [`Kind`].
//!
//! Both are normally implemented by `#[derive(Record)]`.
//!
//! # Derive limits
//!
//! Only non-generic structs with named fields derive. Fields of other types
//! must be skipped:
//!
//! ```rust
//! use transcode::Record;
//!
//! #[derive(Record)]
//! struct Tagged {
//!     name: String,
//!     #[transcode(skip)]
//!     tags: Vec<String>,
//! }
//! ```
//!
//! ```compile_fail
//! use transcode::Record;
//!
//! #[derive(Record)]
//! struct Tagged {
//!     name: String,
//!     tags: Vec<String>,
//! }
//! ```
//!
//! ```compile_fail
//! use transcode::Record;
//!
//! #[derive(Record)]
//! struct Pair<T> {
//!     left: T,
//! }
//! ```
//!
//! ```compile_fail
//! use transcode::Record;
//!
//! #[derive(Record)]
//! struct Code(String);
//! ```
//!
//! ```compile_fail
//! use transcode::Record;
//!
//! #[derive(Record)]
//! enum State {
//!     Open,
//!     Closed,
//! }
//! ```
//!
//! Two fields may not share a matching name:
//!
//! ```compile_fail
//! use transcode::Record;
//!
//! #[derive(Record)]
//! struct Titled {
//!     name: String,
//!     #[transcode(rename = "name")]
//!     title: String,
//! }
//! ```
//!
//! Only `rename` and `skip` are understood:
//!
//! ```compile_fail
//! use transcode::Record;
//!
//! #[derive(Record)]
//! struct Nested {
//!     #[transcode(flatten)]
//!     name: String,
//! }
//! ```

use chrono::{DateTime, Utc};

use crate::error::TranscodeError;
use crate::kind::{Kind, ScalarKind};
use crate::object_id::ObjectId;
use crate::schema::Schema;
use crate::value::{Scalar, Value};
use crate::wrappers::{
    BoolValue, DoubleValue, FloatValue, Int32Value, Int64Value, StringValue, UInt32Value,
    UInt64Value,
};

/// A structured value with named, kinded fields.
///
/// Object-safe: the transcoder works on `&dyn Record` / `&mut dyn Record`.
///
/// # Examples
///
/// ```rust
/// use transcode::{Record, wrappers::StringValue};
///
/// #[derive(Default, Record)]
/// struct Request {
///     id: Option<StringValue>,
///     name: String,
/// }
///
/// let req = Request::default();
/// assert_eq!(req.schema().len(), 2);
/// ```
pub trait Record {
    /// Declared structure. Same `'static` instance for every value of a type.
    fn schema(&self) -> &'static Schema;

    /// Current value of field `index`, dereferenced out of `Option`.
    ///
    /// `None` for an absent nullable field or an unknown index.
    fn field(&self, index: usize) -> Option<Value>;

    /// Overwrite field `index`.
    ///
    /// A value the field cannot hold is `InvalidDestination`; the field is
    /// left untouched.
    fn set_field(&mut self, index: usize, value: Value) -> Result<(), TranscodeError>;
}

/// A Rust type usable as a record field.
pub trait FieldValue: Sized {
    /// Declared kind. For `Option<T>`, the kind of `T`.
    const KIND: Kind;

    /// `true` for `Option<T>`.
    const NULLABLE: bool = false;

    fn to_value(&self) -> Option<Value>;

    /// `None` if `value` is not of this type's kind.
    fn from_value(value: Value) -> Option<Self>;
}

impl<T: FieldValue> FieldValue for Option<T> {
    const KIND: Kind = T::KIND;
    const NULLABLE: bool = true;

    fn to_value(&self) -> Option<Value> {
        self.as_ref().and_then(T::to_value)
    }

    fn from_value(value: Value) -> Option<Self> {
        T::from_value(value).map(Some)
    }
}

macro_rules! native_field {
    ($ty:ty, $scalar:ident) => {
        impl FieldValue for $ty {
            const KIND: Kind = Kind::Native(ScalarKind::$scalar);

            fn to_value(&self) -> Option<Value> {
                Some(Value::Native(Scalar::$scalar(self.clone())))
            }

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::Native(Scalar::$scalar(v)) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

native_field!(String, String);
native_field!(i64, Int64);
native_field!(i32, Int32);
native_field!(u64, UInt64);
native_field!(u32, UInt32);
native_field!(f64, Float64);
native_field!(f32, Float32);
native_field!(bool, Bool);

macro_rules! wrapper_field {
    ($ty:ty, $scalar:ident) => {
        impl FieldValue for $ty {
            const KIND: Kind = Kind::Wrapper(ScalarKind::$scalar);

            fn to_value(&self) -> Option<Value> {
                Some(Value::Wrapper(Scalar::$scalar(self.value.clone())))
            }

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::Wrapper(Scalar::$scalar(value)) => Some(Self { value }),
                    _ => None,
                }
            }
        }
    };
}

wrapper_field!(StringValue, String);
wrapper_field!(Int64Value, Int64);
wrapper_field!(Int32Value, Int32);
wrapper_field!(UInt64Value, UInt64);
wrapper_field!(UInt32Value, UInt32);
wrapper_field!(DoubleValue, Float64);
wrapper_field!(FloatValue, Float32);
wrapper_field!(BoolValue, Bool);

impl FieldValue for ObjectId {
    const KIND: Kind = Kind::ObjectId;

    fn to_value(&self) -> Option<Value> {
        Some(Value::ObjectId(*self))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::ObjectId(id) => Some(id),
            _ => None,
        }
    }
}

impl FieldValue for prost_types::Timestamp {
    const KIND: Kind = Kind::WireTimestamp;

    fn to_value(&self) -> Option<Value> {
        Some(Value::WireTimestamp(self.clone()))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::WireTimestamp(ts) => Some(ts),
            _ => None,
        }
    }
}

impl FieldValue for DateTime<Utc> {
    const KIND: Kind = Kind::NativeTimestamp;

    fn to_value(&self) -> Option<Value> {
        Some(Value::NativeTimestamp(*self))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::NativeTimestamp(t) => Some(t),
            _ => None,
        }
    }
}

/// Helper for `set_field` implementations: convert `value` into the field
/// type or report the mismatch as `InvalidDestination`.
pub fn assign<T: FieldValue>(
    slot: &mut T,
    value: Value,
    record: &str,
    field: &str,
) -> Result<(), TranscodeError> {
    let found = value.kind();
    let converted = T::from_value(value).ok_or_else(|| {
        TranscodeError::invalid_destination(format!(
            "{record}.{field} declared as {} cannot hold {found}",
            T::KIND
        ))
    })?;
    *slot = converted;
    Ok(())
}
