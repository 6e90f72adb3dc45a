use chrono::{DateTime, Utc};

use crate::kind::{Kind, ScalarKind};
use crate::object_id::ObjectId;

/// Scalar payload of a native field or of a nullable wrapper.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Int64(i64),
    Int32(i32),
    UInt64(u64),
    UInt32(u32),
    Float64(f64),
    Float32(f32),
    Bool(bool),
}

impl Scalar {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::String(_) => ScalarKind::String,
            Scalar::Int64(_) => ScalarKind::Int64,
            Scalar::Int32(_) => ScalarKind::Int32,
            Scalar::UInt64(_) => ScalarKind::UInt64,
            Scalar::UInt32(_) => ScalarKind::UInt32,
            Scalar::Float64(_) => ScalarKind::Float64,
            Scalar::Float32(_) => ScalarKind::Float32,
            Scalar::Bool(_) => ScalarKind::Bool,
        }
    }

    /// Re-type to `to`, trusting the target width.
    ///
    /// Integers go through `as` (narrowing truncates, signedness
    /// reinterprets), floats likewise. Crossing families returns `None`.
    pub fn cast(self, to: ScalarKind) -> Option<Scalar> {
        if self.kind() == to {
            return Some(self);
        }
        match self {
            Scalar::Int64(v) => cast_integer(v as i128, to),
            Scalar::Int32(v) => cast_integer(v as i128, to),
            Scalar::UInt64(v) => cast_integer(v as i128, to),
            Scalar::UInt32(v) => cast_integer(v as i128, to),
            Scalar::Float64(v) => cast_float(v, to),
            Scalar::Float32(v) => cast_float(v as f64, to),
            Scalar::String(_) | Scalar::Bool(_) => None,
        }
    }
}

fn cast_integer(v: i128, to: ScalarKind) -> Option<Scalar> {
    match to {
        ScalarKind::Int64 => Some(Scalar::Int64(v as i64)),
        ScalarKind::Int32 => Some(Scalar::Int32(v as i32)),
        ScalarKind::UInt64 => Some(Scalar::UInt64(v as u64)),
        ScalarKind::UInt32 => Some(Scalar::UInt32(v as u32)),
        _ => None,
    }
}

fn cast_float(v: f64, to: ScalarKind) -> Option<Scalar> {
    match to {
        ScalarKind::Float64 => Some(Scalar::Float64(v)),
        ScalarKind::Float32 => Some(Scalar::Float32(v as f32)),
        _ => None,
    }
}

/// Runtime value of one record field, already dereferenced out of any
/// nullable reference.
///
/// One variant per [`Kind`]. The variant is what the rule table dispatches
/// on, not the field's declared kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Native(Scalar),
    Wrapper(Scalar),
    ObjectId(ObjectId),
    WireTimestamp(prost_types::Timestamp),
    NativeTimestamp(DateTime<Utc>),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Native(s) => Kind::Native(s.kind()),
            Value::Wrapper(s) => Kind::Wrapper(s.kind()),
            Value::ObjectId(_) => Kind::ObjectId,
            Value::WireTimestamp(_) => Kind::WireTimestamp,
            Value::NativeTimestamp(_) => Kind::NativeTimestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrowing_truncates_silently() {
        assert_eq!(Scalar::Int64(4_294_967_296).cast(ScalarKind::Int32), Some(Scalar::Int32(0)));
        assert_eq!(Scalar::Int64(4_294_967_297).cast(ScalarKind::UInt32), Some(Scalar::UInt32(1)));
    }

    #[test]
    fn test_sign_reinterpretation() {
        assert_eq!(Scalar::Int32(-1).cast(ScalarKind::UInt32), Some(Scalar::UInt32(u32::MAX)));
        assert_eq!(Scalar::UInt64(u64::MAX).cast(ScalarKind::Int64), Some(Scalar::Int64(-1)));
    }

    #[test]
    fn test_widening_preserves_value() {
        assert_eq!(Scalar::Int32(-66).cast(ScalarKind::Int64), Some(Scalar::Int64(-66)));
        assert_eq!(Scalar::Float32(5.5).cast(ScalarKind::Float64), Some(Scalar::Float64(5.5)));
    }

    #[test]
    fn test_cross_family_cast_is_rejected() {
        assert_eq!(Scalar::Int64(1).cast(ScalarKind::Float64), None);
        assert_eq!(Scalar::Bool(true).cast(ScalarKind::Int32), None);
        assert_eq!(Scalar::String("1".into()).cast(ScalarKind::Int64), None);
    }

    #[test]
    fn test_value_kind() {
        assert_eq!(Value::Wrapper(Scalar::Bool(true)).kind(), Kind::Wrapper(ScalarKind::Bool));
        assert_eq!(
            Value::Native(Scalar::String(String::new())).kind(),
            Kind::Native(ScalarKind::String)
        );
    }
}
