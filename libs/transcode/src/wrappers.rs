//! Nullable scalar wrappers (`google.protobuf.*Value`).
//!
//! Wire records hold them as `Option<Wrapper>`: `None` is "unset", which
//! a plain scalar cannot express. Each wrapper is a one-field prost message
//! and serialises to JSON as its bare inner value.

use serde::{Deserialize, Serialize};

macro_rules! wrapper {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $proto:ident) => {
        $(#[$doc])*
        #[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name {
            #[prost($proto, tag = "1")]
            pub value: $ty,
        }

        impl $name {
            pub fn new(value: impl Into<$ty>) -> Self {
                Self { value: value.into() }
            }
        }

        impl From<$ty> for $name {
            fn from(value: $ty) -> Self {
                Self { value }
            }
        }
    };
}

wrapper!(
    /// `google.protobuf.StringValue`.
    StringValue, String, string
);
wrapper!(
    /// `google.protobuf.Int64Value`.
    Int64Value, i64, int64
);
wrapper!(
    /// `google.protobuf.Int32Value`.
    Int32Value, i32, int32
);
wrapper!(
    /// `google.protobuf.UInt64Value`.
    UInt64Value, u64, uint64
);
wrapper!(
    /// `google.protobuf.UInt32Value`.
    UInt32Value, u32, uint32
);
wrapper!(
    /// `google.protobuf.DoubleValue`.
    DoubleValue, f64, double
);
wrapper!(
    /// `google.protobuf.FloatValue`.
    FloatValue, f32, float
);
wrapper!(
    /// `google.protobuf.BoolValue`.
    BoolValue, bool, bool
);

impl From<&str> for StringValue {
    fn from(value: &str) -> Self {
        Self { value: value.to_string() }
    }
}
