// ════════════════════════════════════════════════════════════════
//  Scalar Kind
// ════════════════════════════════════════════════════════════════

/// Native scalar kinds. Also the payload kind of a nullable wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Int64,
    Int32,
    UInt64,
    UInt32,
    Float64,
    Float32,
    Bool,
}

/// Scalars convert only inside their family. Width inside a family is
/// decided by the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarFamily {
    Text,
    Integer,
    Float,
    Bool,
}

impl ScalarKind {
    pub const ALL: [ScalarKind; 8] = [
        ScalarKind::String,
        ScalarKind::Int64,
        ScalarKind::Int32,
        ScalarKind::UInt64,
        ScalarKind::UInt32,
        ScalarKind::Float64,
        ScalarKind::Float32,
        ScalarKind::Bool,
    ];

    pub fn family(self) -> ScalarFamily {
        match self {
            ScalarKind::String => ScalarFamily::Text,
            ScalarKind::Int64 | ScalarKind::Int32 | ScalarKind::UInt64 | ScalarKind::UInt32 => {
                ScalarFamily::Integer
            }
            ScalarKind::Float64 | ScalarKind::Float32 => ScalarFamily::Float,
            ScalarKind::Bool => ScalarFamily::Bool,
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self.family(), ScalarFamily::Integer | ScalarFamily::Float)
    }
}

impl std::fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarKind::String => write!(f, "string"),
            ScalarKind::Int64 => write!(f, "int64"),
            ScalarKind::Int32 => write!(f, "int32"),
            ScalarKind::UInt64 => write!(f, "uint64"),
            ScalarKind::UInt32 => write!(f, "uint32"),
            ScalarKind::Float64 => write!(f, "float64"),
            ScalarKind::Float32 => write!(f, "float32"),
            ScalarKind::Bool => write!(f, "bool"),
        }
    }
}

// ════════════════════════════════════════════════════════════════
//  Representation Kind
// ════════════════════════════════════════════════════════════════

/// Representation kind of a record field, the dispatch key of the rule
/// table.
///
/// Nullability is not part of the kind: an `Option<T>` field has the kind of
/// `T` and is dereferenced before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `String`, `i64`, `bool`, ...
    Native(ScalarKind),
    /// Single-field box (`StringValue`, `Int64Value`, ...). Distinguishes
    /// "unset" from "zero" on the wire.
    Wrapper(ScalarKind),
    /// 12-byte binary identifier, rendered as lowercase hex.
    ObjectId,
    /// `prost_types::Timestamp`.
    WireTimestamp,
    /// `chrono::DateTime<Utc>`.
    NativeTimestamp,
}

impl Kind {
    /// Every kind the rule table knows about.
    pub fn all() -> impl Iterator<Item = Kind> {
        ScalarKind::ALL
            .into_iter()
            .map(Kind::Native)
            .chain(ScalarKind::ALL.into_iter().map(Kind::Wrapper))
            .chain([Kind::ObjectId, Kind::WireTimestamp, Kind::NativeTimestamp])
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Native(s) => write!(f, "{s}"),
            Kind::Wrapper(s) => write!(f, "wrapper<{s}>"),
            Kind::ObjectId => write!(f, "object_id"),
            Kind::WireTimestamp => write!(f, "wire_timestamp"),
            Kind::NativeTimestamp => write!(f, "timestamp"),
        }
    }
}
