use crate::error::TranscodeError;
use crate::record::Record;

/// A handle passed to [`crate::Transcoder::transcode`].
///
/// Lets type-erased callers hand over whatever they hold and have the
/// structural preconditions checked at run time:
/// - destination: `RecordMut` only.
/// - source: `Record`, `RecordMut`, or a `Ref` to one of them. `Ref` is
///   followed exactly once.
pub enum Operand<'a> {
    Record(&'a dyn Record),
    RecordMut(&'a mut dyn Record),
    /// One level of indirection to another operand.
    Ref(&'a Operand<'a>),
    /// Something that is not a record.
    Opaque { type_name: &'static str },
}

impl<'a> Operand<'a> {
    pub fn record(record: &'a dyn Record) -> Self {
        Operand::Record(record)
    }

    pub fn record_mut(record: &'a mut dyn Record) -> Self {
        Operand::RecordMut(record)
    }

    pub fn reference(operand: &'a Operand<'a>) -> Self {
        Operand::Ref(operand)
    }

    pub fn opaque<T: ?Sized>(_value: &T) -> Self {
        Operand::Opaque {
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Short description for error reasons.
    pub fn describe(&self) -> String {
        match self {
            Operand::Record(r) => format!("shared record `{}`", r.schema().name()),
            Operand::RecordMut(r) => format!("mutable record `{}`", r.schema().name()),
            Operand::Ref(inner) => format!("reference to {}", inner.describe()),
            Operand::Opaque { type_name } => format!("non-record `{type_name}`"),
        }
    }

    pub(crate) fn into_destination(self) -> Result<&'a mut dyn Record, TranscodeError> {
        match self {
            Operand::RecordMut(r) => Ok(r),
            other => Err(TranscodeError::invalid_destination(format!(
                "expected a mutable record, found {}",
                other.describe()
            ))),
        }
    }

    pub(crate) fn as_source(&self) -> Result<&dyn Record, TranscodeError> {
        match self {
            Operand::Record(r) => Ok(*r),
            Operand::RecordMut(r) => Ok(&**r),
            Operand::Ref(inner) => match inner {
                Operand::Record(r) => Ok(*r),
                Operand::RecordMut(r) => Ok(&**r),
                other => Err(TranscodeError::invalid_source(format!(
                    "expected a record behind the reference, found {}",
                    other.describe()
                ))),
            },
            Operand::Opaque { .. } => Err(TranscodeError::invalid_source(format!(
                "expected a record or a reference to one, found {}",
                self.describe()
            ))),
        }
    }
}

impl std::fmt::Debug for Operand<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}
