/// Transcoding error, returned by [`crate::transcode`] and every rule.
///
/// Two tiers:
/// - structural (`InvalidDestination`, `InvalidSource`): raised before any
///   destination field is written.
/// - value-level (`MalformedIdentifier`): raised mid-visit, earlier fields may
///   already be written. The operation is not transactional.
///
/// Unsupported kind pairs are not errors; they are skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranscodeError {
    #[error("invalid destination: {reason}")]
    InvalidDestination { reason: String },

    #[error("invalid source: {reason}")]
    InvalidSource { reason: String },

    #[error("malformed identifier: {raw_value:?} is not a 24-digit hex object id")]
    MalformedIdentifier { raw_value: String },
}

impl TranscodeError {
    pub fn invalid_destination(reason: impl Into<String>) -> Self {
        Self::InvalidDestination { reason: reason.into() }
    }

    pub fn invalid_source(reason: impl Into<String>) -> Self {
        Self::InvalidSource { reason: reason.into() }
    }

    pub fn malformed_identifier(raw_value: impl Into<String>) -> Self {
        Self::MalformedIdentifier { raw_value: raw_value.into() }
    }

    /// Structural errors leave the destination untouched.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::InvalidDestination { .. } | Self::InvalidSource { .. }
        )
    }

    /// Add context to the error, preserving the variant.
    ///
    /// Produces: `"context: original reason"`. `MalformedIdentifier` keeps its
    /// raw value verbatim and is returned unchanged.
    pub fn with_context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            Self::InvalidDestination { reason } => Self::InvalidDestination {
                reason: format!("{ctx}: {reason}"),
            },
            Self::InvalidSource { reason } => Self::InvalidSource {
                reason: format!("{ctx}: {reason}"),
            },
            other => other,
        }
    }
}
