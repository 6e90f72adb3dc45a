use std::sync::OnceLock;

use crate::error::TranscodeError;
use crate::mapping::FieldMapCache;
use crate::operand::Operand;
use crate::record::Record;
use crate::rule::RuleTable;

/// Copies same-named fields from a source record into a destination record,
/// converting each value through the [`RuleTable`].
///
/// Per destination field, in declared order:
/// 1. no same-named source field → skip;
/// 2. source field absent (`None`) → skip;
/// 3. no rule for (source value kind, destination kind) → skip;
/// 4. rule error → abort, earlier writes stay.
///
/// Shallow, one level. Not transactional: to get all-or-nothing, transcode
/// into a clone and swap it in on success.
#[derive(Debug)]
pub struct Transcoder {
    rules: &'static RuleTable,
    maps: FieldMapCache,
}

impl Default for Transcoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcoder {
    pub fn new() -> Self {
        Self::with_rules(RuleTable::global())
    }

    pub fn with_rules(rules: &'static RuleTable) -> Self {
        Self {
            rules,
            maps: FieldMapCache::new(),
        }
    }

    /// Process-wide instance used by [`crate::transcode`].
    pub fn global() -> &'static Transcoder {
        static TRANSCODER: OnceLock<Transcoder> = OnceLock::new();
        TRANSCODER.get_or_init(Transcoder::new)
    }

    pub fn rules(&self) -> &'static RuleTable {
        self.rules
    }

    /// Handle-based entry point. Structural preconditions are checked before
    /// anything is written.
    pub fn transcode(&self, destination: Operand<'_>, source: Operand<'_>) -> Result<(), TranscodeError> {
        let source = source.as_source()?;
        let destination = destination.into_destination()?;
        self.copy_fields(destination, source)
    }

    /// Typed entry point.
    pub fn copy<D, S>(&self, destination: &mut D, source: &S) -> Result<(), TranscodeError>
    where
        D: Record,
        S: Record,
    {
        self.copy_fields(destination, source)
    }

    fn copy_fields(&self, destination: &mut dyn Record, source: &dyn Record) -> Result<(), TranscodeError> {
        let map = self.maps.get_or_build(destination.schema(), source.schema());

        for link in map.links() {
            let Some(value) = source.field(link.source) else {
                tracing::trace!(field = link.name, "source field absent, skipping");
                continue;
            };

            let source_kind = value.kind();
            let Some(rule) = self.rules.lookup(source_kind, link.target_kind) else {
                tracing::trace!(
                    field = link.name,
                    from = %source_kind,
                    to = %link.target_kind,
                    "no conversion rule, skipping"
                );
                continue;
            };

            let converted = rule(value, link.target_kind).inspect_err(|e| {
                tracing::debug!(
                    target_schema = map.target_name(),
                    source_schema = map.source_name(),
                    field = link.name,
                    error = %e,
                    "conversion failed"
                );
            })?;

            match converted {
                Some(value) => {
                    destination
                        .set_field(link.target, value)
                        .map_err(|e| e.with_context(format!("field `{}`", link.name)))?;
                    tracing::trace!(field = link.name, from = %source_kind, to = %link.target_kind, "copied");
                }
                None => {
                    tracing::trace!(field = link.name, "rule declined value, skipping");
                }
            }
        }

        Ok(())
    }
}

/// Copy matching fields of `source` into `destination` with the process-wide
/// [`Transcoder`].
///
/// Type-erased callers use [`Transcoder::transcode`] with [`Operand`]s.
pub fn transcode<D, S>(destination: &mut D, source: &S) -> Result<(), TranscodeError>
where
    D: Record,
    S: Record,
{
    Transcoder::global().copy(destination, source)
}
