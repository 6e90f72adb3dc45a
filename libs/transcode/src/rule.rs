//! The conversion table: `(source kind, destination kind) → Rule`.
//!
//! Closed and explicit. A pair missing from the table is skipped by the
//! transcoder; a new kind needs new entries here, nothing is discovered at
//! run time.
//!
//! Width changes within a scalar family happen on native destinations only:
//! `wrapper<int64> → int32` and `int64 → int32` cast, while
//! `wrapper<int64> → wrapper<int32>` has no rule and is skipped. Two wrapper
//! types are distinct wire messages; only the identical wrapper copies.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::TranscodeError;
use crate::kind::{Kind, ScalarKind};
use crate::object_id::ObjectId;
use crate::timestamp;
use crate::value::{Scalar, Value};

/// Pure conversion of one source value into the destination kind.
///
/// `Ok(None)`: the rule declines this particular value, treated as a skip.
pub type Rule = fn(Value, Kind) -> Result<Option<Value>, TranscodeError>;

/// Read-only after construction. Safe to share across threads.
pub struct RuleTable {
    rules: HashMap<(Kind, Kind), Rule>,
}

impl RuleTable {
    /// Process-wide table, built on first use.
    pub fn global() -> &'static RuleTable {
        static TABLE: OnceLock<RuleTable> = OnceLock::new();
        TABLE.get_or_init(RuleTable::build)
    }

    pub fn build() -> Self {
        let mut rules: HashMap<(Kind, Kind), Rule> = HashMap::new();

        for kind in Kind::all() {
            rules.insert((kind, kind), verbatim);
        }

        for from in ScalarKind::ALL {
            for to in ScalarKind::ALL {
                if from.family() != to.family() {
                    continue;
                }
                rules.insert((Kind::Wrapper(from), Kind::Native(to)), unwrap_scalar);
                rules.insert((Kind::Native(from), Kind::Wrapper(to)), box_scalar);
                if from != to {
                    rules.insert((Kind::Native(from), Kind::Native(to)), cast_scalar);
                }
            }
        }

        let text = ScalarKind::String;
        rules.insert((Kind::Wrapper(text), Kind::ObjectId), parse_object_id);
        rules.insert((Kind::Native(text), Kind::ObjectId), parse_object_id);
        rules.insert((Kind::ObjectId, Kind::Native(text)), render_object_id);
        rules.insert((Kind::ObjectId, Kind::Wrapper(text)), render_object_id);

        rules.insert((Kind::NativeTimestamp, Kind::WireTimestamp), native_to_wire_timestamp);
        rules.insert((Kind::WireTimestamp, Kind::NativeTimestamp), wire_to_native_timestamp);

        Self { rules }
    }

    pub fn lookup(&self, from: Kind, to: Kind) -> Option<Rule> {
        self.rules.get(&(from, to)).copied()
    }

    /// Every supported pair, sorted by display form.
    pub fn pairs(&self) -> Vec<(Kind, Kind)> {
        let mut pairs: Vec<(Kind, Kind)> = self.rules.keys().copied().collect();
        pairs.sort_by_key(|(from, to)| (from.to_string(), to.to_string()));
        pairs
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for RuleTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleTable").field("rules", &self.rules.len()).finish()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Rules
// ═══════════════════════════════════════════════════════════════

fn verbatim(value: Value, _to: Kind) -> Result<Option<Value>, TranscodeError> {
    Ok(Some(value))
}

fn unwrap_scalar(value: Value, to: Kind) -> Result<Option<Value>, TranscodeError> {
    Ok(match (value, to) {
        (Value::Wrapper(s), Kind::Native(kind)) => s.cast(kind).map(Value::Native),
        _ => None,
    })
}

fn box_scalar(value: Value, to: Kind) -> Result<Option<Value>, TranscodeError> {
    Ok(match (value, to) {
        (Value::Native(s), Kind::Wrapper(kind)) => s.cast(kind).map(Value::Wrapper),
        _ => None,
    })
}

fn cast_scalar(value: Value, to: Kind) -> Result<Option<Value>, TranscodeError> {
    Ok(match (value, to) {
        (Value::Native(s), Kind::Native(kind)) => s.cast(kind).map(Value::Native),
        _ => None,
    })
}

fn parse_object_id(value: Value, _to: Kind) -> Result<Option<Value>, TranscodeError> {
    match value {
        Value::Wrapper(Scalar::String(raw)) | Value::Native(Scalar::String(raw)) => {
            ObjectId::parse_hex(&raw).map(|id| Some(Value::ObjectId(id)))
        }
        _ => Ok(None),
    }
}

fn render_object_id(value: Value, to: Kind) -> Result<Option<Value>, TranscodeError> {
    Ok(match (value, to) {
        (Value::ObjectId(id), Kind::Native(ScalarKind::String)) => {
            Some(Value::Native(Scalar::String(id.to_hex())))
        }
        (Value::ObjectId(id), Kind::Wrapper(ScalarKind::String)) => {
            Some(Value::Wrapper(Scalar::String(id.to_hex())))
        }
        _ => None,
    })
}

fn native_to_wire_timestamp(value: Value, _to: Kind) -> Result<Option<Value>, TranscodeError> {
    Ok(match value {
        Value::NativeTimestamp(t) => Some(Value::WireTimestamp(timestamp::to_wire(&t))),
        _ => None,
    })
}

fn wire_to_native_timestamp(value: Value, _to: Kind) -> Result<Option<Value>, TranscodeError> {
    Ok(match value {
        Value::WireTimestamp(ts) => {
            let native = timestamp::from_wire(&ts);
            if native.is_none() {
                tracing::warn!(seconds = ts.seconds, nanos = ts.nanos, "wire timestamp out of range, skipping");
            }
            native.map(Value::NativeTimestamp)
        }
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(value: Value, to: Kind) -> Result<Option<Value>, TranscodeError> {
        let rule = RuleTable::global()
            .lookup(value.kind(), to)
            .expect("rule should exist");
        rule(value, to)
    }

    #[test]
    fn test_wrapper_string_to_native_string() {
        let out = convert(Value::Wrapper(Scalar::String("org".into())), Kind::Native(ScalarKind::String));
        assert_eq!(out, Ok(Some(Value::Native(Scalar::String("org".into())))));
    }

    #[test]
    fn test_native_string_to_wrapper() {
        let out = convert(Value::Native(Scalar::String("group".into())), Kind::Wrapper(ScalarKind::String));
        assert_eq!(out, Ok(Some(Value::Wrapper(Scalar::String("group".into())))));
    }

    #[test]
    fn test_string_to_object_id() {
        let hex = "5dbba1e31fd96208db5a00a1";
        let expected = Value::ObjectId(ObjectId::parse_hex(hex).unwrap());
        for source in [Value::Wrapper(Scalar::String(hex.into())), Value::Native(Scalar::String(hex.into()))] {
            assert_eq!(convert(source, Kind::ObjectId), Ok(Some(expected.clone())));
        }
    }

    #[test]
    fn test_malformed_string_to_object_id_fails() {
        let out = convert(Value::Native(Scalar::String("not-hex!".into())), Kind::ObjectId);
        assert_eq!(out, Err(TranscodeError::MalformedIdentifier { raw_value: "not-hex!".into() }));
    }

    #[test]
    fn test_object_id_to_strings() {
        let id = ObjectId::from_bytes([0xab; ObjectId::LEN]);
        let hex = "abababababababababababab".to_string();
        assert_eq!(
            convert(Value::ObjectId(id), Kind::Native(ScalarKind::String)),
            Ok(Some(Value::Native(Scalar::String(hex.clone()))))
        );
        assert_eq!(
            convert(Value::ObjectId(id), Kind::Wrapper(ScalarKind::String)),
            Ok(Some(Value::Wrapper(Scalar::String(hex))))
        );
    }

    #[test]
    fn test_wrapper_int64_into_int32_truncates() {
        let out = convert(Value::Wrapper(Scalar::Int64(4_294_967_296)), Kind::Native(ScalarKind::Int32));
        assert_eq!(out, Ok(Some(Value::Native(Scalar::Int32(0)))));
    }

    #[test]
    fn test_native_float64_into_float_wrapper() {
        let out = convert(Value::Native(Scalar::Float64(5.5)), Kind::Wrapper(ScalarKind::Float32));
        assert_eq!(out, Ok(Some(Value::Wrapper(Scalar::Float32(5.5)))));
    }

    #[test]
    fn test_timestamps_both_directions() {
        let native = chrono::DateTime::from_timestamp(1_572_577_763, 250_000_000).unwrap();
        let wire = convert(Value::NativeTimestamp(native), Kind::WireTimestamp).unwrap().unwrap();
        assert_eq!(convert(wire, Kind::NativeTimestamp), Ok(Some(Value::NativeTimestamp(native))));
    }

    #[test]
    fn test_out_of_range_wire_timestamp_is_declined() {
        let wire = Value::WireTimestamp(prost_types::Timestamp { seconds: i64::MAX, nanos: 0 });
        assert_eq!(convert(wire, Kind::NativeTimestamp), Ok(None));
    }

    #[test]
    fn test_unsupported_pairs_have_no_rule() {
        let table = RuleTable::global();
        let missing = [
            (Kind::Native(ScalarKind::Int64), Kind::Native(ScalarKind::Float64)),
            // wrapper to wrapper casts nothing, even inside a family
            (Kind::Wrapper(ScalarKind::Int64), Kind::Wrapper(ScalarKind::Int32)),
            (Kind::Wrapper(ScalarKind::Float32), Kind::Wrapper(ScalarKind::Float64)),
            (Kind::Wrapper(ScalarKind::Bool), Kind::Native(ScalarKind::String)),
            (Kind::ObjectId, Kind::Native(ScalarKind::Int64)),
            (Kind::NativeTimestamp, Kind::Native(ScalarKind::Int64)),
            (Kind::WireTimestamp, Kind::Native(ScalarKind::String)),
        ];
        for (from, to) in missing {
            assert!(table.lookup(from, to).is_none(), "{from} -> {to} should be unsupported");
        }
    }

    #[test]
    fn test_every_wrapper_has_a_rule_in_both_directions() {
        let table = RuleTable::global();
        for kind in ScalarKind::ALL {
            assert!(table.lookup(Kind::Wrapper(kind), Kind::Native(kind)).is_some());
            assert!(table.lookup(Kind::Native(kind), Kind::Wrapper(kind)).is_some());
        }
    }

    #[test]
    fn test_table_size() {
        // 19 identities, wrapper→native and native→wrapper per same-family
        // pair (1 + 16 + 4 + 1 = 22 each), 22 - 8 native→native casts,
        // 4 identifier rules, 2 timestamp rules.
        assert_eq!(RuleTable::global().len(), 19 + 22 + 22 + 14 + 4 + 2);
        assert_eq!(RuleTable::global().pairs().len(), RuleTable::global().len());
    }
}
