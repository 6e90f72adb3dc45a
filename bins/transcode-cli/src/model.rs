//! Material-group records: the domain model, its save request and the
//! list-item model.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use prost::Message;
use serde::{Deserialize, Serialize};
use transcode::wrappers::{
    BoolValue, DoubleValue, FloatValue, Int32Value, Int64Value, StringValue, UInt32Value,
    UInt64Value,
};
use transcode::{ObjectId, Record, Schema};

use crate::config::OutputFormat;
use crate::error::CliError;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, Record)]
#[serde(default)]
pub struct MaterialGroup {
    pub org_id: String,
    pub name: String,
    pub id: Option<ObjectId>,
    pub r#type: String,
    pub user_id: String,
    pub scope: String,
    pub story_point: f64,
    pub point: f32,
    pub is_valid: bool,
    pub it: i32,
    pub ut32: u32,
    pub ut64: u64,
    pub order: i64,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

#[derive(Clone, PartialEq, Message, Serialize, Deserialize, Record)]
#[serde(default)]
pub struct SaveMaterialGroupRequest {
    #[prost(message, optional, tag = "1")]
    pub id: Option<StringValue>,
    #[prost(string, tag = "2")]
    pub org_id: String,
    #[prost(message, optional, tag = "3")]
    pub is_valid: Option<BoolValue>,
    #[prost(message, optional, tag = "4")]
    pub it: Option<Int32Value>,
    #[prost(message, optional, tag = "5")]
    pub ut32: Option<UInt32Value>,
    #[prost(message, optional, tag = "6")]
    pub ut64: Option<UInt64Value>,
    #[prost(message, optional, tag = "7")]
    pub story_point: Option<DoubleValue>,
    #[prost(message, optional, tag = "8")]
    pub point: Option<FloatValue>,
    #[prost(string, tag = "9")]
    pub name: String,
    #[prost(message, optional, tag = "10")]
    pub r#type: Option<StringValue>,
    #[prost(message, optional, tag = "11")]
    pub scope: Option<StringValue>,
    #[prost(message, optional, tag = "12")]
    pub user_id: Option<StringValue>,
    #[prost(message, optional, tag = "13")]
    pub order: Option<Int64Value>,
    #[prost(message, optional, tag = "14")]
    #[serde(with = "transcode::timestamp::serde_wire")]
    pub update_time: Option<prost_types::Timestamp>,
    #[prost(message, optional, tag = "15")]
    #[serde(with = "transcode::timestamp::serde_wire")]
    pub create_time: Option<prost_types::Timestamp>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, Record)]
#[serde(default)]
pub struct MaterialGroupModel {
    pub id: String,
    pub name: String,
}

// ═══════════════════════════════════════════════════════════════
//  Type-erased record selection
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordName {
    MaterialGroup,
    SaveMaterialGroupRequest,
    MaterialGroupModel,
}

impl RecordName {
    pub fn schema(self) -> &'static Schema {
        match self {
            Self::MaterialGroup => MaterialGroup::record_schema(),
            Self::SaveMaterialGroupRequest => SaveMaterialGroupRequest::record_schema(),
            Self::MaterialGroupModel => MaterialGroupModel::record_schema(),
        }
    }

    pub fn as_str(self) -> &'static str {
        self.schema().name()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnyRecord {
    MaterialGroup(MaterialGroup),
    SaveMaterialGroupRequest(SaveMaterialGroupRequest),
    MaterialGroupModel(MaterialGroupModel),
}

impl AnyRecord {
    pub fn empty(name: RecordName) -> Self {
        match name {
            RecordName::MaterialGroup => Self::MaterialGroup(MaterialGroup::default()),
            RecordName::SaveMaterialGroupRequest => {
                Self::SaveMaterialGroupRequest(SaveMaterialGroupRequest::default())
            }
            RecordName::MaterialGroupModel => Self::MaterialGroupModel(MaterialGroupModel::default()),
        }
    }

    pub fn from_json(name: RecordName, json: &str) -> Result<Self, CliError> {
        let parse_err = |source| CliError::Parse { record: name.as_str(), source };
        Ok(match name {
            RecordName::MaterialGroup => Self::MaterialGroup(serde_json::from_str(json).map_err(parse_err)?),
            RecordName::SaveMaterialGroupRequest => {
                Self::SaveMaterialGroupRequest(serde_json::from_str(json).map_err(parse_err)?)
            }
            RecordName::MaterialGroupModel => {
                Self::MaterialGroupModel(serde_json::from_str(json).map_err(parse_err)?)
            }
        })
    }

    pub fn as_record(&self) -> &dyn Record {
        match self {
            Self::MaterialGroup(r) => r,
            Self::SaveMaterialGroupRequest(r) => r,
            Self::MaterialGroupModel(r) => r,
        }
    }

    pub fn as_record_mut(&mut self) -> &mut dyn Record {
        match self {
            Self::MaterialGroup(r) => r,
            Self::SaveMaterialGroupRequest(r) => r,
            Self::MaterialGroupModel(r) => r,
        }
    }

    pub fn name(&self) -> &'static str {
        self.as_record().schema().name()
    }

    pub fn render(&self, format: OutputFormat, pretty: bool) -> Result<String, CliError> {
        match format {
            OutputFormat::Json => {
                let json = match self {
                    Self::MaterialGroup(r) => to_json(r, pretty)?,
                    Self::SaveMaterialGroupRequest(r) => to_json(r, pretty)?,
                    Self::MaterialGroupModel(r) => to_json(r, pretty)?,
                };
                Ok(json)
            }
            OutputFormat::Debug => Ok(match self {
                Self::MaterialGroup(r) => format!("{r:#?}"),
                Self::SaveMaterialGroupRequest(r) => format!("{r:#?}"),
                Self::MaterialGroupModel(r) => format!("{r:#?}"),
            }),
            OutputFormat::Protobuf => match self {
                Self::SaveMaterialGroupRequest(r) => Ok(hex::encode(r.encode_to_vec())),
                other => Err(CliError::UnsupportedOutput { format: format.as_str(), record: other.name() }),
            },
        }
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEX: &str = "5dbba1e31fd96208db5a00a1";

    #[test]
    fn test_request_json_with_missing_fields() {
        let json = format!(r#"{{"id":"{HEX}","name":"test","order":66,"update_time":"2019-11-01T03:09:23Z"}}"#);
        let AnyRecord::SaveMaterialGroupRequest(req) =
            AnyRecord::from_json(RecordName::SaveMaterialGroupRequest, &json).unwrap()
        else {
            panic!("wrong variant");
        };
        assert_eq!(req.id, Some(StringValue::from(HEX)));
        assert_eq!(req.order, Some(Int64Value::new(66)));
        assert_eq!(req.is_valid, None);
        assert_eq!(
            req.update_time,
            Some(prost_types::Timestamp { seconds: 1_572_577_763, nanos: 0 })
        );
        assert_eq!(req.create_time, None);
    }

    #[test]
    fn test_bad_json_names_the_record() {
        let err = AnyRecord::from_json(RecordName::MaterialGroup, "{\"id\": \"zz\"}").unwrap_err();
        assert!(err.to_string().starts_with("MaterialGroup:"), "{err}");
    }

    #[test]
    fn test_protobuf_output_only_for_request() {
        let req = AnyRecord::SaveMaterialGroupRequest(SaveMaterialGroupRequest {
            order: Some(Int64Value::new(66)),
            ..Default::default()
        });
        // field 13, length-delimited, 2 bytes: {field 1 varint 66}
        assert_eq!(req.render(OutputFormat::Protobuf, false).unwrap(), "6a020842");

        let err = AnyRecord::empty(RecordName::MaterialGroupModel)
            .render(OutputFormat::Protobuf, false)
            .unwrap_err();
        assert!(matches!(err, CliError::UnsupportedOutput { record: "MaterialGroupModel", .. }));
    }

    #[test]
    fn test_model_json_output() {
        let model = AnyRecord::MaterialGroupModel(MaterialGroupModel { id: HEX.into(), name: "test".into() });
        assert_eq!(
            model.render(OutputFormat::Json, false).unwrap(),
            format!(r#"{{"id":"{HEX}","name":"test"}}"#)
        );
    }

    #[test]
    fn test_schema_names() {
        assert_eq!(RecordName::MaterialGroup.as_str(), "MaterialGroup");
        assert_eq!(RecordName::SaveMaterialGroupRequest.schema().len(), 15);
        assert_eq!(RecordName::MaterialGroupModel.schema().len(), 2);
    }
}
