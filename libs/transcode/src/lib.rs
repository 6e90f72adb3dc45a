//! # transcode
//!
//! Copies same-named fields between structurally unrelated flat records,
//! converting each value to the destination field's representation. The
//! usual pair is a wire record (nullable wrappers, string ids, wire
//! timestamps) and a domain record (native scalars, binary ids, native
//! timestamps).
//!
//! ```rust
//! use transcode::{ObjectId, Record, transcode, wrappers::StringValue};
//!
//! #[derive(Default, Record)]
//! struct Request {
//!     id: Option<StringValue>,
//!     name: String,
//! }
//!
//! #[derive(Default, Record)]
//! struct Group {
//!     id: Option<ObjectId>,
//!     name: String,
//! }
//!
//! let req = Request {
//!     id: Some(StringValue::from("5dbba1e31fd96208db5a00a1")),
//!     name: "test".into(),
//! };
//! let mut group = Group::default();
//! transcode(&mut group, &req).unwrap();
//! assert_eq!(group.id.unwrap().to_hex(), "5dbba1e31fd96208db5a00a1");
//! ```

extern crate self as transcode;

pub mod error;
pub mod kind;
pub mod mapping;
pub mod object_id;
pub mod operand;
pub mod record;
pub mod rule;
pub mod schema;
pub mod timestamp;
pub mod transcoder;
pub mod value;
pub mod wrappers;

pub use error::TranscodeError;
pub use kind::{Kind, ScalarKind};
pub use object_id::ObjectId;
pub use operand::Operand;
pub use record::{FieldValue, Record};
pub use rule::RuleTable;
pub use schema::{FieldDescriptor, Schema};
pub use transcode_derive::Record;
pub use transcoder::{Transcoder, transcode};
pub use value::{Scalar, Value};
