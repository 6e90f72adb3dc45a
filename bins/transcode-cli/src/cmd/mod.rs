pub mod convert;
pub mod rules;
pub mod schema;
