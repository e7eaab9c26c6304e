//! Read-only passes that report on a dataset without changing it.

pub mod fields;
pub mod types;

pub use fields::{audit_fields, FieldAudit};
pub use types::{audit_field_types, ColumnTypes, STRING_TAG};
