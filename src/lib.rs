pub mod audit;
pub mod clean;
pub mod columns;
pub mod config;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod matcher;

pub use audit::{audit_field_types, audit_fields, FieldAudit};
pub use clean::{clean_file, process_file};
pub use config::Config;
pub use dataset::{load_dataset, write_dataset, Dataset, Record, RecordReader};
pub use error::AuditError;
pub use matcher::{AlphaMatcher, MatchMode};
