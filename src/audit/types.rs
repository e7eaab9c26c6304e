use anyhow::Result;
use std::{
    collections::{BTreeMap, BTreeSet},
    path::Path,
};
use tracing::info;

use crate::dataset::RecordReader;

/// Tag for a value held as text. The CSV layer hands back `&str` for every
/// field, so this is the only tag a pass can observe.
pub const STRING_TAG: &str = "string";

/// Column name → distinct value-type tags seen in that column.
pub type ColumnTypes = BTreeMap<String, BTreeSet<String>>;

/// Record which value types occur in each column of `path`.
///
/// Only columns observed on at least one row are reported, so a header-only
/// file yields an empty map.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn audit_field_types<P: AsRef<Path>>(path: P) -> Result<ColumnTypes> {
    let mut types = ColumnTypes::new();
    let mut rows = 0usize;

    for record in RecordReader::open(&path)? {
        let record = record?;
        for (column, _value) in record.iter() {
            types
                .entry(column.to_string())
                .or_default()
                .insert(STRING_TAG.to_string());
        }
        rows += 1;
    }

    info!(rows, columns = types.len(), "type audit done");
    Ok(types)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tests::{csv_file, SAMPLE};
    use crate::error::AuditError;

    #[test]
    fn every_column_is_string() -> Result<()> {
        crate::logging::init_test_logging();
        let tmp = csv_file(SAMPLE);
        let types = audit_field_types(tmp.path())?;

        assert_eq!(types.len(), 4);
        for (column, tags) in &types {
            assert_eq!(tags.len(), 1, "column {column}");
            assert!(tags.contains(STRING_TAG));
        }
        assert!(types.contains_key("Cost per GB, excl conn (US$)"));
        Ok(())
    }

    #[test]
    fn header_only_file_reports_nothing() -> Result<()> {
        let tmp = csv_file("Country,Usage allowance\n");
        assert!(audit_field_types(tmp.path())?.is_empty());
        Ok(())
    }

    #[test]
    fn missing_file_fails() {
        let err = audit_field_types("nope/missing.csv").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AuditError>(),
            Some(AuditError::FileAccess { .. })
        ));
    }
}
