use anyhow::Result;
use serde::Serialize;
use std::{
    collections::{BTreeMap, BTreeSet},
    path::Path,
};
use tracing::{debug, info};

use crate::{
    columns::{is_numeric_column, COUNTRY},
    dataset::RecordReader,
    error::AuditError,
    matcher::AlphaMatcher,
};

/// Alphabetic values found in the numeric columns.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct FieldAudit {
    /// Numeric column → distinct offending raw values.
    pub bad_values: BTreeMap<String, BTreeSet<String>>,
    /// Country of every offending (column, row) pair, in file order.
    /// A row with two bad fields contributes its country twice.
    pub countries: Vec<String>,
}

impl FieldAudit {
    pub fn is_clean(&self) -> bool {
        self.bad_values.is_empty()
    }

    /// Number of offending (column, row) pairs.
    pub fn offences(&self) -> usize {
        self.countries.len()
    }
}

/// Scan the numeric columns of `path` for values `matcher` flags.
#[tracing::instrument(level = "info", skip(path, matcher), fields(path = %path.as_ref().display(), mode = matcher.mode().as_str()))]
pub fn audit_fields<P: AsRef<Path>>(path: P, matcher: &AlphaMatcher) -> Result<FieldAudit> {
    let mut audit = FieldAudit::default();
    let mut reader = RecordReader::open(&path)?;

    while let Some(record) = reader.next() {
        let record = record?;
        for (column, value) in record.iter() {
            if !is_numeric_column(column) || !matcher.is_match(value) {
                continue;
            }

            let country = record.get(COUNTRY).ok_or_else(|| AuditError::MissingField {
                field: COUNTRY.to_string(),
                row: reader.row(),
            })?;
            debug!(row = reader.row(), column, value, country, "alphabetic value");

            audit
                .bad_values
                .entry(column.to_string())
                .or_default()
                .insert(value.to_string());
            audit.countries.push(country.to_string());
        }
    }

    info!(
        rows = reader.row(),
        offences = audit.offences(),
        columns = audit.bad_values.len(),
        "field audit done"
    );
    Ok(audit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::{COST_PER_GB, USAGE_ALLOWANCE};
    use crate::dataset::tests::{csv_file, SAMPLE};
    use crate::matcher::MatchMode;

    const HEADER: &str = "Country,Usage allowance,\"Cost per GB, excl conn (US$)\"\n";

    fn audit(body: &str, mode: MatchMode) -> Result<FieldAudit> {
        let tmp = csv_file(&format!("{HEADER}{body}"));
        audit_fields(tmp.path(), &AlphaMatcher::new(mode))
    }

    #[test]
    fn unlimited_plan_is_reported() -> Result<()> {
        crate::logging::init_test_logging();
        let tmp = csv_file(SAMPLE);
        let audit = audit_fields(tmp.path(), &AlphaMatcher::default())?;

        let expected: BTreeMap<String, BTreeSet<String>> = BTreeMap::from([(
            USAGE_ALLOWANCE.to_string(),
            BTreeSet::from(["unlimited".to_string()]),
        )]);
        assert_eq!(audit.bad_values, expected);
        assert_eq!(audit.countries, vec!["Testland"]);
        Ok(())
    }

    #[test]
    fn numeric_row_is_not_reported() -> Result<()> {
        let audit = audit("Sampleland,500,2.50\n", MatchMode::Anchored)?;
        assert!(audit.is_clean());
        assert!(audit.countries.is_empty());
        Ok(())
    }

    #[test]
    fn anchored_mode_ignores_trailing_letters() -> Result<()> {
        let audit = audit(
            "A,3GB,1.00\nB,-unl,.5x\nC,+1,2 USD\nD,Unlimited,n/a\n",
            MatchMode::Anchored,
        )?;
        assert_eq!(audit.bad_values[USAGE_ALLOWANCE], BTreeSet::from(["Unlimited".to_string()]));
        assert_eq!(audit.bad_values[COST_PER_GB], BTreeSet::from(["n/a".to_string()]));
        assert_eq!(audit.countries, vec!["D", "D"]);
        Ok(())
    }

    #[test]
    fn anywhere_mode_catches_embedded_letters() -> Result<()> {
        let audit = audit("A,3GB,1.00\nB,100,2 USD\n", MatchMode::Anywhere)?;
        assert_eq!(audit.bad_values[USAGE_ALLOWANCE], BTreeSet::from(["3GB".to_string()]));
        assert_eq!(audit.bad_values[COST_PER_GB], BTreeSet::from(["2 USD".to_string()]));
        assert_eq!(audit.countries, vec!["A", "B"]);
        Ok(())
    }

    #[test]
    fn countries_count_every_offending_field() -> Result<()> {
        let audit = audit(
            "X,unlimited,free\nY,unlimited,1.0\nZ,10,1.0\n",
            MatchMode::Anchored,
        )?;
        // values are deduplicated, countries are not
        assert_eq!(audit.bad_values[USAGE_ALLOWANCE].len(), 1);
        assert_eq!(audit.bad_values[COST_PER_GB].len(), 1);
        assert_eq!(audit.countries, vec!["X", "X", "Y"]);
        assert_eq!(audit.offences(), 3);
        Ok(())
    }

    #[test]
    fn offending_row_without_country_fails() {
        let tmp = csv_file("Usage allowance,Other\nunlimited,1\n");
        let err = audit_fields(tmp.path(), &AlphaMatcher::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AuditError>(),
            Some(AuditError::MissingField { row: 1, .. })
        ));
    }

    #[test]
    fn clean_rows_without_country_are_fine() -> Result<()> {
        let tmp = csv_file("Usage allowance,Other\n100,x\n");
        let audit = audit_fields(tmp.path(), &AlphaMatcher::default())?;
        assert!(audit.is_clean());
        Ok(())
    }

    #[test]
    fn report_serializes_to_json() -> Result<()> {
        let audit = audit("T,unlimited,5.00\n", MatchMode::Anchored)?;
        let json = serde_json::to_value(&audit)?;
        assert_eq!(json["bad_values"]["Usage allowance"][0], "unlimited");
        assert_eq!(json["countries"][0], "T");
        Ok(())
    }
}
