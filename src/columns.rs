//! Column names of the mobile-parameters dataset.

pub const USAGE_ALLOWANCE: &str = "Usage allowance";
pub const COST_PER_GB: &str = "Cost per GB, excl conn (US$)";
pub const COUNTRY: &str = "Country";

/// Columns that should only ever hold numeric text.
pub const NUMERIC_COLUMNS: &[&str] = &[USAGE_ALLOWANCE, COST_PER_GB];

pub fn is_numeric_column(name: &str) -> bool {
    NUMERIC_COLUMNS.contains(&name)
}
