use anyhow::{Context, Result};
use std::{fs, path::Path};
use tracing::{debug, info};

use crate::{
    columns::USAGE_ALLOWANCE,
    dataset::{write_dataset, Dataset, RecordReader},
    error::AuditError,
    matcher::AlphaMatcher,
};

/// Re-read `path` and keep the rows whose usage allowance `matcher` does not flag.
///
/// Header and row order are preserved. Nothing is written.
#[tracing::instrument(level = "info", skip(path, matcher), fields(path = %path.as_ref().display(), mode = matcher.mode().as_str()))]
pub fn process_file<P: AsRef<Path>>(path: P, matcher: &AlphaMatcher) -> Result<Dataset> {
    let mut reader = RecordReader::open(&path)?;
    let headers = reader.headers().to_vec();
    let mut rows = Vec::new();
    let mut dropped = 0usize;

    while let Some(record) = reader.next() {
        let record = record?;
        let usage = record
            .get(USAGE_ALLOWANCE)
            .ok_or_else(|| AuditError::MissingField {
                field: USAGE_ALLOWANCE.to_string(),
                row: reader.row(),
            })?;

        if matcher.is_match(usage) {
            debug!(row = reader.row(), usage, "dropping row");
            dropped += 1;
            continue;
        }
        rows.push(record);
    }

    info!(kept = rows.len(), dropped, "row filter done");
    Ok(Dataset { headers, rows })
}

/// Filter `input` with [`process_file`] and write the survivors to `output`.
///
/// `output` must be a different file from `input`; the source is never
/// rewritten in place.
pub fn clean_file<P, Q>(input: P, output: Q, matcher: &AlphaMatcher) -> Result<Dataset>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let (input, output) = (input.as_ref(), output.as_ref());
    if same_file(input, output) {
        return Err(AuditError::SameInputOutput {
            path: output.to_path_buf(),
        }
        .into());
    }

    let cleaned = process_file(input, matcher)?;
    write_dataset(output, &cleaned)
        .with_context(|| format!("writing cleaned rows to {:?}", output))?;
    Ok(cleaned)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        // an output that does not exist yet cannot be the input
        _ => false,
    }
}
