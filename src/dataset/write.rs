use anyhow::{Context, Result};
use csv::{Writer, WriterBuilder};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

use super::Dataset;
use crate::error::AuditError;

/// Write `data` to `path` as CSV: one header row, then one row per record.
///
/// Each record is laid out by `data.headers`, looked up by name, so a record
/// built against a different header cannot shift columns. The rows are written
/// to `.<name>.tmp` next to `path` and renamed over it, so a failed write leaves
/// any previous file untouched.
pub fn write_dataset<P: AsRef<Path>>(path: P, data: &Dataset) -> Result<()> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("output path {:?} has no file name", path))?;
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    let tmp_path: PathBuf = dir.join(format!(".{}.tmp", file_name));

    let tmp = fs::File::create(&tmp_path).map_err(|source| AuditError::FileAccess {
        path: tmp_path.clone(),
        source,
    })?;
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(tmp);

    let written = write_rows(&mut wtr, data);
    drop(wtr);
    let renamed = written.and_then(|()| {
        fs::rename(&tmp_path, path)
            .with_context(|| format!("renaming {:?} -> {:?}", tmp_path, path))
    });
    if let Err(e) = renamed {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    info!(path = %path.display(), rows = data.rows.len(), "wrote csv");
    Ok(())
}

fn write_rows(wtr: &mut Writer<fs::File>, data: &Dataset) -> Result<()> {
    wtr.write_record(&data.headers).context("writing header row")?;
    for (idx, record) in data.rows.iter().enumerate() {
        let row = idx + 1;
        let fields = data
            .headers
            .iter()
            .map(|name| {
                record.get(name).ok_or_else(|| AuditError::MissingField {
                    field: name.clone(),
                    row,
                })
            })
            .collect::<Result<Vec<&str>, AuditError>>()?;
        wtr.write_record(&fields)
            .with_context(|| format!("writing row {}", row))?;
    }
    wtr.flush().context("flushing csv writer")?;
    Ok(())
}
