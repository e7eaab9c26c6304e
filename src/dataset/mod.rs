use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use std::{
    collections::HashSet,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::debug;

use crate::error::AuditError;

pub mod write;

pub use write::write_dataset;

/// One CSV data row: column name → raw string value, in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Shared with every other row read from the same file.
    headers: Arc<[String]>,
    values: Vec<String>,
}

impl Record {
    fn from_csv(headers: &Arc<[String]>, raw: &StringRecord) -> Self {
        Self {
            headers: Arc::clone(headers),
            values: raw.iter().map(str::to_string).collect(),
        }
    }

    /// Value of column `name`, or `None` if the header has no such column.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .position(|h| h == name)
            .and_then(|idx| self.values.get(idx))
            .map(String::as_str)
    }

    /// `(column, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A header plus the rows that share it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Record>,
}

/// Streaming reader over the rows of a headed CSV file.
///
/// The file handle lives inside the reader and is closed when it is dropped,
/// whether the pass finishes or bails out on an error.
pub struct RecordReader {
    path: PathBuf,
    headers: Arc<[String]>,
    records: csv::StringRecordsIntoIter<BufReader<File>>,
    row: usize,
}

impl RecordReader {
    /// Open `path` and read its header row.
    ///
    /// Header names must be unique. Every subsequent row must carry exactly as
    /// many fields as the header; ragged rows surface as [`AuditError::Parse`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| AuditError::FileAccess {
            path: path.clone(),
            source,
        })?;

        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(BufReader::new(file));

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|source| AuditError::Parse {
                path: path.clone(),
                source,
            })?
            .iter()
            .map(str::to_string)
            .collect();

        if headers.is_empty() {
            return Err(AuditError::MissingHeader { path }.into());
        }
        // column lookups are by name, so every name must be unique
        let duplicate = {
            let mut seen = HashSet::with_capacity(headers.len());
            let dup = headers.iter().find(|h| !seen.insert(h.as_str())).cloned();
            dup
        };
        if let Some(column) = duplicate {
            return Err(AuditError::DuplicateColumn { path, column }.into());
        }
        debug!(path = %path.display(), columns = headers.len(), "opened csv");

        Ok(Self {
            path,
            headers: headers.into(),
            records: rdr.into_records(),
            row: 0,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// 1-based index of the last row handed out.
    pub fn row(&self) -> usize {
        self.row
    }
}

impl Iterator for RecordReader {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw = self.records.next()?;
        self.row += 1;
        Some(match raw {
            Ok(raw) => Ok(Record::from_csv(&self.headers, &raw)),
            Err(source) => Err(AuditError::Parse {
                path: self.path.clone(),
                source,
            }
            .into()),
        })
    }
}

/// Read the whole of `path` into memory.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let reader = RecordReader::open(&path)?;
    let headers = reader.headers().to_vec();
    let rows = reader
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("loading {:?}", path.as_ref()))?;
    Ok(Dataset { headers, rows })
}
