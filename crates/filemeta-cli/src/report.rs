//! Tab-separated report of classified files

use crate::error::{CliError, Result};
use filemeta_common::SampleFileRecord;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Report columns, in output order. `recieved` keeps the spelling existing
/// consumers of the report rely on.
pub const COLUMNS: [&str; 5] = ["sample_name", "sample_id", "sample_type", "recieved", "fpath"];

/// Default report file name
pub const DEFAULT_OUTPUT: &str = "filemeta.csv";

/// One record per discovered file, in discovery order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilemetaTable {
    records: Vec<SampleFileRecord>,
}

impl FilemetaTable {
    pub fn new(records: Vec<SampleFileRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SampleFileRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write the table as TSV with a header row
    pub fn write_tsv<W: Write>(&self, writer: W) -> Result<()> {
        let mut tsv = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(writer);

        tsv.write_record(COLUMNS)?;
        for record in &self.records {
            tsv.serialize(record)?;
        }
        tsv.flush()?;
        Ok(())
    }

    /// Render the table as a TSV string
    pub fn to_tsv_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_tsv(&mut buffer)?;
        String::from_utf8(buffer).map_err(|e| CliError::Other(e.into()))
    }

    /// Write the report to `path`, replacing any existing file only once the
    /// whole table has been written
    pub fn export(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut staged = NamedTempFile::new_in(dir)?;
        self.write_tsv(staged.as_file_mut())?;
        staged.as_file().sync_all()?;
        staged.persist(path).map_err(|e| CliError::Io(e.error))?;
        Ok(())
    }
}

impl From<Vec<SampleFileRecord>> for FilemetaTable {
    fn from(records: Vec<SampleFileRecord>) -> Self {
        Self::new(records)
    }
}
