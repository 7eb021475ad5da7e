use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use kennel_core::{
    filter::in_window, normalize_snapshot, CoreError, RecordQuery, RecordSource, SaleCategory,
};
use kennel_domain::{RecordSnapshot, TimeWindow, TransactionRecord, TransportRow};

use crate::errors::Result;

const TMP_SUFFIX: &str = "tmp";

/// Reads a [`RecordSnapshot`] export from disk on every fetch.
#[derive(Debug, Clone)]
pub struct JsonRecordSource {
    path: PathBuf,
    sale_category: SaleCategory,
}

impl JsonRecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sale_category: SaleCategory::Platform,
        }
    }

    /// Chooses which sales column becomes the record category.
    pub fn with_sale_category(mut self, sale_category: SaleCategory) -> Self {
        self.sale_category = sale_category;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot(&self) -> std::result::Result<RecordSnapshot, CoreError> {
        let data = fs::read_to_string(&self.path).map_err(|err| {
            CoreError::DataFetch(format!("{}: {err}", self.path.display()))
        })?;
        serde_json::from_str(&data)
            .map_err(|err| CoreError::DataFetch(format!("{}: {err}", self.path.display())))
    }
}

impl RecordSource for JsonRecordSource {
    fn fetch(&self, query: &RecordQuery) -> std::result::Result<Vec<TransactionRecord>, CoreError> {
        let snapshot = self.snapshot()?;
        let records = normalize_snapshot(&snapshot, self.sale_category);
        let selected = query.apply(&records);
        tracing::debug!(
            path = %self.path.display(),
            loaded = records.len(),
            selected = selected.len(),
            "fetched records from snapshot"
        );
        Ok(selected)
    }

    fn fetch_transport(
        &self,
        window: Option<TimeWindow>,
    ) -> std::result::Result<Vec<TransportRow>, CoreError> {
        let snapshot = self.snapshot()?;
        Ok(snapshot
            .transport
            .into_iter()
            .filter(|row| window.as_ref().map_or(true, |w| in_window(row, w)))
            .collect())
    }
}

pub fn load_snapshot(path: &Path) -> Result<RecordSnapshot> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Writes `snapshot` through a temporary file so readers never see a partial export.
pub fn save_snapshot(snapshot: &RecordSnapshot, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    let mut tmp = path.to_path_buf();
    tmp.set_extension(TMP_SUFFIX);
    let mut file = File::create(&tmp)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    fs::rename(&tmp, path)?;
    Ok(())
}
