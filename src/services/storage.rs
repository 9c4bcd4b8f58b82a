use crate::domain::constants::{HISTORY_HEADER, WINDOW_LEN};
use crate::domain::models::HistoryRecord;
use crate::error::AqiError;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Persistence seam for the history store.
///
/// `load` returns `Ok(None)` when there is nothing persisted yet (absent or
/// empty source) and `Err(AqiError::StorageCorrupt)` when the source exists
/// but does not validate. `save` always writes the complete store.
pub trait HistoryStorage {
    fn load(&self) -> Result<Option<Vec<HistoryRecord>>, AqiError>;
    fn save(&self, records: &[HistoryRecord]) -> Result<(), AqiError>;
    fn location(&self) -> String;

    /// Runs `f` while holding the store's exclusive write lock. An `Err`
    /// means the lock could not be taken and `f` did not run.
    fn exclusive<T>(&self, f: impl FnOnce() -> T) -> Result<T, AqiError> {
        Ok(f())
    }
}

fn csv_value(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        (v as i64).to_string()
    } else {
        v.to_string()
    }
}

#[derive(Debug, Deserialize)]
struct HistoryRow {
    ward_no: u32,
    day1: f64,
    day2: f64,
    day3: f64,
    day4: f64,
    day5: f64,
}

/// CSV history file: `ward_no,day1,day2,day3,day4,day5`, one row per ward.
#[derive(Debug, Clone)]
pub struct CsvHistoryFile {
    path: PathBuf,
}

impl CsvHistoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn ensure_parent(&self) -> std::io::Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }

    fn persistence(&self, reason: impl std::fmt::Display) -> AqiError {
        AqiError::Persistence(format!("{}: {}", self.path.display(), reason))
    }

    fn corrupt(&self, reason: impl std::fmt::Display) -> AqiError {
        AqiError::StorageCorrupt(format!("{}: {}", self.path.display(), reason))
    }

    fn write_all(&self, records: &[HistoryRecord]) -> anyhow::Result<()> {
        self.ensure_parent()?;
        let tmp = self.sibling(".tmp");
        let written = write_rows(&tmp, records)
            .and_then(|()| std::fs::rename(&tmp, &self.path).map_err(anyhow::Error::from));
        if written.is_err() {
            let _ = std::fs::remove_file(&tmp);
        }
        written
    }
}

fn write_rows(path: &Path, records: &[HistoryRecord]) -> anyhow::Result<()> {
    let mut w = csv::Writer::from_path(path)?;
    w.write_record(HISTORY_HEADER)?;
    for r in records {
        let mut row = Vec::with_capacity(WINDOW_LEN + 1);
        row.push(r.ward_no.to_string());
        row.extend(r.slots.iter().map(|v| csv_value(*v)));
        w.write_record(&row)?;
    }
    w.flush()?;
    Ok(())
}

impl HistoryStorage for CsvHistoryFile {
    fn load(&self) -> Result<Option<Vec<HistoryRecord>>, AqiError> {
        let raw = match std::fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.persistence(e)),
        };
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(raw.as_slice());
        let headers = reader.headers().map_err(|e| self.corrupt(e))?.clone();
        for col in HISTORY_HEADER {
            if !headers.iter().any(|h| h == col) {
                return Err(self.corrupt(format!("missing column `{}`", col)));
            }
        }

        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for row in reader.deserialize::<HistoryRow>() {
            let row = row.map_err(|e| self.corrupt(e))?;
            let slots = [row.day1, row.day2, row.day3, row.day4, row.day5];
            if slots.iter().any(|v| !v.is_finite() || *v < 0.0) {
                return Err(self.corrupt(format!(
                    "ward {} has a negative or non-numeric value",
                    row.ward_no
                )));
            }
            if !seen.insert(row.ward_no) {
                return Err(self.corrupt(format!("duplicate ward {}", row.ward_no)));
            }
            out.push(HistoryRecord::new(row.ward_no, slots));
        }
        Ok(Some(out))
    }

    fn save(&self, records: &[HistoryRecord]) -> Result<(), AqiError> {
        self.write_all(records).map_err(|e| self.persistence(e))
    }

    fn location(&self) -> String {
        self.path().to_string_lossy().to_string()
    }

    /// Advisory lock on `<history>.lock`, held for the duration of `f`.
    fn exclusive<T>(&self, f: impl FnOnce() -> T) -> Result<T, AqiError> {
        self.ensure_parent().map_err(|e| self.persistence(e))?;
        let lock_path = self.sibling(".lock");
        let file = std::fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|e| self.persistence(format!("opening {}: {}", lock_path.display(), e)))?;
        let mut lock = fd_lock::RwLock::new(file);
        let _guard = lock
            .write()
            .map_err(|e| self.persistence(format!("locking {}: {}", lock_path.display(), e)))?;
        Ok(f())
    }
}

#[cfg(test)]
mod tests {
    use super::{CsvHistoryFile, HistoryStorage};
    use crate::domain::models::HistoryRecord;
    use crate::error::AqiError;
    use tempfile::TempDir;

    #[test]
    fn missing_and_empty_files_load_as_nothing() {
        let tmp = TempDir::new().expect("temp dir");
        let file = CsvHistoryFile::new(tmp.path().join("aqi_history.csv"));
        assert!(file.load().expect("load missing").is_none());

        std::fs::write(file.path(), "").expect("write empty");
        assert!(file.load().expect("load empty").is_none());
    }

    #[test]
    fn save_then_load_keeps_order_and_values() {
        let tmp = TempDir::new().expect("temp dir");
        let file = CsvHistoryFile::new(tmp.path().join("nested/aqi_history.csv"));
        let records = vec![
            HistoryRecord::new(1, [150.0, 155.0, 160.0, 165.0, 170.0]),
            HistoryRecord::new(2, [10.0, 20.5, 30.0, 40.0, 50.0]),
        ];
        file.save(&records).expect("save");

        let raw = std::fs::read_to_string(file.path()).expect("read back");
        assert!(raw.starts_with("ward_no,day1,day2,day3,day4,day5\n"));
        assert!(raw.contains("1,150,155,160,165,170"));
        assert!(raw.contains("2,10,20.5,30,40,50"));

        assert_eq!(file.load().expect("load").expect("some"), records);
    }

    #[test]
    fn missing_day_column_is_corrupt() {
        let tmp = TempDir::new().expect("temp dir");
        let file = CsvHistoryFile::new(tmp.path().join("aqi_history.csv"));
        std::fs::write(file.path(), "ward_no,day1,day2,day3,day4\n1,1,2,3,4\n").expect("write");
        let err = file.load().expect_err("corrupt");
        assert!(matches!(err, AqiError::StorageCorrupt(ref m) if m.contains("day5")));
    }

    #[test]
    fn non_numeric_and_duplicate_rows_are_corrupt() {
        let tmp = TempDir::new().expect("temp dir");
        let file = CsvHistoryFile::new(tmp.path().join("aqi_history.csv"));

        std::fs::write(
            file.path(),
            "ward_no,day1,day2,day3,day4,day5\n1,a,2,3,4,5\n",
        )
        .expect("write");
        assert!(matches!(file.load(), Err(AqiError::StorageCorrupt(_))));

        std::fs::write(
            file.path(),
            "ward_no,day1,day2,day3,day4,day5\n1,1,2,3,4,5\n1,1,2,3,4,5\n",
        )
        .expect("write");
        assert!(matches!(file.load(), Err(AqiError::StorageCorrupt(_))));
    }

    #[test]
    fn undecodable_bytes_are_corrupt() {
        let tmp = TempDir::new().expect("temp dir");
        let file = CsvHistoryFile::new(tmp.path().join("aqi_history.csv"));
        std::fs::write(file.path(), b"ward_no,day1,day2,day3,day4,day5\n1,\xff\xfe,2,3,4,5\n")
            .expect("write");
        assert!(matches!(file.load(), Err(AqiError::StorageCorrupt(_))));

        std::fs::write(file.path(), b"\xff\xfeward_no\n").expect("write");
        assert!(matches!(file.load(), Err(AqiError::StorageCorrupt(_))));
    }

    #[test]
    fn failed_write_leaves_no_temp_file() {
        let tmp = TempDir::new().expect("temp dir");
        let target = tmp.path().join("aqi_history.csv");
        std::fs::create_dir(&target).expect("dir in place of history file");
        let file = CsvHistoryFile::new(&target);

        let err = file
            .save(&[HistoryRecord::new(1, [1.0, 2.0, 3.0, 4.0, 5.0])])
            .expect_err("rename onto a directory");
        assert!(matches!(err, AqiError::Persistence(_)));
        assert!(!tmp.path().join("aqi_history.csv.tmp").exists());
    }

    #[test]
    fn exclusive_runs_closure_and_creates_lock_file() {
        let tmp = TempDir::new().expect("temp dir");
        let file = CsvHistoryFile::new(tmp.path().join("state/aqi_history.csv"));
        let out = file.exclusive(|| 7).expect("lock");
        assert_eq!(out, 7);
        assert!(tmp.path().join("state/aqi_history.csv.lock").exists());
    }

    #[test]
    fn extra_columns_and_padding_are_tolerated() {
        let tmp = TempDir::new().expect("temp dir");
        let file = CsvHistoryFile::new(tmp.path().join("aqi_history.csv"));
        std::fs::write(
            file.path(),
            "ward_no, day1, day2, day3, day4, day5, note\n3, 1, 2, 3, 4, 5.0, x\n",
        )
        .expect("write");
        let records = file.load().expect("load").expect("some");
        assert_eq!(records, vec![HistoryRecord::new(3, [1.0, 2.0, 3.0, 4.0, 5.0])]);
    }
}
