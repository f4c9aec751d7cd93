//! # File I/O Module
//!
//! Writes rendered reports to disk for export:
//! - **Per-calculation files**: `Reporte_EOD_<unix-millis>.txt`
//! - **No overwrites**: files are created with create-new semantics; if the
//!   name is taken a `-1`, `-2`, … suffix is tried instead
//! - **Pending-export lock**: the file stays exclusively locked (fs2) until
//!   the [`PendingExport`] guard is dropped or finished
//!
//! ## Example
//!
//! ```rust,no_run
//! use calc_core::calculations::BlastEngine;
//! use calc_core::file_io::save_report;
//! use calc_core::report::CalculationRecord;
//! use std::path::Path;
//!
//! let record = CalculationRecord::from_inputs(&BlastEngine::default(), "50", "40", "30")?;
//! let export = save_report(&record, Path::new("reports"))?;
//! println!("Report ready: {}", export.path().display());
//!
//! // Hand the file to whatever shares it, then release the lock
//! export.finish();
//! # Ok::<(), calc_core::errors::CalcError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::errors::{CalcError, CalcResult};
use crate::report::CalculationRecord;

/// File name prefix for exported reports
pub const REPORT_PREFIX: &str = "Reporte_EOD_";

/// File extension for exported reports
pub const REPORT_EXTENSION: &str = "txt";

/// Give up after this many taken names for one timestamp
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// A written report that has not been handed off yet.
///
/// Holds an exclusive OS-level lock on the file; the lock is released when
/// the guard is dropped. The file itself is left in place.
#[derive(Debug)]
pub struct PendingExport {
    /// Path to the written report
    path: PathBuf,
    /// The underlying file handle (keeps OS lock)
    _file: File,
}

impl PendingExport {
    /// Path to the written report
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the lock and return the path.
    pub fn finish(self) -> PathBuf {
        tracing::debug!(path = %self.path.display(), "report export finished");
        self.path.clone()
    }

    /// Check whether some holder still has a report locked for export.
    ///
    /// Returns `false` for missing files.
    pub fn is_pending(path: &Path) -> bool {
        let Ok(file) = File::open(path) else {
            return false;
        };
        match file.try_lock_shared() {
            Ok(()) => {
                let _ = file.unlock();
                false
            }
            Err(_) => true,
        }
    }
}

/// File name for a report, without a collision suffix.
pub fn report_file_name(record: &CalculationRecord) -> String {
    file_name_for(record.calculated_at.timestamp_millis(), 0)
}

/// `Reporte_EOD_<stamp>.txt` for the first attempt, `Reporte_EOD_<stamp>-N.txt` after
fn file_name_for(stamp: i64, attempt: u32) -> String {
    if attempt == 0 {
        format!("{}{}.{}", REPORT_PREFIX, stamp, REPORT_EXTENSION)
    } else {
        format!("{}{}-{}.{}", REPORT_PREFIX, stamp, attempt, REPORT_EXTENSION)
    }
}

/// Write a report into `dir` and lock it for export.
///
/// The directory is created if missing. The file is fully written and
/// synced before the guard is returned.
///
/// # Returns
///
/// * `Ok(PendingExport)` - Report written and locked
/// * `Err(CalcError::FileError)` - Directory, create, write or lock failed;
///   no file is left behind
pub fn save_report(record: &CalculationRecord, dir: &Path) -> CalcResult<PendingExport> {
    fs::create_dir_all(dir).map_err(|e| {
        CalcError::file_error("create directory", dir.display().to_string(), e.to_string())
    })?;

    let stamp = record.calculated_at.timestamp_millis();
    let (path, mut file) = create_unique(dir, stamp)?;

    let contents = record.render_text();
    lock_and_write(&path, &mut file, contents.as_bytes())?;

    tracing::info!(path = %path.display(), bytes = contents.len(), "report written");

    Ok(PendingExport { path, _file: file })
}

/// Lock a freshly created report file, then write and sync it.
///
/// On any failure the file at `path` is removed.
fn lock_and_write(path: &Path, file: &mut File, contents: &[u8]) -> CalcResult<()> {
    let result = file
        .try_lock_exclusive()
        .map_err(|e| ("lock report", e))
        .and_then(|_| {
            file.write_all(contents)
                .and_then(|_| file.sync_all())
                .map_err(|e| ("write report", e))
        });

    result.map_err(|(operation, e)| {
        let _ = fs::remove_file(path);
        tracing::warn!(path = %path.display(), operation, error = %e, "report discarded");
        CalcError::file_error(operation, path.display().to_string(), e.to_string())
    })
}

/// Create a new report file, never touching an existing one.
fn create_unique(dir: &Path, stamp: i64) -> CalcResult<(PathBuf, File)> {
    for attempt in 0..MAX_NAME_ATTEMPTS {
        let path = dir.join(file_name_for(stamp, attempt));

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::debug!(path = %path.display(), "report name taken, trying next");
            }
            Err(e) => {
                return Err(CalcError::file_error(
                    "create report",
                    path.display().to_string(),
                    e.to_string(),
                ));
            }
        }
    }

    Err(CalcError::file_error(
        "create report",
        dir.display().to_string(),
        format!("no free file name for timestamp {}", stamp),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::BlastEngine;
    use chrono::{Local, TimeZone};
    use std::env::temp_dir;

    fn test_dir(name: &str) -> PathBuf {
        let dir = temp_dir().join(format!("eod_report_test_{}", name));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn test_record() -> CalculationRecord {
        let timestamp = Local.with_ymd_and_hms(2025, 3, 14, 9, 30, 5).unwrap();
        CalculationRecord::from_inputs(&BlastEngine::default(), "50", "40", "30")
            .unwrap()
            .with_timestamp(timestamp)
    }

    #[test]
    fn test_file_name_uses_timestamp() {
        let record = test_record();
        let name = report_file_name(&record);
        assert!(name.starts_with("Reporte_EOD_"));
        assert!(name.ends_with(".txt"));
        assert!(name.contains(&record.calculated_at.timestamp_millis().to_string()));
    }

    #[test]
    fn test_save_writes_rendered_report() {
        let dir = test_dir("write");
        let record = test_record();

        let export = save_report(&record, &dir).unwrap();
        assert_eq!(export.path().file_name().unwrap().to_string_lossy(), report_file_name(&record));
        let path = export.finish();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, record.render_text());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_same_timestamp_does_not_overwrite() {
        let dir = test_dir("collision");
        let first_record = test_record();
        let mut second_record = test_record();
        second_record.length_input = "99".to_string();

        let first = save_report(&first_record, &dir).unwrap();
        let second = save_report(&second_record, &dir).unwrap();

        assert_ne!(first.path(), second.path());
        assert!(second.path().to_string_lossy().ends_with("-1.txt"));

        let first_text = fs::read_to_string(first.path()).unwrap();
        let second_text = fs::read_to_string(second.path()).unwrap();
        assert!(first_text.contains("DIMENSIONES: 50 x 40 x 30 cm"));
        assert!(second_text.contains("DIMENSIONES: 99 x 40 x 30 cm"));

        drop(first);
        drop(second);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_suffixed_names_share_the_base_name() {
        let record = test_record();
        let stamp = record.calculated_at.timestamp_millis();
        assert_eq!(file_name_for(stamp, 0), report_file_name(&record));
        assert_eq!(file_name_for(stamp, 2), format!("Reporte_EOD_{}-2.txt", stamp));
    }

    #[test]
    fn test_third_save_gets_second_suffix() {
        let dir = test_dir("third");
        let record = test_record();

        let exports: Vec<_> = (0..3).map(|_| save_report(&record, &dir).unwrap()).collect();
        let stamp = record.calculated_at.timestamp_millis();
        assert_eq!(exports[2].path(), dir.join(file_name_for(stamp, 2)));

        drop(exports);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_failed_write_removes_file() {
        let dir = test_dir("failed_write");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("Reporte_EOD_1.txt");
        fs::write(&path, "").unwrap();

        // A read-only handle can be locked but not written
        let mut file = File::open(&path).unwrap();
        let err = lock_and_write(&path, &mut file, b"report").unwrap_err();

        assert!(matches!(err, CalcError::FileError { .. }));
        assert!(!path.exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_failed_lock_removes_file() {
        let dir = test_dir("failed_lock");
        let record = test_record();
        let held = save_report(&record, &dir).unwrap();

        // Another handle on the same file cannot take the exclusive lock
        let mut file = OpenOptions::new().write(true).open(held.path()).unwrap();
        let err = lock_and_write(held.path(), &mut file, b"report").unwrap_err();

        assert!(err.to_string().contains("lock report"));
        assert!(!held.path().exists());
        drop(held);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_is_not_pending() {
        let dir = test_dir("missing");
        assert!(!PendingExport::is_pending(&dir.join("nope.txt")));
    }

    #[test]
    fn test_held_export_is_pending() {
        let dir = test_dir("held");
        let export = save_report(&test_record(), &dir).unwrap();
        assert!(PendingExport::is_pending(export.path()));
        drop(export);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_finished_export_is_not_pending() {
        let dir = test_dir("finished");
        let export = save_report(&test_record(), &dir).unwrap();
        let path = export.finish();
        assert!(!PendingExport::is_pending(&path));
        let _ = fs::remove_dir_all(&dir);
    }
}
