//! Import replaces the whole log with the content of a document.
//!
//! The existing log is kept when the document cannot be read at all, or when it
//! has entries but none of them is valid. A document that is empty on purpose
//! (`[]`, or a CSV with only a header) does clear the log.

use crate::codec::{self, TransferFormat};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DrinkLogError, Result};
use crate::store::{DrinkLogStore, StorageBackend};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub fn run<B: StorageBackend>(
    store: &mut DrinkLogStore<B>,
    text: &str,
    format: TransferFormat,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let decoded = match codec::decode(text, format) {
        Ok(decoded) => decoded,
        Err(e) => {
            warn!(error = %e, %format, "import rejected");
            result.add_message(CmdMessage::warning(format!(
                "Import rejected, log left unchanged: {}",
                e
            )));
            return Ok(result);
        }
    };

    if decoded.all_rejected() {
        warn!(skipped = decoded.skipped, %format, "import had no valid entries");
        result.add_message(CmdMessage::warning(format!(
            "No valid entries among {}, log left unchanged",
            decoded.skipped
        )));
        return Ok(result);
    }

    let replaced = store.current().len();
    let imported = decoded.records.len();
    store.replace_all(decoded.records.clone())?;
    info!(imported, replaced, %format, "log replaced from import");

    result.add_message(CmdMessage::success(format!(
        "Imported {} drinks (replaced {})",
        imported, replaced
    )));
    if decoded.skipped > 0 {
        result.add_message(CmdMessage::warning(format!(
            "Skipped {} invalid entries",
            decoded.skipped
        )));
    }
    Ok(result.with_affected_drinks(decoded.records))
}

/// Read `path` and import it. Without an explicit `format`, the extension decides.
pub fn from_file<B: StorageBackend>(
    store: &mut DrinkLogStore<B>,
    path: &Path,
    format: Option<TransferFormat>,
) -> Result<CmdResult> {
    let format = format
        .or_else(|| TransferFormat::from_path(path))
        .ok_or_else(|| {
            DrinkLogError::Api(format!(
                "Cannot tell the format of {}, pass --format json|csv",
                path.display()
            ))
        })?;
    let text = fs::read_to_string(path).map_err(DrinkLogError::Io)?;
    run(store, &text, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use chrono::Utc;
    use tempfile::tempdir;

    const CSV: &str = "id,name,volume(ml),abv,date\n\
                       10,Cider,330,4.5,2025-03-01T18:00:00.000Z\n\
                       11,Wine,150,13,2025-03-01T20:00:00.000Z\n";

    #[test]
    fn csv_import_replaces_log() {
        let mut store = StoreFixture::new().with_daily_beers(3, Utc::now()).store;
        let result = run(&mut store, CSV, TransferFormat::Csv).unwrap();

        assert_eq!(result.affected_drinks.len(), 2);
        let ids: Vec<i64> = store.current().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![10, 11]);
        assert!(result.messages[0].content.contains("replaced 3"));
    }

    #[test]
    fn malformed_json_keeps_existing_log() {
        let mut store = StoreFixture::new().with_daily_beers(2, Utc::now()).store;
        let writes = store.backend().write_count();

        let result = run(&mut store, "{ oops", TransferFormat::Json).unwrap();

        assert!(result.has_warnings());
        assert_eq!(store.current().len(), 2);
        assert_eq!(store.backend().write_count(), writes);
    }

    #[test]
    fn all_rows_invalid_keeps_existing_log() {
        let mut store = StoreFixture::new().with_daily_beers(2, Utc::now()).store;
        let result = run(
            &mut store,
            "id,name,volume(ml),abv,date\nx,,y,z,\n",
            TransferFormat::Csv,
        )
        .unwrap();

        assert!(result.has_warnings());
        assert_eq!(store.current().len(), 2);
    }

    #[test]
    fn json_with_only_invalid_entries_keeps_existing_log() {
        let mut store = StoreFixture::new().with_daily_beers(2, Utc::now()).store;
        let writes = store.backend().write_count();

        let result = run(
            &mut store,
            r#"[{"id": "one"}, {"name": "Beer"}, 42]"#,
            TransferFormat::Json,
        )
        .unwrap();

        assert!(result.has_warnings());
        assert!(result.messages[0].content.contains("No valid entries among 3"));
        assert_eq!(store.current().len(), 2);
        assert_eq!(store.backend().write_count(), writes);
    }

    #[test]
    fn partial_json_import_reports_skips() {
        let mut store = StoreFixture::new().with_daily_beers(2, Utc::now()).store;
        let writes = store.backend().write_count();
        let text = r#"[
            {"id": 7, "name": "Cider", "volume": 330.0, "abv": 4.5, "date": "2025-03-01T18:00:00.000Z"},
            {"id": "eight", "name": "Wine"}
        ]"#;

        let result = run(&mut store, text, TransferFormat::Json).unwrap();

        let ids: Vec<i64> = store.current().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![7]);
        assert_eq!(store.backend().write_count(), writes + 1);
        assert!(result.messages.iter().any(|m| m.content == "Skipped 1 invalid entries"));
    }

    #[test]
    fn empty_array_clears_log() {
        let mut store = StoreFixture::new().with_daily_beers(2, Utc::now()).store;
        run(&mut store, "[]", TransferFormat::Json).unwrap();
        assert!(store.current().is_empty());
    }

    #[test]
    fn partial_import_reports_skips() {
        let mut store = StoreFixture::new().store;
        let text = format!("{}bad,row\n", CSV);
        let result = run(&mut store, &text, TransferFormat::Csv).unwrap();

        assert_eq!(store.current().len(), 2);
        assert!(result.messages.iter().any(|m| m.content == "Skipped 1 invalid entries"));
    }

    #[test]
    fn from_file_detects_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("backup.csv");
        fs::write(&path, CSV).unwrap();

        let mut store = StoreFixture::new().store;
        from_file(&mut store, &path, None).unwrap();
        assert_eq!(store.current().len(), 2);
    }

    #[test]
    fn from_file_without_known_extension_needs_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("backup.txt");
        fs::write(&path, CSV).unwrap();

        let mut store = StoreFixture::new().store;
        assert!(matches!(
            from_file(&mut store, &path, None),
            Err(DrinkLogError::Api(_))
        ));
        from_file(&mut store, &path, Some(TransferFormat::Csv)).unwrap();
        assert_eq!(store.current().len(), 2);
    }
}
