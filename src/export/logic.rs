use crate::core::store::UserStore;
use crate::errors::AppResult;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::{ExportFormat, SessionExport};
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Write one member's attendance ledger to `file`. Returns the row count.
    pub fn export_sessions<S: UserStore>(
        store: &mut S,
        user_id: i64,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);
        ensure_writable(path, force)?;

        let user = store.load(user_id)?;
        let rows: Vec<SessionExport> = user.attendance.iter().map(SessionExport::from).collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        Ok(rows.len())
    }
}
