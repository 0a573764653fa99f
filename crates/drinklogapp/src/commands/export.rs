use crate::codec::{self, TransferFormat};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DrinkLogError, Result};
use crate::store::{DrinkLogStore, StorageBackend};
use std::fs;
use std::path::Path;

/// The whole log as a document in `format`.
pub fn render<B: StorageBackend>(store: &DrinkLogStore<B>, format: TransferFormat) -> Result<String> {
    codec::export(&store.current(), format)
}

pub fn to_file<B: StorageBackend>(
    store: &DrinkLogStore<B>,
    format: TransferFormat,
    path: &Path,
) -> Result<CmdResult> {
    let document = render(store, format)?;
    fs::write(path, document).map_err(DrinkLogError::Io)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} drinks to {}",
        store.current().len(),
        path.display()
    )));
    Ok(result)
}
