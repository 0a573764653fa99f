use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{DrinkLogStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &mut DrinkLogStore<B>, ids: &[i64]) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for &id in ids {
        let Some(record) = store.current().iter().find(|r| r.id == id).cloned() else {
            result.add_message(CmdMessage::warning(format!("No drink with id {}", id)));
            continue;
        };
        store.delete(id)?;
        result.add_message(CmdMessage::success(format!("Deleted ({}): {}", id, record.name)));
        result.affected_drinks.push(record);
    }

    Ok(result)
}
