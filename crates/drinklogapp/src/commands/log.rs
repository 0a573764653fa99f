use crate::commands::{CmdMessage, CmdResult};
use crate::entry::DrinkEntry;
use crate::error::Result;
use crate::store::{DrinkLogStore, StorageBackend};
use chrono::{DateTime, Utc};

pub fn run<B: StorageBackend>(
    store: &mut DrinkLogStore<B>,
    entry: DrinkEntry,
    occurred_at: DateTime<Utc>,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let id = store.next_id(occurred_at);
    let record = match entry.into_record(id, occurred_at) {
        Ok(record) => record,
        Err(e) => {
            result.add_message(CmdMessage::warning(format!("Nothing logged: {}", e)));
            return Ok(result);
        }
    };

    store.add(record.clone())?;
    result.add_message(CmdMessage::success(format!("Logged: {}", record)));
    result.affected_drinks.push(record);
    Ok(result)
}
