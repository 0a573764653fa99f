//! Favorites are templates: a name, a volume in ml and an ABV. Logging a favorite
//! copies it into a new record stamped with the current time.

use crate::commands::{CmdMessage, CmdResult};
use crate::entry::DrinkEntry;
use crate::error::{DrinkLogError, Result};
use crate::model::FavoriteDrink;
use crate::store::{DrinkLogStore, StorageBackend};
use chrono::{DateTime, Utc};

fn store_favorite<B: StorageBackend>(
    store: &mut DrinkLogStore<B>,
    favorite: FavoriteDrink,
    result: &mut CmdResult,
) -> Result<()> {
    let label = format!("{} ({:.0} ml @ {}%)", favorite.name, favorite.volume, favorite.abv);
    if store.add_favorite(favorite)? {
        result.add_message(CmdMessage::success(format!("Saved favorite: {}", label)));
    } else {
        result.add_message(CmdMessage::info(format!("Already a favorite: {}", label)));
    }
    Ok(())
}

pub fn save<B: StorageBackend>(store: &mut DrinkLogStore<B>, entry: DrinkEntry) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match entry.into_favorite() {
        Ok(favorite) => store_favorite(store, favorite, &mut result)?,
        Err(e) => result.add_message(CmdMessage::warning(format!("Favorite not saved: {}", e))),
    }
    Ok(result)
}

/// Turn an already logged drink into a favorite.
pub fn save_from_drink<B: StorageBackend>(store: &mut DrinkLogStore<B>, id: i64) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let Some(favorite) = store
        .current()
        .iter()
        .find(|r| r.id == id)
        .map(FavoriteDrink::from)
    else {
        result.add_message(CmdMessage::warning(format!("No drink with id {}", id)));
        return Ok(result);
    };
    store_favorite(store, favorite, &mut result)?;
    Ok(result)
}

pub fn list<B: StorageBackend>(store: &DrinkLogStore<B>) -> CmdResult {
    let favorites = store.favorites().as_ref().clone();
    let mut result = CmdResult::default();
    if favorites.is_empty() {
        result.add_message(CmdMessage::info("No favorites saved yet"));
    }
    result.with_listed_favorites(favorites)
}

/// Log the first favorite whose name matches, ignoring case.
pub fn log<B: StorageBackend>(
    store: &mut DrinkLogStore<B>,
    name: &str,
    occurred_at: DateTime<Utc>,
) -> Result<CmdResult> {
    let wanted = name.trim();
    let favorite = store
        .favorites()
        .iter()
        .find(|f| f.name.eq_ignore_ascii_case(wanted))
        .cloned()
        .ok_or_else(|| DrinkLogError::Api(format!("No favorite named '{}'", wanted)))?;

    let record = favorite.to_record(store.next_id(occurred_at), occurred_at);
    store.add(record.clone())?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Logged: {}", record)));
    Ok(result.with_affected_drinks(vec![record]))
}
