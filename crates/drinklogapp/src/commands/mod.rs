//! # Command Layer
//!
//! This module contains the **business logic** of drinklog's mutating operations.
//! Each command lives in its own submodule and works on a
//! [`DrinkLogStore`](crate::store::DrinkLogStore) over any backend.
//!
//! ## Role and Responsibilities
//!
//! Commands:
//! - Validate and resolve user input into records
//! - Drive the store (add, delete, replace, favorites)
//! - Return a structured [`CmdResult`] with affected records and messages
//! - Are completely UI-agnostic
//!
//! ## What Commands Do NOT Do
//!
//! - **Terminal output**: No stdout or stderr, no colours
//! - **Argument parsing**: That's the CLI layer's job
//! - **Exit codes**: Return `Result`, let the caller decide
//!
//! Input problems (an empty name, an unknown unit, an unreadable import) are not
//! errors here. They come back as warning messages and leave the log unchanged.
//! `Err` is reserved for storage and I/O failures.
//!
//! Read-only views (daily total, ranges, charts, summaries) need no command: the
//! API calls [`crate::aggregate`] on the current snapshot directly.
//!
//! ## Testing Strategy
//!
//! Command tests use `InMemoryStore` and check both the `CmdResult` and the
//! resulting store state.
//!
//! ## Command Modules
//!
//! - [`log`]: Log a drink from a direct or mixed entry
//! - [`delete`]: Remove drinks by id
//! - [`favorites`]: Save, list and log favorites
//! - [`export`]: Serialize the log to JSON or CSV
//! - [`import`]: Replace the log from a JSON or CSV document

use crate::model::{DrinkRecord, FavoriteDrink};
use serde::Serialize;

pub mod delete;
pub mod export;
pub mod favorites;
pub mod import;
pub mod log;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_drinks: Vec<DrinkRecord>,
    pub listed_favorites: Vec<FavoriteDrink>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_drinks(mut self, drinks: Vec<DrinkRecord>) -> Self {
        self.affected_drinks = drinks;
        self
    }

    pub fn with_listed_favorites(mut self, favorites: Vec<FavoriteDrink>) -> Self {
        self.listed_favorites = favorites;
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning)
    }
}
