//! # Drinklog Architecture
//!
//! Drinklog is a **UI-agnostic drink-consumption tracking library**. The `drinklog`
//! binary is one client of it; nothing in here assumes a terminal.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (crates/drinklog)                                      │
//! │  - Parses arguments, prints tables and messages             │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade, supplies clock and local timezone           │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                               │
//!                 ▼                               ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  Commands (commands/*.rs)     │ │  Views (aggregate, group) │
//! │  - Mutations, CmdResult       │ │  - Pure functions over    │
//! │                               │ │    a snapshot             │
//! └───────────────────────────────┘ └───────────────────────────┘
//!                 │
//!                 ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Observable DrinkLogStore over a StorageBackend           │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data Flow of a Logged Drink
//!
//! 1. The user describes a drink as a [`entry::DrinkEntry`]: a volume in any
//!    [`units::VolumeUnit`] plus an ABV, or a mixed drink ([`mixed::MixedDrink`]).
//! 2. The entry resolves to a [`model::DrinkRecord`] in milliliters.
//! 3. [`store::DrinkLogStore`] persists the new snapshot, then broadcasts it.
//! 4. Views group the snapshot by local calendar day ([`group`]) and sum pure
//!    alcohol ([`alcohol`]) into daily, range, chart and period totals ([`aggregate`]).
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Mutating operations returning `CmdResult`
//! - [`store`]: Observable store, storage backends
//! - [`model`]: `DrinkRecord`, `FavoriteDrink`, timestamp format
//! - [`units`]: Volume unit catalogue and normalization
//! - [`alcohol`]: Pure-alcohol arithmetic
//! - [`mixed`]: Mixed-drink resolution
//! - [`entry`]: Entry validation
//! - [`group`]: Calendar bucketing
//! - [`aggregate`]: Totals and chart datasets
//! - [`codec`]: JSON / CSV import and export
//! - [`config`]: Configuration management
//! - [`init`]: Context setup for clients
//! - [`error`]: Error types

pub mod aggregate;
pub mod alcohol;
pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod entry;
pub mod error;
pub mod group;
pub mod init;
pub mod mixed;
pub mod model;
pub mod store;
pub mod units;
