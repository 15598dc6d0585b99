//! giftbook - Local-only cash gift ledger
//!
//! This library implements the core of a cash-gift ledger for weddings and
//! funerals. All data stays on the local machine; nothing ever leaves it.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path management
//! - `error`: Custom error types
//! - `models`: Events, gift records, and the guest-screen snapshot
//! - `numeral`: Capitalized Chinese numeral rendering for amounts
//! - `crypto`: Password hashing and per-record payload encryption
//! - `storage`: String-keyed blob store and the ledger over it
//! - `workbook`: CSV-sheet workbook model for tabular import/export
//! - `services`: The import/export engine
//! - `audit`: Append-only mutation log
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust
//! use giftbook::models::{Event, GiftData, GiftRecord, GiftType};
//! use giftbook::storage::LedgerStore;
//!
//! let store = LedgerStore::in_memory();
//! let event = Event::new("张家婚宴", chrono::Utc::now(), chrono::Utc::now())
//!     .with_password("123456");
//! let event_id = event.id.clone();
//! store.add_event(event).unwrap();
//!
//! let gift = GiftData::new("张三", 888.0, GiftType::Cash);
//! let record = GiftRecord::seal(&event_id, &gift, "123456").unwrap();
//! store.append_gift(record).unwrap();
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod models;
pub mod numeral;
pub mod services;
pub mod storage;
pub mod workbook;

pub use error::{GiftbookError, GiftbookResult};
