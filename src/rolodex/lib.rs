//! # Rolodex Architecture
//!
//! Rolodex is a **UI-agnostic address book library** with a small CLI client on
//! top. Nothing from [`api`] inward prints, exits, or assumes a terminal.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints pages and messages              │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - One open book per session, backed by a StorageBackend    │
//! │  - Turns diagnostics into warnings, returns CmdResult       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Domain Layer                                               │
//! │  - fields, list, record: validated values and contacts      │
//! │  - change, book, search, paging: editing, lookup, paging    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (snapshot.rs, store/)                        │
//! │  - Versioned gzip JSON blobs                                │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Values are validated once
//!
//! A [`fields::Name`], [`fields::Phone`], [`fields::Email`], [`fields::Birthday`] or
//! [`fields::Address`] can only be built through its parser, so a [`record::Record`]
//! never holds an invalid value. Bad input, a duplicate phone or e-mail, or a
//! position past the end of a list fails the operation and leaves everything as
//! it was.
//!
//! Some edits succeed but deserve a remark: overwriting a contact, replacing a
//! birthday or address, a phone number of unusual length, an e-mail that does
//! not look like `local@domain.tld`. These are collected in
//! [`diagnostics::Diagnostics`] and surface as warnings in [`api::CmdResult`].
//!
//! ## Testing
//!
//! Each layer has its own unit tests. [`fixtures`] (behind the `test_utils`
//! feature) builds populated books; `tests/` drives the binary end to end.

pub mod api;
pub mod book;
pub mod change;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod fields;
#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures;
pub mod list;
pub mod paging;
pub mod record;
pub mod render;
pub mod search;
pub mod snapshot;
pub mod store;
