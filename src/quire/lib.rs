//! # Quire Architecture
//!
//! Quire is the **document state and persistence core** of a local-first page
//! editor. It owns the pages, decides when they reach durable storage, and
//! reconciles state across save, load, import and export. Rendering, caret
//! handling and native dialogs belong to the host; the core only sees opaque
//! content strings and a couple of capability traits.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Host / CLI (cli/, wired by main.rs)                        │
//! │  - Owns the EditorSurface, prints, prompts, exits           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session (session.rs)                                       │
//! │  - Shared handle to the API plus the autosave timer         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Capture surface → command → present → persist request    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Operates on the DocumentStore, returns CmdResult         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Document Store · Persistence · Codec · Migrator            │
//! │  - document.rs, persistence.rs, codec/, migrate.rs          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - StorageBackend + FileAccess traits                       │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data flow
//!
//! - Edits: surface → `QuireApi` → `DocumentStore` mutators → dirty flag →
//!   `PersistenceCoordinator::save` → `StorageBackend`.
//! - Load: `StorageBackend` → `migrate::normalize` → `DocumentStore`.
//! - Import: `FileAccess` → `codec::json` (validate, then migrate) →
//!   `DocumentStore::replace`.
//! - Export: `DocumentStore` → `codec::json` / `codec::html` → `FileAccess`.
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward nothing writes to stdout/stderr, exits the process,
//! or touches the filesystem except through the store traits.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade UI callbacks call
//! - [`session`]: Session lifecycle and autosave timer
//! - [`commands`]: Per-operation logic returning `CmdResult`
//! - [`document`]: The in-memory collection owner
//! - [`persistence`]: Load/save against a storage backend
//! - [`codec`]: JSON and HTML import/export
//! - [`migrate`]: Schema normalization
//! - [`store`]: Storage and file-access capabilities
//! - [`surface`]: The editor surface seam
//! - [`model`]: `Page`, `Theme`, `DocumentCollection`
//! - [`config`]: Configuration
//! - [`error`]: Error types

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod migrate;
pub mod model;
pub mod persistence;
pub mod session;
pub mod store;
pub mod surface;
