//! # Tapbook Architecture
//!
//! Tapbook is a **UI-agnostic engine for talking picture books**: pages of
//! artwork carrying invisible tap targets that each play a sound when
//! touched. This is a library that happens to have a CLI client, not a CLI
//! application with some library code, and that distinction drives the
//! architecture.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs + main.rs, binary only)                 │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands; persists after each mutation  │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - The mutation boundary: every book edit lives here        │
//! │  - Atomic operations on Rust types, no I/O assumptions      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract BookStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Alongside the stack sit two headless engines the CLI and any future UI
//! share: [`resolver`], the pure mapping from a tapped button to a media
//! URL, and [`playback`], the state machine that owns "at most one thing
//! plays at a time".
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular arguments, returns regular
//! types, never writes to stdout/stderr, never exits the process, and
//! never assumes a terminal. Playback reaches its media through the
//! [`playback::MediaSink`] trait for the same reason: the identical
//! controller can drive a terminal player or an embedded audio element.
//!
//! ## Testing Strategy
//!
//! 1. **Commands**: thorough unit tests of the mutation logic — the lion's
//!    share of testing lives here.
//! 2. **Resolver and playback**: table-style unit tests over crafted
//!    books; playback runs against a scripted fake sink.
//! 3. **API**: dispatch and persistence tests over `InMemoryStore`.
//! 4. **CLI**: end-to-end tests driving the binary in a temp directory.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade — entry point for all operations
//! - [`commands`]: The mutation boundary, one module per operation
//! - [`model`]: Core data types (`Book`, `Page`, `Button`)
//! - [`resolver`]: Button → media URL resolution (pure)
//! - [`playback`]: The playback controller state machine
//! - [`session`]: Book plus editing cursors
//! - [`store`]: Storage abstraction and implementations
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod error;
pub mod model;
pub mod playback;
pub mod resolver;
pub mod session;
pub mod store;
