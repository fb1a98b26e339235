//! # Core Application Logic
//!
//! This module contains mailtui's state machines.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!   Action ──▶ Router ──┬──▶ InboxView  ─┐
//!                       ├──▶ ReaderView ─┼──▶ [Effect]
//!                       └──▶ ComposerView┘      │
//!                                               ├─ Notify ─▶ Router notice slot
//!                                               └─ Run ────▶ Command (executed by the TUI)
//!                                                               │
//!   Action ◀──────────────── completion ◀───────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`action`]: The `Action` enum, everything that can happen in the app
//! - [`effect`]: `Effect`, `Command` and `Notice`
//! - [`router`]: Active-view tracking and action routing
//! - [`views`]: Inbox, reader and composer state
//! - [`config`]: Settings file, env and CLI resolution

pub mod action;
pub mod config;
pub mod effect;
pub mod router;
pub mod views;
