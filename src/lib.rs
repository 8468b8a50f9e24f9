//! Terminal triage chat runtime crate.
//!
//! ## Provider bootstrap
//!
//! `tabibi` selects its backend through `TABIBI_PROVIDER`:
//!
//! - `TABIBI_PROVIDER=mock` (default) for deterministic offline runs
//! - `TABIBI_PROVIDER=gemini-api` for Gemini transport; see
//!   [`providers`] for the `TABIBI_GEMINI_CONFIG_PATH` file contract
//!
//! ## System instructions
//!
//! Provider construction always receives fixed persona instructions. Set
//! `TABIBI_SYSTEM_INSTRUCTIONS` to override the built-in Arabic triage
//! persona; the sentinel-marker sentence in the persona is the backend half
//! of the report classification contract in [`report`].
//!
//! Conversation ownership contract: [`app::App`] exclusively owns the turn
//! list and busy flag for one session; the provider exclusively owns whatever
//! continuity state its backend needs. A new conversation rebuilds both.

pub mod app;
pub mod commands;
pub mod persona;
pub mod providers;
pub mod report;
pub mod ui;
