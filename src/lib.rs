//! NPC Foundry: constrained character generation for tabletop campaigns.
//!
//! Wraps an external character generator behind a race allow-list with
//! rejection sampling, augments accepted characters with blood, class,
//! and deity attributes, and round-trips finished records through
//! compact shareable links and a session-scoped generation history.

pub mod core;
pub mod schema;
