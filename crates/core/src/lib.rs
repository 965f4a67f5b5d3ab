//! Domain layer for the helpdesk service.
//!
//! Zero internal dependencies: vocabularies, validation, filter stages,
//! stats math and the classification prompt/parse helpers live here so the
//! repository and API layers share one definition of each rule.

pub mod classify;
pub mod error;
pub mod filter;
pub mod stats;
pub mod ticket;
pub mod types;
