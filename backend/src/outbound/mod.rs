//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **http**: reqwest-backed fetch primitive used by demographic lookups
//! - **persistence**: in-process person repository
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod http;
pub mod persistence;
