//! HTTP outbound adapters.
//!
//! This module provides a thin reqwest implementation of the `JsonFetcher`
//! port used by the demographic lookups.

mod json_fetcher;

pub use json_fetcher::ReqwestJsonFetcher;
