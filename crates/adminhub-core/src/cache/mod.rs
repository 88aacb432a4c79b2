//! In-memory response caching for read requests.
//!
//! This module provides the `ResponseCache` used by the request gateway.
//! Successful GET payloads are kept per URL and served again while younger
//! than the freshness window (5 seconds). Any successful mutation clears the
//! whole cache.

pub mod response;

pub use response::{CachedData, ResponseCache, FRESHNESS_WINDOW};
