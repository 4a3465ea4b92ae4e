//! Core components of the `stockpulse-rs` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`PulseClient`] and its builder.
//! - The primary [`PulseError`] type.
//! - The [`NewsSearch`] and [`SocialSearch`] service seams.
//! - The Yahoo quoteSummary fetch shared by the fundamentals, profile and holders paths.
//! - Internal networking helpers.

/// The main client (`PulseClient`), builder, and configuration.
pub mod client;
/// The primary error type (`PulseError`) for the crate.
pub mod error;
/// Service traits for abstracting the news and social search transports.
pub mod services;
mod symbol;

pub(crate) mod net;
pub(crate) mod quotesummary;
pub(crate) mod wire;

// convenient re-exports so most code can just `use crate::core::PulseClient`
pub use client::{CacheMode, PulseClient, PulseClientBuilder, RetryConfig};
pub use error::PulseError;
pub use services::{NewsSearch, PostQuery, SearchRequest, SocialSearch, SortBy};
pub use symbol::{normalize_symbol, yahoo_symbol};
