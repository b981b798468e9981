//! HTTP data access with dependency tagging, timeouts and retries.
//!
//! This crate provides:
//! - `FetchClient` - JSON fetch against a base URL with automatic timeout/retry
//! - `DependencyTag` - Semantic dependency categories
//! - `TimeoutConfig` - Per-dependency timeouts
//! - `RetryPolicy` - Retry budget and backoff for transient failures
//! - `PolicyOverrides` - Configured timeout/retry overrides over the tag defaults

mod client;
mod dependency;
mod retry;
mod timeout;

pub use client::*;
pub use dependency::*;
pub use retry::*;
pub use timeout::*;
