//! Test utilities for Vitrine services.
//!
//! Provides `MockAuth` for minting bearer headers in tests.
//! Import in `#[cfg(test)]` blocks or `tests/` only, never in production code.

pub mod auth;
