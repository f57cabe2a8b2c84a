//! Auth types shared across Vitrine services.
//!
//! Provides JWT claims and validation, and the `BearerToken` extractor.

pub mod identity;
pub mod token;
