//! Test utilities for Foodgram services.
//!
//! Import from tests and dev-dependencies only, never in production code.

pub mod auth;
pub mod image;
