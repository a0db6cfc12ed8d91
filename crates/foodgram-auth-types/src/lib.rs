//! Auth types shared across Foodgram crates.
//!
//! Tokens are issued and validated upstream; services only read the
//! identity header the gateway forwards.

pub mod identity;

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "x-foodgram-user-id";
