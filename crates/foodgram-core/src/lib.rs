//! Service plumbing shared by Foodgram binaries: health checks, request ids,
//! tracing setup, and sea-orm helpers.

pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
