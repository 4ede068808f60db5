//! Infrastructure Layer
//!
//! Adapters around the domain: PostgreSQL persistence and the HTTP
//! boundary.

pub mod http;
pub mod repository;
