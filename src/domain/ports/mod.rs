//! Port Interfaces

pub mod store;

pub use store::*;
