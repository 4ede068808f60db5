//! Persistence Layer
//!
//! Sea-ORM entities, per-table repositories and the `DispatchStore`
//! adapter over a connection or transaction.

pub mod courier_postgres;
pub mod delivery_group_postgres;
pub mod entities;
pub mod order_postgres;
pub mod store;

pub use store::PgStore;
