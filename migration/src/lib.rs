//! Dispatch Service Database Migrations
//!
//! Sea-ORM migrations for the dispatch schema.

pub use sea_orm_migration::prelude::*;

mod m20260712_000001_create_couriers;
mod m20260712_000002_create_orders;
mod m20260712_000003_create_delivery_groups;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260712_000001_create_couriers::Migration),
            Box::new(m20260712_000002_create_orders::Migration),
            Box::new(m20260712_000003_create_delivery_groups::Migration),
        ]
    }
}
