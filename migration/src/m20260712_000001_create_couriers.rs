//! Create Couriers Tables Migration
//!
//! Creates the `couriers` and `courier_working_hours` tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Couriers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Couriers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Couriers::CourierType)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Couriers::Regions)
                            .array(ColumnType::Integer)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CourierWorkingHours::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourierWorkingHours::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CourierWorkingHours::CourierId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourierWorkingHours::StartTime)
                            .time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourierWorkingHours::EndTime)
                            .time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_courier_working_hours_courier")
                            .from(CourierWorkingHours::Table, CourierWorkingHours::CourierId)
                            .to(Couriers::Table, Couriers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_courier_working_hours_courier_id")
                    .table(CourierWorkingHours::Table)
                    .col(CourierWorkingHours::CourierId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_couriers_courier_type")
                    .table(Couriers::Table)
                    .col(Couriers::CourierType)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CourierWorkingHours::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Couriers::Table).to_owned())
            .await?;

        Ok(())
    }
}

/// Couriers table columns
#[derive(Iden)]
pub enum Couriers {
    Table,
    Id,
    CourierType,
    Regions,
}

/// Courier working hours table columns
#[derive(Iden)]
pub enum CourierWorkingHours {
    Table,
    Id,
    CourierId,
    StartTime,
    EndTime,
}
