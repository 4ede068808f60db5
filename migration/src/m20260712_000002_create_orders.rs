//! Create Orders Tables Migration
//!
//! Creates the `orders` and `order_delivery_hours` tables. The
//! `delivery_group_id` foreign key is added by the delivery-groups
//! migration, after the referenced table exists.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orders::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Orders::Weight).double().not_null())
                    .col(ColumnDef::new(Orders::Regions).integer().not_null())
                    .col(ColumnDef::new(Orders::Cost).integer().not_null())
                    .col(ColumnDef::new(Orders::CompletedTime).timestamp_with_time_zone())
                    .col(ColumnDef::new(Orders::DeliveryGroupId).big_integer())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrderDeliveryHours::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrderDeliveryHours::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OrderDeliveryHours::OrderId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OrderDeliveryHours::StartTime)
                            .time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OrderDeliveryHours::EndTime)
                            .time()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_delivery_hours_order")
                            .from(OrderDeliveryHours::Table, OrderDeliveryHours::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The candidate query filters unassigned orders by region and
        // weight; the join probes delivery hours by order id.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_orders_regions_weight")
                    .table(Orders::Table)
                    .col(Orders::Regions)
                    .col(Orders::Weight)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_orders_delivery_group_id")
                    .table(Orders::Table)
                    .col(Orders::DeliveryGroupId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_order_delivery_hours_order_id")
                    .table(OrderDeliveryHours::Table)
                    .col(OrderDeliveryHours::OrderId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderDeliveryHours::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await?;

        Ok(())
    }
}

/// Orders table columns
#[derive(Iden)]
pub enum Orders {
    Table,
    Id,
    Weight,
    Regions,
    Cost,
    CompletedTime,
    DeliveryGroupId,
}

/// Order delivery hours table columns
#[derive(Iden)]
pub enum OrderDeliveryHours {
    Table,
    Id,
    OrderId,
    StartTime,
    EndTime,
}
