//! Create Delivery Groups Migration
//!
//! Creates the `delivery_groups` table and wires `orders.delivery_group_id`
//! to it. An order references its group; the group holds no order list.

use sea_orm_migration::prelude::*;

use crate::m20260712_000001_create_couriers::{CourierWorkingHours, Couriers};
use crate::m20260712_000002_create_orders::Orders;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DeliveryGroups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DeliveryGroups::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DeliveryGroups::CourierId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DeliveryGroups::CourierWorkingHoursId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DeliveryGroups::AssignDate).date().not_null())
                    .col(
                        ColumnDef::new(DeliveryGroups::StartDateTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DeliveryGroups::EndDateTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_delivery_groups_courier")
                            .from(DeliveryGroups::Table, DeliveryGroups::CourierId)
                            .to(Couriers::Table, Couriers::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_delivery_groups_working_hours")
                            .from(DeliveryGroups::Table, DeliveryGroups::CourierWorkingHoursId)
                            .to(CourierWorkingHours::Table, CourierWorkingHours::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_delivery_groups_courier_date")
                    .table(DeliveryGroups::Table)
                    .col(DeliveryGroups::CourierId)
                    .col(DeliveryGroups::AssignDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_orders_delivery_group")
                    .from(Orders::Table, Orders::DeliveryGroupId)
                    .to(DeliveryGroups::Table, DeliveryGroups::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name("fk_orders_delivery_group")
                    .table(Orders::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(DeliveryGroups::Table).to_owned())
            .await?;

        Ok(())
    }
}

/// Delivery groups table columns
#[derive(Iden)]
pub enum DeliveryGroups {
    Table,
    Id,
    CourierId,
    CourierWorkingHoursId,
    AssignDate,
    StartDateTime,
    EndDateTime,
}
