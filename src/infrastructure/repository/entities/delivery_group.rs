//! Delivery Group Entity for Sea-ORM
//!
//! Maps to the `delivery_groups` table. Orders reference their group
//! through `orders.delivery_group_id`; the group holds no order list.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;

use crate::domain::model::delivery_group::DeliveryGroup;

/// Delivery-group database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "delivery_groups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub courier_id: i64,
    pub courier_working_hours_id: i64,
    pub assign_date: NaiveDate,
    pub start_date_time: DateTime<Utc>,
    pub end_date_time: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courier::Entity",
        from = "Column::CourierId",
        to = "super::courier::Column::Id"
    )]
    Courier,
    #[sea_orm(
        belongs_to = "super::courier_working_hours::Entity",
        from = "Column::CourierWorkingHoursId",
        to = "super::courier_working_hours::Column::Id"
    )]
    WorkingHours,
}

impl ActiveModelBehavior for ActiveModel {}

// === Conversion from DB Model to Domain ===

impl From<Model> for DeliveryGroup {
    fn from(model: Model) -> Self {
        DeliveryGroup {
            id: model.id as u64,
            courier_id: model.courier_id as u64,
            working_hours_id: model.courier_working_hours_id as u64,
            assign_date: model.assign_date,
            start_date_time: model.start_date_time,
            end_date_time: model.end_date_time,
        }
    }
}
