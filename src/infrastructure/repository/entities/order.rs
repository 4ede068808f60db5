//! Order Entity for Sea-ORM
//!
//! Maps to the `orders` table. `regions` holds the single region the
//! order must be delivered in; `completed_time` and `delivery_group_id`
//! are written together when the order is assigned or completed.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::domain::model::order::{DeliveryWindow, Order};

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub weight: f64,
    pub regions: i32,
    pub cost: i32,
    pub completed_time: Option<DateTime<Utc>>,
    pub delivery_group_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_delivery_hours::Entity")]
    DeliveryHours,
    #[sea_orm(
        belongs_to = "super::delivery_group::Entity",
        from = "Column::DeliveryGroupId",
        to = "super::delivery_group::Column::Id"
    )]
    DeliveryGroup,
}

impl Related<super::order_delivery_hours::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeliveryHours.def()
    }
}

impl Related<super::delivery_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeliveryGroup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// === Conversion from DB Model to Domain ===

impl From<(Model, Vec<super::order_delivery_hours::Model>)> for Order {
    fn from((model, hours): (Model, Vec<super::order_delivery_hours::Model>)) -> Self {
        Order {
            id: model.id as u64,
            weight: model.weight,
            region: model.regions,
            delivery_hours: hours
                .into_iter()
                .map(|h| DeliveryWindow {
                    id: h.id as u64,
                    start: h.start_time,
                    end: h.end_time,
                })
                .collect(),
            cost: model.cost as u32,
            completed_time: model.completed_time,
            delivery_group_id: model.delivery_group_id.map(|id| id as u64),
        }
    }
}
