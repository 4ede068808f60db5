//! Courier Working Hours Entity for Sea-ORM
//!
//! Maps to the `courier_working_hours` table. Rows cascade-delete with
//! their courier.

use chrono::NaiveTime;
use sea_orm::entity::prelude::*;

/// Working-hours interval database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "courier_working_hours")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub courier_id: i64,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courier::Entity",
        from = "Column::CourierId",
        to = "super::courier::Column::Id"
    )]
    Courier,
}

impl Related<super::courier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Courier.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
