//! Courier Entity for Sea-ORM
//!
//! Maps to the `couriers` table.

use sea_orm::entity::prelude::*;

use crate::domain::model::courier::{Courier, CourierType, WorkingInterval};

/// Courier database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "couriers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub courier_type: String,
    pub regions: Vec<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::courier_working_hours::Entity")]
    WorkingHours,
}

impl Related<super::courier_working_hours::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WorkingHours.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// === Conversion from DB Model to Domain ===

impl TryFrom<(Model, Vec<super::courier_working_hours::Model>)> for Courier {
    type Error = String;

    fn try_from(
        (model, hours): (Model, Vec<super::courier_working_hours::Model>),
    ) -> Result<Self, Self::Error> {
        let courier_type: CourierType = model
            .courier_type
            .parse()
            .map_err(|e: crate::domain::model::courier::UnknownCourierType| e.to_string())?;

        Ok(Courier {
            id: model.id as u64,
            courier_type,
            regions: model.regions,
            working_hours: hours
                .into_iter()
                .map(|h| WorkingInterval {
                    id: h.id as u64,
                    start: h.start_time,
                    end: h.end_time,
                })
                .collect(),
        })
    }
}
