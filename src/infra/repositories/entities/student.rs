//! Student database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Student;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Student {
    fn from(model: Model) -> Self {
        Student::with_id(model.id, model.first_name, model.last_name)
    }
}
