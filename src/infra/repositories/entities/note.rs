//! Note database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Note, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "notes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub user_id: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    Owner,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Build the domain note, attaching the owner row when it was loaded
    pub fn into_note(self, owner: Option<super::user::Model>) -> Note {
        Note {
            id: self.id,
            title: self.title,
            content: self.content,
            user_id: self.user_id,
            owner: owner.map(|m| User::from(m).without_password()),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<Model> for Note {
    fn from(model: Model) -> Self {
        model.into_note(None)
    }
}
