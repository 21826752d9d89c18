use sea_orm::entity::prelude::*;

/// Emoji-style reaction on a submission or a comment. Toggle semantics:
/// the same (user, content_type, content_id, reaction_id) key inserts if
/// absent and deletes if present.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(indexed)]
    pub user_id: Uuid,

    pub content_type: ContentType,

    #[sea_orm(indexed)]
    pub content_id: Uuid,

    pub reaction_id: String,

    pub created_at: DateTimeUtc,
}

#[derive(Clone, Debug, Default, EnumIter, DeriveActiveEnum, PartialEq)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum ContentType {
    #[default]
    #[sea_orm(string_value = "submission")]
    Submission,

    #[sea_orm(string_value = "comment")]
    Comment,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    Actor,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Actor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
