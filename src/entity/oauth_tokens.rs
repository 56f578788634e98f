//! OAuth2 令牌实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "oauth_tokens")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub access_token: String,
    #[sea_orm(unique)]
    pub refresh_token: String,
    pub user_id: i64,
    pub client_id: String,
    pub scope: String,
    pub expires_at: i64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_oauth_token(self) -> crate::models::auth::entities::OAuthToken {
        crate::models::auth::entities::OAuthToken {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            user_id: self.user_id,
            client_id: self.client_id,
            scope: self.scope,
            expires_at: self.expires_at,
        }
    }
}
