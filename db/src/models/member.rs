use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseConnection, Set};

/// Represents a gym member in the `members` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Unique contact email address.
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    AttendanceRecords,
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceRecords.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Creates a new member record.
    pub async fn create(
        db: &DatabaseConnection,
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: Option<&str>,
    ) -> Result<Self, DbErr> {
        let now = Utc::now();
        let member = ActiveModel {
            first_name: Set(first_name.to_owned()),
            last_name: Set(last_name.to_owned()),
            email: Set(email.to_owned()),
            phone: Set(phone.map(|p| p.to_owned())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        member.insert(db).await
    }

    /// Retrieves a member by id.
    pub async fn get_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Self>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// Updates a member's details. Returns `None` if no such member exists.
    pub async fn edit(
        db: &DatabaseConnection,
        id: i64,
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: Option<&str>,
    ) -> Result<Option<Self>, DbErr> {
        let Some(existing) = Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };

        let mut member: ActiveModel = existing.into();
        member.first_name = Set(first_name.to_owned());
        member.last_name = Set(last_name.to_owned());
        member.email = Set(email.to_owned());
        member.phone = Set(phone.map(|p| p.to_owned()));
        member.updated_at = Set(Utc::now());

        member.update(db).await.map(Some)
    }

    /// Deletes a member by id. Returns whether a row was actually removed.
    pub async fn delete_by_id(db: &DatabaseConnection, id: i64) -> Result<bool, DbErr> {
        let res = Entity::delete_by_id(id).exec(db).await?;
        Ok(res.rows_affected > 0)
    }

    /// Checks whether an email address is already in use, optionally ignoring
    /// one member id (for edits).
    pub async fn email_taken(
        db: &DatabaseConnection,
        email: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, DbErr> {
        let mut sel = Entity::find().filter(Column::Email.eq(email));
        if let Some(id) = exclude_id {
            sel = sel.filter(Column::Id.ne(id));
        }
        Ok(sel.one(db).await?.is_some())
    }
}
