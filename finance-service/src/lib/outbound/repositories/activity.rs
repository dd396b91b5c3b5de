use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::activity::errors::ActivityError;
use crate::domain::activity::models::Activity;
use crate::domain::activity::models::ActivityId;
use crate::domain::activity::models::ActivityName;
use crate::domain::activity::models::Amount;
use crate::domain::activity::ports::ActivityRepository;
use crate::domain::typology::models::TypologyId;
use crate::domain::user::models::UserId;

const ACTIVITY_COLUMNS: &str =
    "id, user_id, name, amount, description, activity_date, kind, typology_id, created_at";

pub struct PostgresActivityRepository {
    pool: PgPool,
}

impl PostgresActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_activity(row: PgRow) -> Result<Activity, ActivityError> {
        let kind: String = row.get("kind");
        let typology_id: Option<uuid::Uuid> = row.get("typology_id");

        Ok(Activity {
            id: ActivityId(row.get("id")),
            user_id: UserId(row.get("user_id")),
            name: ActivityName::new(row.get("name"))?,
            amount: Amount::new(row.get("amount"))?,
            description: row.get("description"),
            date: row.get("activity_date"),
            kind: kind.parse()?,
            typology_id: typology_id.map(TypologyId),
            created_at: row.get("created_at"),
        })
    }
}

#[async_trait]
impl ActivityRepository for PostgresActivityRepository {
    async fn create(&self, activity: Activity) -> Result<Activity, ActivityError> {
        sqlx::query(
            r#"
            INSERT INTO activities
                (id, user_id, name, amount, description, activity_date, kind, typology_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(activity.id.0)
        .bind(activity.user_id.0)
        .bind(activity.name.as_str())
        .bind(activity.amount.value())
        .bind(activity.description.as_deref())
        .bind(activity.date)
        .bind(activity.kind.as_str())
        .bind(activity.typology_id.map(|id| id.0))
        .bind(activity.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ActivityError::DatabaseError(e.to_string()))?;

        Ok(activity)
    }

    async fn find_by_id(&self, id: ActivityId) -> Result<Option<Activity>, ActivityError> {
        let row = sqlx::query(&format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ActivityError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_activity).transpose()
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Activity>, ActivityError> {
        let rows = sqlx::query(&format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities WHERE user_id = $1 \
             ORDER BY activity_date DESC, created_at DESC"
        ))
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ActivityError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::row_to_activity).collect()
    }

    async fn find_all(&self) -> Result<Vec<Activity>, ActivityError> {
        let rows = sqlx::query(&format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities ORDER BY activity_date DESC, created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ActivityError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::row_to_activity).collect()
    }

    async fn update(&self, activity: Activity) -> Result<Activity, ActivityError> {
        let result = sqlx::query(
            r#"
            UPDATE activities
            SET name = $2, amount = $3, description = $4, activity_date = $5,
                kind = $6, typology_id = $7
            WHERE id = $1
            "#,
        )
        .bind(activity.id.0)
        .bind(activity.name.as_str())
        .bind(activity.amount.value())
        .bind(activity.description.as_deref())
        .bind(activity.date)
        .bind(activity.kind.as_str())
        .bind(activity.typology_id.map(|id| id.0))
        .execute(&self.pool)
        .await
        .map_err(|e| ActivityError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ActivityError::NotFound(activity.id.to_string()));
        }

        Ok(activity)
    }

    async fn delete(&self, id: ActivityId) -> Result<(), ActivityError> {
        let result = sqlx::query("DELETE FROM activities WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| ActivityError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ActivityError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
