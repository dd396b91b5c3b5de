use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::typology::errors::TypologyError;
use crate::domain::typology::models::EntryKind;
use crate::domain::typology::models::Typology;
use crate::domain::typology::models::TypologyId;
use crate::domain::typology::ports::TypologyRepository;

pub struct PostgresTypologyRepository {
    pool: PgPool,
}

impl PostgresTypologyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_typology(row: PgRow) -> Result<Typology, TypologyError> {
        let kind: String = row.get("kind");

        Ok(Typology {
            id: TypologyId(row.get("id")),
            name: row.get("name"),
            description: row.get("description"),
            icon: row.get("icon"),
            color: row.get("color"),
            kind: kind.parse()?,
            is_active: row.get("is_active"),
        })
    }
}

#[async_trait]
impl TypologyRepository for PostgresTypologyRepository {
    async fn list(
        &self,
        kind: Option<EntryKind>,
        include_inactive: bool,
    ) -> Result<Vec<Typology>, TypologyError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, icon, color, kind, is_active
            FROM typologies
            WHERE ($1::TEXT IS NULL OR kind = $1)
              AND ($2 OR is_active)
            ORDER BY name
            "#,
        )
        .bind(kind.map(|k| k.as_str()))
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TypologyError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::row_to_typology).collect()
    }

    async fn find_by_id(&self, id: &TypologyId) -> Result<Option<Typology>, TypologyError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, icon, color, kind, is_active
            FROM typologies
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TypologyError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_typology).transpose()
    }
}
