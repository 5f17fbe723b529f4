use super::models::{Changeset, PropertyValue};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::{query, query_as, PgPool};

/// Durable storage for property values, keyed by property name.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<PropertyValue>>;
    async fn find_by_name(&self, name: &str) -> Result<Option<PropertyValue>>;
    /// Apply every staged upsert, or none of them. An existing row only has
    /// its `value` overwritten; new rows take the staged label type.
    async fn save_all(&self, changes: &Changeset) -> Result<()>;
}

pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PropertyStore for PgStore {
    async fn list_all(&self) -> Result<Vec<PropertyValue>> {
        let rows = query_as::<_, PropertyValue>(
            "select property_name, label_type, value
            from property_value
            order by property_name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }
    async fn find_by_name(&self, name: &str) -> Result<Option<PropertyValue>> {
        let row = query_as::<_, PropertyValue>(
            "select property_name, label_type, value
            from property_value
            where property_name = $1",
        )
        .bind(name)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }
    async fn save_all(&self, changes: &Changeset) -> Result<()> {
        // Dropping `tx` without commit rolls everything back, so any `?`
        // below leaves the table untouched.
        let mut tx = self.db.begin().await?;
        for change in changes.iter() {
            query(
                "insert into property_value (property_name, label_type, value)
                values ($1, $2, $3)
                on conflict (property_name)
                do update set value = excluded.value",
            )
            .bind(&change.property_name)
            .bind(&change.label_type)
            .bind(change.value)
            .execute(&mut tx)
            .await?;
        }
        tx.commit().await?;

        Ok(())
    }
}
