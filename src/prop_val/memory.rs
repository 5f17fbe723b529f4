use super::{
    db_ops::PropertyStore,
    models::{Changeset, PropertyValue},
};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

/// In-process `PropertyStore` for exercising handlers without postgres.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<BTreeMap<String, PropertyValue>>,
}

impl MemoryStore {
    pub fn with_rows(rows: impl IntoIterator<Item = PropertyValue>) -> Self {
        Self {
            rows: Mutex::new(
                rows.into_iter()
                    .map(|r| (r.property_name.clone(), r))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl PropertyStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<PropertyValue>> {
        Ok(self.rows.lock().await.values().cloned().collect())
    }
    async fn find_by_name(&self, name: &str) -> Result<Option<PropertyValue>> {
        Ok(self.rows.lock().await.get(name).cloned())
    }
    async fn save_all(&self, changes: &Changeset) -> Result<()> {
        let mut rows = self.rows.lock().await;
        for change in changes.iter() {
            rows.entry(change.property_name.clone())
                .and_modify(|existing| existing.value = change.value)
                .or_insert_with(|| change.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pv(name: &str, label: &str, value: i32) -> PropertyValue {
        PropertyValue {
            property_name: name.to_string(),
            label_type: label.to_string(),
            value,
        }
    }

    #[tokio::test]
    async fn test_update_keeps_label_type() {
        let store = MemoryStore::with_rows([pv("Width", "Inches", 10)]);
        let mut changes = Changeset::new();
        changes.upsert("Width", "", 25);
        store.save_all(&changes).await.expect("save");

        let width = store
            .find_by_name("Width")
            .await
            .expect("lookup")
            .expect("row exists");
        assert_eq!(width, pv("Width", "Inches", 25));
    }

    #[tokio::test]
    async fn test_insert_new_row() {
        let store = MemoryStore::default();
        let mut changes = Changeset::new();
        changes.upsert("Height", "", 7);
        store.save_all(&changes).await.expect("save");

        assert_eq!(
            store.list_all().await.expect("list"),
            vec![pv("Height", "", 7)]
        );
        assert!(store.find_by_name("Depth").await.expect("lookup").is_none());
    }
}
