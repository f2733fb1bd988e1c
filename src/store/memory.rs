//! In-process [`ToggleStore`] keeping one vector of toggles per package.
//!
//! Insertion order is the storage-native order returned by listings.
//! Used when no database backend is configured, and by the test suites.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::RwLock;

use super::ToggleStore;
use crate::error::ToggleError;
use crate::toggle::FeatureToggle;

#[derive(Debug, Default)]
pub struct MemoryStore {
    packages: RwLock<HashMap<String, Vec<FeatureToggle>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn filtered(
        &self,
        package: &str,
        keep: impl Fn(&FeatureToggle) -> bool + Send,
    ) -> Vec<FeatureToggle> {
        let packages = self.packages.read().await;
        packages
            .get(package)
            .map(|toggles| toggles.iter().filter(|&t| keep(t)).cloned().collect())
            .unwrap_or_default()
    }

    async fn modify(
        &self,
        package: &str,
        id: &str,
        apply: impl FnOnce(&mut FeatureToggle) + Send,
    ) -> bool {
        let mut packages = self.packages.write().await;
        let Some(toggle) = packages
            .get_mut(package)
            .and_then(|toggles| toggles.iter_mut().find(|t| t.id == id))
        else {
            return false;
        };
        apply(toggle);
        true
    }
}

#[async_trait]
impl ToggleStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), ToggleError> {
        Ok(())
    }

    async fn insert(&self, package: &str, toggle: FeatureToggle) -> Result<(), ToggleError> {
        self.packages
            .write()
            .await
            .entry(package.to_owned())
            .or_default()
            .push(toggle);
        Ok(())
    }

    async fn list(&self, package: &str) -> Result<Vec<FeatureToggle>, ToggleError> {
        Ok(self.filtered(package, |_| true).await)
    }

    async fn get(&self, package: &str, id: &str) -> Result<Option<FeatureToggle>, ToggleError> {
        let packages = self.packages.read().await;
        Ok(packages
            .get(package)
            .and_then(|toggles| toggles.iter().find(|t| t.id == id))
            .cloned())
    }

    async fn active_at(
        &self,
        package: &str,
        at: NaiveDateTime,
    ) -> Result<Vec<FeatureToggle>, ToggleError> {
        Ok(self.filtered(package, |t| t.is_active_at(at)).await)
    }

    async fn covering(
        &self,
        package: &str,
        at: NaiveDateTime,
    ) -> Result<Vec<FeatureToggle>, ToggleError> {
        Ok(self.filtered(package, |t| t.covers(at)).await)
    }

    async fn set_dates(
        &self,
        package: &str,
        id: &str,
        beginning: NaiveDateTime,
        expiration: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Result<bool, ToggleError> {
        Ok(self
            .modify(package, id, |t| {
                t.beginning_date = beginning;
                t.expiration_date = expiration;
                t.updated_at = updated_at;
            })
            .await)
    }

    async fn set_name(
        &self,
        package: &str,
        id: &str,
        name: &str,
        updated_at: NaiveDateTime,
    ) -> Result<bool, ToggleError> {
        Ok(self
            .modify(package, id, |t| {
                name.clone_into(&mut t.name);
                t.updated_at = updated_at;
            })
            .await)
    }

    async fn delete(&self, package: &str, id: &str) -> Result<u64, ToggleError> {
        let mut packages = self.packages.write().await;
        let Some(toggles) = packages.get_mut(package) else {
            return Ok(0);
        };
        let before = toggles.len();
        toggles.retain(|t| t.id != id);
        Ok((before - toggles.len()) as u64)
    }

    async fn delete_package(&self, package: &str) -> Result<u64, ToggleError> {
        let removed = self.packages.write().await.remove(package);
        Ok(removed.map_or(0, |toggles| toggles.len() as u64))
    }

    async fn delete_everything(&self) -> Result<u64, ToggleError> {
        let mut packages = self.packages.write().await;
        let removed = packages.values().map(Vec::len).sum::<usize>();
        packages.clear();
        Ok(removed as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toggle::validation::parse_datetime;

    fn toggle(id: &str, beginning: &str, expiration: &str) -> FeatureToggle {
        let created = parse_datetime("2023-06-01 12:00:00").unwrap();
        FeatureToggle {
            id: id.into(),
            name: format!("toggle-{id}"),
            description: String::new(),
            beginning_date: parse_datetime(beginning).unwrap(),
            expiration_date: parse_datetime(expiration).unwrap(),
            created_at: created,
            updated_at: created,
        }
    }

    #[tokio::test]
    async fn packages_are_isolated() {
        let store = MemoryStore::new();
        store
            .insert("web", toggle("a", "2024-01-01 00:00:00", "2024-02-01 00:00:00"))
            .await
            .unwrap();
        store
            .insert("mobile", toggle("b", "2024-01-01 00:00:00", "2024-02-01 00:00:00"))
            .await
            .unwrap();

        let web = store.list("web").await.unwrap();
        assert_eq!(web.len(), 1);
        assert_eq!(web[0].id, "a");
        assert!(store.get("web", "b").await.unwrap().is_none());
        assert_eq!(store.delete("web", "b").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn listing_keeps_insertion_order() {
        let store = MemoryStore::new();
        for id in ["c", "a", "b"] {
            store
                .insert("web", toggle(id, "2024-01-01 00:00:00", "2024-02-01 00:00:00"))
                .await
                .unwrap();
        }
        let ids: Vec<String> = store
            .list("web")
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[tokio::test]
    async fn unknown_package_is_empty() {
        let store = MemoryStore::new();
        assert!(store.list("nothing").await.unwrap().is_empty());
        assert_eq!(store.delete_package("nothing").await.unwrap(), 0);
        let updated = store
            .set_name("nothing", "x", "y", parse_datetime("2024-01-01 00:00:00").unwrap())
            .await
            .unwrap();
        assert!(!updated);
    }

    #[tokio::test]
    async fn range_queries_differ_on_boundaries() {
        let store = MemoryStore::new();
        store
            .insert("web", toggle("edge", "2024-03-01 00:00:00", "2024-03-31 00:00:00"))
            .await
            .unwrap();
        let boundary = parse_datetime("2024-03-01 00:00:00").unwrap();

        assert!(store.active_at("web", boundary).await.unwrap().is_empty());
        assert_eq!(store.covering("web", boundary).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_everything_counts_all_packages() {
        let store = MemoryStore::new();
        for (package, id) in [("web", "a"), ("web", "b"), ("api", "c")] {
            store
                .insert(package, toggle(id, "2024-01-01 00:00:00", "2024-02-01 00:00:00"))
                .await
                .unwrap();
        }
        assert_eq!(store.delete_everything().await.unwrap(), 3);
        assert!(store.list("web").await.unwrap().is_empty());
        assert!(store.list("api").await.unwrap().is_empty());
    }
}
