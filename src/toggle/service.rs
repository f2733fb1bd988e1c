//! The feature toggle operations exposed over HTTP.
//!
//! [`ToggleService`] validates input, stamps timestamps, and delegates to
//! the injected [`ToggleStore`]. It holds no state of its own; cloning it
//! shares the underlying store.

use std::sync::Arc;

use chrono::NaiveDateTime;

use super::validation::{self, parse_date, parse_datetime};
use super::{now, CreateToggle, DateChange, FeatureToggle};
use crate::error::ToggleError;
use crate::store::ToggleStore;

#[derive(Clone)]
pub struct ToggleService {
    store: Arc<dyn ToggleStore>,
}

impl ToggleService {
    #[must_use]
    pub fn new(store: Arc<dyn ToggleStore>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn backend(&self) -> &'static str {
        self.store.name()
    }

    pub async fn ping(&self) -> Result<(), ToggleError> {
        self.store.ping().await
    }

    pub async fn create(&self, request: CreateToggle) -> Result<FeatureToggle, ToggleError> {
        let valid = validation::validate_create(request)?;
        let stamp = now();
        let toggle = FeatureToggle {
            id: uuid::Uuid::new_v4().to_string(),
            name: valid.name,
            description: valid.description,
            beginning_date: valid.beginning_date,
            expiration_date: valid.expiration_date,
            created_at: stamp,
            updated_at: stamp,
        };

        self.store.insert(&valid.package, toggle.clone()).await?;
        tracing::info!(
            package = %valid.package,
            id = %toggle.id,
            name = %toggle.name,
            "feature toggle created"
        );
        Ok(toggle)
    }

    pub async fn list_all(&self, package: &str) -> Result<Vec<FeatureToggle>, ToggleError> {
        self.store.list(package).await
    }

    pub async fn get(&self, package: &str, id: &str) -> Result<FeatureToggle, ToggleError> {
        self.store
            .get(package, id)
            .await?
            .ok_or_else(ToggleError::toggle_not_found)
    }

    pub async fn list_active(&self, package: &str) -> Result<Vec<FeatureToggle>, ToggleError> {
        self.list_active_at(package, now()).await
    }

    pub async fn list_active_at(
        &self,
        package: &str,
        at: NaiveDateTime,
    ) -> Result<Vec<FeatureToggle>, ToggleError> {
        self.store.active_at(package, at).await
    }

    /// `date` is the raw `YYYY-MM-DD` query value; a missing value is a
    /// validation error like any other unparsable one.
    pub async fn list_by_date(
        &self,
        package: &str,
        date: Option<&str>,
    ) -> Result<Vec<FeatureToggle>, ToggleError> {
        let at = parse_date(date.unwrap_or_default())?;
        self.store.covering(package, at).await
    }

    pub async fn update_dates(
        &self,
        package: &str,
        id: &str,
        change: DateChange,
    ) -> Result<FeatureToggle, ToggleError> {
        if change.beginning_date.is_none() && change.expiration_date.is_none() {
            return Err(ToggleError::validation("No dates provided"));
        }

        let new_beginning = change.beginning_date.as_deref().map(parse_datetime).transpose()?;
        let new_expiration = change.expiration_date.as_deref().map(parse_datetime).transpose()?;
        if let (Some(beginning), Some(expiration)) = (new_beginning, new_expiration) {
            validation::check_range(beginning, expiration)?;
        }

        let mut toggle = self.get(package, id).await?;
        if let Some(expiration) = new_expiration {
            if new_beginning.is_none() && expiration < toggle.beginning_date {
                return Err(ToggleError::validation(
                    "Expiration date cannot be before beginning date",
                ));
            }
            toggle.expiration_date = expiration;
        }
        if let Some(beginning) = new_beginning {
            if new_expiration.is_none() && beginning > toggle.expiration_date {
                return Err(ToggleError::validation(
                    "Beginning date cannot be after expiration date",
                ));
            }
            toggle.beginning_date = beginning;
        }
        toggle.updated_at = now();

        let matched = self
            .store
            .set_dates(
                package,
                id,
                toggle.beginning_date,
                toggle.expiration_date,
                toggle.updated_at,
            )
            .await?;
        if !matched {
            return Err(ToggleError::toggle_not_found());
        }

        tracing::info!(
            package = %package,
            id = %id,
            beginning_date = %toggle.beginning_date,
            expiration_date = %toggle.expiration_date,
            "feature toggle dates updated"
        );
        Ok(toggle)
    }

    pub async fn update_name(
        &self,
        package: &str,
        id: &str,
        name: Option<&str>,
    ) -> Result<FeatureToggle, ToggleError> {
        let name = validation::check_name(name)?;

        let mut toggle = self.get(package, id).await?;
        name.clone_into(&mut toggle.name);
        toggle.updated_at = now();

        if !self.store.set_name(package, id, name, toggle.updated_at).await? {
            return Err(ToggleError::toggle_not_found());
        }

        tracing::info!(package = %package, id = %id, name = %name, "feature toggle renamed");
        Ok(toggle)
    }

    pub async fn delete(&self, package: &str, id: &str) -> Result<(), ToggleError> {
        self.get(package, id).await?;

        match self.store.delete(package, id).await? {
            1 => {
                tracing::info!(package = %package, id = %id, "feature toggle deleted");
                Ok(())
            }
            removed => Err(ToggleError::Storage {
                backend: self.store.name(),
                source: format!("Feature toggle could not be deleted ({removed} records removed)")
                    .into(),
            }),
        }
    }

    pub async fn delete_all(&self, package: &str) -> Result<u64, ToggleError> {
        let removed = self.store.delete_package(package).await?;
        tracing::info!(package = %package, removed, "package feature toggles deleted");
        Ok(removed)
    }

    pub async fn delete_everything(&self) -> Result<u64, ToggleError> {
        let removed = self.store.delete_everything().await?;
        tracing::warn!(removed, "all feature toggles deleted");
        Ok(removed)
    }
}
