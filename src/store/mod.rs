//! Package-scoped persistence for feature toggles.
//!
//! [`ToggleStore`] is the seam between the toggle operations and a concrete
//! database. Every call names the package it operates on; backends must keep
//! packages isolated from each other and treat an unknown package as empty.
//! Each method maps onto a single atomic store operation, so concurrent
//! writers to the same record resolve as last-write-wins.

pub mod memory;

#[cfg(feature = "mongodb")]
pub mod mongodb_store;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::error::ToggleError;
use crate::toggle::FeatureToggle;

// async_trait because the store is held as Arc<dyn ToggleStore>.
#[async_trait]
pub trait ToggleStore: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fails with [`ToggleError::StorageUnavailable`] when the backend cannot be reached.
    async fn ping(&self) -> Result<(), ToggleError>;

    async fn insert(&self, package: &str, toggle: FeatureToggle) -> Result<(), ToggleError>;

    async fn list(&self, package: &str) -> Result<Vec<FeatureToggle>, ToggleError>;

    async fn get(&self, package: &str, id: &str) -> Result<Option<FeatureToggle>, ToggleError>;

    /// Toggles with `beginning_date < at < expiration_date`.
    async fn active_at(
        &self,
        package: &str,
        at: NaiveDateTime,
    ) -> Result<Vec<FeatureToggle>, ToggleError>;

    /// Toggles with `beginning_date <= at <= expiration_date`.
    async fn covering(
        &self,
        package: &str,
        at: NaiveDateTime,
    ) -> Result<Vec<FeatureToggle>, ToggleError>;

    /// Overwrite both range dates. Returns `false` when no record matched.
    async fn set_dates(
        &self,
        package: &str,
        id: &str,
        beginning: NaiveDateTime,
        expiration: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Result<bool, ToggleError>;

    /// Returns `false` when no record matched.
    async fn set_name(
        &self,
        package: &str,
        id: &str,
        name: &str,
        updated_at: NaiveDateTime,
    ) -> Result<bool, ToggleError>;

    /// Returns the number of records removed (0 or 1).
    async fn delete(&self, package: &str, id: &str) -> Result<u64, ToggleError>;

    async fn delete_package(&self, package: &str) -> Result<u64, ToggleError>;

    async fn delete_everything(&self) -> Result<u64, ToggleError>;
}
