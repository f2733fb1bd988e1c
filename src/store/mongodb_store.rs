//! MongoDB-backed [`ToggleStore`] implementation.
//!
//! Each package maps to a collection of the same name inside one database
//! (`feature_toggles` unless configured otherwise). Documents look like:
//!
//! ```json
//! { "_id": "<uuid>", "name": "...", "description": "...",
//!   "beginning_date": ISODate(...), "expiration_date": ISODate(...),
//!   "created_at": ISODate(...), "updated_at": ISODate(...) }
//! ```
//!
//! Dates are stored as BSON datetimes so the range listings run as
//! server-side `$lt`/`$gt` and `$lte`/`$gte` filters.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime};
use futures_util::TryStreamExt;
use mongodb::bson::{self, doc, Document};
use mongodb::error::ErrorKind;
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};

use super::ToggleStore;
use crate::error::ToggleError;
use crate::toggle::FeatureToggle;

const BACKEND: &str = "mongodb";

pub const DEFAULT_DATABASE: &str = "feature_toggles";

#[derive(Debug, Serialize, Deserialize)]
struct ToggleDocument {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    description: String,
    beginning_date: bson::DateTime,
    expiration_date: bson::DateTime,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

impl From<&FeatureToggle> for ToggleDocument {
    fn from(toggle: &FeatureToggle) -> Self {
        Self {
            id: toggle.id.clone(),
            name: toggle.name.clone(),
            description: toggle.description.clone(),
            beginning_date: to_bson(toggle.beginning_date),
            expiration_date: to_bson(toggle.expiration_date),
            created_at: to_bson(toggle.created_at),
            updated_at: to_bson(toggle.updated_at),
        }
    }
}

impl TryFrom<ToggleDocument> for FeatureToggle {
    type Error = ToggleError;

    fn try_from(document: ToggleDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: document.id,
            name: document.name,
            description: document.description,
            beginning_date: from_bson(document.beginning_date)?,
            expiration_date: from_bson(document.expiration_date)?,
            created_at: from_bson(document.created_at)?,
            updated_at: from_bson(document.updated_at)?,
        })
    }
}

fn to_bson(value: NaiveDateTime) -> bson::DateTime {
    bson::DateTime::from_millis(value.and_utc().timestamp_millis())
}

fn from_bson(value: bson::DateTime) -> Result<NaiveDateTime, ToggleError> {
    DateTime::from_timestamp_millis(value.timestamp_millis())
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| ToggleError::Storage {
            backend: BACKEND,
            source: format!("stored datetime {value} is out of range").into(),
        })
}

fn storage_error(err: mongodb::error::Error) -> ToggleError {
    if matches!(*err.kind, ErrorKind::ServerSelection { .. }) {
        ToggleError::StorageUnavailable {
            backend: BACKEND,
            source: Box::new(err),
        }
    } else {
        ToggleError::Storage {
            backend: BACKEND,
            source: Box::new(err),
        }
    }
}

pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    pub async fn new(url: &str, database: &str) -> Result<Self, ToggleError> {
        let client = Client::with_uri_str(url)
            .await
            .map_err(|e| ToggleError::StorageUnavailable {
                backend: BACKEND,
                source: Box::new(e),
            })?;

        let store = Self {
            database: client.database(database),
        };
        store.ping().await?;
        Ok(store)
    }

    fn collection(&self, package: &str) -> Collection<ToggleDocument> {
        self.database.collection::<ToggleDocument>(package)
    }

    async fn find(
        &self,
        package: &str,
        filter: Document,
    ) -> Result<Vec<FeatureToggle>, ToggleError> {
        let documents: Vec<ToggleDocument> = self
            .collection(package)
            .find(filter)
            .await
            .map_err(storage_error)?
            .try_collect()
            .await
            .map_err(storage_error)?;

        documents.into_iter().map(FeatureToggle::try_from).collect()
    }

    async fn set(&self, package: &str, id: &str, fields: Document) -> Result<bool, ToggleError> {
        let result = self
            .collection(package)
            .update_one(doc! { "_id": id }, doc! { "$set": fields })
            .await
            .map_err(storage_error)?;
        Ok(result.matched_count > 0)
    }
}

#[async_trait]
impl ToggleStore for MongoStore {
    fn name(&self) -> &'static str {
        BACKEND
    }

    async fn ping(&self) -> Result<(), ToggleError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|e| ToggleError::StorageUnavailable {
                backend: BACKEND,
                source: Box::new(e),
            })
    }

    async fn insert(&self, package: &str, toggle: FeatureToggle) -> Result<(), ToggleError> {
        self.collection(package)
            .insert_one(ToggleDocument::from(&toggle))
            .await
            .map_err(storage_error)?;
        Ok(())
    }

    async fn list(&self, package: &str) -> Result<Vec<FeatureToggle>, ToggleError> {
        self.find(package, doc! {}).await
    }

    async fn get(&self, package: &str, id: &str) -> Result<Option<FeatureToggle>, ToggleError> {
        self.collection(package)
            .find_one(doc! { "_id": id })
            .await
            .map_err(storage_error)?
            .map(FeatureToggle::try_from)
            .transpose()
    }

    async fn active_at(
        &self,
        package: &str,
        at: NaiveDateTime,
    ) -> Result<Vec<FeatureToggle>, ToggleError> {
        let at = to_bson(at);
        self.find(
            package,
            doc! {
                "beginning_date": { "$lt": at },
                "expiration_date": { "$gt": at },
            },
        )
        .await
    }

    async fn covering(
        &self,
        package: &str,
        at: NaiveDateTime,
    ) -> Result<Vec<FeatureToggle>, ToggleError> {
        let at = to_bson(at);
        self.find(
            package,
            doc! {
                "beginning_date": { "$lte": at },
                "expiration_date": { "$gte": at },
            },
        )
        .await
    }

    async fn set_dates(
        &self,
        package: &str,
        id: &str,
        beginning: NaiveDateTime,
        expiration: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Result<bool, ToggleError> {
        self.set(
            package,
            id,
            doc! {
                "beginning_date": to_bson(beginning),
                "expiration_date": to_bson(expiration),
                "updated_at": to_bson(updated_at),
            },
        )
        .await
    }

    async fn set_name(
        &self,
        package: &str,
        id: &str,
        name: &str,
        updated_at: NaiveDateTime,
    ) -> Result<bool, ToggleError> {
        self.set(
            package,
            id,
            doc! { "name": name, "updated_at": to_bson(updated_at) },
        )
        .await
    }

    async fn delete(&self, package: &str, id: &str) -> Result<u64, ToggleError> {
        let result = self
            .collection(package)
            .delete_one(doc! { "_id": id })
            .await
            .map_err(storage_error)?;
        Ok(result.deleted_count)
    }

    async fn delete_package(&self, package: &str) -> Result<u64, ToggleError> {
        let result = self
            .collection(package)
            .delete_many(doc! {})
            .await
            .map_err(storage_error)?;
        Ok(result.deleted_count)
    }

    async fn delete_everything(&self) -> Result<u64, ToggleError> {
        let names = self
            .database
            .list_collection_names()
            .await
            .map_err(storage_error)?;

        let mut removed = 0;
        for name in names {
            removed += self.delete_package(&name).await?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toggle::validation::parse_datetime;

    #[test]
    fn datetimes_survive_bson_conversion() {
        let value = parse_datetime("2024-12-31 23:59:59").unwrap();
        assert_eq!(from_bson(to_bson(value)).unwrap(), value);
    }

    #[test]
    fn document_conversion_keeps_fields() {
        let at = parse_datetime("2024-01-01 00:00:00").unwrap();
        let toggle = FeatureToggle {
            id: "abc".into(),
            name: "beta".into(),
            description: "Beta program".into(),
            beginning_date: at,
            expiration_date: parse_datetime("2024-02-01 00:00:00").unwrap(),
            created_at: at,
            updated_at: at,
        };
        let back = FeatureToggle::try_from(ToggleDocument::from(&toggle)).unwrap();
        assert_eq!(back, toggle);
    }
}
