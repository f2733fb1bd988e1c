//! Feature toggle records and their request payloads.
//!
//! A [`FeatureToggle`] lives inside a *package*, a caller-chosen namespace
//! string. Whether a toggle is active is never stored: it is derived from
//! the two range dates, with [`FeatureToggle::is_active_at`] using strict
//! bounds and [`FeatureToggle::covers`] using inclusive ones.
//!
//! All timestamps are naive date-times in UTC with whole-second precision,
//! serialized on the wire as `YYYY-MM-DD HH:MM:SS`.

pub mod service;
pub mod validation;

use chrono::{NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Wire format for every timestamp, on input and output.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format of the `date` query parameter of the by-date listing.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureToggle {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(with = "timestamp")]
    pub beginning_date: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub expiration_date: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub updated_at: NaiveDateTime,
}

impl FeatureToggle {
    /// Strict containment: a toggle is not active on either boundary.
    #[must_use]
    pub fn is_active_at(&self, at: NaiveDateTime) -> bool {
        self.beginning_date < at && at < self.expiration_date
    }

    /// Inclusive containment, used by the by-date listing.
    #[must_use]
    pub fn covers(&self, at: NaiveDateTime) -> bool {
        self.beginning_date <= at && at <= self.expiration_date
    }
}

/// Body of `POST /feature-toggle`. Every field is required; absence is
/// reported as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CreateToggle {
    pub package_name: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub beginning_date: Option<String>,
    pub expiration_date: Option<String>,
}

/// Body of `PUT .../update-dates`. `null` and absent are equivalent.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DateChange {
    pub beginning_date: Option<String>,
    pub expiration_date: Option<String>,
}

/// Body of `PUT .../update-name`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NameChange {
    pub name: Option<String>,
}

/// Current UTC time truncated to whole seconds.
#[must_use]
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(0)
}

pub mod timestamp {
    //! Serde adapter for [`DATETIME_FORMAT`](super::DATETIME_FORMAT) strings.

    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::DATETIME_FORMAT;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(DATETIME_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, DATETIME_FORMAT).map_err(de::Error::custom)
    }
}
