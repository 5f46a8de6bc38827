//! Pieces of the status payload shared by the Java and Bedrock endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

/// The message of the day, in three renderings of the same text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Motd {
    /// The MOTD with the original `§` formatting codes.
    pub raw: String,
    /// The MOTD with all formatting stripped.
    pub clean: String,
    /// The MOTD rendered as HTML.
    pub html: String,
}

/// Present when a DNS SRV lookup changed the address that was queried.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SrvRecord {
    pub host: String,
    pub port: u16,
}

/// Converts a Unix timestamp in milliseconds, as sent on the wire.
pub(crate) fn from_unix_millis(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or(Error::Timestamp(millis))
}

/// Treats an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
