//! Status lookups for Bedrock edition servers.
//! [API reference](https://mcstatus.io/docs#bedrock-status)

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::{
    Result,
    client::Lookup,
    common::{Motd, SrvRecord, from_unix_millis, null_as_default},
    query::{ApiRequest, Endpoint},
};

/// The default port of a Bedrock server.
pub const DEFAULT_PORT: u16 = 19132;

/// Options for looking up a Bedrock server.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct BedrockStatusOptions {
    /// How long the API may spend querying the server.
    pub timeout: Duration,
}

impl Default for BedrockStatusOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
        }
    }
}

impl Lookup for BedrockStatusOptions {
    type Response = BedrockStatus;

    fn request(&self, host: &str, port: u16) -> ApiRequest {
        ApiRequest::for_server(Endpoint::BedrockStatus, host, port).timeout(self.timeout)
    }

    fn normalize(body: &[u8]) -> Result<Self::Response> {
        serde_json::from_slice::<RawBedrockStatus>(body)?.normalize()
    }
}

/// Represents the edition of a bedrock server.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum BedrockEdition {
    PocketEdition,
    EducationEdition,
    /// An unknown edition string.
    Other(String),
}

impl std::fmt::Display for BedrockEdition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PocketEdition => f.write_str("MCPE"),
            Self::EducationEdition => f.write_str("MCEE"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

impl From<String> for BedrockEdition {
    fn from(edition: String) -> Self {
        match edition.to_lowercase().as_ref() {
            "mcpe" => Self::PocketEdition,
            "mcee" => Self::EducationEdition,
            _ => Self::Other(edition),
        }
    }
}

impl Serialize for BedrockEdition {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The body of `/status/bedrock`, exactly as it is sent.
#[derive(Deserialize)]
struct RawBedrockStatus {
    online: bool,
    host: String,
    port: u16,
    #[serde(default, deserialize_with = "null_as_default")]
    ip_address: String,
    #[serde(default)]
    eula_blocked: bool,
    retrieved_at: i64,
    expires_at: i64,
    version: Option<BedrockVersion>,
    players: Option<BedrockPlayers>,
    motd: Option<Motd>,
    gamemode: Option<String>,
    server_id: Option<String>,
    edition: Option<String>,
    srv_record: Option<SrvRecord>,
}

/// The status of a Bedrock server, as reported by the API.
///
/// When `online` is false, `version` and `players` are always `None`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BedrockStatus {
    pub online: bool,
    pub host: String,
    pub port: u16,
    /// The address the host resolved to, empty if it did not resolve.
    pub ip_address: String,
    pub eula_blocked: bool,
    pub retrieved_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub version: Option<BedrockVersion>,
    pub players: Option<BedrockPlayers>,
    pub motd: Option<Motd>,
    /// The game mode the server defaults new users to (e.g. "Survival").
    pub gamemode: Option<String>,
    /// The server's unique ID.
    pub server_id: Option<String>,
    pub edition: Option<BedrockEdition>,
    pub srv_record: Option<SrvRecord>,
}

impl RawBedrockStatus {
    fn normalize(self) -> Result<BedrockStatus> {
        let (version, players) = if self.online {
            (self.version, self.players)
        } else {
            (None, None)
        };
        Ok(BedrockStatus {
            online: self.online,
            host: self.host,
            port: self.port,
            ip_address: self.ip_address,
            eula_blocked: self.eula_blocked,
            retrieved_at: from_unix_millis(self.retrieved_at)?,
            expires_at: from_unix_millis(self.expires_at)?,
            version,
            players,
            motd: self.motd,
            gamemode: self.gamemode,
            server_id: self.server_id,
            edition: self.edition.map(BedrockEdition::from),
            srv_record: self.srv_record,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct BedrockVersion {
    /// The name of the servers version (ex: 1.16.200).
    pub name: String,
    /// The server's protocol version (ex: 390).
    pub protocol: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BedrockPlayers {
    /// The numbers of players online.
    pub online: i64,
    /// The maximum number of players that could be online at once.
    pub max: i64,
}
