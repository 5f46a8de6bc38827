//! Status lookups for Java edition servers.
//! [API reference](https://mcstatus.io/docs#java-status)

use std::time::Duration;

use chrono::{DateTime, Utc};
use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    client::Lookup,
    common::{Motd, SrvRecord, from_unix_millis, null_as_default},
    icon::decode_data_uri,
    query::{ApiRequest, Endpoint},
};

/// The default port of a Java server.
pub const DEFAULT_PORT: u16 = 25565;

/// Options for looking up a Java server.
///
/// # Examples
///
/// ```
/// use mcstatus::JavaStatusOptions;
/// use std::time::Duration;
///
/// let options = JavaStatusOptions {
///     query: false,
///     timeout: Duration::from_millis(2500),
/// };
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct JavaStatusOptions {
    /// Also use the query protocol, which reveals plugins and the software.
    pub query: bool,
    /// How long the API may spend querying the server.
    pub timeout: Duration,
}

impl Default for JavaStatusOptions {
    fn default() -> Self {
        Self {
            query: true,
            timeout: Duration::from_secs(5),
        }
    }
}

impl Lookup for JavaStatusOptions {
    type Response = JavaStatus;

    fn request(&self, host: &str, port: u16) -> ApiRequest {
        ApiRequest::for_server(Endpoint::JavaStatus, host, port)
            .flag("query", self.query)
            .timeout(self.timeout)
    }

    fn normalize(body: &[u8]) -> Result<Self::Response> {
        serde_json::from_slice::<RawJavaStatus>(body)?.normalize()
    }
}

/// The body of `/status/java`, exactly as it is sent.
#[derive(Deserialize)]
struct RawJavaStatus {
    online: bool,
    host: String,
    port: u16,
    #[serde(default, deserialize_with = "null_as_default")]
    ip_address: String,
    #[serde(default)]
    eula_blocked: bool,
    retrieved_at: i64,
    expires_at: i64,
    version: Option<JavaVersion>,
    players: Option<JavaPlayers>,
    motd: Option<Motd>,
    icon: Option<String>,
    mods: Option<Vec<Addon>>,
    software: Option<String>,
    plugins: Option<Vec<Addon>>,
    srv_record: Option<SrvRecord>,
}

/// The status of a Java server, as reported by the API.
///
/// When `online` is false, `version`, `players` and `icon` are always `None`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct JavaStatus {
    pub online: bool,
    /// The host that was looked up.
    pub host: String,
    pub port: u16,
    /// The address the host resolved to, empty if it did not resolve.
    pub ip_address: String,
    /// Whether Mojang blocks this server for breaking the EULA.
    pub eula_blocked: bool,
    /// When the API pinged the server.
    pub retrieved_at: DateTime<Utc>,
    /// When the API will stop serving this response from its cache.
    pub expires_at: DateTime<Utc>,
    pub version: Option<JavaVersion>,
    pub players: Option<JavaPlayers>,
    pub motd: Option<Motd>,
    /// The server icon, decoded from the inline PNG.
    #[serde(skip)]
    pub icon: Option<DynamicImage>,
    /// Mods reported by Forge servers.
    pub mods: Option<Vec<Addon>>,
    /// The server software, only known through the query protocol.
    pub software: Option<String>,
    /// Plugins, only known through the query protocol.
    pub plugins: Option<Vec<Addon>>,
    pub srv_record: Option<SrvRecord>,
}

impl RawJavaStatus {
    fn normalize(self) -> Result<JavaStatus> {
        let (version, players, icon) = if self.online {
            let icon = match self.icon.as_deref() {
                Some(icon) => decode_data_uri(icon)?,
                None => None,
            };
            (self.version, self.players, icon)
        } else {
            (None, None, None)
        };
        Ok(JavaStatus {
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
            icon,
            mods: self.mods,
            software: self.software,
            plugins: self.plugins,
            srv_record: self.srv_record,
        })
    }
}

/// Information about the server's version
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct JavaVersion {
    /// The version name with formatting codes.
    ///
    /// In practice this comes in a large variety of different formats.
    pub name_raw: String,
    pub name_clean: String,
    pub name_html: String,
    /// See [Protocol Version Numbers](https://wiki.vg/Protocol_version_numbers)
    pub protocol: i64,
}

/// The stats for players on the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct JavaPlayers {
    /// The amount of players online.
    pub online: i64,
    /// The max amount of players.
    pub max: i64,
    /// A preview of which players are online
    ///
    /// In practice servers often don't send this or use it for more advertising
    #[serde(rename = "list", default, deserialize_with = "null_as_default")]
    pub sample: Vec<PlayerSample>,
}

/// An online player of the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerSample {
    /// The player's UUID
    pub uuid: String,
    pub name_raw: String,
    pub name_clean: String,
    pub name_html: String,
}

/// A mod or plugin the server reports, with its version.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Addon {
    pub name: String,
    pub version: String,
}
