//! Vote submission through the API's Votifier proxy.
//! [API reference](https://mcstatus.io/docs#send-vote)

use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::query::{ApiRequest, Endpoint};

/// The service name votes are attributed to unless told otherwise.
pub const DEFAULT_SERVICE_NAME: &str = "mcstatus.io";

/// The port Votifier listens on out of the box.
pub const DEFAULT_VOTIFIER_PORT: u16 = 8192;

/// Protocol-specific credentials, which also select the protocol version.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum VoteCredentials {
    /// Votifier v1, encrypted with the server's RSA public key.
    V1 { public_key: String, ip: String },
    /// Votifier v2 (NuVotifier), signed with a shared token.
    V2 { token: String, uuid: String },
    /// A version this crate does not know about.
    ///
    /// Only the common fields are sent and the API decides what to do.
    /// Built with [`VoteCredentials::other`].
    Other(OtherVersion),
}

/// A protocol version other than 1 or 2.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct OtherVersion(u32);

impl OtherVersion {
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl VoteCredentials {
    /// Credentials for an unknown protocol version.
    ///
    /// Returns `None` for 1 and 2, which need [`Self::V1`] and [`Self::V2`].
    #[must_use]
    pub const fn other(version: u32) -> Option<Self> {
        match version {
            1 | 2 => None,
            version => Some(Self::Other(OtherVersion(version))),
        }
    }

    /// The protocol version sent as `version`.
    #[must_use]
    pub const fn version(&self) -> u32 {
        match self {
            Self::V1 { .. } => 1,
            Self::V2 { .. } => 2,
            Self::Other(version) => version.get(),
        }
    }
}

impl Default for VoteCredentials {
    fn default() -> Self {
        Self::V2 {
            token: String::new(),
            uuid: String::new(),
        }
    }
}

/// Everything needed to submit a vote.
///
/// # Examples
///
/// ```
/// use mcstatus::{VoteCredentials, VoteOptions};
///
/// let vote = VoteOptions {
///     host: "play.example.com".to_string(),
///     username: "valkyrie_pilot".to_string(),
///     credentials: VoteCredentials::V2 {
///         token: "abc123".to_string(),
///         uuid: "b5dcf182-a943-402b-b75b-a057a6508fed".to_string(),
///     },
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct VoteOptions {
    /// The Votifier server's host.
    pub host: String,
    /// The Votifier server's port.
    pub port: u16,
    /// How long the API may spend talking to the Votifier server.
    pub timeout: Duration,
    /// The player who voted.
    pub username: String,
    /// The voting site the vote is attributed to.
    pub service_name: String,
    /// When the vote was cast. `None` means the moment the request is built.
    pub timestamp: Option<DateTime<Utc>>,
    pub credentials: VoteCredentials,
}

impl Default for VoteOptions {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_VOTIFIER_PORT,
            timeout: Duration::from_secs(5),
            username: String::new(),
            service_name: DEFAULT_SERVICE_NAME.to_owned(),
            timestamp: None,
            credentials: VoteCredentials::default(),
        }
    }
}

impl VoteOptions {
    /// Assembles the `POST /vote` request.
    ///
    /// The common fields are always sent; the credential pair depends on the
    /// protocol version.
    #[must_use]
    pub fn request(&self) -> ApiRequest {
        let timestamp = self.timestamp.unwrap_or_else(Utc::now);
        let request = ApiRequest::new(Endpoint::Vote)
            .param("version", self.credentials.version().to_string())
            .param("host", &self.host)
            .param("port", self.port.to_string())
            .timeout(self.timeout)
            .param("username", &self.username)
            .param("serviceName", &self.service_name)
            .param(
                "timestamp",
                timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            );
        match &self.credentials {
            VoteCredentials::V1 { public_key, ip } => {
                request.param("publickey", public_key).param("ip", ip)
            }
            VoteCredentials::V2 { token, uuid } => {
                request.param("token", token).param("uuid", uuid)
            }
            VoteCredentials::Other(_) => request,
        }
    }
}
