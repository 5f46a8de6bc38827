#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
//! `mcstatus` is a client for the [mcstatus.io](https://mcstatus.io) web API.
//! It can be used to look up Minecraft servers and collect information such
//! as the MOTD, player counts, the online player sample, server icon, etc.
//! without speaking the native ping protocols yourself.
//!
//! Both Java and Bedrock servers are supported, along with the rendered
//! status widget and vote submission through Votifier (v1 and v2).
//!
//! The main API surface is [`Client`].

#[macro_use]
extern crate tracing;

mod bedrock;
mod client;
mod common;
mod icon;
mod java;
mod query;
mod vote;

pub use bedrock::{
    BedrockEdition, BedrockPlayers, BedrockStatus, BedrockStatusOptions, BedrockVersion,
    DEFAULT_PORT as DEFAULT_BEDROCK_PORT,
};
pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL, Lookup, USER_AGENT};
pub use common::{Motd, SrvRecord};
pub use icon::{
    IconOptions, JavaWidgetOptions, PNG_DATA_URI_PREFIX, decode_data_uri, decode_png, default_icon,
};
pub use image::DynamicImage;
pub use java::{
    Addon, DEFAULT_PORT as DEFAULT_JAVA_PORT, JavaPlayers, JavaStatus, JavaStatusOptions,
    JavaVersion, PlayerSample,
};
pub use query::{ApiRequest, Endpoint};
pub use vote::{
    DEFAULT_SERVICE_NAME, DEFAULT_VOTIFIER_PORT, OtherVersion, VoteCredentials, VoteOptions,
};

/// Convenience alias used by every fallible operation in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur when talking to the status API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("an HTTP transport error occurred: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status code: {0}")]
    UnexpectedStatus(u16),
    #[error("a JSON error occurred: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("timestamp `{0}` is out of range")]
    Timestamp(i64),
    #[error("failed to decode image: {0}")]
    Decode(#[from] DecodeError),
    #[error("an invalid base URL was provided: {0}")]
    InvalidBaseUrl(String),
}

/// Icon bytes were present but could not be turned into an image.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("invalid PNG data: {0}")]
    Png(#[from] image::ImageError),
}

impl Error {
    /// The HTTP status code, if the API answered with something other than 200.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus(code) => Some(*code),
            _ => None,
        }
    }
}
