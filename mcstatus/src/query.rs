//! Construction of the method, path and query string for each API call.

use std::{collections::BTreeMap, time::Duration};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Method, Url};

use crate::{Error, Result};

/// Characters escaped in the host segment. Everything but letters, digits,
/// `-_.~` and the sub-delimiters `$&+:=@`.
const HOST_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'@');

/// The remote API operations this crate knows how to call.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Endpoint {
    /// `GET /icon/{address}`, answered with PNG bytes.
    Icon,
    /// `GET /widget/java/{address}`, answered with PNG bytes.
    JavaWidget,
    /// `GET /status/java/{address}`, answered with JSON.
    JavaStatus,
    /// `GET /status/bedrock/{address}`, answered with JSON.
    BedrockStatus,
    /// `POST /vote`, answered with an empty body.
    Vote,
}

impl Endpoint {
    #[must_use]
    pub fn method(self) -> Method {
        match self {
            Self::Vote => Method::POST,
            _ => Method::GET,
        }
    }

    /// Path segments below the base URL, not counting the server address.
    #[must_use]
    pub const fn segments(self) -> &'static [&'static str] {
        match self {
            Self::Icon => &["icon"],
            Self::JavaWidget => &["widget", "java"],
            Self::JavaStatus => &["status", "java"],
            Self::BedrockStatus => &["status", "bedrock"],
            Self::Vote => &["vote"],
        }
    }
}

/// A fully described API call, not yet bound to a base URL.
///
/// Parameters are kept sorted by key so the encoded query string is
/// deterministic.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ApiRequest {
    endpoint: Endpoint,
    address: Option<(String, u16)>,
    params: BTreeMap<&'static str, String>,
}

impl ApiRequest {
    /// A request that is not addressed to a particular server in its path.
    #[must_use]
    pub const fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            address: None,
            params: BTreeMap::new(),
        }
    }

    /// A request whose last path segment is `host:port`.
    #[must_use]
    pub fn for_server(endpoint: Endpoint, host: &str, port: u16) -> Self {
        Self {
            address: Some((host.to_owned(), port)),
            ..Self::new(endpoint)
        }
    }

    #[must_use]
    pub fn param(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.params.insert(key, value.into());
        self
    }

    /// Booleans are sent as the literals `true` and `false`.
    #[must_use]
    pub fn flag(self, key: &'static str, value: bool) -> Self {
        self.param(key, value.to_string())
    }

    /// Durations are sent as seconds with exactly one fractional digit.
    #[must_use]
    pub fn timeout(self, timeout: Duration) -> Self {
        self.param("timeout", format_seconds(timeout))
    }

    #[must_use]
    pub const fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    #[must_use]
    pub fn method(&self) -> Method {
        self.endpoint.method()
    }

    #[must_use]
    pub const fn params(&self) -> &BTreeMap<&'static str, String> {
        &self.params
    }

    /// Binds the request to `base`, percent-encoding the address segment and
    /// form-encoding the parameters.
    ///
    /// # Errors
    /// If `base` cannot carry a path (e.g. a `data:` URL).
    pub fn url(&self, base: &Url) -> Result<Url> {
        let mut url = base.clone();
        url.set_query(None);
        url.set_fragment(None);
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| Error::InvalidBaseUrl(base.to_string()))?;
            segments.pop_if_empty().extend(self.endpoint.segments());
        }
        if let Some((host, port)) = &self.address {
            // `%` is outside the path encode set, so set_path keeps our escapes.
            let host = utf8_percent_encode(host, HOST_SEGMENT);
            let path = format!("{}/{host}:{port}", url.path());
            url.set_path(&path);
        }
        if !self.params.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.params);
        }
        Ok(url)
    }
}

pub(crate) fn format_seconds(duration: Duration) -> String {
    format!("{:.1}", duration.as_secs_f64())
}
