use std::time::Duration;

use reqwest::{StatusCode, Url};

use crate::{
    BedrockStatus, BedrockStatusOptions, Error, IconOptions, JavaStatus, JavaStatusOptions,
    JavaWidgetOptions, Result, VoteOptions,
    query::ApiRequest,
};

/// Where the public mcstatus.io API lives.
pub const DEFAULT_BASE_URL: &str = "https://api.mcstatus.io/v2";

/// Sent with every request so the API operators can identify this client.
pub const USER_AGENT: &str = concat!("mcstatus-rs/", env!("CARGO_PKG_VERSION"));

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Represents a lookup of a single server through the API.
pub trait Lookup {
    /// The type the response body is normalized into.
    type Response;

    /// Build the request for the server at `host:port`.
    fn request(&self, host: &str, port: u16) -> ApiRequest;

    /// Turn a successful response body into [`Self::Response`].
    ///
    /// # Errors
    /// If the body does not have the expected shape.
    fn normalize(body: &[u8]) -> Result<Self::Response>;
}

/// A handle to the status API.
///
/// Cloning is cheap and clones share the same connection pool.
///
/// # Examples
///
/// ```no_run
/// # async {
/// let client = mcstatus::Client::new()?;
/// let status = client
///     .java_status("demo.mcstatus.io", 25565, &Default::default())
///     .await?;
/// println!("{} players online", status.players.map_or(0, |p| p.online));
/// # Ok::<(), mcstatus::Error>(())
/// # };
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
}

/// Configures a [`Client`].
#[derive(Debug, Clone)]
#[must_use]
pub struct ClientBuilder {
    base_url: String,
    connect_timeout: Duration,
    request_timeout: Option<Duration>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: None,
        }
    }
}

impl ClientBuilder {
    /// Point the client at a different deployment of the API.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Abort any request that takes longer than `timeout` in total.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// # Errors
    /// If the base URL does not parse, or the HTTP client cannot be set up.
    pub fn build(self) -> Result<Client> {
        let base_url =
            Url::parse(&self.base_url).map_err(|e| Error::InvalidBaseUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(self.base_url));
        }
        let mut http = reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .user_agent(USER_AGENT);
        if let Some(timeout) = self.request_timeout {
            http = http.timeout(timeout);
        }
        Ok(Client {
            http: http.build()?,
            base_url,
        })
    }
}

impl Client {
    /// A client for [`DEFAULT_BASE_URL`].
    ///
    /// # Errors
    /// If the HTTP client cannot be set up.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Look up the server at `host:port` using a [`Lookup`] configuration.
    ///
    /// # Errors
    /// If the request fails, the API answers with anything but 200, or the
    /// body cannot be normalized.
    pub async fn lookup<L: Lookup>(
        &self,
        host: &str,
        port: u16,
        options: &L,
    ) -> Result<L::Response> {
        let body = self.invoke(&options.request(host, port)).await?;
        L::normalize(&body)
    }

    /// # Errors
    /// See [`Client::lookup`].
    pub async fn java_status(
        &self,
        host: &str,
        port: u16,
        options: &JavaStatusOptions,
    ) -> Result<JavaStatus> {
        self.lookup(host, port, options).await
    }

    /// # Errors
    /// See [`Client::lookup`].
    pub async fn bedrock_status(
        &self,
        host: &str,
        port: u16,
        options: &BedrockStatusOptions,
    ) -> Result<BedrockStatus> {
        self.lookup(host, port, options).await
    }

    /// Fetch the server's icon, as the API renders it.
    ///
    /// # Errors
    /// See [`Client::lookup`].
    pub async fn icon(
        &self,
        host: &str,
        port: u16,
        options: &IconOptions,
    ) -> Result<image::DynamicImage> {
        self.lookup(host, port, options).await
    }

    /// # Errors
    /// See [`Client::lookup`].
    pub async fn java_widget(
        &self,
        host: &str,
        port: u16,
        options: &JavaWidgetOptions,
    ) -> Result<image::DynamicImage> {
        self.lookup(host, port, options).await
    }

    /// Submit a vote to the Votifier server described by `vote`.
    ///
    /// # Errors
    /// If the request fails or the API answers with anything but 200.
    pub async fn send_vote(&self, vote: &VoteOptions) -> Result<()> {
        self.invoke(&vote.request()).await?;
        Ok(())
    }

    /// Performs a single round trip and buffers the whole body.
    ///
    /// Anything but `200 OK` is an error and the body is discarded unread.
    pub(crate) async fn invoke(&self, request: &ApiRequest) -> Result<Vec<u8>> {
        let url = request.url(&self.base_url)?;
        let method = request.method();
        debug!(%method, %url, "Sending API request");
        let response = self.http.request(method, url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::UnexpectedStatus(status.as_u16()));
        }
        let body = response.bytes().await?;
        trace!(bytes = body.len(), "Received API response");
        Ok(body.to_vec())
    }
}
