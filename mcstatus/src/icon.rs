//! Server icons, status widgets and the PNG decoding they share.

use std::{sync::OnceLock, time::Duration};

use base64::{Engine, engine::general_purpose::STANDARD};
use image::{DynamicImage, ImageFormat};

use crate::{
    DecodeError, Result,
    client::Lookup,
    query::{ApiRequest, Endpoint},
};

/// Inline icons are only recognised when they carry this prefix.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

static DEFAULT_ICON_PNG: &[u8] = include_bytes!("../assets/icon.png");

/// Options for fetching a Java server's icon.
///
/// # Examples
///
/// ```
/// use mcstatus::IconOptions;
/// use std::time::Duration;
///
/// let options = IconOptions {
///     timeout: Duration::from_secs(2),
/// };
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct IconOptions {
    /// How long the API may spend querying the server.
    pub timeout: Duration,
}

impl Default for IconOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
        }
    }
}

impl Lookup for IconOptions {
    type Response = DynamicImage;

    fn request(&self, host: &str, port: u16) -> ApiRequest {
        ApiRequest::for_server(Endpoint::Icon, host, port).timeout(self.timeout)
    }

    fn normalize(body: &[u8]) -> Result<Self::Response> {
        Ok(decode_png(body)?)
    }
}

/// Options for rendering a Java server's status widget.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct JavaWidgetOptions {
    /// Render with the dark theme.
    pub dark: bool,
    /// Round the corners of the widget.
    pub rounded: bool,
    /// How long the API may spend querying the server.
    pub timeout: Duration,
}

impl Default for JavaWidgetOptions {
    fn default() -> Self {
        Self {
            dark: true,
            rounded: true,
            timeout: Duration::from_secs(5),
        }
    }
}

impl Lookup for JavaWidgetOptions {
    type Response = DynamicImage;

    fn request(&self, host: &str, port: u16) -> ApiRequest {
        ApiRequest::for_server(Endpoint::JavaWidget, host, port)
            .flag("dark", self.dark)
            .flag("rounded", self.rounded)
            .timeout(self.timeout)
    }

    fn normalize(body: &[u8]) -> Result<Self::Response> {
        Ok(decode_png(body)?)
    }
}

/// Decodes a PNG byte stream.
///
/// # Errors
/// If `bytes` is not a valid PNG image.
pub fn decode_png(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    Ok(image::load_from_memory_with_format(bytes, ImageFormat::Png)?)
}

/// Decodes an inline `data:image/png;base64,...` icon.
///
/// Returns `Ok(None)` when the value carries any other prefix. Line breaks
/// in the payload are ignored, since some servers wrap it at 76 columns.
///
/// # Errors
/// If the prefix matches but the payload is not valid base64 or PNG.
pub fn decode_data_uri(value: &str) -> Result<Option<DynamicImage>, DecodeError> {
    let Some(payload) = value.strip_prefix(PNG_DATA_URI_PREFIX) else {
        return Ok(None);
    };
    let payload: String = payload
        .chars()
        .filter(|c| !matches!(c, '\r' | '\n'))
        .collect();
    let bytes = STANDARD.decode(payload)?;
    decode_png(&bytes).map(Some)
}

/// The icon Minecraft shows for servers that do not provide one.
///
/// # Panics
/// Never in practice: the bundled asset is checked by the test suite.
pub fn default_icon() -> &'static DynamicImage {
    static ICON: OnceLock<DynamicImage> = OnceLock::new();
    ICON.get_or_init(|| {
        decode_png(DEFAULT_ICON_PNG).expect("bundled default icon must be a valid PNG")
    })
}
