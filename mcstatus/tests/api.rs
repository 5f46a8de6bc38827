use std::{
    io::Cursor,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header::USER_AGENT},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use mcstatus::{
    BedrockStatusOptions, Client, DecodeError, Error, IconOptions, JavaStatusOptions,
    JavaWidgetOptions, PNG_DATA_URI_PREFIX, VoteCredentials, VoteOptions,
};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
struct SeenRequest {
    method: Method,
    path: String,
    query: Option<String>,
    user_agent: Option<String>,
}

/// A stand-in for the remote API that always gives the same answer.
#[derive(Clone)]
struct MockApi {
    status: StatusCode,
    body: Arc<Vec<u8>>,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl MockApi {
    fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: Arc::new(body.into()),
            seen: Arc::default(),
        }
    }

    fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }

    fn only_request(&self) -> SeenRequest {
        let seen = self.seen();
        assert_eq!(seen.len(), 1, "expected exactly one request, got {seen:?}");
        seen[0].clone()
    }

    async fn serve(&self) -> Client {
        let app = Router::new().fallback(answer).with_state(self.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Client::builder()
            .base_url(format!("http://{address}/v2"))
            .request_timeout(Duration::from_secs(10))
            .build()
            .unwrap()
    }
}

async fn answer(
    State(api): State<MockApi>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> (StatusCode, Vec<u8>) {
    api.seen.lock().unwrap().push(SeenRequest {
        method,
        path: uri.path().to_owned(),
        query: uri.query().map(str::to_owned),
        user_agent: headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
    });
    (api.status, api.body.to_vec())
}

fn sample_png() -> (DynamicImage, Vec<u8>) {
    let image = DynamicImage::ImageRgba8(RgbaImage::from_fn(16, 16, |x, y| {
        Rgba([(x * 16) as u8, (y * 16) as u8, 128, 255])
    }));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    (image, bytes)
}

fn java_body(icon: Option<&str>) -> String {
    serde_json::json!({
        "online": true,
        "host": "demo.mcstatus.io",
        "port": 25565,
        "ip_address": "152.228.181.226",
        "eula_blocked": false,
        "retrieved_at": 1_700_000_000_000_i64,
        "expires_at": 1_700_000_300_000_i64,
        "version": {
            "name_raw": "1.20.2",
            "name_clean": "1.20.2",
            "name_html": "<span>1.20.2</span>",
            "protocol": 764
        },
        "players": {"online": 0, "max": 20, "list": []},
        "motd": {"raw": "§aHi", "clean": "Hi", "html": "<span>Hi</span>"},
        "icon": icon,
        "mods": null,
        "software": null,
        "plugins": null,
        "srv_record": null
    })
    .to_string()
}

#[tokio::test]
async fn test_java_status() {
    let (image, png) = sample_png();
    let icon = format!("{PNG_DATA_URI_PREFIX}{}", STANDARD.encode(&png));
    let api = MockApi::new(StatusCode::OK, java_body(Some(&icon)));
    let client = api.serve().await;

    let status = client
        .java_status("demo.mcstatus.io", 25565, &JavaStatusOptions::default())
        .await
        .unwrap();
    assert!(status.online);
    assert_eq!(status.version.unwrap().protocol, 764);
    assert!(status.players.unwrap().sample.is_empty());
    assert_eq!(status.icon.unwrap().to_rgba8(), image.to_rgba8());
    assert_eq!((status.expires_at - status.retrieved_at).num_seconds(), 300);

    let seen = api.only_request();
    assert_eq!(seen.method, Method::GET);
    assert_eq!(seen.path, "/v2/status/java/demo.mcstatus.io:25565");
    assert_eq!(seen.query.as_deref(), Some("query=true&timeout=5.0"));
    assert_eq!(seen.user_agent.as_deref(), Some(mcstatus::USER_AGENT));
}

#[tokio::test]
async fn test_java_status_options() {
    let api = MockApi::new(StatusCode::OK, java_body(None));
    let client = api.serve().await;
    let options = JavaStatusOptions {
        query: false,
        timeout: Duration::from_millis(2500),
    };
    let status = client
        .java_status("my server", 25566, &options)
        .await
        .unwrap();
    assert!(status.icon.is_none());

    let seen = api.only_request();
    assert_eq!(seen.path, "/v2/status/java/my%20server:25566");
    assert_eq!(seen.query.as_deref(), Some("query=false&timeout=2.5"));
}

#[tokio::test]
async fn test_unexpected_status_skips_body() {
    let api = MockApi::new(StatusCode::NOT_FOUND, "this is not json");
    let client = api.serve().await;
    let err = client
        .java_status("demo.mcstatus.io", 25565, &JavaStatusOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnexpectedStatus(404)));
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.to_string(), "unexpected status code: 404");
}

#[tokio::test]
async fn test_non_200_success_is_an_error() {
    let api = MockApi::new(StatusCode::NO_CONTENT, Vec::new());
    let client = api.serve().await;
    let err = client.send_vote(&VoteOptions::default()).await.unwrap_err();
    assert_eq!(err.status_code(), Some(204));
}

#[tokio::test]
async fn test_malformed_json() {
    let api = MockApi::new(StatusCode::OK, r#"{"online": true}"#);
    let client = api.serve().await;
    let err = client
        .bedrock_status("demo.mcstatus.io", 19132, &BedrockStatusOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[tokio::test]
async fn test_bad_inline_icon() {
    let icon = format!("{PNG_DATA_URI_PREFIX}{}", STANDARD.encode(b"not a png"));
    let api = MockApi::new(StatusCode::OK, java_body(Some(&icon)));
    let client = api.serve().await;
    let err = client
        .java_status("demo.mcstatus.io", 25565, &JavaStatusOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode(DecodeError::Png(_))));
}

#[tokio::test]
async fn test_bedrock_status_offline() {
    let body = r#"{
        "online": false,
        "host": "demo.mcstatus.io",
        "port": 19132,
        "ip_address": null,
        "eula_blocked": false,
        "retrieved_at": 1700000000000,
        "expires_at": 1700000060000
    }"#;
    let api = MockApi::new(StatusCode::OK, body);
    let client = api.serve().await;
    let options = BedrockStatusOptions {
        timeout: Duration::from_secs(3),
    };
    let status = client
        .bedrock_status("demo.mcstatus.io", 19132, &options)
        .await
        .unwrap();
    assert!(!status.online);
    assert!(status.version.is_none());
    assert!(status.players.is_none());

    let seen = api.only_request();
    assert_eq!(seen.path, "/v2/status/bedrock/demo.mcstatus.io:19132");
    assert_eq!(seen.query.as_deref(), Some("timeout=3.0"));
}

#[tokio::test]
async fn test_icon() {
    let (image, png) = sample_png();
    let api = MockApi::new(StatusCode::OK, png);
    let client = api.serve().await;
    let icon = client
        .icon("demo.mcstatus.io", 25565, &IconOptions::default())
        .await
        .unwrap();
    assert_eq!(icon.to_rgba8(), image.to_rgba8());

    let seen = api.only_request();
    assert_eq!(seen.path, "/v2/icon/demo.mcstatus.io:25565");
    assert_eq!(seen.query.as_deref(), Some("timeout=5.0"));
}

#[tokio::test]
async fn test_icon_not_png() {
    let api = MockApi::new(StatusCode::OK, "<html>oops</html>");
    let client = api.serve().await;
    let err = client
        .icon("demo.mcstatus.io", 25565, &IconOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode(DecodeError::Png(_))));
}

#[tokio::test]
async fn test_java_widget() {
    let (image, png) = sample_png();
    let api = MockApi::new(StatusCode::OK, png);
    let client = api.serve().await;
    let options = JavaWidgetOptions {
        dark: false,
        rounded: true,
        timeout: Duration::from_secs(2),
    };
    let widget = client
        .java_widget("demo.mcstatus.io", 25565, &options)
        .await
        .unwrap();
    assert_eq!(widget.to_rgba8(), image.to_rgba8());

    let seen = api.only_request();
    assert_eq!(seen.path, "/v2/widget/java/demo.mcstatus.io:25565");
    assert_eq!(
        seen.query.as_deref(),
        Some("dark=false&rounded=true&timeout=2.0")
    );
}

#[tokio::test]
async fn test_send_vote_v1() {
    let api = MockApi::new(StatusCode::OK, Vec::new());
    let client = api.serve().await;
    let vote = VoteOptions {
        host: "votifier.example.com".to_owned(),
        port: 8192,
        username: "valkyrie_pilot".to_owned(),
        credentials: VoteCredentials::V1 {
            public_key: "pk".to_owned(),
            ip: "1.2.3.4".to_owned(),
        },
        ..Default::default()
    };
    client.send_vote(&vote).await.unwrap();

    let seen = api.only_request();
    assert_eq!(seen.method, Method::POST);
    assert_eq!(seen.path, "/v2/vote");
    let query = seen.query.unwrap();
    let pairs: Vec<&str> = query.split('&').collect();
    assert!(pairs.contains(&"version=1"));
    assert!(pairs.contains(&"publickey=pk"));
    assert!(pairs.contains(&"ip=1.2.3.4"));
    assert!(pairs.contains(&"host=votifier.example.com"));
    assert!(pairs.contains(&"serviceName=mcstatus.io"));
    assert!(!pairs.iter().any(|p| p.starts_with("token=") || p.starts_with("uuid=")));
}

#[tokio::test]
async fn test_send_vote_v2() {
    let api = MockApi::new(StatusCode::OK, Vec::new());
    let client = api.serve().await;
    let vote = VoteOptions {
        host: "votifier.example.com".to_owned(),
        username: "valkyrie_pilot".to_owned(),
        credentials: VoteCredentials::V2 {
            token: "tok".to_owned(),
            uuid: "b5dcf182".to_owned(),
        },
        ..Default::default()
    };
    client.send_vote(&vote).await.unwrap();

    let query = api.only_request().query.unwrap();
    let pairs: Vec<&str> = query.split('&').collect();
    assert!(pairs.contains(&"version=2"));
    assert!(pairs.contains(&"token=tok"));
    assert!(pairs.contains(&"uuid=b5dcf182"));
    assert!(!pairs.iter().any(|p| p.starts_with("publickey=") || p.starts_with("ip=")));
}

#[tokio::test]
async fn test_concurrent_lookups() {
    let api = MockApi::new(StatusCode::OK, java_body(None));
    let client = api.serve().await;
    let options = JavaStatusOptions::default();
    let (a, b) = tokio::join!(
        client.java_status("a.example.com", 25565, &options),
        client.java_status("b.example.com", 25565, &options),
    );
    assert!(a.unwrap().online);
    assert!(b.unwrap().online);
    assert_eq!(api.seen().len(), 2);
}

#[tokio::test]
async fn test_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);
    let client = Client::builder()
        .base_url(format!("http://{address}/v2"))
        .connect_timeout(Duration::from_secs(2))
        .build()
        .unwrap();
    let err = client
        .icon("demo.mcstatus.io", 25565, &IconOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}
