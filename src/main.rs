#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
mod args;

use std::time::Duration;

use mcstatus::{Client, DEFAULT_BASE_URL, VoteCredentials, VoteOptions};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::args::{Args, BedrockArgs, Command, IconArgs, JavaArgs, VoteArgs, WidgetArgs};

#[macro_use]
extern crate tracing;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    start_tracing();
    let args: Args = argh::from_env();
    let base_url =
        std::env::var("MCSTATUS_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
    let client = Client::builder().base_url(base_url).build()?;
    match args.command {
        Command::Java(args) => java(&client, args).await?,
        Command::Bedrock(args) => bedrock(&client, args).await?,
        Command::Icon(args) => icon(&client, args).await?,
        Command::Widget(args) => widget(&client, args).await?,
        Command::Vote(args) => vote(&client, args).await?,
    }
    Ok(())
}

async fn java(client: &Client, args: JavaArgs) -> Result<(), Failure> {
    let options = mcstatus::JavaStatusOptions {
        query: !args.no_query,
        timeout: seconds(args.timeout)?,
    };
    let status = client.java_status(&args.host, args.port, &options).await?;
    if let Some(path) = args.icon_output {
        let icon = status.icon.as_ref().unwrap_or_else(|| mcstatus::default_icon());
        icon.save_with_format(&path, image::ImageFormat::Png)?;
        info!(path = %path, "Saved server icon");
    }
    print_json(&status)
}

async fn bedrock(client: &Client, args: BedrockArgs) -> Result<(), Failure> {
    let options = mcstatus::BedrockStatusOptions {
        timeout: seconds(args.timeout)?,
    };
    let status = client.bedrock_status(&args.host, args.port, &options).await?;
    print_json(&status)
}

async fn icon(client: &Client, args: IconArgs) -> Result<(), Failure> {
    let options = mcstatus::IconOptions {
        timeout: seconds(args.timeout)?,
    };
    let icon = client.icon(&args.host, args.port, &options).await?;
    icon.save_with_format(&args.output, image::ImageFormat::Png)?;
    info!(path = %args.output, width = icon.width(), height = icon.height(), "Saved server icon");
    Ok(())
}

async fn widget(client: &Client, args: WidgetArgs) -> Result<(), Failure> {
    let options = mcstatus::JavaWidgetOptions {
        dark: !args.light,
        rounded: !args.square,
        timeout: seconds(args.timeout)?,
    };
    let widget = client.java_widget(&args.host, args.port, &options).await?;
    widget.save_with_format(&args.output, image::ImageFormat::Png)?;
    info!(path = %args.output, "Saved status widget");
    Ok(())
}

async fn vote(client: &Client, mut args: VoteArgs) -> Result<(), Failure> {
    let credentials = credentials(&mut args)?;
    let mut vote = VoteOptions {
        host: args.host,
        port: args.port,
        timeout: seconds(args.timeout)?,
        username: args.username,
        credentials,
        ..Default::default()
    };
    if let Some(service_name) = args.service_name {
        vote.service_name = service_name;
    }
    client.send_vote(&vote).await?;
    info!(username = %vote.username, host = %vote.host, "Vote sent");
    Ok(())
}

fn credentials(args: &mut VoteArgs) -> Result<VoteCredentials, Failure> {
    if let Some(other) = VoteCredentials::other(args.version) {
        return Ok(other);
    }
    if args.version == 1 {
        Ok(VoteCredentials::V1 {
            public_key: args.public_key.take().ok_or(Failure::MissingArgument("--public-key"))?,
            ip: args.ip.take().ok_or(Failure::MissingArgument("--ip"))?,
        })
    } else {
        Ok(VoteCredentials::V2 {
            token: args.token.take().ok_or(Failure::MissingArgument("--token"))?,
            uuid: args.uuid.take().unwrap_or_default(),
        })
    }
}

fn seconds(value: f64) -> Result<Duration, Failure> {
    Duration::try_from_secs_f64(value).map_err(|_| Failure::InvalidTimeout(value))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Failure> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(thiserror::Error, Debug)]
pub enum Failure {
    #[error("API request failed: {0}")]
    Api(#[from] mcstatus::Error),
    #[error("Could not save image: {0}")]
    Image(#[from] image::ImageError),
    #[error("JSON processing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Timeout must be a non-negative number of seconds, got {0}")]
    InvalidTimeout(f64),
    #[error("Missing required argument `{0}`")]
    MissingArgument(&'static str),
}

fn start_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(concat!(env!("CARGO_CRATE_NAME"), "=info").parse().unwrap())
        .with_env_var("LOG")
        .from_env()
        .expect("failed to parse env");
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}
