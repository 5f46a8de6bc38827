use argh::FromArgs;
use mcstatus::{DEFAULT_BEDROCK_PORT, DEFAULT_JAVA_PORT, DEFAULT_VOTIFIER_PORT};

/// Look up Minecraft servers through the mcstatus.io API.
#[derive(FromArgs, Debug)]
pub struct Args {
    #[argh(subcommand)]
    pub command: Command,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
pub enum Command {
    Java(JavaArgs),
    Bedrock(BedrockArgs),
    Icon(IconArgs),
    Widget(WidgetArgs),
    Vote(VoteArgs),
}

/// Print the status of a Java edition server as JSON.
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "java")]
pub struct JavaArgs {
    /// server hostname or IP
    #[argh(positional)]
    pub host: String,
    /// server port
    #[argh(positional, default = "DEFAULT_JAVA_PORT")]
    pub port: u16,
    /// do not use the query protocol
    #[argh(switch)]
    pub no_query: bool,
    /// seconds the API may spend querying the server
    #[argh(option, default = "5.0")]
    pub timeout: f64,
    /// also write the server icon (or the default icon) to this PNG file
    #[argh(option)]
    pub icon_output: Option<String>,
}

/// Print the status of a Bedrock edition server as JSON.
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "bedrock")]
pub struct BedrockArgs {
    /// server hostname or IP
    #[argh(positional)]
    pub host: String,
    /// server port
    #[argh(positional, default = "DEFAULT_BEDROCK_PORT")]
    pub port: u16,
    /// seconds the API may spend querying the server
    #[argh(option, default = "5.0")]
    pub timeout: f64,
}

/// Save a Java server's icon.
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "icon")]
pub struct IconArgs {
    /// server hostname or IP
    #[argh(positional)]
    pub host: String,
    /// server port
    #[argh(positional, default = "DEFAULT_JAVA_PORT")]
    pub port: u16,
    /// PNG file to write
    #[argh(option, short = 'o', default = "String::from(\"icon.png\")")]
    pub output: String,
    /// seconds the API may spend querying the server
    #[argh(option, default = "5.0")]
    pub timeout: f64,
}

/// Save a rendered status widget for a Java server.
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "widget")]
pub struct WidgetArgs {
    /// server hostname or IP
    #[argh(positional)]
    pub host: String,
    /// server port
    #[argh(positional, default = "DEFAULT_JAVA_PORT")]
    pub port: u16,
    /// PNG file to write
    #[argh(option, short = 'o', default = "String::from(\"widget.png\")")]
    pub output: String,
    /// use the light theme
    #[argh(switch)]
    pub light: bool,
    /// use square corners
    #[argh(switch)]
    pub square: bool,
    /// seconds the API may spend querying the server
    #[argh(option, default = "5.0")]
    pub timeout: f64,
}

/// Send a vote to a Votifier server.
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "vote")]
pub struct VoteArgs {
    /// votifier hostname or IP
    #[argh(positional)]
    pub host: String,
    /// player to vote for
    #[argh(positional)]
    pub username: String,
    /// votifier port
    #[argh(option, default = "DEFAULT_VOTIFIER_PORT")]
    pub port: u16,
    /// votifier protocol version
    #[argh(option, default = "2")]
    pub version: u32,
    /// service name the vote is attributed to
    #[argh(option)]
    pub service_name: Option<String>,
    /// server public key (version 1)
    #[argh(option)]
    pub public_key: Option<String>,
    /// voter IP address (version 1)
    #[argh(option)]
    pub ip: Option<String>,
    /// shared token (version 2)
    #[argh(option)]
    pub token: Option<String>,
    /// player UUID (version 2)
    #[argh(option)]
    pub uuid: Option<String>,
    /// seconds the API may spend talking to the votifier server
    #[argh(option, default = "5.0")]
    pub timeout: f64,
}
