//! Command-line and environment configuration for the `postboard` binary.

use std::net::SocketAddr;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Socket address to listen on. Use port 0 for an ephemeral port.
    #[arg(long, env = "POSTBOARD_LISTEN", default_value = "0.0.0.0:3000")]
    pub listen: SocketAddr,

    /// Path the posts routes are mounted under.
    #[arg(long, env = "POSTBOARD_BASE_PATH", default_value = "/posts", value_parser = parse_base_path)]
    pub base_path: String,
}

fn parse_base_path(raw: &str) -> Result<String, String> {
    if !raw.starts_with('/') {
        return Err("must start with `/`".to_owned());
    }
    if raw.ends_with('/') {
        return Err("must not end with `/`".to_owned());
    }
    if raw.contains(['{', '}']) {
        return Err("must not contain route parameters".to_owned());
    }
    Ok(raw.to_owned())
}
