use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING};
use reqwest::Client;

pub const USER_AGENT: &str = "remapkit/0.1.0";

/// Build an HTTP client carrying the crate user-agent and the given
/// connect/read timeouts. Each component picks timeouts suited to the
/// payloads it transfers.
pub fn build_http_client(
    connect_timeout: Duration,
    read_timeout: Duration,
) -> Result<Client, reqwest::Error> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));

    Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(default_headers)
        .connect_timeout(connect_timeout)
        .timeout(read_timeout)
        .build()
}
