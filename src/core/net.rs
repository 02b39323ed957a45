// src/core/net.rs
// Blocking HTTP GET with a browser-like User-Agent and a hard timeout.
// Some servers reject default client identifiers, so the UA is always set.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, info};

use crate::error::NetError;

pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, NetError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(NetError::Client)?;
        Ok(Self { client })
    }

    /// GET `url` and return the body as text. Non-2xx is an error.
    pub fn get_text(&self, url: &str) -> Result<String, NetError> {
        info!("sending a request to '{url}'");
        let resp = self.client.get(url).send().map_err(|e| classify(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(NetError::Status { url: s!(url), status: status.as_u16() });
        }

        let body = resp.text().map_err(|e| classify(url, e))?;
        debug!("received {} bytes from '{url}'", body.len());
        Ok(body)
    }
}

fn classify(url: &str, e: reqwest::Error) -> NetError {
    if e.is_timeout() {
        NetError::Timeout { url: s!(url) }
    } else {
        NetError::Request { url: s!(url), source: e }
    }
}
