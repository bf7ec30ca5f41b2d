use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde_json::Value;
use tracing::debug;

use super::{HttpMethod, RemoteGateway};
use crate::config::RemoteConfig;
use crate::error::{ChangelogError, Result};

const TOKEN_HEADER: &str = "private-token";

/// Blocking HTTP gateway authenticated with a private token header
pub struct HttpGateway {
    client: Client,
    base_url: Url,
    api_prefix: Vec<String>,
}

impl HttpGateway {
    /// Create a gateway for `endpoint` (e.g. `https://gitlab.com`).
    ///
    /// # Returns
    /// * `Ok(HttpGateway)` - Ready to send requests
    /// * `Err` - If the endpoint is not an absolute URL, the token is not a
    ///   valid header value, or the HTTP client cannot be built
    pub fn new(endpoint: &str, token: &str, options: &RemoteConfig) -> Result<Self> {
        let base_url = Url::parse(endpoint).map_err(|e| {
            ChangelogError::config(format!("Invalid remote endpoint '{}': {}", endpoint, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ChangelogError::config(format!(
                "Remote endpoint '{}' cannot be used as a base URL",
                endpoint
            )));
        }

        let mut token_value = HeaderValue::from_str(token)
            .map_err(|_| ChangelogError::config("Remote token contains invalid characters"))?;
        token_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(TOKEN_HEADER, token_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(options.accept_invalid_certs);
        if let Some(secs) = options.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(HttpGateway {
            client: builder.build()?,
            base_url,
            api_prefix: options
                .api_prefix
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }

    /// Full URL for a list of raw path segments, each percent-encoded.
    pub fn url_for(&self, path: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ChangelogError::config("Remote endpoint cannot be a base URL"))?
            .pop_if_empty()
            .extend(self.api_prefix.iter().map(String::as_str))
            .extend(path);
        Ok(url)
    }
}

impl RemoteGateway for HttpGateway {
    fn request(&self, method: HttpMethod, path: &[&str], body: Option<&Value>) -> Result<Value> {
        let url = self.url_for(path)?;
        let http_method = match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
        };
        debug!(%method, url = %url, "Remote request");

        let mut request = self.client.request(http_method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send()?;
        let status = response.status();
        let text = response.text()?;
        debug!(%method, status = status.as_u16(), "Remote response");

        if !status.is_success() {
            return Err(ChangelogError::Remote {
                status: status.as_u16(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}
