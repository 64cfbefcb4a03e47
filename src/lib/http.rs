// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;

use crate::{
    ErrorKind, HttpMethod, SdncConfig, SdncError, SdncReply, SdncSession,
};

const CONTENT_TYPE_JSON: &str = "application/json";

/// Blocking RESTCONF session using HTTP basic authentication.
#[derive(Debug)]
pub struct SdncHttpSession {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl SdncHttpSession {
    pub fn new(config: &SdncConfig) -> Result<Self, SdncError> {
        if config.host.is_empty() {
            let e = SdncError::new(
                ErrorKind::InvalidArgument,
                "Controller host undefined".to_string(),
            );
            log::error!("{e}");
            return Err(e);
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        log::debug!("Controller session for {config}");
        Ok(Self {
            client,
            base_url: config.base_url(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn builder(&self, method: HttpMethod, url: &str) -> RequestBuilder {
        match method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
            HttpMethod::Delete => self.client.delete(url),
        }
    }
}

impl SdncSession for SdncHttpSession {
    fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<SdncReply, SdncError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut req = self
            .builder(method, url.as_str())
            .basic_auth(&self.username, Some(&self.password))
            .header(ACCEPT, CONTENT_TYPE_JSON);
        if let Some(body) = body {
            log::trace!("{method} {url} body {body}");
            req = req
                .header(CONTENT_TYPE, CONTENT_TYPE_JSON)
                .body(serde_json::to_string(body)?);
        }
        let resp = req.send()?;
        let status = resp.status();
        let reason = status.canonical_reason().unwrap_or_default().to_string();
        let text = resp.text()?;
        log::trace!("{method} {url} reply {} {text}", status.as_u16());
        Ok(SdncReply::new(
            status.as_u16(),
            reason.as_str(),
            if text.is_empty() { None } else { Some(text) },
        ))
    }
}
