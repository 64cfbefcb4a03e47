// SPDX-License-Identifier: Apache-2.0

use serde_json::Value;

use crate::{SdncError, SdncHttpDetail, SdncResult, SdncStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// RESTCONF data store a path lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataStore {
    /// Intended state written by clients
    Config,
    /// State reported by devices
    Operational,
    /// RPC invocation
    Operations,
}

impl DataStore {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Operational => "operational",
            Self::Operations => "operations",
        }
    }

    /// Path relative to the RESTCONF root.
    pub fn path(&self, sub_path: &str) -> String {
        format!("{}/{}", self.as_str(), sub_path.trim_start_matches('/'))
    }
}

/// Raw reply of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub struct SdncReply {
    pub code: u16,
    pub reason: String,
    pub body: Option<String>,
}

impl SdncReply {
    pub fn new(code: u16, reason: &str, body: Option<String>) -> Self {
        Self {
            code,
            reason: reason.to_string(),
            body,
        }
    }
}

/// One authenticated request/response exchange with the controller.
///
/// Implementations return `Err` only when no reply was received at all
/// (refused, reset, timed out); any HTTP status, including failures, is an
/// `Ok(SdncReply)`. No retry is expected from implementations.
pub trait SdncSession {
    fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<SdncReply, SdncError>;
}

/// Percent-encode a list key (device name, flow ID) for use as one path
/// segment, so `/`, `#` or `?` inside the key are not taken as URL syntax.
pub(crate) fn path_key(key: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(key)
}

pub(crate) fn exchange(
    session: &dyn SdncSession,
    method: HttpMethod,
    path: &str,
    body: Option<&Value>,
) -> SdncResult<String> {
    log::debug!("{method} {path}");
    let reply = match session.request(method, path, body) {
        Ok(r) => r,
        Err(e) => {
            log::debug!("{method} {path} got no reply: {e}");
            return SdncResult::new(SdncStatus::ConnError);
        }
    };
    let status = SdncStatus::from_http(reply.code, reply.reason.as_str());
    log::debug!(
        "{method} {path} replied {} {}: {status}",
        reply.code,
        reply.reason
    );
    if status.is_ok() {
        SdncResult {
            status,
            detail: None,
            data: reply.body.filter(|b| !b.trim().is_empty()),
        }
    } else {
        SdncResult::new(status).with_detail(Some(SdncHttpDetail::new(
            reply.code,
            reply.reason.as_str(),
            reply.body,
        )))
    }
}

/// Fetch a JSON document, an empty or undecodable body is
/// [SdncStatus::MalformData].
pub(crate) fn get_document(
    session: &dyn SdncSession,
    path: &str,
) -> SdncResult<Value> {
    let result = exchange(session, HttpMethod::Get, path, None);
    if !result.is_ok() {
        return result.cast();
    }
    result.map(|body| {
        match body.as_deref().map(serde_json::from_str::<Value>) {
            Some(Ok(v)) => (SdncStatus::Ok, Some(v)),
            Some(Err(e)) => {
                log::warn!("Reply of GET {path} is not valid JSON: {e}");
                (SdncStatus::MalformData, None)
            }
            None => {
                log::warn!("Reply of GET {path} has empty body");
                (SdncStatus::MalformData, None)
            }
        }
    })
}

/// Send a document and discard any reply body.
pub(crate) fn send_document(
    session: &dyn SdncSession,
    method: HttpMethod,
    path: &str,
    body: &Value,
) -> SdncResult<()> {
    discard_body(exchange(session, method, path, Some(body)))
}

pub(crate) fn delete_document(
    session: &dyn SdncSession,
    path: &str,
) -> SdncResult<()> {
    discard_body(exchange(session, HttpMethod::Delete, path, None))
}

fn discard_body(result: SdncResult<String>) -> SdncResult<()> {
    if result.is_ok() {
        SdncResult::new(SdncStatus::Ok)
    } else {
        result.cast()
    }
}
