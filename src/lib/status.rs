// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{ErrorKind, SdncError};

/// Outcome of one controller operation.
///
/// The set is closed: transport-level failures are classified into it at
/// the session boundary and components may only narrow a generic status
/// into a more specific one (e.g. [SdncStatus::DataNotFound] on a node
/// operational path becomes [SdncStatus::NodeNotFound]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SdncStatus {
    Ok,
    /// No response from controller
    ConnError,
    DataNotFound,
    BadRequest,
    UnauthorizedAccess,
    InternalError,
    NodeConnected,
    NodeDisconnected,
    NodeNotFound,
    NodeConfigured,
    /// Non-success HTTP reply not covered by other variants
    HttpError { code: u16, reason: String },
    /// Reply body is empty or undecodable where a document is required
    MalformData,
    Unknown,
}

impl Default for SdncStatus {
    fn default() -> Self {
        Self::Unknown
    }
}

impl std::fmt::Display for SdncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "Success"),
            Self::ConnError => write!(f, "Server connection error"),
            Self::DataNotFound => write!(f, "Requested data not found"),
            Self::BadRequest => write!(f, "Bad or malformed request"),
            Self::UnauthorizedAccess => write!(f, "Unauthorized access"),
            Self::InternalError => write!(f, "Internal server error"),
            Self::NodeConnected => write!(f, "Node is connected"),
            Self::NodeDisconnected => write!(f, "Node is disconnected"),
            Self::NodeNotFound => write!(f, "Node not found"),
            Self::NodeConfigured => write!(f, "Node is configured"),
            Self::HttpError { code, reason } => {
                write!(f, "HTTP error {code} {reason}")
            }
            Self::MalformData => write!(f, "Malformed data"),
            Self::Unknown => write!(f, "Unknown status"),
        }
    }
}

impl SdncStatus {
    pub const HTTP_CONFLICT: u16 = 409;

    /// Classify a raw HTTP status code.
    pub fn from_http(code: u16, reason: &str) -> Self {
        match code {
            200 | 201 | 204 => Self::Ok,
            400 => Self::BadRequest,
            401 | 403 => Self::UnauthorizedAccess,
            404 => Self::DataNotFound,
            500 => Self::InternalError,
            _ => Self::HttpError {
                code,
                reason: reason.to_string(),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        self == &Self::Ok
    }

    /// Whether the controller rejected a create because the data already
    /// exists.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::HttpError { code, .. } if *code == Self::HTTP_CONFLICT
        )
    }

    /// Statuses describing a successful exchange: [SdncStatus::Ok] and the
    /// node states reported by the controller.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Self::Ok
                | Self::NodeConnected
                | Self::NodeDisconnected
                | Self::NodeConfigured
        )
    }

    fn error_kind(&self) -> ErrorKind {
        match self {
            Self::ConnError => ErrorKind::ConnectionFailure,
            Self::MalformData => ErrorKind::MalformData,
            Self::Unknown => ErrorKind::Bug,
            _ => ErrorKind::ControllerFailure,
        }
    }
}

/// Raw detail of the HTTP exchange behind a failed status.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct SdncHttpDetail {
    pub code: u16,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl SdncHttpDetail {
    pub fn new(code: u16, reason: &str, body: Option<String>) -> Self {
        Self {
            code,
            reason: reason.to_string(),
            body,
        }
    }
}

/// Status paired with an optional payload.
///
/// Every operation of this crate returns this instead of `Result` so that
/// expected failures (not found, conflict, connection failure) stay values.
/// Use [SdncResult::into_result] to switch to `?` style.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct SdncResult<T> {
    pub status: SdncStatus,
    pub detail: Option<SdncHttpDetail>,
    pub data: Option<T>,
}

impl<T> SdncResult<T> {
    pub fn new(status: SdncStatus) -> Self {
        Self {
            status,
            detail: None,
            data: None,
        }
    }

    pub fn with_data(status: SdncStatus, data: T) -> Self {
        Self {
            status,
            detail: None,
            data: Some(data),
        }
    }

    pub fn ok(data: T) -> Self {
        Self::with_data(SdncStatus::Ok, data)
    }

    pub(crate) fn with_detail(
        mut self,
        detail: Option<SdncHttpDetail>,
    ) -> Self {
        self.detail = detail;
        self
    }

    pub fn status(&self) -> &SdncStatus {
        &self.status
    }

    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }

    pub fn is_conflict(&self) -> bool {
        self.status.is_conflict()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    pub fn detail(&self) -> Option<&SdncHttpDetail> {
        self.detail.as_ref()
    }

    /// Replace status and payload, keeping the HTTP detail.
    pub fn map<U, F>(self, f: F) -> SdncResult<U>
    where
        F: FnOnce(Option<T>) -> (SdncStatus, Option<U>),
    {
        let (status, data) = f(self.data);
        SdncResult {
            status,
            detail: self.detail,
            data,
        }
    }

    /// Carry a failed status over to another payload type.
    pub(crate) fn cast<U>(self) -> SdncResult<U> {
        SdncResult {
            status: self.status,
            detail: self.detail,
            data: None,
        }
    }

    pub fn into_result(self) -> Result<Option<T>, SdncError> {
        if self.status.is_success() {
            Ok(self.data)
        } else {
            let mut msg = self.status.to_string();
            if let Some(body) =
                self.detail.as_ref().and_then(|d| d.body.as_ref())
            {
                msg = format!("{msg}: {body}");
            }
            Err(SdncError::new(self.status.error_kind(), msg))
        }
    }
}
