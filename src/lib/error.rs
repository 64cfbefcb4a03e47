// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::JsonDisplay;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Please report this as bug to upstream
    Bug,
    /// Invalid argument
    InvalidArgument,
    /// No reply from controller: refused, reset or timed out
    ConnectionFailure,
    /// Controller replied with a document we cannot decode
    MalformData,
    /// Controller replied with a non-success status
    ControllerFailure,
}

// Try not implement From for SdncError here unless you are sure this
// error should always convert to certain type of ErrorKind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct SdncError {
    pub kind: ErrorKind,
    pub msg: String,
}

impl std::fmt::Display for SdncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.msg)
    }
}

impl SdncError {
    pub fn new(kind: ErrorKind, msg: String) -> Self {
        Self { kind, msg }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn msg(&self) -> &str {
        self.msg.as_str()
    }
}

impl std::error::Error for SdncError {}

impl From<serde_json::Error> for SdncError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(ErrorKind::MalformData, format!("serde_json::Error: {e}"))
    }
}

impl From<reqwest::Error> for SdncError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            Self::new(
                ErrorKind::InvalidArgument,
                format!("Invalid HTTP request: {e}"),
            )
        } else {
            Self::new(ErrorKind::ConnectionFailure, format!("{e}"))
        }
    }
}
