// SPDX-License-Identifier: Apache-2.0

use sdnc::{SdncError, SdncStatus};

#[derive(Clone, Debug)]
pub(crate) struct CliError {
    msg: String,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.msg)
    }
}

impl std::error::Error for CliError {}

impl From<serde_yaml::Error> for CliError {
    fn from(e: serde_yaml::Error) -> Self {
        Self {
            msg: format!("serde_yaml::Error: {}", e),
        }
    }
}

impl From<SdncError> for CliError {
    fn from(e: SdncError) -> Self {
        Self {
            msg: format!("SdncError: {}", e),
        }
    }
}

impl From<SdncStatus> for CliError {
    fn from(status: SdncStatus) -> Self {
        Self {
            msg: format!("Controller replied: {}", status),
        }
    }
}

impl From<&str> for CliError {
    fn from(msg: &str) -> Self {
        Self {
            msg: msg.to_string(),
        }
    }
}

impl From<String> for CliError {
    fn from(msg: String) -> Self {
        Self { msg }
    }
}
