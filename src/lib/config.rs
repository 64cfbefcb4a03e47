// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{DebugHideSecrets, JsonDisplayHideSecrets};

/// Controller connection settings.
#[derive(
    Clone, PartialEq, Eq, Serialize, Deserialize, JsonDisplayHideSecrets,
    DebugHideSecrets,
)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
#[non_exhaustive]
pub struct SdncConfig {
    /// IP address or host name of the controller
    pub host: String,
    /// RESTCONF port, default 8181
    #[serde(default = "default_port")]
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Seconds to wait for a reply before reporting
    /// [crate::SdncStatus::ConnError], default 30
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_port() -> u16 {
    SdncConfig::DEFAULT_PORT
}

fn default_timeout() -> u64 {
    SdncConfig::DEFAULT_TIMEOUT_SECS
}

impl SdncConfig {
    pub const DEFAULT_PORT: u16 = 8181;
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    pub const HIDE_PASSWORD_STR: &'static str = "<_password_hid_by_sdnc_>";

    pub fn new(host: &str, username: &str, password: &str) -> Self {
        Self {
            host: host.to_string(),
            port: Self::DEFAULT_PORT,
            username: username.to_string(),
            password: password.to_string(),
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn hide_secrets(&mut self) {
        self.password = Self::HIDE_PASSWORD_STR.to_string();
    }

    /// RESTCONF root, e.g. `http://192.0.2.1:8181/restconf`
    pub fn base_url(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("http://[{}]:{}/restconf", self.host, self.port)
        } else {
            format!("http://{}:{}/restconf", self.host, self.port)
        }
    }
}
