// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    DebugHideSecrets, DeviceRegistry, JsonDisplayHideSecrets, SdncStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
/// Lifecycle of a NETCONF device as seen through the controller.
pub enum DeviceState {
    /// Not known to the controller configuration
    Unregistered,
    /// Present in controller configuration, not yet mounted
    Configured,
    /// Mounted and session with device is up
    Connected,
    /// Mounted but session with device is down or being established
    Disconnected,
    /// Controller holds operational data but no configuration for it
    NotFound,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self::Unregistered
    }
}

impl std::fmt::Display for DeviceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Unregistered => "unregistered",
                Self::Configured => "configured",
                Self::Connected => "connected",
                Self::Disconnected => "disconnected",
                Self::NotFound => "not-found",
            }
        )
    }
}

/// NETCONF device managed through the controller.
#[derive(
    Clone, PartialEq, Eq, Serialize, Deserialize, JsonDisplayHideSecrets,
    DebugHideSecrets,
)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
#[non_exhaustive]
pub struct NetworkDevice {
    /// Node ID used by controller, must be unique
    pub name: String,
    pub host: String,
    #[serde(default = "default_netconf_port")]
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Use plain TCP instead of SSH
    #[serde(default)]
    pub tcp_only: bool,
    /// Seconds between keepalive RPCs, 0 disables keepalive
    #[serde(default)]
    pub keepalive_delay: u32,
    #[serde(default)]
    pub state: DeviceState,
}

fn default_netconf_port() -> u16 {
    NetworkDevice::DEFAULT_PORT
}

#[derive(Serialize)]
struct NetconfNodeConf<'a> {
    #[serde(rename = "node-id")]
    node_id: &'a str,
    #[serde(rename = "netconf-node-topology:host")]
    host: &'a str,
    #[serde(rename = "netconf-node-topology:port")]
    port: u16,
    #[serde(rename = "netconf-node-topology:username")]
    username: &'a str,
    #[serde(rename = "netconf-node-topology:password")]
    password: &'a str,
    #[serde(rename = "netconf-node-topology:tcp-only")]
    tcp_only: bool,
    #[serde(rename = "netconf-node-topology:keepalive-delay")]
    keepalive_delay: u32,
}

impl NetworkDevice {
    pub const DEFAULT_PORT: u16 = 830;
    pub const HIDE_PASSWORD_STR: &'static str = "<_password_hid_by_sdnc_>";

    pub fn new(
        name: &str,
        host: &str,
        port: u16,
        username: &str,
        password: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            host: host.to_string(),
            port,
            username: username.to_string(),
            password: password.to_string(),
            tcp_only: false,
            keepalive_delay: 0,
            state: DeviceState::Unregistered,
        }
    }

    pub fn hide_secrets(&mut self) {
        self.password = Self::HIDE_PASSWORD_STR.to_string();
    }

    /// Document registering this device in the controller NETCONF topology.
    pub fn to_value(&self) -> Value {
        let conf = NetconfNodeConf {
            node_id: self.name.as_str(),
            host: self.host.as_str(),
            port: self.port,
            username: self.username.as_str(),
            password: self.password.as_str(),
            tcp_only: self.tcp_only,
            keepalive_delay: self.keepalive_delay,
        };
        // Serializing plain struct with string and integer fields only
        let node = serde_json::to_value(conf).unwrap_or_default();
        serde_json::json!({ "node": [node] })
    }

    /// Re-query the controller and update [NetworkDevice::state].
    ///
    /// On query failure the state is left untouched and the failure status
    /// is returned.
    pub fn refresh_state(&mut self, registry: &DeviceRegistry) -> SdncStatus {
        let config = registry.config_status(self.name.as_str());
        let conn = match config.status {
            SdncStatus::NodeConfigured => {
                registry.conn_status(self.name.as_str())
            }
            SdncStatus::DataNotFound => {
                let conn = registry.conn_status(self.name.as_str());
                self.state = match conn.status {
                    SdncStatus::NodeConnected
                    | SdncStatus::NodeDisconnected => DeviceState::NotFound,
                    _ => DeviceState::Unregistered,
                };
                return SdncStatus::DataNotFound;
            }
            s => return s,
        };
        match conn.status {
            SdncStatus::NodeConnected => self.state = DeviceState::Connected,
            SdncStatus::NodeDisconnected => {
                self.state = DeviceState::Disconnected
            }
            SdncStatus::NodeNotFound => self.state = DeviceState::Configured,
            _ => (),
        }
        conn.status
    }
}
