// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::session::{
    delete_document, get_document, path_key, send_document,
};
use crate::{
    DataStore, DeviceState, HttpMethod, NetworkDevice, SdncResult,
    SdncSession, SdncStatus,
};

const NETCONF_TOPOLOGY_PATH: &str =
    "network-topology:network-topology/topology/topology-netconf";
const CONNECTION_STATUS_CONNECTED: &str = "connected";
const MOUNT_POINT: &str = "yang-ext:mount";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct NetconfNodeStatus {
    pub name: String,
    /// Either [DeviceState::Connected] or [DeviceState::Disconnected]
    pub state: DeviceState,
}

#[derive(Deserialize, Default)]
struct NetconfTopologyDoc {
    #[serde(default)]
    topology: Vec<NetconfTopology>,
}

#[derive(Deserialize, Default)]
struct NetconfTopology {
    #[serde(default)]
    node: Vec<NetconfNode>,
}

#[derive(Deserialize, Default)]
struct NetconfNodeDoc {
    #[serde(default)]
    node: Vec<NetconfNode>,
}

#[derive(Deserialize, Default)]
struct NetconfNode {
    #[serde(rename = "node-id")]
    node_id: String,
    #[serde(rename = "netconf-node-topology:connection-status")]
    connection_status: Option<String>,
}

impl NetconfNode {
    fn is_connected(&self) -> bool {
        self.connection_status.as_deref() == Some(CONNECTION_STATUS_CONNECTED)
    }
}

/// Configuration and connection state of NETCONF devices.
///
/// Holds no state of its own, every query is a fresh controller round trip.
pub struct DeviceRegistry<'a> {
    session: &'a dyn SdncSession,
}

impl<'a> DeviceRegistry<'a> {
    /// Pseudo node holding the controller's own configuration, never
    /// reported as a device.
    pub const CONTROLLER_NODE: &'static str = "controller-config";

    pub fn new(session: &'a dyn SdncSession) -> Self {
        Self { session }
    }

    fn node_path(name: &str) -> String {
        format!("{NETCONF_TOPOLOGY_PATH}/node/{}", path_key(name))
    }

    /// Add device to controller configuration.
    ///
    /// Registering an existing name is rejected by controller as data
    /// conflict: [SdncResult::is_conflict] is true.
    pub fn register(&self, device: &NetworkDevice) -> SdncResult<()> {
        log::info!("Registering NETCONF device {}", device.name);
        send_document(
            self.session,
            HttpMethod::Post,
            DataStore::Config.path(NETCONF_TOPOLOGY_PATH).as_str(),
            &device.to_value(),
        )
    }

    pub fn unregister(&self, name: &str) -> SdncResult<()> {
        log::info!("Unregistering NETCONF device {name}");
        delete_document(
            self.session,
            DataStore::Config.path(&Self::node_path(name)).as_str(),
        )
    }

    /// [SdncStatus::NodeConfigured] with the configuration document, or
    /// [SdncStatus::DataNotFound].
    pub fn config_status(&self, name: &str) -> SdncResult<Value> {
        let result = get_document(
            self.session,
            DataStore::Config.path(&Self::node_path(name)).as_str(),
        );
        if result.is_ok() {
            result.map(|doc| (SdncStatus::NodeConfigured, doc))
        } else {
            result
        }
    }

    /// [SdncStatus::NodeConnected], [SdncStatus::NodeDisconnected] or
    /// [SdncStatus::NodeNotFound].
    pub fn conn_status(&self, name: &str) -> SdncResult<()> {
        let result = get_document(
            self.session,
            DataStore::Operational.path(&Self::node_path(name)).as_str(),
        );
        match result.status {
            SdncStatus::Ok => (),
            SdncStatus::DataNotFound => {
                return result.map(|_| (SdncStatus::NodeNotFound, None));
            }
            _ => return result.cast(),
        }
        result.map(|doc| {
            let doc = match doc.map(serde_json::from_value::<NetconfNodeDoc>) {
                Some(Ok(d)) => d,
                _ => {
                    log::warn!("Invalid operational document for node {name}");
                    return (SdncStatus::MalformData, None);
                }
            };
            match doc.node.iter().find(|n| n.node_id == name) {
                Some(node) if node.is_connected() => {
                    (SdncStatus::NodeConnected, None)
                }
                Some(_) => (SdncStatus::NodeDisconnected, None),
                None => (SdncStatus::NodeNotFound, None),
            }
        })
    }

    /// Names of all NETCONF devices in controller configuration.
    pub fn list_configured(&self) -> SdncResult<Vec<String>> {
        let result = self.get_topology(DataStore::Config);
        if !result.is_ok() {
            return result.cast();
        }
        result.map(|topo| match topo {
            Some(topo) => (
                SdncStatus::Ok,
                Some(topo.into_iter().map(|n| n.node_id).collect()),
            ),
            None => (SdncStatus::MalformData, None),
        })
    }

    /// Connection state of all devices mounted by controller.
    pub fn list_conn_status(&self) -> SdncResult<Vec<NetconfNodeStatus>> {
        let result = self.get_topology(DataStore::Operational);
        if !result.is_ok() {
            return result.cast();
        }
        result.map(|topo| match topo {
            Some(topo) => (
                SdncStatus::Ok,
                Some(
                    topo.into_iter()
                        .map(|n| NetconfNodeStatus {
                            state: if n.is_connected() {
                                DeviceState::Connected
                            } else {
                                DeviceState::Disconnected
                            },
                            name: n.node_id,
                        })
                        .collect(),
                ),
            ),
            None => (SdncStatus::MalformData, None),
        })
    }

    fn get_topology(&self, store: DataStore) -> SdncResult<Vec<NetconfNode>> {
        let result = get_document(
            self.session,
            store.path(NETCONF_TOPOLOGY_PATH).as_str(),
        );
        if !result.is_ok() {
            return result.cast();
        }
        result.map(|doc| {
            match doc.map(serde_json::from_value::<NetconfTopologyDoc>) {
                Some(Ok(doc)) => (
                    SdncStatus::Ok,
                    Some(
                        doc.topology
                            .into_iter()
                            .flat_map(|t| t.node)
                            .filter(|n| n.node_id != Self::CONTROLLER_NODE)
                            .collect(),
                    ),
                ),
                Some(Err(e)) => {
                    log::warn!("Invalid NETCONF topology document: {e}");
                    (SdncStatus::MalformData, None)
                }
                None => (SdncStatus::MalformData, None),
            }
        })
    }

    /// Raw `ietf-netconf-monitoring` schema list of a mounted device.
    pub fn get_device_schemas(&self, name: &str) -> SdncResult<Value> {
        get_document(
            self.session,
            DataStore::Operational
                .path(&format!(
                    "{}/{MOUNT_POINT}/ietf-netconf-monitoring:netconf-state/\
                     schemas",
                    Self::node_path(name)
                ))
                .as_str(),
        )
    }

    /// YANG text of one schema supported by a mounted device.
    pub fn get_device_schema(
        &self,
        name: &str,
        identifier: &str,
        version: &str,
    ) -> SdncResult<String> {
        let input = serde_json::json!({
            "input": {
                "identifier": identifier,
                "version": version,
                "format": "yang",
            }
        });
        let path = DataStore::Operations.path(&format!(
            "{}/{MOUNT_POINT}/ietf-netconf-monitoring:get-schema",
            Self::node_path(name)
        ));
        let result = crate::session::exchange(
            self.session,
            HttpMethod::Post,
            path.as_str(),
            Some(&input),
        );
        if !result.is_ok() {
            return result;
        }
        result.map(|body| {
            let data = body
                .as_deref()
                .and_then(|b| serde_json::from_str::<Value>(b).ok())
                .and_then(|v| {
                    v.pointer("/get-schema/output/data")
                        .and_then(|d| d.as_str())
                        .map(|d| d.to_string())
                });
            match data {
                Some(d) => (SdncStatus::Ok, Some(d)),
                None => {
                    log::warn!("No schema data in get-schema reply of {name}");
                    (SdncStatus::MalformData, None)
                }
            }
        })
    }

    /// Full configuration of a mounted device, as the device reports it.
    pub fn get_device_config(&self, name: &str) -> SdncResult<Value> {
        get_document(
            self.session,
            DataStore::Config
                .path(&format!("{}/{MOUNT_POINT}", Self::node_path(name)))
                .as_str(),
        )
    }
}
