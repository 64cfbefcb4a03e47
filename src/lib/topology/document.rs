// SPDX-License-Identifier: Apache-2.0

// Controller snapshot documents, only the fields used by graph and
// inventory. Unknown fields are ignored as controller plugins may augment
// these containers.

use serde::Deserialize;
use serde_json::Value;

use crate::deserializer::{option_number_as_string, u64_or_string};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TopologyDoc {
    #[serde(default)]
    pub(crate) topology: Vec<TopologyEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TopologyEntry {
    #[serde(rename = "topology-id")]
    pub(crate) topology_id: String,
    #[serde(default)]
    pub(crate) node: Vec<TopologyNode>,
    #[serde(default)]
    pub(crate) link: Vec<TopologyLink>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TopologyNode {
    #[serde(rename = "node-id")]
    pub(crate) node_id: String,
    #[serde(default, rename = "termination-point")]
    pub(crate) termination_points: Vec<TerminationPoint>,
    #[serde(rename = "host-tracker-service:id")]
    pub(crate) host_id: Option<String>,
    #[serde(default, rename = "host-tracker-service:addresses")]
    pub(crate) addresses: Vec<HostAddress>,
    #[serde(default, rename = "host-tracker-service:attachment-points")]
    pub(crate) attachment_points: Vec<AttachmentPoint>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TerminationPoint {
    #[serde(rename = "tp-id")]
    pub(crate) tp_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct HostAddress {
    pub(crate) mac: Option<String>,
    pub(crate) ip: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AttachmentPoint {
    #[serde(rename = "tp-id")]
    pub(crate) tp_id: String,
    #[serde(default)]
    pub(crate) active: bool,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TopologyLink {
    #[serde(rename = "link-id")]
    pub(crate) link_id: String,
    pub(crate) source: LinkSource,
    pub(crate) destination: LinkDestination,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LinkSource {
    #[serde(rename = "source-node")]
    pub(crate) node: String,
    #[serde(rename = "source-tp")]
    pub(crate) tp: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LinkDestination {
    #[serde(rename = "dest-node")]
    pub(crate) node: String,
    #[serde(rename = "dest-tp")]
    pub(crate) tp: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct InventoryDoc {
    #[serde(alias = "opendaylight-inventory:nodes")]
    pub(crate) nodes: InventoryNodes,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct InventoryNodes {
    #[serde(default)]
    pub(crate) node: Vec<InventoryNode>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct InventoryNode {
    pub(crate) id: String,
    #[serde(rename = "flow-node-inventory:ip-address")]
    pub(crate) ip_address: Option<String>,
    #[serde(rename = "flow-node-inventory:manufacturer")]
    pub(crate) manufacturer: Option<String>,
    #[serde(rename = "flow-node-inventory:hardware")]
    pub(crate) hardware: Option<String>,
    #[serde(rename = "flow-node-inventory:software")]
    pub(crate) software: Option<String>,
    #[serde(rename = "flow-node-inventory:serial-number")]
    pub(crate) serial_number: Option<String>,
    #[serde(rename = "flow-node-inventory:description")]
    pub(crate) description: Option<String>,
    #[serde(default, rename = "node-connector")]
    pub(crate) connectors: Vec<InventoryConnector>,
    #[serde(default, rename = "flow-node-inventory:table")]
    pub(crate) tables: Vec<InventoryTable>,
    #[serde(default, rename = "flow-node-inventory:group")]
    pub(crate) groups: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct InventoryConnector {
    pub(crate) id: String,
    #[serde(
        default,
        rename = "flow-node-inventory:port-number",
        deserialize_with = "option_number_as_string"
    )]
    pub(crate) port_number: Option<String>,
    #[serde(rename = "flow-node-inventory:name")]
    pub(crate) name: Option<String>,
    #[serde(rename = "flow-node-inventory:hardware-address")]
    pub(crate) hardware_address: Option<String>,
    #[serde(rename = "flow-node-inventory:current-speed")]
    pub(crate) current_speed: Option<u64>,
    #[serde(rename = "flow-node-inventory:state")]
    pub(crate) state: Option<InventoryPortState>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct InventoryPortState {
    #[serde(default, rename = "link-down")]
    pub(crate) link_down: bool,
    #[serde(default)]
    pub(crate) blocked: bool,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct InventoryTable {
    #[serde(
        rename = "opendaylight-flow-table-statistics:flow-table-statistics"
    )]
    pub(crate) statistics: Option<InventoryTableStatistics>,
    #[serde(default)]
    pub(crate) flow: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct InventoryTableStatistics {
    #[serde(
        default,
        rename = "active-flows",
        deserialize_with = "u64_or_string"
    )]
    pub(crate) active_flows: u64,
}
