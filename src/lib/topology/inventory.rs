// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::document::{InventoryConnector, InventoryDoc, InventoryNode};
use crate::{ErrorKind, SdncError};

const OPENFLOW_NODE_PREFIX: &str = "openflow:";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct SwitchPort {
    /// Node connector ID, e.g. `openflow:1:2`
    pub id: String,
    /// OpenFlow port number or reserved name such as `LOCAL`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    /// Kbps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_speed: Option<u64>,
    #[serde(default)]
    pub link_down: bool,
    #[serde(default)]
    pub blocked: bool,
}

impl From<&InventoryConnector> for SwitchPort {
    fn from(c: &InventoryConnector) -> Self {
        Self {
            id: c.id.clone(),
            number: c.port_number.clone(),
            name: c.name.clone(),
            mac: c.hardware_address.clone(),
            current_speed: c.current_speed,
            link_down: c
                .state
                .as_ref()
                .map(|s| s.link_down)
                .unwrap_or_default(),
            blocked: c.state.as_ref().map(|s| s.blocked).unwrap_or_default(),
        }
    }
}

/// Capability and statistics of one OpenFlow switch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct InventorySwitch {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub software: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub ports: Vec<SwitchPort>,
    pub table_count: usize,
    /// Active flows over all tables
    pub flow_count: u64,
    pub group_count: usize,
}

impl From<&InventoryNode> for InventorySwitch {
    fn from(n: &InventoryNode) -> Self {
        let mut ports: Vec<SwitchPort> =
            n.connectors.iter().map(SwitchPort::from).collect();
        ports.sort_unstable_by(|a, b| a.id.cmp(&b.id));
        // Tables without statistics still list their configured flows
        let flow_count = n
            .tables
            .iter()
            .map(|t| match t.statistics.as_ref() {
                Some(s) => s.active_flows,
                None => t.flow.len() as u64,
            })
            .sum();
        Self {
            id: n.id.clone(),
            ip_address: n.ip_address.clone(),
            manufacturer: n.manufacturer.clone(),
            hardware: n.hardware.clone(),
            software: n.software.clone(),
            serial_number: n.serial_number.clone(),
            description: n.description.clone(),
            ports,
            table_count: n.tables.len(),
            flow_count,
            group_count: n.groups.len(),
        }
    }
}

/// Controller inventory snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct Inventory {
    /// Sorted by ID
    pub switches: Vec<InventorySwitch>,
    /// Nodes not managed by OpenFlow, e.g. mounted NETCONF devices
    pub other_nodes: Vec<String>,
}

impl Inventory {
    pub fn from_value(doc: &Value) -> Result<Self, SdncError> {
        let doc = InventoryDoc::deserialize(doc).map_err(|e| {
            let e = SdncError::new(
                ErrorKind::MalformData,
                format!("Invalid inventory document: {e}"),
            );
            log::error!("{e}");
            e
        })?;
        let mut ret = Self::default();
        for node in doc.nodes.node.iter() {
            if node.id.starts_with(OPENFLOW_NODE_PREFIX) {
                ret.switches.push(node.into());
            } else {
                ret.other_nodes.push(node.id.clone());
            }
        }
        ret.switches.sort_unstable_by(|a, b| a.id.cmp(&b.id));
        ret.other_nodes.sort_unstable();
        Ok(ret)
    }

    pub fn openflow_node_ids(&self) -> Vec<&str> {
        self.switches.iter().map(|s| s.id.as_str()).collect()
    }

    pub fn switch(&self, id: &str) -> Option<&InventorySwitch> {
        self.switches.iter().find(|s| s.id == id)
    }

    pub fn flow_count(&self) -> u64 {
        self.switches.iter().map(|s| s.flow_count).sum()
    }
}
