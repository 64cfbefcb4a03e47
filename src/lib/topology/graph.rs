// SPDX-License-Identifier: Apache-2.0

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::document::{TopologyDoc, TopologyEntry, TopologyNode};
use super::inventory::Inventory;
use crate::{ErrorKind, SdncError, SwitchPort};

const HOST_NODE_PREFIX: &str = "host:";
const NETWORK_TOPOLOGY_KEY: &str = "network-topology:network-topology";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct SwitchNode {
    /// OpenFlow node ID, e.g. `openflow:1`
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Termination point IDs, sorted
    pub ports: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub software: Option<String>,
    pub flow_count: u64,
    /// Port detail from inventory, empty when inventory not supplied
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub port_details: Vec<SwitchPort>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct HostNode {
    pub id: String,
    pub mac: String,
    /// MAC to IP address learned by host tracker
    pub addresses: BTreeMap<String, String>,
    /// Active switch ports the host is attached to
    pub attachment_points: Vec<String>,
}

impl HostNode {
    /// IP address associated with the host MAC.
    pub fn ip(&self) -> Option<&str> {
        self.addresses
            .get(self.mac.as_str())
            .or_else(|| self.addresses.values().next())
            .map(|s| s.as_str())
    }

    fn from_doc(node: &TopologyNode) -> Self {
        let mac = node
            .addresses
            .iter()
            .find_map(|a| a.mac.clone())
            .or_else(|| node.host_id.clone())
            .unwrap_or_else(|| {
                node.node_id
                    .strip_prefix(HOST_NODE_PREFIX)
                    .unwrap_or(node.node_id.as_str())
                    .to_string()
            });
        let mut addresses = BTreeMap::new();
        for addr in node.addresses.iter() {
            if let (Some(mac), Some(ip)) = (addr.mac.as_ref(), addr.ip.as_ref())
            {
                addresses.insert(mac.to_string(), ip.to_string());
            }
        }
        let mut attachment_points: Vec<String> = node
            .attachment_points
            .iter()
            .filter(|a| a.active)
            .map(|a| a.tp_id.clone())
            .collect();
        attachment_points.sort_unstable();
        Self {
            id: node.node_id.clone(),
            mac,
            addresses,
            attachment_points,
        }
    }
}

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
)]
#[non_exhaustive]
pub struct LinkEndpoint {
    pub node: String,
    pub port: String,
}

/// Directed link as reported by topology discovery.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Link {
    pub id: String,
    pub src: LinkEndpoint,
    pub dst: LinkEndpoint,
}

/// Neighbor found by [TopologyGraph::peers].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type")]
#[non_exhaustive]
pub enum PeerNode {
    Switch {
        id: String,
    },
    Host {
        id: String,
        mac: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        ip: Option<String>,
    },
}

impl PeerNode {
    pub fn id(&self) -> &str {
        match self {
            Self::Switch { id } | Self::Host { id, .. } => id.as_str(),
        }
    }

    pub fn is_switch(&self) -> bool {
        matches!(self, Self::Switch { .. })
    }

    pub fn is_host(&self) -> bool {
        matches!(self, Self::Host { .. })
    }
}

/// Read-only snapshot of switches, hosts and links.
///
/// Everything is computed at construction, a changed network requires
/// building a new graph from fresh documents.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct TopologyGraph {
    topology_id: String,
    switches: BTreeMap<String, SwitchNode>,
    hosts: BTreeMap<String, HostNode>,
    links: Vec<Link>,
    // Index into `links`, one per unordered pair of switch ports
    inter_switch_links: Vec<usize>,
    // (node, termination point) to neighbor node IDs, in link order
    peer_index: HashMap<(String, String), Vec<String>>,
}

impl TopologyGraph {
    pub const DEFAULT_TOPOLOGY_ID: &'static str = "flow:1";

    /// Build graph from topology document and optional inventory document.
    ///
    /// The topology document could be either a single topology reply
    /// (`{"topology": [...]}`) or the whole network topology container,
    /// the entry matching `topology_id` is used.
    pub fn from_values(
        topology_id: &str,
        topology: &Value,
        inventory: Option<&Value>,
    ) -> Result<Self, SdncError> {
        let topology = topology.get(NETWORK_TOPOLOGY_KEY).unwrap_or(topology);
        let doc = TopologyDoc::deserialize(topology).map_err(|e| {
            let e = SdncError::new(
                ErrorKind::MalformData,
                format!("Invalid topology document: {e}"),
            );
            log::error!("{e}");
            e
        })?;
        let inventory = match inventory {
            Some(v) => Some(Inventory::from_value(v)?),
            None => None,
        };
        let entry = match doc
            .topology
            .into_iter()
            .find(|t| t.topology_id == topology_id)
        {
            Some(t) => t,
            None => {
                log::debug!(
                    "Topology {topology_id} not found in document, \
                    treating as empty"
                );
                TopologyEntry::default()
            }
        };
        Ok(Self::build(topology_id, entry, inventory.as_ref()))
    }

    fn build(
        topology_id: &str,
        entry: TopologyEntry,
        inventory: Option<&Inventory>,
    ) -> Self {
        let mut ret = Self {
            topology_id: topology_id.to_string(),
            ..Default::default()
        };
        for node in entry.node.iter() {
            if node.node_id.starts_with(HOST_NODE_PREFIX)
                || node.host_id.is_some()
            {
                ret.hosts
                    .insert(node.node_id.clone(), HostNode::from_doc(node));
            } else {
                let mut ports: Vec<String> = node
                    .termination_points
                    .iter()
                    .map(|t| t.tp_id.clone())
                    .collect();
                ports.sort_unstable();
                let mut switch = SwitchNode {
                    id: node.node_id.clone(),
                    ports,
                    ..Default::default()
                };
                if let Some(inv) =
                    inventory.and_then(|i| i.switch(node.node_id.as_str()))
                {
                    switch.address = inv.ip_address.clone();
                    switch.manufacturer = inv.manufacturer.clone();
                    switch.software = inv.software.clone();
                    switch.flow_count = inv.flow_count;
                    switch.port_details = inv.ports.clone();
                }
                ret.switches.insert(node.node_id.clone(), switch);
            }
        }

        for link in entry.link.into_iter() {
            ret.links.push(Link {
                id: link.link_id,
                src: LinkEndpoint {
                    node: link.source.node,
                    port: link.source.tp,
                },
                dst: LinkEndpoint {
                    node: link.destination.node,
                    port: link.destination.tp,
                },
            });
        }

        let mut seen_pairs: HashSet<(&LinkEndpoint, &LinkEndpoint)> =
            HashSet::new();
        for (i, link) in ret.links.iter().enumerate() {
            for (local, remote) in
                [(&link.src, &link.dst), (&link.dst, &link.src)]
            {
                let peers = ret
                    .peer_index
                    .entry((local.node.clone(), local.port.clone()))
                    .or_default();
                if !peers.contains(&remote.node) {
                    peers.push(remote.node.clone());
                }
            }
            if ret.switches.contains_key(&link.src.node)
                && ret.switches.contains_key(&link.dst.node)
            {
                let pair = if link.src <= link.dst {
                    (&link.src, &link.dst)
                } else {
                    (&link.dst, &link.src)
                };
                if seen_pairs.insert(pair) {
                    ret.inter_switch_links.push(i);
                }
            }
        }

        log::debug!(
            "Topology {topology_id}: {} switches, {} hosts, {} links",
            ret.switches.len(),
            ret.hosts.len(),
            ret.links.len()
        );
        ret
    }

    pub fn topology_id(&self) -> &str {
        self.topology_id.as_str()
    }

    pub fn switch_ids(&self) -> Vec<&str> {
        self.switches.keys().map(|k| k.as_str()).collect()
    }

    pub fn switches(&self) -> Vec<&SwitchNode> {
        self.switches.values().collect()
    }

    pub fn switch(&self, id: &str) -> Option<&SwitchNode> {
        self.switches.get(id)
    }

    pub fn switch_count(&self) -> usize {
        self.switches.len()
    }

    /// Termination point IDs of the switch, empty for unknown switch.
    pub fn switch_ports(&self, id: &str) -> Vec<&str> {
        self.switches
            .get(id)
            .map(|s| s.ports.iter().map(|p| p.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn host_ids(&self) -> Vec<&str> {
        self.hosts.keys().map(|k| k.as_str()).collect()
    }

    pub fn hosts(&self) -> Vec<&HostNode> {
        self.hosts.values().collect()
    }

    pub fn host(&self, id: &str) -> Option<&HostNode> {
        self.hosts.get(id)
    }

    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    pub fn links(&self) -> &[Link] {
        self.links.as_slice()
    }

    /// Links between two switches, one per connected port pair even when
    /// discovery reports both directions.
    pub fn inter_switch_links(&self) -> Vec<&Link> {
        self.inter_switch_links
            .iter()
            .filter_map(|i| self.links.get(*i))
            .collect()
    }

    pub fn inter_switch_link_count(&self) -> usize {
        self.inter_switch_links.len()
    }

    /// Active flows of all switches, zero without inventory.
    pub fn flow_count(&self) -> u64 {
        self.switches.values().map(|s| s.flow_count).sum()
    }

    /// Neighbors reachable through the specified port of the node.
    ///
    /// The port is either a full termination point ID (`openflow:1:2`) or
    /// the bare port number (`2`) which is expanded with node ID.
    pub fn peers(&self, node: &str, port: &str) -> Vec<PeerNode> {
        let tp_id = if port.contains(':') {
            port.to_string()
        } else {
            format!("{node}:{port}")
        };
        let Some(neighbors) =
            self.peer_index.get(&(node.to_string(), tp_id))
        else {
            return Vec::new();
        };
        neighbors
            .iter()
            .map(|id| match self.hosts.get(id) {
                Some(host) => PeerNode::Host {
                    id: host.id.clone(),
                    mac: host.mac.clone(),
                    ip: host.ip().map(|s| s.to_string()),
                },
                // Link names a host whose node entry is absent
                None if id.starts_with(HOST_NODE_PREFIX) => PeerNode::Host {
                    id: id.clone(),
                    mac: id[HOST_NODE_PREFIX.len()..].to_string(),
                    ip: None,
                },
                None => PeerNode::Switch { id: id.clone() },
            })
            .collect()
    }
}
