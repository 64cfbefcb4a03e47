// SPDX-License-Identifier: Apache-2.0

use serde_json::{Map, Value};

use super::matching::json_obj;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SetFieldValue {
    VlanId(u16),
    MplsLabel(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionKind {
    /// Port number, node connector ID or reserved port name such as
    /// `CONTROLLER`, `INPORT`, `FLOOD`
    Output {
        port: String,
        max_len: Option<u16>,
    },
    PushVlanHeader {
        eth_type: u16,
    },
    PopVlanHeader,
    PushMplsHeader {
        eth_type: u16,
    },
    /// Ethernet type of the payload after the MPLS header removed
    PopMplsHeader {
        eth_type: u16,
    },
    SetMplsTtl {
        ttl: u8,
    },
    DecMplsTtl,
    SetField(SetFieldValue),
    SetVlanId {
        vlan_id: u16,
    },
    SetVlanPcp {
        pcp: u8,
    },
    StripVlan,
    SetDlSrc {
        mac: String,
    },
    SetDlDst {
        mac: String,
    },
    SetNwSrc {
        ipv4: String,
    },
    SetNwDst {
        ipv4: String,
    },
    SetTpSrc {
        port: u16,
    },
    SetTpDst {
        port: u16,
    },
    SetNwTtl {
        ttl: u8,
    },
    DecNwTtl,
    CopyTtlOut,
    CopyTtlIn,
    SetQueue {
        queue_id: u32,
    },
    Group {
        group_id: u32,
    },
    Drop,
    Flood,
    FloodAll,
    HwPath,
    SwPath,
    Loopback,
}

impl ActionKind {
    /// Controller field name and content of this action.
    pub(crate) fn to_value(&self) -> (&'static str, Value) {
        let empty = || Value::Object(Map::new());
        match self {
            Self::Output { port, max_len } => {
                let mut ret = Map::new();
                ret.insert(
                    "output-node-connector".to_string(),
                    port.as_str().into(),
                );
                if let Some(max_len) = max_len {
                    ret.insert("max-length".to_string(), (*max_len).into());
                }
                ("output-action", Value::Object(ret))
            }
            Self::PushVlanHeader { eth_type } => (
                "push-vlan-action",
                json_obj("ethernet-type", (*eth_type).into()),
            ),
            Self::PopVlanHeader => ("pop-vlan-action", empty()),
            Self::PushMplsHeader { eth_type } => (
                "push-mpls-action",
                json_obj("ethernet-type", (*eth_type).into()),
            ),
            Self::PopMplsHeader { eth_type } => (
                "pop-mpls-action",
                json_obj("ethernet-type", (*eth_type).into()),
            ),
            Self::SetMplsTtl { ttl } => {
                ("set-mpls-ttl-action", json_obj("mpls-ttl", (*ttl).into()))
            }
            Self::DecMplsTtl => ("dec-mpls-ttl", empty()),
            Self::SetField(SetFieldValue::VlanId(vlan_id)) => {
                let mut vlan_id_obj = Map::new();
                vlan_id_obj.insert("vlan-id".to_string(), (*vlan_id).into());
                vlan_id_obj.insert("vlan-id-present".to_string(), true.into());
                (
                    "set-field",
                    json_obj(
                        "vlan-match",
                        json_obj("vlan-id", Value::Object(vlan_id_obj)),
                    ),
                )
            }
            Self::SetField(SetFieldValue::MplsLabel(label)) => (
                "set-field",
                json_obj(
                    "protocol-match-fields",
                    json_obj("mpls-label", (*label).into()),
                ),
            ),
            Self::SetVlanId { vlan_id } => {
                ("set-vlan-id-action", json_obj("vlan-id", (*vlan_id).into()))
            }
            Self::SetVlanPcp { pcp } => {
                ("set-vlan-pcp-action", json_obj("vlan-pcp", (*pcp).into()))
            }
            Self::StripVlan => ("strip-vlan-action", empty()),
            Self::SetDlSrc { mac } => {
                ("set-dl-src-action", json_obj("address", mac.as_str().into()))
            }
            Self::SetDlDst { mac } => {
                ("set-dl-dst-action", json_obj("address", mac.as_str().into()))
            }
            Self::SetNwSrc { ipv4 } => (
                "set-nw-src-action",
                json_obj("ipv4-address", ipv4.as_str().into()),
            ),
            Self::SetNwDst { ipv4 } => (
                "set-nw-dst-action",
                json_obj("ipv4-address", ipv4.as_str().into()),
            ),
            Self::SetTpSrc { port } => {
                ("set-tp-src-action", json_obj("port", (*port).into()))
            }
            Self::SetTpDst { port } => {
                ("set-tp-dst-action", json_obj("port", (*port).into()))
            }
            Self::SetNwTtl { ttl } => {
                ("set-nw-ttl-action", json_obj("nw-ttl", (*ttl).into()))
            }
            Self::DecNwTtl => ("dec-nw-ttl", empty()),
            Self::CopyTtlOut => ("copy-ttl-out", empty()),
            Self::CopyTtlIn => ("copy-ttl-in", empty()),
            Self::SetQueue { queue_id } => {
                ("set-queue-action", json_obj("queue-id", (*queue_id).into()))
            }
            Self::Group { group_id } => {
                ("group-action", json_obj("group-id", (*group_id).into()))
            }
            Self::Drop => ("drop-action", empty()),
            Self::Flood => ("flood-action", empty()),
            Self::FloodAll => ("flood-all-action", empty()),
            Self::HwPath => ("hw-path-action", empty()),
            Self::SwPath => ("sw-path-action", empty()),
            Self::Loopback => ("loopback-action", empty()),
        }
    }
}

/// One action with its position in the action list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Action {
    pub order: u32,
    pub kind: ActionKind,
}

impl Action {
    pub fn new(order: u32, kind: ActionKind) -> Self {
        Self { order, kind }
    }

    pub fn output(order: u32, port: &str) -> Self {
        Self::new(
            order,
            ActionKind::Output {
                port: port.to_string(),
                max_len: None,
            },
        )
    }

    pub(crate) fn to_value(&self) -> Value {
        let (name, content) = self.kind.to_value();
        let mut ret = Map::new();
        ret.insert("order".to_string(), self.order.into());
        ret.insert(name.to_string(), content);
        Value::Object(ret)
    }
}

/// Serialize actions ascending by order. Actions sharing an order are
/// ranked by their serialized form so insertion order never shows.
pub(crate) fn actions_to_value(actions: &[Action]) -> Value {
    sorted_by_order(actions.iter().map(|a| (a.order, a.to_value())))
}

pub(crate) fn sorted_by_order(
    items: impl Iterator<Item = (u32, Value)>,
) -> Value {
    let mut items: Vec<(u32, String, Value)> = items
        .map(|(order, value)| (order, value.to_string(), value))
        .collect();
    items.sort_unstable_by(|a, b| (a.0, &a.1).cmp(&(b.0, &b.1)));
    Value::Array(items.into_iter().map(|(_, _, v)| v).collect())
}
