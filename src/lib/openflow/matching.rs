// SPDX-License-Identifier: Apache-2.0

use serde_json::{Map, Value};

/// Match predicates of a flow entry.
///
/// Pure data accumulation: each field has one setter, a later call
/// overwrites the earlier value, and no cross-field consistency is checked
/// (e.g. IPv6 fields with an IPv4 ethernet type are sent as is).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub struct FlowMatch {
    pub eth_type: Option<u16>,
    pub eth_src: Option<String>,
    pub eth_dst: Option<String>,
    pub vlan_id: Option<u16>,
    pub vlan_pcp: Option<u8>,
    pub ip_proto: Option<u8>,
    pub ip_dscp: Option<u8>,
    pub ip_ecn: Option<u8>,
    /// IPv4 prefix, e.g. `10.0.0.1/32`
    pub ipv4_src: Option<String>,
    pub ipv4_dst: Option<String>,
    pub ipv6_src: Option<String>,
    pub ipv6_dst: Option<String>,
    pub ipv6_flabel: Option<u32>,
    pub ipv6_exthdr: Option<u16>,
    pub tcp_src_port: Option<u16>,
    pub tcp_dst_port: Option<u16>,
    pub udp_src_port: Option<u16>,
    pub udp_dst_port: Option<u16>,
    /// Port number or node connector ID, e.g. `1` or `openflow:1:1`
    pub in_port: Option<String>,
    pub metadata: Option<u64>,
    pub metadata_mask: Option<u64>,
}

impl FlowMatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_eth_type(&mut self, v: u16) -> &mut Self {
        self.eth_type = Some(v);
        self
    }

    pub fn set_eth_src(&mut self, mac: &str) -> &mut Self {
        self.eth_src = Some(mac.to_string());
        self
    }

    pub fn set_eth_dst(&mut self, mac: &str) -> &mut Self {
        self.eth_dst = Some(mac.to_string());
        self
    }

    pub fn set_vlan_id(&mut self, v: u16) -> &mut Self {
        self.vlan_id = Some(v);
        self
    }

    pub fn set_vlan_pcp(&mut self, v: u8) -> &mut Self {
        self.vlan_pcp = Some(v);
        self
    }

    pub fn set_ip_proto(&mut self, v: u8) -> &mut Self {
        self.ip_proto = Some(v);
        self
    }

    pub fn set_ip_dscp(&mut self, v: u8) -> &mut Self {
        self.ip_dscp = Some(v);
        self
    }

    pub fn set_ip_ecn(&mut self, v: u8) -> &mut Self {
        self.ip_ecn = Some(v);
        self
    }

    pub fn set_ipv4_src(&mut self, prefix: &str) -> &mut Self {
        self.ipv4_src = Some(prefix.to_string());
        self
    }

    pub fn set_ipv4_dst(&mut self, prefix: &str) -> &mut Self {
        self.ipv4_dst = Some(prefix.to_string());
        self
    }

    pub fn set_ipv6_src(&mut self, prefix: &str) -> &mut Self {
        self.ipv6_src = Some(prefix.to_string());
        self
    }

    pub fn set_ipv6_dst(&mut self, prefix: &str) -> &mut Self {
        self.ipv6_dst = Some(prefix.to_string());
        self
    }

    pub fn set_ipv6_flabel(&mut self, v: u32) -> &mut Self {
        self.ipv6_flabel = Some(v);
        self
    }

    pub fn set_ipv6_exthdr(&mut self, v: u16) -> &mut Self {
        self.ipv6_exthdr = Some(v);
        self
    }

    pub fn set_tcp_src_port(&mut self, v: u16) -> &mut Self {
        self.tcp_src_port = Some(v);
        self
    }

    pub fn set_tcp_dst_port(&mut self, v: u16) -> &mut Self {
        self.tcp_dst_port = Some(v);
        self
    }

    pub fn set_udp_src_port(&mut self, v: u16) -> &mut Self {
        self.udp_src_port = Some(v);
        self
    }

    pub fn set_udp_dst_port(&mut self, v: u16) -> &mut Self {
        self.udp_dst_port = Some(v);
        self
    }

    pub fn set_in_port(&mut self, port: &str) -> &mut Self {
        self.in_port = Some(port.to_string());
        self
    }

    pub fn set_metadata(
        &mut self,
        metadata: u64,
        mask: Option<u64>,
    ) -> &mut Self {
        self.metadata = Some(metadata);
        self.metadata_mask = mask;
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub(crate) fn to_value(&self) -> Value {
        let mut ret = Map::new();

        let mut eth = Map::new();
        if let Some(v) = self.eth_type {
            eth.insert("ethernet-type".to_string(), json_obj("type", v.into()));
        }
        if let Some(v) = self.eth_src.as_ref() {
            eth.insert(
                "ethernet-source".to_string(),
                json_obj("address", v.as_str().into()),
            );
        }
        if let Some(v) = self.eth_dst.as_ref() {
            eth.insert(
                "ethernet-destination".to_string(),
                json_obj("address", v.as_str().into()),
            );
        }
        insert_non_empty(&mut ret, "ethernet-match", eth);

        let mut vlan = Map::new();
        if let Some(v) = self.vlan_id {
            let mut vlan_id = Map::new();
            vlan_id.insert("vlan-id".to_string(), v.into());
            vlan_id.insert("vlan-id-present".to_string(), true.into());
            vlan.insert("vlan-id".to_string(), Value::Object(vlan_id));
        }
        if let Some(v) = self.vlan_pcp {
            vlan.insert("vlan-pcp".to_string(), v.into());
        }
        insert_non_empty(&mut ret, "vlan-match", vlan);

        let mut ip = Map::new();
        if let Some(v) = self.ip_proto {
            ip.insert("ip-protocol".to_string(), v.into());
        }
        if let Some(v) = self.ip_dscp {
            ip.insert("ip-dscp".to_string(), v.into());
        }
        if let Some(v) = self.ip_ecn {
            ip.insert("ip-ecn".to_string(), v.into());
        }
        insert_non_empty(&mut ret, "ip-match", ip);

        for (key, value) in [
            ("ipv4-source", &self.ipv4_src),
            ("ipv4-destination", &self.ipv4_dst),
            ("ipv6-source", &self.ipv6_src),
            ("ipv6-destination", &self.ipv6_dst),
            ("in-port", &self.in_port),
        ] {
            if let Some(v) = value {
                ret.insert(key.to_string(), v.as_str().into());
            }
        }
        if let Some(v) = self.ipv6_flabel {
            ret.insert(
                "ipv6-label".to_string(),
                json_obj("ipv6-flabel", v.into()),
            );
        }
        if let Some(v) = self.ipv6_exthdr {
            ret.insert(
                "ipv6-ext-header".to_string(),
                json_obj("ipv6-exthdr", v.into()),
            );
        }
        for (key, value) in [
            ("tcp-source-port", self.tcp_src_port),
            ("tcp-destination-port", self.tcp_dst_port),
            ("udp-source-port", self.udp_src_port),
            ("udp-destination-port", self.udp_dst_port),
        ] {
            if let Some(v) = value {
                ret.insert(key.to_string(), v.into());
            }
        }
        if let Some(v) = self.metadata {
            let mut metadata = Map::new();
            metadata.insert("metadata".to_string(), v.into());
            if let Some(mask) = self.metadata_mask {
                metadata.insert("metadata-mask".to_string(), mask.into());
            }
            ret.insert("metadata".to_string(), Value::Object(metadata));
        }
        Value::Object(ret)
    }
}

pub(crate) fn json_obj(key: &str, value: Value) -> Value {
    let mut ret = Map::new();
    ret.insert(key.to_string(), value);
    Value::Object(ret)
}

fn insert_non_empty(
    ret: &mut Map<String, Value>,
    key: &str,
    v: Map<String, Value>,
) {
    if !v.is_empty() {
        ret.insert(key.to_string(), Value::Object(v));
    }
}
