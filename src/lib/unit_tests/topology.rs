// SPDX-License-Identifier: Apache-2.0

use serde_json::{json, Value};

use super::fake_session::FakeController;
use crate::{
    ErrorKind, Inventory, PeerNode, SdncStatus, TopologyClient, TopologyGraph,
};

const TOPOLOGY_PATH: &str =
    "operational/network-topology:network-topology/topology/flow:1";
const INVENTORY_PATH: &str = "operational/opendaylight-inventory:nodes";

// Two switches linked by port 2, one host on each switch port 1.
fn topology_doc() -> Value {
    serde_yaml::from_str(
        r#"
        topology:
        - topology-id: "flow:1"
          node:
          - node-id: "openflow:1"
            termination-point:
            - tp-id: "openflow:1:2"
            - tp-id: "openflow:1:1"
            - tp-id: "openflow:1:LOCAL"
          - node-id: "openflow:2"
            termination-point:
            - tp-id: "openflow:2:1"
            - tp-id: "openflow:2:2"
          - node-id: "host:00:00:00:00:00:01"
            host-tracker-service:id: "00:00:00:00:00:01"
            host-tracker-service:addresses:
            - id: 0
              mac: "00:00:00:00:00:01"
              ip: "10.0.0.1"
            host-tracker-service:attachment-points:
            - tp-id: "openflow:1:1"
              active: true
            termination-point:
            - tp-id: "host:00:00:00:00:00:01"
          - node-id: "host:00:00:00:00:00:02"
            host-tracker-service:addresses:
            - id: 1
              mac: "00:00:00:00:00:02"
              ip: "10.0.0.2"
          link:
          - link-id: "openflow:1:2"
            source: {source-node: "openflow:1", source-tp: "openflow:1:2"}
            destination: {dest-node: "openflow:2", dest-tp: "openflow:2:2"}
          - link-id: "openflow:2:2"
            source: {source-node: "openflow:2", source-tp: "openflow:2:2"}
            destination: {dest-node: "openflow:1", dest-tp: "openflow:1:2"}
          - link-id: "host:00:00:00:00:00:01/openflow:1:1"
            source:
              source-node: "host:00:00:00:00:00:01"
              source-tp: "host:00:00:00:00:00:01"
            destination: {dest-node: "openflow:1", dest-tp: "openflow:1:1"}
          - link-id: "openflow:1:1/host:00:00:00:00:00:01"
            source: {source-node: "openflow:1", source-tp: "openflow:1:1"}
            destination:
              dest-node: "host:00:00:00:00:00:01"
              dest-tp: "host:00:00:00:00:00:01"
          - link-id: "openflow:2:1/host:00:00:00:00:00:02"
            source: {source-node: "openflow:2", source-tp: "openflow:2:1"}
            destination:
              dest-node: "host:00:00:00:00:00:02"
              dest-tp: "host:00:00:00:00:00:02"
        "#,
    )
    .unwrap()
}

fn inventory_doc() -> Value {
    json!({
        "nodes": {
            "node": [
                {
                    "id": "openflow:2",
                    "flow-node-inventory:ip-address": "192.0.2.2",
                    "flow-node-inventory:table": [
                        {
                            "id": 0,
                            "opendaylight-flow-table-statistics:flow-table-statistics": {
                                "active-flows": 2
                            }
                        }
                    ]
                },
                {
                    "id": "openflow:1",
                    "flow-node-inventory:ip-address": "192.0.2.1",
                    "flow-node-inventory:manufacturer": "Nicira, Inc.",
                    "flow-node-inventory:software": "2.17.0",
                    "node-connector": [
                        {
                            "id": "openflow:1:LOCAL",
                            "flow-node-inventory:port-number": "LOCAL",
                            "flow-node-inventory:state": {"link-down": true}
                        },
                        {
                            "id": "openflow:1:1",
                            "flow-node-inventory:port-number": 1,
                            "flow-node-inventory:name": "s1-eth1",
                            "flow-node-inventory:hardware-address": "aa:bb:cc:00:00:01",
                            "flow-node-inventory:current-speed": 10000000
                        }
                    ],
                    "flow-node-inventory:table": [
                        {
                            "id": 0,
                            "opendaylight-flow-table-statistics:flow-table-statistics": {
                                "active-flows": "3"
                            }
                        },
                        {
                            "id": 1,
                            "flow": [{"id": "a"}, {"id": "b"}]
                        }
                    ],
                    "flow-node-inventory:group": [{"group-id": 1}]
                },
                {
                    "id": "R1"
                }
            ]
        }
    })
}

fn graph() -> TopologyGraph {
    TopologyGraph::from_values(
        "flow:1",
        &topology_doc(),
        Some(&inventory_doc()),
    )
    .unwrap()
}

#[test]
fn test_graph_counts() {
    let graph = graph();

    assert_eq!(graph.switch_ids(), vec!["openflow:1", "openflow:2"]);
    assert_eq!(graph.switch_count(), 2);
    assert_eq!(graph.host_count(), 2);
    assert_eq!(graph.links().len(), 5);
    assert_eq!(graph.inter_switch_link_count(), 1);
    assert_eq!(graph.inter_switch_links()[0].id, "openflow:1:2");
    assert_eq!(graph.flow_count(), 7);
}

#[test]
fn test_graph_switch_detail() {
    let graph = graph();
    let switch = graph.switch("openflow:1").unwrap();

    assert_eq!(switch.address.as_deref(), Some("192.0.2.1"));
    assert_eq!(switch.manufacturer.as_deref(), Some("Nicira, Inc."));
    assert_eq!(switch.flow_count, 5);
    assert_eq!(
        graph.switch_ports("openflow:1"),
        vec!["openflow:1:1", "openflow:1:2", "openflow:1:LOCAL"]
    );
    assert!(graph.switch_ports("openflow:9").is_empty());
}

#[test]
fn test_graph_host_detail() {
    let graph = graph();
    let host = graph.host("host:00:00:00:00:00:01").unwrap();

    assert_eq!(host.mac, "00:00:00:00:00:01");
    assert_eq!(host.ip(), Some("10.0.0.1"));
    assert_eq!(host.attachment_points, vec!["openflow:1:1".to_string()]);
}

#[test]
fn test_peers_of_switch_port() {
    let graph = graph();

    assert_eq!(
        graph.peers("openflow:1", "2"),
        vec![PeerNode::Switch {
            id: "openflow:2".to_string()
        }]
    );
    assert_eq!(
        graph.peers("openflow:1", "openflow:1:1"),
        vec![PeerNode::Host {
            id: "host:00:00:00:00:00:01".to_string(),
            mac: "00:00:00:00:00:01".to_string(),
            ip: Some("10.0.0.1".to_string()),
        }]
    );
    // Link only reported in one direction
    let peers = graph.peers("host:00:00:00:00:00:02", "host:00:00:00:00:00:02");
    assert_eq!(peers.len(), 1);
    assert!(peers[0].is_switch());
    assert_eq!(peers[0].id(), "openflow:2");
}

#[test]
fn test_peers_of_unlinked_port() {
    let graph = graph();

    assert!(graph.peers("openflow:1", "7").is_empty());
    assert!(graph.peers("openflow:1", "LOCAL").is_empty());
    assert!(graph.peers("openflow:9", "1").is_empty());
}

#[test]
fn test_peers_of_host_without_node_entry() {
    let doc: Value = serde_yaml::from_str(
        r#"
        topology:
        - topology-id: "flow:1"
          node:
          - node-id: "openflow:3"
            termination-point:
            - tp-id: "openflow:3:1"
          link:
          - link-id: "openflow:3:1/host:00:00:00:00:00:03"
            source: {source-node: "openflow:3", source-tp: "openflow:3:1"}
            destination:
              dest-node: "host:00:00:00:00:00:03"
              dest-tp: "host:00:00:00:00:00:03"
        "#,
    )
    .unwrap();
    let graph = TopologyGraph::from_values("flow:1", &doc, None).unwrap();

    assert_eq!(graph.host_count(), 0);
    assert_eq!(
        graph.peers("openflow:3", "1"),
        vec![PeerNode::Host {
            id: "host:00:00:00:00:00:03".to_string(),
            mac: "00:00:00:00:00:03".to_string(),
            ip: None,
        }]
    );
    assert_eq!(graph.inter_switch_link_count(), 0);
}

#[test]
fn test_graph_without_inventory() {
    let graph =
        TopologyGraph::from_values("flow:1", &topology_doc(), None).unwrap();

    assert_eq!(graph.switch_count(), 2);
    assert_eq!(graph.flow_count(), 0);
    assert!(graph.switch("openflow:1").unwrap().address.is_none());
}

#[test]
fn test_graph_unknown_topology_is_empty() {
    let wrapped = json!({"network-topology:network-topology": topology_doc()});
    let graph = TopologyGraph::from_values("ovsdb:1", &wrapped, None).unwrap();

    assert_eq!(graph.switch_count(), 0);
    assert_eq!(graph.host_count(), 0);
    assert!(graph.peers("openflow:1", "2").is_empty());
}

#[test]
fn test_graph_invalid_document() {
    let result =
        TopologyGraph::from_values("flow:1", &json!({"topology": 1}), None);
    assert_eq!(result.unwrap_err().kind(), ErrorKind::MalformData);
}

#[test]
fn test_inventory_switches() {
    let inventory = Inventory::from_value(&inventory_doc()).unwrap();

    assert_eq!(inventory.openflow_node_ids(), vec!["openflow:1", "openflow:2"]);
    assert_eq!(inventory.other_nodes, vec!["R1".to_string()]);
    assert_eq!(inventory.flow_count(), 7);

    let switch = inventory.switch("openflow:1").unwrap();
    assert_eq!(switch.table_count, 2);
    assert_eq!(switch.group_count, 1);
    assert_eq!(switch.ports[0].id, "openflow:1:1");
    assert_eq!(switch.ports[0].number.as_deref(), Some("1"));
    assert_eq!(switch.ports[0].name.as_deref(), Some("s1-eth1"));
    assert_eq!(switch.ports[0].current_speed, Some(10000000));
    assert_eq!(switch.ports[1].number.as_deref(), Some("LOCAL"));
    assert!(switch.ports[1].link_down);
    assert!(!switch.ports[1].blocked);
}

#[test]
fn test_topology_client_graph() {
    let controller = FakeController::new();
    controller.set_doc(TOPOLOGY_PATH, topology_doc());
    let client = TopologyClient::new(&controller);

    // No inventory yet on controller
    let graph = client.get_topology_graph(None).into_data().unwrap();
    assert_eq!(graph.topology_id(), TopologyGraph::DEFAULT_TOPOLOGY_ID);
    assert_eq!(graph.switch_count(), 2);
    assert_eq!(graph.flow_count(), 0);

    controller.set_doc(INVENTORY_PATH, inventory_doc());
    let graph = client.get_topology_graph(Some("flow:1")).into_data().unwrap();
    assert_eq!(graph.flow_count(), 7);

    assert_eq!(
        client.get_topology_graph(Some("flow:2")).status,
        SdncStatus::DataNotFound
    );
}

#[test]
fn test_topology_client_ids() {
    let controller = FakeController::new();
    controller.set_doc(
        "operational/network-topology:network-topology",
        json!({
            "network-topology:network-topology": {
                "topology": [
                    {"topology-id": "topology-netconf"},
                    {"topology-id": "flow:1"}
                ]
            }
        }),
    );
    let client = TopologyClient::new(&controller);

    assert_eq!(
        client.get_topology_ids().into_data(),
        Some(vec!["flow:1".to_string(), "topology-netconf".to_string()])
    );
}

#[test]
fn test_topology_client_malformed_reply() {
    let controller = FakeController::new();
    controller.push_reply(200, "OK", Some("not json"));
    let client = TopologyClient::new(&controller);

    assert_eq!(
        client.get_topology_graph(None).status,
        SdncStatus::MalformData
    );
}
