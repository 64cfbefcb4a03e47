// SPDX-License-Identifier: Apache-2.0

use serde_json::{json, Value};

use super::fake_session::FakeController;
use crate::{
    Action, ActionKind, FlowEntry, FlowMatch, GroupBucket, GroupEntry,
    GroupType, HttpMethod, Instruction, InstructionKind, OpenflowSwitch,
    SdncStatus, SetFieldValue,
};

const FLOW_20_PATH: &str = "config/opendaylight-inventory:nodes/node/\
                            openflow:1/flow-node-inventory:table/0/flow/20";

fn flow_20() -> FlowEntry {
    let mut flow = FlowEntry::new(0, "20");
    flow.match_mut()
        .set_eth_type(0x0800)
        .set_eth_src("00:00:00:11:23:ad")
        .set_eth_dst("00:ff:29:01:19:61")
        .set_vlan_id(100)
        .set_vlan_pcp(3);
    let mut instruction = Instruction::apply_actions(0);
    instruction.add_action(Action::output(0, "7"));
    flow.add_instruction(instruction);
    flow
}

#[test]
fn test_flow_end_to_end_document() {
    let doc = flow_20().to_value();
    let flow = &doc[FlowEntry::DOC_KEY][0];

    assert_eq!(flow["id"], json!("20"));
    assert_eq!(flow["table_id"], json!(0));
    assert_eq!(
        flow["match"],
        json!({
            "ethernet-match": {
                "ethernet-type": {"type": 2048},
                "ethernet-source": {"address": "00:00:00:11:23:ad"},
                "ethernet-destination": {"address": "00:ff:29:01:19:61"}
            },
            "vlan-match": {
                "vlan-id": {"vlan-id": 100, "vlan-id-present": true},
                "vlan-pcp": 3
            }
        })
    );
    assert_eq!(
        flow["instructions"],
        json!({
            "instruction": [{
                "order": 0,
                "apply-actions": {
                    "action": [{
                        "order": 0,
                        "output-action": {"output-node-connector": "7"}
                    }]
                }
            }]
        })
    );
}

#[test]
fn test_flow_encoding_ignores_call_order() {
    let mut flow = FlowEntry::new(0, "20");
    flow.match_mut()
        .set_vlan_pcp(3)
        .set_vlan_id(100)
        .set_eth_dst("00:ff:29:01:19:61")
        .set_eth_src("00:00:00:11:23:ad")
        .set_eth_type(0x0800);
    flow.add_instruction(
        Instruction::apply_actions(0)
            .add_action(Action::output(0, "7"))
            .clone(),
    );

    assert_eq!(flow.to_json().unwrap(), flow_20().to_json().unwrap());
}

#[test]
fn test_flow_instructions_and_actions_sorted_by_order() {
    let mut flow = FlowEntry::new(1, "sorted");
    let mut apply = Instruction::apply_actions(1);
    apply
        .add_action(Action::output(2, "CONTROLLER"))
        .add_action(Action::new(1, ActionKind::PopVlanHeader));
    flow.add_instruction(apply);
    flow.add_instruction(Instruction::new(
        0,
        InstructionKind::GoToTable { table_id: 2 },
    ));

    let doc = flow.to_value();
    let instructions =
        &doc[FlowEntry::DOC_KEY][0]["instructions"]["instruction"];
    assert_eq!(instructions[0]["go-to-table"], json!({"table_id": 2}));
    let actions = &instructions[1]["apply-actions"]["action"];
    assert_eq!(actions[0]["order"], json!(1));
    assert!(actions[0].get("pop-vlan-action").is_some());
    assert_eq!(
        actions[1]["output-action"]["output-node-connector"],
        json!("CONTROLLER")
    );
}

#[test]
fn test_action_ignored_for_go_to_table() {
    let mut instruction =
        Instruction::new(0, InstructionKind::GoToTable { table_id: 1 });
    instruction.add_action(Action::output(0, "1"));
    assert!(instruction.actions().is_empty());
}

#[test]
fn test_flow_round_trip_through_controller() {
    let controller = FakeController::new();
    let switch = OpenflowSwitch::new(&controller, "openflow:1");
    let mut flow = flow_20();
    flow.priority = Some(1000);
    flow.cookie = Some(0x1234_5678_9abc);
    flow.idle_timeout = Some(12);
    flow.hard_timeout = Some(34);

    assert!(switch.add_modify_flow(&flow).is_ok());
    let (method, path, _) = controller.last_request().unwrap();
    assert_eq!(method, HttpMethod::Put);
    assert_eq!(path, FLOW_20_PATH);

    let doc = switch.get_configured_flow(0, "20").into_data().unwrap();
    let stored = &doc[FlowEntry::DOC_KEY][0];
    assert_eq!(stored["priority"], json!(1000));
    assert_eq!(stored["cookie"], json!(0x1234_5678_9abc_u64));
    assert_eq!(stored["idle-timeout"], json!(12));
    assert_eq!(stored["hard-timeout"], json!(34));

    // Same table and flow ID replaces the stored entry
    flow.priority = Some(2000);
    assert!(switch.add_modify_flow(&flow).is_ok());
    assert_eq!(
        controller.doc(FLOW_20_PATH).unwrap()[FlowEntry::DOC_KEY][0]
            ["priority"],
        json!(2000)
    );

    assert!(switch.delete_flow(0, "20").is_ok());
    assert_eq!(
        switch.get_configured_flow(0, "20").status,
        SdncStatus::DataNotFound
    );
}

#[test]
fn test_select_group_bucket_order() {
    let mut group = GroupEntry::new(1, GroupType::Select);
    for (id, weight, port) in [(0, 60, "1"), (1, 30, "2"), (2, 10, "3")] {
        let mut bucket = GroupBucket::new(id);
        bucket.weight = Some(weight);
        bucket.add_action(Action::output(0, port));
        group.add_bucket(bucket);
    }

    let doc = group.to_value();
    let group_doc = &doc[GroupEntry::DOC_KEY][0];
    assert_eq!(group_doc["group-type"], json!("group-select"));
    let buckets = group_doc["buckets"]["bucket"].as_array().unwrap();
    let ids: Vec<&Value> = buckets.iter().map(|b| &b["bucket-id"]).collect();
    let weights: Vec<&Value> = buckets.iter().map(|b| &b["weight"]).collect();
    assert_eq!(ids, vec![&json!(0), &json!(1), &json!(2)]);
    assert_eq!(weights, vec![&json!(60), &json!(30), &json!(10)]);
}

#[test]
fn test_configured_group_ids() {
    let controller = FakeController::new();
    controller.set_doc(
        "config/opendaylight-inventory:nodes/node/openflow:1",
        json!({
            "node": [{
                "id": "openflow:1",
                "flow-node-inventory:group": [
                    {"group-id": 7, "group-type": "group-all"},
                    {"group-id": 2, "group-type": "group-ff"}
                ]
            }]
        }),
    );
    let switch = OpenflowSwitch::new(&controller, "openflow:1");

    assert_eq!(switch.get_configured_group_ids().into_data(), Some(vec![2, 7]));
    assert_eq!(
        OpenflowSwitch::new(&controller, "openflow:2")
            .get_configured_group_ids()
            .status,
        SdncStatus::DataNotFound
    );
}

#[test]
fn test_add_group_rejected_by_controller() {
    let controller = FakeController::new();
    controller.push_reply(400, "Bad Request", Some("{\"errors\": {}}"));
    let switch = OpenflowSwitch::new(&controller, "openflow:1");

    let result =
        switch.add_modify_group(&GroupEntry::new(3, GroupType::Indirect));
    assert_eq!(result.status, SdncStatus::BadRequest);
    assert_eq!(
        result.detail().and_then(|d| d.body.as_deref()),
        Some("{\"errors\": {}}")
    );
    let e = result.into_result().unwrap_err();
    assert_eq!(e.kind(), crate::ErrorKind::ControllerFailure);
}

#[test]
fn test_match_fields() {
    let mut ipv4 = FlowMatch::new();
    ipv4.set_eth_type(0x0800)
        .set_ip_proto(6)
        .set_ip_dscp(46)
        .set_ip_ecn(2)
        .set_ipv4_src("10.0.0.1/32")
        .set_ipv4_dst("10.0.1.0/24")
        .set_tcp_src_port(49152)
        .set_tcp_dst_port(443)
        .set_in_port("openflow:1:1")
        .set_metadata(0x12, Some(0xff));

    let mut ipv6 = FlowMatch::new();
    ipv6.set_eth_type(0x86dd)
        .set_ip_proto(17)
        .set_ipv6_src("2001:db8::1/128")
        .set_ipv6_dst("2001:db8:1::/64")
        .set_ipv6_flabel(0xfffff)
        .set_ipv6_exthdr(0x1ff)
        .set_udp_src_port(u16::MAX)
        .set_udp_dst_port(53)
        .set_in_port("3")
        .set_metadata(u64::MAX, None);

    for (flow_match, expected) in [
        (
            ipv4,
            json!({
                "ethernet-match": {"ethernet-type": {"type": 2048}},
                "ip-match": {"ip-protocol": 6, "ip-dscp": 46, "ip-ecn": 2},
                "ipv4-source": "10.0.0.1/32",
                "ipv4-destination": "10.0.1.0/24",
                "tcp-source-port": 49152,
                "tcp-destination-port": 443,
                "in-port": "openflow:1:1",
                "metadata": {"metadata": 18, "metadata-mask": 255}
            }),
        ),
        (
            ipv6,
            json!({
                "ethernet-match": {"ethernet-type": {"type": 34525}},
                "ip-match": {"ip-protocol": 17},
                "ipv6-source": "2001:db8::1/128",
                "ipv6-destination": "2001:db8:1::/64",
                "ipv6-label": {"ipv6-flabel": 1048575},
                "ipv6-ext-header": {"ipv6-exthdr": 511},
                "udp-source-port": 65535,
                "udp-destination-port": 53,
                "in-port": "3",
                "metadata": {"metadata": u64::MAX}
            }),
        ),
        (FlowMatch::new(), json!({})),
    ] {
        assert_eq!(flow_match.to_value(), expected);
    }
}

#[test]
fn test_match_setter_overwrites() {
    let mut flow_match = FlowMatch::new();
    flow_match.set_vlan_id(10).set_vlan_id(20);
    assert_eq!(flow_match.vlan_id, Some(20));
    assert!(!flow_match.is_empty());
    assert!(FlowMatch::new().is_empty());
}

#[test]
fn test_action_documents() {
    let mac = "00:00:00:00:00:0a".to_string();
    for (kind, name, content) in [
        (
            ActionKind::Output {
                port: "INPORT".to_string(),
                max_len: Some(u16::MAX),
            },
            "output-action",
            json!({"output-node-connector": "INPORT", "max-length": 65535}),
        ),
        (
            ActionKind::PushVlanHeader { eth_type: 0x8100 },
            "push-vlan-action",
            json!({"ethernet-type": 33024}),
        ),
        (ActionKind::PopVlanHeader, "pop-vlan-action", json!({})),
        (
            ActionKind::PushMplsHeader { eth_type: 0x8847 },
            "push-mpls-action",
            json!({"ethernet-type": 34887}),
        ),
        (
            ActionKind::PopMplsHeader { eth_type: 0x0800 },
            "pop-mpls-action",
            json!({"ethernet-type": 2048}),
        ),
        (
            ActionKind::SetMplsTtl { ttl: 64 },
            "set-mpls-ttl-action",
            json!({"mpls-ttl": 64}),
        ),
        (ActionKind::DecMplsTtl, "dec-mpls-ttl", json!({})),
        (
            ActionKind::SetField(SetFieldValue::VlanId(4095)),
            "set-field",
            json!({"vlan-match": {
                "vlan-id": {"vlan-id": 4095, "vlan-id-present": true}
            }}),
        ),
        (
            ActionKind::SetField(SetFieldValue::MplsLabel(1_048_575)),
            "set-field",
            json!({"protocol-match-fields": {"mpls-label": 1048575}}),
        ),
        (
            ActionKind::SetVlanId { vlan_id: 100 },
            "set-vlan-id-action",
            json!({"vlan-id": 100}),
        ),
        (
            ActionKind::SetVlanPcp { pcp: 7 },
            "set-vlan-pcp-action",
            json!({"vlan-pcp": 7}),
        ),
        (ActionKind::StripVlan, "strip-vlan-action", json!({})),
        (
            ActionKind::SetDlSrc { mac: mac.clone() },
            "set-dl-src-action",
            json!({"address": "00:00:00:00:00:0a"}),
        ),
        (
            ActionKind::SetDlDst { mac },
            "set-dl-dst-action",
            json!({"address": "00:00:00:00:00:0a"}),
        ),
        (
            ActionKind::SetNwSrc {
                ipv4: "10.0.0.1/32".to_string(),
            },
            "set-nw-src-action",
            json!({"ipv4-address": "10.0.0.1/32"}),
        ),
        (
            ActionKind::SetNwDst {
                ipv4: "10.0.0.2/32".to_string(),
            },
            "set-nw-dst-action",
            json!({"ipv4-address": "10.0.0.2/32"}),
        ),
        (
            ActionKind::SetTpSrc { port: 8080 },
            "set-tp-src-action",
            json!({"port": 8080}),
        ),
        (
            ActionKind::SetTpDst { port: 0 },
            "set-tp-dst-action",
            json!({"port": 0}),
        ),
        (
            ActionKind::SetNwTtl { ttl: u8::MAX },
            "set-nw-ttl-action",
            json!({"nw-ttl": 255}),
        ),
        (ActionKind::DecNwTtl, "dec-nw-ttl", json!({})),
        (ActionKind::CopyTtlOut, "copy-ttl-out", json!({})),
        (ActionKind::CopyTtlIn, "copy-ttl-in", json!({})),
        (
            ActionKind::SetQueue { queue_id: 3 },
            "set-queue-action",
            json!({"queue-id": 3}),
        ),
        (
            ActionKind::Group { group_id: u32::MAX },
            "group-action",
            json!({"group-id": 4294967295_u32}),
        ),
        (ActionKind::Drop, "drop-action", json!({})),
        (ActionKind::Flood, "flood-action", json!({})),
        (ActionKind::FloodAll, "flood-all-action", json!({})),
        (ActionKind::HwPath, "hw-path-action", json!({})),
        (ActionKind::SwPath, "sw-path-action", json!({})),
        (ActionKind::Loopback, "loopback-action", json!({})),
    ] {
        let mut expected = serde_json::Map::new();
        expected.insert("order".to_string(), json!(5));
        expected.insert(name.to_string(), content);
        assert_eq!(Action::new(5, kind).to_value(), Value::Object(expected));
    }
}

#[test]
fn test_instruction_documents() {
    let mut write = Instruction::write_actions(1);
    write.add_action(Action::new(0, ActionKind::SetQueue { queue_id: 1 }));

    for (instruction, expected) in [
        (
            write,
            json!({
                "order": 1,
                "write-actions": {"action": [
                    {"order": 0, "set-queue-action": {"queue-id": 1}}
                ]}
            }),
        ),
        (
            Instruction::new(2, InstructionKind::ClearActions),
            json!({"order": 2, "clear-actions": {}}),
        ),
        (
            Instruction::new(
                3,
                InstructionKind::WriteMetadata {
                    metadata: u64::MAX,
                    mask: 0xffff_0000,
                },
            ),
            json!({
                "order": 3,
                "write-metadata": {
                    "metadata": u64::MAX,
                    "metadata-mask": 4294901760_u64
                }
            }),
        ),
        (
            Instruction::new(4, InstructionKind::Meter { meter_id: 9 }),
            json!({"order": 4, "meter": {"meter-id": 9}}),
        ),
        (
            Instruction::new(5, InstructionKind::GoToTable { table_id: 254 }),
            json!({"order": 5, "go-to-table": {"table_id": 254}}),
        ),
    ] {
        assert_eq!(instruction.to_value(), expected);
    }
}

#[test]
fn test_flow_fields_round_trip_through_controller() {
    let controller = FakeController::new();
    let switch = OpenflowSwitch::new(&controller, "openflow:1");
    let mut flow = FlowEntry::new(u8::MAX, "all-fields");
    flow.name = Some("edge filter".to_string());
    flow.priority = Some(u16::MAX);
    flow.cookie = Some(u64::MAX);
    flow.cookie_mask = Some(0);
    flow.idle_timeout = Some(0);
    flow.hard_timeout = Some(u16::MAX);
    flow.strict = Some(true);
    flow.install_hw = Some(false);
    flow.barrier = Some(false);
    flow.flags = Some("SEND_FLOW_REM".to_string());
    flow.add_instruction(Instruction::new(0, InstructionKind::ClearActions));

    assert!(switch.add_modify_flow(&flow).is_ok());
    let doc = switch
        .get_configured_flow(u8::MAX, "all-fields")
        .into_data()
        .unwrap();
    assert_eq!(doc, flow.to_value());

    let stored = &doc[FlowEntry::DOC_KEY][0];
    for (key, value) in [
        ("id", json!("all-fields")),
        ("table_id", json!(255)),
        ("flow-name", json!("edge filter")),
        ("priority", json!(65535)),
        ("cookie", json!(u64::MAX)),
        ("cookie_mask", json!(0)),
        ("idle-timeout", json!(0)),
        ("hard-timeout", json!(65535)),
        ("strict", json!(true)),
        ("installHw", json!(false)),
        ("barrier", json!(false)),
        ("flags", json!("SEND_FLOW_REM")),
        ("match", json!({})),
    ] {
        assert_eq!(stored[key], value, "{key}");
    }
}

#[test]
fn test_flow_unset_fields_omitted() {
    let doc = FlowEntry::new(0, "bare").to_value();
    let flow = doc[FlowEntry::DOC_KEY][0].as_object().unwrap();
    let mut keys: Vec<&str> = flow.keys().map(|k| k.as_str()).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["id", "match", "table_id"]);
}

#[test]
fn test_same_order_actions_ignore_insertion_order() {
    let mut first = Instruction::apply_actions(0);
    first
        .add_action(Action::new(0, ActionKind::PopVlanHeader))
        .add_action(Action::new(0, ActionKind::Drop));
    let mut second = Instruction::apply_actions(0);
    second
        .add_action(Action::new(0, ActionKind::Drop))
        .add_action(Action::new(0, ActionKind::PopVlanHeader));

    let mut flow_a = FlowEntry::new(0, "tie");
    flow_a
        .add_instruction(first)
        .add_instruction(Instruction::new(1, InstructionKind::ClearActions));
    let mut flow_b = FlowEntry::new(0, "tie");
    flow_b
        .add_instruction(Instruction::new(1, InstructionKind::ClearActions))
        .add_instruction(second);

    assert_eq!(flow_a.to_json().unwrap(), flow_b.to_json().unwrap());

    let mut group_a = GroupEntry::new(1, GroupType::All);
    let mut bucket = GroupBucket::new(0);
    bucket
        .add_action(Action::output(0, "1"))
        .add_action(Action::output(0, "2"));
    group_a.add_bucket(bucket);
    let mut group_b = GroupEntry::new(1, GroupType::All);
    let mut bucket = GroupBucket::new(0);
    bucket
        .add_action(Action::output(0, "2"))
        .add_action(Action::output(0, "1"));
    group_b.add_bucket(bucket);

    assert_eq!(group_a.to_json().unwrap(), group_b.to_json().unwrap());
}

#[test]
fn test_group_round_trip_through_controller() {
    let controller = FakeController::new();
    let switch = OpenflowSwitch::new(&controller, "openflow:1");
    let mut group = GroupEntry::new(u32::MAX, GroupType::FastFailover);
    group.name = Some("uplink".to_string());
    group.barrier = Some(true);
    for (id, port) in [(0, 1), (1, 2)] {
        let mut bucket = GroupBucket::new(id);
        bucket.watch_port = Some(port);
        bucket.watch_group = Some(u32::MAX);
        bucket.add_action(Action::output(0, &port.to_string()));
        group.add_bucket(bucket);
    }

    assert!(switch.add_modify_group(&group).is_ok());
    let (method, path, _) = controller.last_request().unwrap();
    assert_eq!(method, HttpMethod::Put);
    assert!(path.ends_with("openflow:1/flow-node-inventory:group/4294967295"));

    let doc = switch.get_configured_group(u32::MAX).into_data().unwrap();
    assert_eq!(doc, group.to_value());
    let stored = &doc[GroupEntry::DOC_KEY][0];
    assert_eq!(stored["group-type"], json!("group-ff"));
    assert_eq!(stored["group-name"], json!("uplink"));
    assert_eq!(stored["barrier"], json!(true));
    assert_eq!(stored["buckets"]["bucket"][1]["watch_port"], json!(2));

    assert!(switch.delete_group(u32::MAX).is_ok());
    assert_eq!(
        switch.get_configured_group(u32::MAX).status,
        SdncStatus::DataNotFound
    );
}

#[test]
fn test_flow_id_encoded_in_path() {
    let controller = FakeController::new();
    let switch = OpenflowSwitch::new(&controller, "openflow:1");
    let flow = FlowEntry::new(0, "a/b#c?d");

    assert!(switch.add_modify_flow(&flow).is_ok());
    let (_, path, _) = controller.last_request().unwrap();
    assert!(path.ends_with("flow-node-inventory:table/0/flow/a%2Fb%23c%3Fd"));
    assert_eq!(
        switch.get_configured_flow(0, "a/b#c?d").into_data(),
        Some(flow.to_value())
    );
    assert!(switch.delete_flow(0, "a/b#c?d").is_ok());
}
