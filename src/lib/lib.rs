// SPDX-License-Identifier: Apache-2.0

mod config;
mod deserializer;
mod error;
mod http;
mod netconf;
mod notification;
mod openflow;
mod session;
mod status;
mod topology;


pub(crate) use sdnc_derive::{
    DebugHideSecrets, JsonDisplay, JsonDisplayHideSecrets,
};

pub use self::config::SdncConfig;
pub use self::error::{ErrorKind, SdncError};
pub use self::http::SdncHttpSession;
pub use self::netconf::{
    DeviceRegistry, DeviceState, NetconfNodeStatus, NetworkDevice,
};
pub use self::notification::TopologyChangeEvent;
pub use self::openflow::{
    Action, ActionKind, FlowEntry, FlowMatch, GroupBucket, GroupEntry,
    GroupType, Instruction, InstructionKind, OpenflowSwitch, SetFieldValue,
};
pub use self::session::{DataStore, HttpMethod, SdncReply, SdncSession};
pub use self::status::{SdncHttpDetail, SdncResult, SdncStatus};
pub use self::topology::{
    HostNode, Inventory, InventorySwitch, Link, LinkEndpoint, PeerNode,
    SwitchNode, SwitchPort, TopologyClient, TopologyGraph,
};
