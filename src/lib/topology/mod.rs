// SPDX-License-Identifier: Apache-2.0

mod client;
mod document;
mod graph;
mod inventory;

pub use self::client::TopologyClient;
pub use self::graph::{
    HostNode, Link, LinkEndpoint, PeerNode, SwitchNode, TopologyGraph,
};
pub use self::inventory::{Inventory, InventorySwitch, SwitchPort};
