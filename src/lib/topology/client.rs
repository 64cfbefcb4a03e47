// SPDX-License-Identifier: Apache-2.0

use serde::Deserialize;

use super::document::TopologyDoc;
use crate::session::get_document;
use crate::{
    DataStore, Inventory, SdncResult, SdncSession, SdncStatus, TopologyGraph,
};

const NETWORK_TOPOLOGY_PATH: &str = "network-topology:network-topology";
const INVENTORY_PATH: &str = "opendaylight-inventory:nodes";

/// Fetch topology and inventory snapshots from the operational store.
pub struct TopologyClient<'a> {
    session: &'a dyn SdncSession,
}

impl<'a> TopologyClient<'a> {
    pub fn new(session: &'a dyn SdncSession) -> Self {
        Self { session }
    }

    /// IDs of all topologies known to controller, sorted.
    pub fn get_topology_ids(&self) -> SdncResult<Vec<String>> {
        let result = get_document(
            self.session,
            DataStore::Operational.path(NETWORK_TOPOLOGY_PATH).as_str(),
        );
        if !result.is_ok() {
            return result.cast();
        }
        result.map(|doc| {
            let doc = doc.unwrap_or_default();
            let doc = doc.get(NETWORK_TOPOLOGY_PATH).unwrap_or(&doc);
            match TopologyDoc::deserialize(doc) {
                Ok(d) => {
                    let mut ids: Vec<String> =
                        d.topology.into_iter().map(|t| t.topology_id).collect();
                    ids.sort_unstable();
                    (SdncStatus::Ok, Some(ids))
                }
                Err(e) => {
                    log::warn!("Invalid network topology document: {e}");
                    (SdncStatus::MalformData, None)
                }
            }
        })
    }

    pub fn get_inventory(&self) -> SdncResult<Inventory> {
        let result = get_document(
            self.session,
            DataStore::Operational.path(INVENTORY_PATH).as_str(),
        );
        if !result.is_ok() {
            return result.cast();
        }
        result.map(|doc| {
            match doc.as_ref().map(Inventory::from_value) {
                Some(Ok(inv)) => (SdncStatus::Ok, Some(inv)),
                _ => (SdncStatus::MalformData, None),
            }
        })
    }

    /// Build a graph of the specified topology, `None` means
    /// [TopologyGraph::DEFAULT_TOPOLOGY_ID].
    ///
    /// Missing inventory (no switch ever connected) is treated as empty
    /// instead of failure.
    pub fn get_topology_graph(
        &self,
        topology_id: Option<&str>,
    ) -> SdncResult<TopologyGraph> {
        let topology_id =
            topology_id.unwrap_or(TopologyGraph::DEFAULT_TOPOLOGY_ID);
        let topology = get_document(
            self.session,
            DataStore::Operational
                .path(&format!(
                    "{NETWORK_TOPOLOGY_PATH}/topology/{topology_id}"
                ))
                .as_str(),
        );
        if !topology.is_ok() {
            return topology.cast();
        }
        let inventory = get_document(
            self.session,
            DataStore::Operational.path(INVENTORY_PATH).as_str(),
        );
        let inventory_doc = match inventory.status().clone() {
            SdncStatus::Ok => inventory.into_data(),
            SdncStatus::DataNotFound => {
                log::debug!("No inventory on controller");
                None
            }
            _ => return inventory.cast(),
        };
        topology.map(|doc| {
            let Some(doc) = doc else {
                return (SdncStatus::MalformData, None);
            };
            match TopologyGraph::from_values(
                topology_id,
                &doc,
                inventory_doc.as_ref(),
            ) {
                Ok(g) => (SdncStatus::Ok, Some(g)),
                Err(_) => (SdncStatus::MalformData, None),
            }
        })
    }
}
