// SPDX-License-Identifier: Apache-2.0

use serde_json::Value;

use crate::session::{
    delete_document, get_document, path_key, send_document,
};
use crate::{
    DataStore, FlowEntry, GroupEntry, HttpMethod, SdncResult, SdncSession,
    SdncStatus,
};

const INVENTORY_NODES_PATH: &str = "opendaylight-inventory:nodes";

/// Flow and group tables of one OpenFlow switch.
///
/// Documents read back from controller are returned untouched, validation of
/// flows and groups belongs to the controller.
pub struct OpenflowSwitch<'a> {
    session: &'a dyn SdncSession,
    node_id: String,
}

impl<'a> OpenflowSwitch<'a> {
    pub fn new(session: &'a dyn SdncSession, node_id: &str) -> Self {
        Self {
            session,
            node_id: node_id.to_string(),
        }
    }

    pub fn node_id(&self) -> &str {
        self.node_id.as_str()
    }

    fn node_path(&self) -> String {
        format!("{INVENTORY_NODES_PATH}/node/{}", self.node_id)
    }

    fn table_path(&self, table_id: u8) -> String {
        format!("{}/flow-node-inventory:table/{table_id}", self.node_path())
    }

    fn flow_path(&self, table_id: u8, flow_id: &str) -> String {
        format!("{}/flow/{}", self.table_path(table_id), path_key(flow_id))
    }

    fn group_path(&self, group_id: u32) -> String {
        format!("{}/flow-node-inventory:group/{group_id}", self.node_path())
    }

    /// Store the flow, replacing any flow with same table and flow ID.
    pub fn add_modify_flow(&self, flow: &FlowEntry) -> SdncResult<()> {
        log::info!(
            "Storing flow {} of table {} on {}",
            flow.flow_id,
            flow.table_id,
            self.node_id
        );
        send_document(
            self.session,
            HttpMethod::Put,
            DataStore::Config
                .path(&self.flow_path(flow.table_id, flow.flow_id.as_str()))
                .as_str(),
            &flow.to_value(),
        )
    }

    pub fn get_configured_flow(
        &self,
        table_id: u8,
        flow_id: &str,
    ) -> SdncResult<Value> {
        get_document(
            self.session,
            DataStore::Config
                .path(&self.flow_path(table_id, flow_id))
                .as_str(),
        )
    }

    pub fn delete_flow(&self, table_id: u8, flow_id: &str) -> SdncResult<()> {
        log::info!(
            "Removing flow {flow_id} of table {table_id} on {}",
            self.node_id
        );
        delete_document(
            self.session,
            DataStore::Config
                .path(&self.flow_path(table_id, flow_id))
                .as_str(),
        )
    }

    /// Whole configured flow table.
    pub fn get_configured_flows(&self, table_id: u8) -> SdncResult<Value> {
        get_document(
            self.session,
            DataStore::Config.path(&self.table_path(table_id)).as_str(),
        )
    }

    /// Flow table as installed on switch, including flows not added through
    /// controller configuration.
    pub fn get_operational_flows(&self, table_id: u8) -> SdncResult<Value> {
        get_document(
            self.session,
            DataStore::Operational
                .path(&self.table_path(table_id))
                .as_str(),
        )
    }

    pub fn add_modify_group(&self, group: &GroupEntry) -> SdncResult<()> {
        log::info!("Storing group {} on {}", group.group_id, self.node_id);
        send_document(
            self.session,
            HttpMethod::Put,
            DataStore::Config.path(&self.group_path(group.group_id)).as_str(),
            &group.to_value(),
        )
    }

    pub fn get_configured_group(&self, group_id: u32) -> SdncResult<Value> {
        get_document(
            self.session,
            DataStore::Config.path(&self.group_path(group_id)).as_str(),
        )
    }

    pub fn delete_group(&self, group_id: u32) -> SdncResult<()> {
        log::info!("Removing group {group_id} on {}", self.node_id);
        delete_document(
            self.session,
            DataStore::Config.path(&self.group_path(group_id)).as_str(),
        )
    }

    /// Group as reported by switch.
    pub fn get_group_description(&self, group_id: u32) -> SdncResult<Value> {
        get_document(
            self.session,
            DataStore::Operational
                .path(&self.group_path(group_id))
                .as_str(),
        )
    }

    pub fn get_group_statistics(&self, group_id: u32) -> SdncResult<Value> {
        get_document(
            self.session,
            DataStore::Operational
                .path(&format!(
                    "{}/opendaylight-group-statistics:group-statistics",
                    self.group_path(group_id)
                ))
                .as_str(),
        )
    }

    /// IDs of groups in controller configuration, ascending.
    pub fn get_configured_group_ids(&self) -> SdncResult<Vec<u32>> {
        let result = get_document(
            self.session,
            DataStore::Config.path(&self.node_path()).as_str(),
        );
        if !result.is_ok() {
            return result.cast();
        }
        let node_id = self.node_id.clone();
        result.map(|doc| {
            let Some(nodes) = doc
                .as_ref()
                .and_then(|d| d.get("node"))
                .and_then(|n| n.as_array())
            else {
                log::warn!("Invalid configuration document of node {node_id}");
                return (SdncStatus::MalformData, None);
            };
            let mut ids: Vec<u32> = nodes
                .iter()
                .filter_map(|n| n.get(GroupEntry::DOC_KEY))
                .filter_map(|g| g.as_array())
                .flatten()
                .filter_map(|g| g.get("group-id"))
                .filter_map(|id| id.as_u64())
                .filter_map(|id| u32::try_from(id).ok())
                .collect();
            ids.sort_unstable();
            ids.dedup();
            (SdncStatus::Ok, Some(ids))
        })
    }
}
