// SPDX-License-Identifier: Apache-2.0

use serde_json::{Map, Value};

use super::instruction::instructions_to_value;
use crate::{FlowMatch, Instruction, SdncError};

/// OpenFlow flow table entry.
///
/// Built in memory without validation. The controller keys flows by
/// `(table_id, flow_id)` on each switch, so storing an entry with the same
/// pair replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub struct FlowEntry {
    pub table_id: u8,
    pub flow_id: String,
    pub name: Option<String>,
    pub priority: Option<u16>,
    pub cookie: Option<u64>,
    pub cookie_mask: Option<u64>,
    /// Seconds
    pub idle_timeout: Option<u16>,
    /// Seconds
    pub hard_timeout: Option<u16>,
    pub strict: Option<bool>,
    pub install_hw: Option<bool>,
    pub barrier: Option<bool>,
    /// OpenFlow flow mod flags, e.g. `SEND_FLOW_REM`
    pub flags: Option<String>,
    pub flow_match: FlowMatch,
    pub instructions: Vec<Instruction>,
}

impl FlowEntry {
    pub const DOC_KEY: &'static str = "flow-node-inventory:flow";

    pub fn new(table_id: u8, flow_id: &str) -> Self {
        Self {
            table_id,
            flow_id: flow_id.to_string(),
            ..Default::default()
        }
    }

    pub fn match_mut(&mut self) -> &mut FlowMatch {
        &mut self.flow_match
    }

    pub fn add_instruction(&mut self, instruction: Instruction) -> &mut Self {
        self.instructions.push(instruction);
        self
    }

    /// Canonical controller document of this flow.
    ///
    /// Instructions are ascending by order and actions ascending by order
    /// within each instruction, hence two entries holding the same values
    /// always produce the identical document.
    pub fn to_value(&self) -> Value {
        let mut flow = Map::new();
        flow.insert("id".to_string(), self.flow_id.as_str().into());
        flow.insert("table_id".to_string(), self.table_id.into());
        if let Some(v) = self.name.as_ref() {
            flow.insert("flow-name".to_string(), v.as_str().into());
        }
        if let Some(v) = self.priority {
            flow.insert("priority".to_string(), v.into());
        }
        if let Some(v) = self.cookie {
            flow.insert("cookie".to_string(), v.into());
        }
        if let Some(v) = self.cookie_mask {
            flow.insert("cookie_mask".to_string(), v.into());
        }
        if let Some(v) = self.idle_timeout {
            flow.insert("idle-timeout".to_string(), v.into());
        }
        if let Some(v) = self.hard_timeout {
            flow.insert("hard-timeout".to_string(), v.into());
        }
        if let Some(v) = self.strict {
            flow.insert("strict".to_string(), v.into());
        }
        if let Some(v) = self.install_hw {
            flow.insert("installHw".to_string(), v.into());
        }
        if let Some(v) = self.barrier {
            flow.insert("barrier".to_string(), v.into());
        }
        if let Some(v) = self.flags.as_ref() {
            flow.insert("flags".to_string(), v.as_str().into());
        }
        flow.insert("match".to_string(), self.flow_match.to_value());
        if !self.instructions.is_empty() {
            flow.insert(
                "instructions".to_string(),
                instructions_to_value(self.instructions.as_slice()),
            );
        }

        let mut ret = Map::new();
        ret.insert(
            Self::DOC_KEY.to_string(),
            Value::Array(vec![Value::Object(flow)]),
        );
        Value::Object(ret)
    }

    pub fn to_json(&self) -> Result<String, SdncError> {
        Ok(serde_json::to_string(&self.to_value())?)
    }
}
