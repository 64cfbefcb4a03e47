// SPDX-License-Identifier: Apache-2.0

use serde_json::{Map, Value};

use super::action::{actions_to_value, sorted_by_order};
use super::matching::json_obj;
use crate::Action;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InstructionKind {
    ApplyActions(Vec<Action>),
    WriteActions(Vec<Action>),
    ClearActions,
    GoToTable { table_id: u8 },
    WriteMetadata { metadata: u64, mask: u64 },
    Meter { meter_id: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Instruction {
    pub order: u32,
    pub kind: InstructionKind,
}

impl Instruction {
    pub fn new(order: u32, kind: InstructionKind) -> Self {
        Self { order, kind }
    }

    pub fn apply_actions(order: u32) -> Self {
        Self::new(order, InstructionKind::ApplyActions(Vec::new()))
    }

    pub fn write_actions(order: u32) -> Self {
        Self::new(order, InstructionKind::WriteActions(Vec::new()))
    }

    /// Append action to apply-actions or write-actions instruction.
    /// Ignored with a warning for other instruction kinds.
    pub fn add_action(&mut self, action: Action) -> &mut Self {
        match &mut self.kind {
            InstructionKind::ApplyActions(actions)
            | InstructionKind::WriteActions(actions) => actions.push(action),
            kind => {
                log::warn!(
                    "Ignoring action {action:?} for instruction {kind:?} \
                     which holds no action"
                );
            }
        }
        self
    }

    pub fn actions(&self) -> &[Action] {
        match &self.kind {
            InstructionKind::ApplyActions(actions)
            | InstructionKind::WriteActions(actions) => actions.as_slice(),
            _ => &[],
        }
    }

    pub(crate) fn to_value(&self) -> Value {
        let mut ret = Map::new();
        ret.insert("order".to_string(), self.order.into());
        let (name, content) = match &self.kind {
            InstructionKind::ApplyActions(actions) => {
                ("apply-actions", json_obj("action", actions_to_value(actions)))
            }
            InstructionKind::WriteActions(actions) => {
                ("write-actions", json_obj("action", actions_to_value(actions)))
            }
            InstructionKind::ClearActions => {
                ("clear-actions", Value::Object(Map::new()))
            }
            InstructionKind::GoToTable { table_id } => {
                ("go-to-table", json_obj("table_id", (*table_id).into()))
            }
            InstructionKind::WriteMetadata { metadata, mask } => {
                let mut v = Map::new();
                v.insert("metadata".to_string(), (*metadata).into());
                v.insert("metadata-mask".to_string(), (*mask).into());
                ("write-metadata", Value::Object(v))
            }
            InstructionKind::Meter { meter_id } => {
                ("meter", json_obj("meter-id", (*meter_id).into()))
            }
        };
        ret.insert(name.to_string(), content);
        Value::Object(ret)
    }
}

pub(crate) fn instructions_to_value(instructions: &[Instruction]) -> Value {
    json_obj(
        "instruction",
        sorted_by_order(instructions.iter().map(|i| (i.order, i.to_value()))),
    )
}
