// SPDX-License-Identifier: Apache-2.0

mod action;
mod flow;
mod group;
mod instruction;
mod matching;
mod switch;

pub use self::action::{Action, ActionKind, SetFieldValue};
pub use self::flow::FlowEntry;
pub use self::group::{GroupBucket, GroupEntry, GroupType};
pub use self::instruction::{Instruction, InstructionKind};
pub use self::matching::FlowMatch;
pub use self::switch::OpenflowSwitch;
