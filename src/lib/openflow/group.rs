// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::action::actions_to_value;
use super::matching::json_obj;
use crate::{Action, SdncError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum GroupType {
    /// Execute all buckets, used for multicast and broadcast
    #[serde(rename = "group-all")]
    All,
    /// Execute one bucket chosen by weight, used for load sharing
    #[serde(rename = "group-select")]
    Select,
    /// Execute the single bucket
    #[serde(rename = "group-indirect")]
    Indirect,
    /// Execute the first live bucket
    #[serde(rename = "group-ff")]
    FastFailover,
}

impl GroupType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "group-all",
            Self::Select => "group-select",
            Self::Indirect => "group-indirect",
            Self::FastFailover => "group-ff",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub struct GroupBucket {
    pub bucket_id: u32,
    /// Relative share of traffic for [GroupType::Select]
    pub weight: Option<u16>,
    /// Liveness port for [GroupType::FastFailover]
    pub watch_port: Option<u32>,
    pub watch_group: Option<u32>,
    pub actions: Vec<Action>,
}

impl GroupBucket {
    pub fn new(bucket_id: u32) -> Self {
        Self {
            bucket_id,
            ..Default::default()
        }
    }

    pub fn add_action(&mut self, action: Action) -> &mut Self {
        self.actions.push(action);
        self
    }

    fn to_value(&self) -> Value {
        let mut ret = Map::new();
        ret.insert("bucket-id".to_string(), self.bucket_id.into());
        if let Some(v) = self.weight {
            ret.insert("weight".to_string(), v.into());
        }
        if let Some(v) = self.watch_port {
            ret.insert("watch_port".to_string(), v.into());
        }
        if let Some(v) = self.watch_group {
            ret.insert("watch_group".to_string(), v.into());
        }
        ret.insert("action".to_string(), actions_to_value(&self.actions));
        Value::Object(ret)
    }
}

/// OpenFlow group table entry.
///
/// Buckets are encoded in insertion order since the order carries meaning
/// for [GroupType::FastFailover]. A [GroupType::Select] group is expected
/// to hold at least one weighted bucket, left for controller to enforce.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct GroupEntry {
    pub group_id: u32,
    pub group_type: GroupType,
    pub name: Option<String>,
    pub barrier: Option<bool>,
    pub buckets: Vec<GroupBucket>,
}

impl GroupEntry {
    pub const DOC_KEY: &'static str = "flow-node-inventory:group";

    pub fn new(group_id: u32, group_type: GroupType) -> Self {
        Self {
            group_id,
            group_type,
            name: None,
            barrier: None,
            buckets: Vec::new(),
        }
    }

    pub fn add_bucket(&mut self, bucket: GroupBucket) -> &mut Self {
        self.buckets.push(bucket);
        self
    }

    pub fn to_value(&self) -> Value {
        let mut group = Map::new();
        group.insert("group-id".to_string(), self.group_id.into());
        group.insert(
            "group-type".to_string(),
            self.group_type.as_str().into(),
        );
        if let Some(v) = self.name.as_ref() {
            group.insert("group-name".to_string(), v.as_str().into());
        }
        if let Some(v) = self.barrier {
            group.insert("barrier".to_string(), v.into());
        }
        group.insert(
            "buckets".to_string(),
            json_obj(
                "bucket",
                Value::Array(
                    self.buckets.iter().map(|b| b.to_value()).collect(),
                ),
            ),
        );

        let mut ret = Map::new();
        ret.insert(
            Self::DOC_KEY.to_string(),
            Value::Array(vec![Value::Object(group)]),
        );
        Value::Object(ret)
    }

    pub fn to_json(&self) -> Result<String, SdncError> {
        Ok(serde_json::to_string(&self.to_value())?)
    }
}
