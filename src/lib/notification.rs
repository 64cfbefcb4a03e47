// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ErrorKind, JsonDisplay, SdncError};

const NODE_KEY: &str = "network-topology:node[";
const LINK_KEY: &str = "network-topology:link[";
const TERMINATION_POINT_KEY: &str = "termination-point";
const SWITCH_PREFIX: &str = "openflow:";
const HOST_PREFIX: &str = "host:";

#[derive(Debug, Deserialize)]
struct NotificationDoc {
    notification: Notification,
}

#[derive(Debug, Deserialize)]
struct Notification {
    #[serde(rename = "eventTime")]
    event_time: String,
    #[serde(rename = "data-changed-notification")]
    data_changed: Option<DataChanged>,
}

#[derive(Debug, Deserialize)]
struct DataChanged {
    // Single event is not wrapped in array
    #[serde(rename = "data-change-event", default)]
    events: Value,
}

#[derive(Debug, Deserialize)]
struct DataChangeEvent {
    path: String,
    operation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChangeOperation {
    Created,
    Deleted,
    Updated,
}

impl ChangeOperation {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "created" => Some(Self::Created),
            "deleted" => Some(Self::Deleted),
            "updated" => Some(Self::Updated),
            _ => None,
        }
    }
}

/// Topology change pushed by controller.
///
/// Only tells which elements appeared or vanished, callers rebuild their
/// [crate::TopologyGraph] from fresh documents when needed.
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonDisplay,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct TopologyChangeEvent {
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub switches_added: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub switches_removed: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hosts_added: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hosts_removed: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links_added: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links_removed: Vec<String>,
}

impl TopologyChangeEvent {
    pub fn from_json(json: &str) -> Result<Self, SdncError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, SdncError> {
        let doc = NotificationDoc::deserialize(value).map_err(|e| {
            SdncError::new(
                ErrorKind::MalformData,
                format!("Invalid topology notification: {e}"),
            )
        })?;
        let mut ret = Self {
            timestamp: doc.notification.event_time,
            ..Default::default()
        };
        let events = match doc.notification.data_changed.map(|d| d.events) {
            Some(Value::Array(events)) => events,
            Some(Value::Null) | None => Vec::new(),
            Some(event) => vec![event],
        };
        for event in events {
            let event = DataChangeEvent::deserialize(&event).map_err(|e| {
                SdncError::new(
                    ErrorKind::MalformData,
                    format!("Invalid data change event: {e}"),
                )
            })?;
            ret.apply(&event);
        }
        Ok(ret)
    }

    fn apply(&mut self, event: &DataChangeEvent) {
        let Some(operation) = ChangeOperation::parse(event.operation.as_str())
        else {
            log::debug!(
                "Ignoring unknown operation {} on {}",
                event.operation,
                event.path
            );
            return;
        };
        let path = event.path.as_str();
        if path.contains(TERMINATION_POINT_KEY) {
            return;
        }
        let (added, removed, id) = if let Some(id) = key_value(path, LINK_KEY)
        {
            (&mut self.links_added, &mut self.links_removed, id)
        } else if let Some(id) = key_value(path, NODE_KEY) {
            if id.starts_with(SWITCH_PREFIX) {
                (&mut self.switches_added, &mut self.switches_removed, id)
            } else if id.starts_with(HOST_PREFIX) {
                (&mut self.hosts_added, &mut self.hosts_removed, id)
            } else {
                log::debug!("Ignoring change of unknown node {id}");
                return;
            }
        } else {
            return;
        };
        let target = match operation {
            ChangeOperation::Created => added,
            ChangeOperation::Deleted => removed,
            ChangeOperation::Updated => return,
        };
        if !target.iter().any(|i| i == id) {
            target.push(id.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.switches_added.is_empty()
            && self.switches_removed.is_empty()
            && self.hosts_added.is_empty()
            && self.hosts_removed.is_empty()
            && self.links_added.is_empty()
            && self.links_removed.is_empty()
    }
}

// Extract `x` out of `<key><name>='x']` or `<key><name>="x"]`.
fn key_value<'a>(path: &'a str, key: &str) -> Option<&'a str> {
    let rest = &path[path.find(key)? + key.len()..];
    let rest = &rest[rest.find('=')? + 1..];
    let quote = rest.chars().next()?;
    if quote != '\'' && quote != '"' {
        return None;
    }
    let rest = &rest[1..];
    rest.find(quote).map(|end| &rest[..end])
}
