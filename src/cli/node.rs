// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;

use sdnc::{DeviceRegistry, NetconfNodeStatus, SdncHttpSession, SdncStatus};

use crate::CliError;

pub(crate) struct CommandNodes;

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct NodeList {
    configured: Vec<String>,
    mounted: Vec<NetconfNodeStatus>,
}

impl CommandNodes {
    pub(crate) const CMD: &'static str = "nodes";

    pub(crate) fn new_cmd() -> clap::Command {
        clap::Command::new(Self::CMD)
            .about("List NETCONF devices and their connection state")
    }

    pub(crate) fn handle(session: &SdncHttpSession) -> Result<(), CliError> {
        let registry = DeviceRegistry::new(session);
        let list = NodeList {
            configured: registry
                .list_configured()
                .into_result()?
                .unwrap_or_default(),
            mounted: registry
                .list_conn_status()
                .into_result()?
                .unwrap_or_default(),
        };
        println!("{}", serde_yaml::to_string(&list)?);
        Ok(())
    }
}

#[derive(Serialize)]
struct NodeStatus<'a> {
    name: &'a str,
    config: String,
    connection: String,
}

pub(crate) struct CommandNodeStatus;

impl CommandNodeStatus {
    pub(crate) const CMD: &'static str = "node-status";

    pub(crate) fn new_cmd() -> clap::Command {
        clap::Command::new(Self::CMD)
            .about("Show configuration and connection state of a device")
            .arg(
                clap::Arg::new("NAME")
                    .required(true)
                    .index(1)
                    .help("Device name"),
            )
    }

    pub(crate) fn handle(
        session: &SdncHttpSession,
        matches: &clap::ArgMatches,
    ) -> Result<(), CliError> {
        let name = matches
            .get_one::<String>("NAME")
            .ok_or(CliError::from("Device name undefined"))?;
        let registry = DeviceRegistry::new(session);
        let config = registry.config_status(name);
        match config.status() {
            SdncStatus::NodeConfigured | SdncStatus::DataNotFound => (),
            s => return Err(s.clone().into()),
        }
        let conn = registry.conn_status(name);
        match conn.status() {
            SdncStatus::NodeConnected
            | SdncStatus::NodeDisconnected
            | SdncStatus::NodeNotFound => (),
            s => return Err(s.clone().into()),
        }
        let status = NodeStatus {
            name: name.as_str(),
            config: config.status().to_string(),
            connection: conn.status().to_string(),
        };
        println!("{}", serde_yaml::to_string(&status)?);
        Ok(())
    }
}
