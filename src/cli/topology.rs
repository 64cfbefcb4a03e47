// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;

use sdnc::{SdncHttpSession, TopologyClient, TopologyGraph};

use crate::CliError;

fn query_graph(
    session: &SdncHttpSession,
    topology_id: Option<&String>,
) -> Result<TopologyGraph, CliError> {
    TopologyClient::new(session)
        .get_topology_graph(topology_id.map(|s| s.as_str()))
        .into_result()?
        .ok_or(CliError::from("Controller replied no topology"))
}

fn topology_arg() -> clap::Arg {
    clap::Arg::new("TOPOLOGY")
        .long("topology")
        .short('t')
        .help("Topology ID, default flow:1")
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct TopologySummary<'a> {
    topology_id: &'a str,
    switch_count: usize,
    host_count: usize,
    inter_switch_link_count: usize,
    flow_count: u64,
    switches: Vec<&'a str>,
}

pub(crate) struct CommandTopology;

impl CommandTopology {
    pub(crate) const CMD: &'static str = "topology";

    pub(crate) fn new_cmd() -> clap::Command {
        clap::Command::new(Self::CMD)
            .alias("t")
            .about("Show topology summary")
            .arg(topology_arg())
    }

    pub(crate) fn handle(
        session: &SdncHttpSession,
        matches: &clap::ArgMatches,
    ) -> Result<(), CliError> {
        let graph =
            query_graph(session, matches.get_one::<String>("TOPOLOGY"))?;
        let summary = TopologySummary {
            topology_id: graph.topology_id(),
            switch_count: graph.switch_count(),
            host_count: graph.host_count(),
            inter_switch_link_count: graph.inter_switch_link_count(),
            flow_count: graph.flow_count(),
            switches: graph.switch_ids(),
        };
        println!("{}", serde_yaml::to_string(&summary)?);
        Ok(())
    }
}

pub(crate) struct CommandPeers;

impl CommandPeers {
    pub(crate) const CMD: &'static str = "peers";

    pub(crate) fn new_cmd() -> clap::Command {
        clap::Command::new(Self::CMD)
            .about("Show neighbors reachable through a node port")
            .arg(
                clap::Arg::new("NODE")
                    .required(true)
                    .index(1)
                    .help("Node ID, e.g. openflow:1"),
            )
            .arg(
                clap::Arg::new("PORT")
                    .required(true)
                    .index(2)
                    .help("Port number or termination point ID"),
            )
            .arg(topology_arg())
    }

    pub(crate) fn handle(
        session: &SdncHttpSession,
        matches: &clap::ArgMatches,
    ) -> Result<(), CliError> {
        let (Some(node), Some(port)) = (
            matches.get_one::<String>("NODE"),
            matches.get_one::<String>("PORT"),
        ) else {
            return Err("Node and port are required".into());
        };
        let graph =
            query_graph(session, matches.get_one::<String>("TOPOLOGY"))?;
        println!(
            "{}",
            serde_yaml::to_string(&graph.peers(node.as_str(), port.as_str()))?
        );
        Ok(())
    }
}
