// SPDX-License-Identifier: Apache-2.0

mod error;
mod node;
mod topology;

use sdnc::{SdncConfig, SdncHttpSession};

pub(crate) use self::error::CliError;
use self::{
    node::{CommandNodeStatus, CommandNodes},
    topology::{CommandPeers, CommandTopology},
};

fn main() -> Result<(), CliError> {
    let mut cli_cmd = clap::Command::new("sdnc")
        .about("SDN controller CLI")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            clap::Arg::new("quiet")
                .short('q')
                .action(clap::ArgAction::SetTrue)
                .help("Disable logging")
                .global(true),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .action(clap::ArgAction::Count)
                .help("Increase verbose level")
                .global(true),
        )
        .arg(
            clap::Arg::new("host")
                .long("host")
                .short('H')
                .default_value("127.0.0.1")
                .help("Controller address")
                .global(true),
        )
        .arg(
            clap::Arg::new("port")
                .long("port")
                .short('P')
                .value_parser(clap::value_parser!(u16))
                .default_value("8181")
                .help("Controller RESTCONF port")
                .global(true),
        )
        .arg(
            clap::Arg::new("user")
                .long("user")
                .short('u')
                .default_value("admin")
                .global(true),
        )
        .arg(
            clap::Arg::new("password")
                .long("password")
                .short('p')
                .default_value("admin")
                .global(true),
        )
        .subcommand(CommandNodes::new_cmd())
        .subcommand(CommandNodeStatus::new_cmd())
        .subcommand(CommandTopology::new_cmd())
        .subcommand(CommandPeers::new_cmd());

    let matches = cli_cmd.get_matches_mut();

    let (log_groups, log_level) = match matches.get_count("verbose") {
        0 => (vec!["sdnc"], log::LevelFilter::Info),
        1 => (vec!["sdnc"], log::LevelFilter::Debug),
        2 => (vec!["sdnc"], log::LevelFilter::Trace),
        _ => (vec![], log::LevelFilter::Trace),
    };

    if !matches.get_flag("quiet") {
        let mut log_builder = env_logger::Builder::new();
        if log_groups.is_empty() {
            log_builder.filter(None, log_level);
        } else {
            for log_group in log_groups {
                log_builder.filter(Some(log_group), log_level);
            }
        }
        log_builder.init();
    }

    log::debug!("sdnc version: {}", clap::crate_version!());

    if let Err(e) = call_subcommand(&matches) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    Ok(())
}

fn gen_config(matches: &clap::ArgMatches) -> Result<SdncConfig, CliError> {
    let (Some(host), Some(user), Some(password)) = (
        matches.get_one::<String>("host"),
        matches.get_one::<String>("user"),
        matches.get_one::<String>("password"),
    ) else {
        return Err("Controller host and credential are required".into());
    };
    let mut config = SdncConfig::new(host, user, password);
    if let Some(port) = matches.get_one::<u16>("port") {
        config.port = *port;
    }
    Ok(config)
}

fn call_subcommand(matches: &clap::ArgMatches) -> Result<(), CliError> {
    let session = SdncHttpSession::new(&gen_config(matches)?)?;
    if matches.subcommand_matches(CommandNodes::CMD).is_some() {
        CommandNodes::handle(&session)
    } else if let Some(matches) =
        matches.subcommand_matches(CommandNodeStatus::CMD)
    {
        CommandNodeStatus::handle(&session, matches)
    } else if let Some(matches) =
        matches.subcommand_matches(CommandTopology::CMD)
    {
        CommandTopology::handle(&session, matches)
    } else if let Some(matches) = matches.subcommand_matches(CommandPeers::CMD)
    {
        CommandPeers::handle(&session, matches)
    } else {
        Err(CliError::from("Unknown command"))
    }
}
