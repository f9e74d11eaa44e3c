pub mod process;

use std::{env, path::PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use process::{kill_previous_instances, restart_monitor};
use tracing::{error, level_filters::LevelFilter};

use crate::{
    daemon::{args::DaemonArgs, config::MonitorConfig, start_daemon},
    utils::{
        dir::create_application_default_path,
        logging::{CLI_PREFIX, MONITOR_PREFIX, enable_logging},
        runtime::single_thread_runtime,
    },
};

#[derive(Parser, Debug)]
#[command(name = "Breakwatch", version, long_about = None)]
#[command(about = "Reminds you to take breaks from continuous work", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, help = "Enable logging")]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Starts the monitor in the background, replacing a running one")]
    Init {
        #[command(flatten)]
        args: DaemonArgs,
    },
    #[command(
        about = "Run the monitor directly in current console. Used for creating a background monitor internally and for debugging"
    )]
    Serve {
        #[command(flatten)]
        args: DaemonArgs,
    },
    #[command(about = "Stop currently running monitor.")]
    Stop {},
}

pub fn run_cli() -> Result<()> {
    let args = Args::parse();

    match args.commands {
        Commands::Init { args: daemon_args } => {
            enable_cli_logging(&daemon_args.dir, args.log)?;
            // Reject a bad configuration here rather than in a detached process nobody watches.
            let daemon_args = daemon_args.detached();
            validate(&daemon_args)?;
            restart_monitor(daemon_args.to_command_args())
        }
        Commands::Serve { args: daemon_args } => {
            let app_dir = application_dir(&daemon_args.dir)?;
            enable_logging(
                MONITOR_PREFIX,
                &app_dir.join("logs"),
                daemon_args.log,
                daemon_args.log_console,
            )?;
            let config = validate(&daemon_args)?;
            single_thread_runtime()?.block_on(start_daemon(config))
        }
        Commands::Stop {} => {
            enable_cli_logging(&None, args.log)?;
            let stopped = kill_previous_instances(&env::current_exe()?)?;
            println!("Stopped {stopped} monitor(s)");
            Ok(())
        }
    }
}

fn validate(args: &DaemonArgs) -> Result<MonitorConfig> {
    Ok(MonitorConfig::try_from(&args.monitor)
        .inspect_err(|e| error!("Invalid configuration {e}"))?)
}

fn enable_cli_logging(dir: &Option<PathBuf>, log: bool) -> Result<()> {
    let logging_level = if log { Some(LevelFilter::TRACE) } else { None };
    enable_logging(
        CLI_PREFIX,
        &application_dir(dir)?.join("logs"),
        logging_level,
        log,
    )
}

fn application_dir(dir: &Option<PathBuf>) -> Result<PathBuf> {
    dir.clone().map_or_else(create_application_default_path, Ok)
}
