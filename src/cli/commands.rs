use crate::cli::args::{Args, Command, ConfigCommand, NetworkCommand, SnapshotCommand};
use crate::cli::output::{ConsoleWriter, OutputWriter};
use crate::client::Session;
use crate::domain::config::ClientConfig;
use crate::domain::error::{BatfishError, BatfishResult};
use crate::infrastructure::config::{apply_env_overrides, ConfigManager};
use crate::infrastructure::logging::init_logging;
use std::collections::HashMap;
use std::path::PathBuf;

/// Execute CLI command
pub async fn execute_command(args: Args) -> BatfishResult<()> {
    let writer = ConsoleWriter::new(args.output.clone());

    let config_manager = ConfigManager::new()?;
    let mut config = if let Some(config_path) = &args.config {
        let mut config = config_manager.load_config_from_path(config_path.as_ref())?;
        let env: HashMap<String, String> = std::env::vars().collect();
        apply_env_overrides(&mut config.session, &env)?;
        config
    } else {
        config_manager.load_config()?
    };
    apply_cli_overrides(&mut config, &args);

    if !args.quiet {
        init_logging(&config.global.log_level, args.verbose)
            .map_err(|e| BatfishError::Configuration(format!("Failed to initialize logging: {}", e)))?;
    }

    match args.command {
        Command::Versions => {
            let session = Session::with_config(config.session)?;
            let versions = session.get_component_versions().await?;
            writer.write_versions(&versions)?;
            Ok(())
        }
        Command::Network(network_args) => {
            let mut session = Session::with_config(config.session)?;
            match network_args.command {
                NetworkCommand::List => {
                    let networks = session.list_networks().await?;
                    writer.write_names("network", &networks)?;
                }
                NetworkCommand::Create { name } => {
                    session.set_network(&name).await?;
                    writer.write_message(&format!("Network '{}' is ready", name))?;
                }
                NetworkCommand::Delete { name } => {
                    session.delete_network(&name).await?;
                    writer.write_message(&format!("Network '{}' deleted", name))?;
                }
            }
            Ok(())
        }
        Command::Snapshot(snapshot_args) => {
            let mut session_config = config.session;
            if let Some(network) = snapshot_args.network {
                session_config.network = Some(network);
                session_config.snapshot = None;
            }
            let mut session = Session::with_config(session_config)?;
            match snapshot_args.command {
                SnapshotCommand::List => {
                    let snapshots = session.list_snapshots().await?;
                    writer.write_names("snapshot", &snapshots)?;
                }
                SnapshotCommand::Delete { name } => {
                    session.delete_snapshot(&name).await?;
                    writer.write_message(&format!("Snapshot '{}' deleted", name))?;
                }
            }
            Ok(())
        }
        Command::Config(config_args) => execute_config_command(config_args.command, &writer, &config, &config_manager),
        Command::Version => {
            writer.write_message(&format!("bfc {}", env!("CARGO_PKG_VERSION")))?;
            Ok(())
        }
    }
}

fn execute_config_command(
    command: ConfigCommand,
    writer: &ConsoleWriter,
    config: &ClientConfig,
    config_manager: &ConfigManager,
) -> BatfishResult<()> {
    match command {
        ConfigCommand::Show => {
            writer.write_config(config)?;
            Ok(())
        }
        ConfigCommand::Validate { file } => {
            let loaded = match &file {
                Some(config_path) => config_manager.load_config_from_path(config_path.as_ref()),
                None => Ok(config.clone()),
            };
            loaded?.session.validate()?;
            let name = file.as_deref().unwrap_or("Current configuration");
            writer.write_message(&format!("{} is valid", name))?;
            Ok(())
        }
        ConfigCommand::Init { dir, global } => {
            if global {
                let global_path = config_manager.get_global_config_path_ref();
                config_manager.save_config_to_path(global_path, &ClientConfig::default())?;
                writer.write_message(&format!("Global configuration initialized at '{}'", global_path.display()))?;
            } else {
                let base = match dir {
                    Some(dir) => PathBuf::from(dir),
                    None => std::env::current_dir()?,
                };
                let path = config_manager.init_project_config(&base)?;
                writer.write_message(&format!("Project configuration initialized at '{}'", path.display()))?;
            }
            Ok(())
        }
    }
}

/// Command line flags override every configuration layer
fn apply_cli_overrides(config: &mut ClientConfig, args: &Args) {
    if let Some(host) = &args.host {
        config.session.host = host.clone();
    }
    if let Some(port) = args.port {
        config.session.port = port;
    }
}
