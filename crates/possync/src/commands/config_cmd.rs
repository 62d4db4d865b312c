//! Config subcommand handlers.

use possync_config::Config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = config::load(global)?;
            print!("{}", toml::to_string_pretty(&cfg.redacted())?);
            Ok(())
        }

        ConfigCommand::Path => {
            println!("{}", config::config_file(global).display());
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let path = config::config_file(global);
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }
            possync_config::save_config(&Config::default(), &path)?;
            eprintln!("Wrote default configuration to {}", path.display());
            Ok(())
        }

        ConfigCommand::SetPassword { username } => {
            let password = rpassword::prompt_password(format!("StoreHub password for {username}: "))
                .map_err(|e| CliError::Validation {
                    field: "password".into(),
                    reason: format!("prompt failed: {e}"),
                })?;
            if password.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "password cannot be empty".into(),
                });
            }
            possync_config::store_keyring_password(&username, &password)?;
            eprintln!("Password for {username} stored in the system keyring");
            Ok(())
        }
    }
}
