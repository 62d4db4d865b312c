//! `possync sync`: one synchronization from the command line.

use std::path::Path;

use secrecy::SecretString;
use serde::Serialize;
use tracing::debug;

use possync_core::SyncRequest;

use crate::cli::{GlobalOpts, SyncArgs};
use crate::config;
use crate::error::CliError;

/// Run one sync and write the JSON body, success or failure.
///
/// A failure body is still written before the error is returned, so
/// scripts reading stdout see the same shape the HTTP boundary serves.
pub async fn handle(args: SyncArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let aggregator = config::aggregator(&cfg)?;

    let resolved = possync_config::resolve_credentials(&cfg, args.username);
    let password = if args.prompt_password {
        Some(prompt_password()?)
    } else {
        resolved.password
    };

    let request = SyncRequest {
        username: resolved.username,
        password,
        date: args.date,
    };
    debug!(?request, "starting sync");

    let outcome = aggregator.synchronize(request).await;
    let body = match &outcome {
        Ok(result) => render(result, args.compact)?,
        Err(failure) => render(failure, args.compact)?,
    };
    write_output(&body, args.output.as_deref())?;

    outcome.map(|_| ()).map_err(CliError::from)
}

fn prompt_password() -> Result<SecretString, CliError> {
    rpassword::prompt_password("StoreHub password: ")
        .map(SecretString::from)
        .map_err(|e| CliError::Validation {
            field: "password".into(),
            reason: format!("prompt failed: {e}"),
        })
}

fn render<T: Serialize>(value: &T, compact: bool) -> Result<String, CliError> {
    let text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(text)
}

fn write_output(body: &str, output: Option<&Path>) -> Result<(), CliError> {
    match output {
        Some(path) => std::fs::write(path, format!("{body}\n"))?,
        None => println!("{body}"),
    }
    Ok(())
}
