//! `possync serve`: the HTTP sync endpoint.

use tracing::info;

use crate::cli::{GlobalOpts, ServeArgs};
use crate::config;
use crate::error::CliError;
use crate::server;

pub async fn handle(args: ServeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let aggregator = config::aggregator(&cfg)?;

    let origins = args.cors_origin.unwrap_or(cfg.server.cors_allow_origin);
    let bind = args.bind.unwrap_or(cfg.server.bind);
    let cors = server::cors_layer(&origins)?;

    info!(
        base_url = %aggregator.config().base_url,
        cors = %origins,
        "starting sync endpoint"
    );
    server::serve(server::router(aggregator, cors), &bind).await
}
