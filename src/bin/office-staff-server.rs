// ABOUTME: Office staff API server binary
// ABOUTME: Loads configuration, opens the database and serves HTTP until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Office Staff Server Binary

use anyhow::Result;
use clap::Parser;
use office_staff_server::{
    config::ServerConfig, database::Database, logging, resources::ServerResources,
    server::OfficeStaffServer,
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "office-staff-server")]
#[command(about = "Office staff profile API with real-time change notifications")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override the database URL (e.g. `sqlite:office_staff.db`)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database.url = office_staff_server::config::DatabaseUrl::parse_url(&database_url)?;
    }

    info!("Starting Office Staff Server");
    info!("{}", config.summary());

    let database = Database::new(&config.database).await?;
    let resources = Arc::new(ServerResources::new(database, Arc::new(config)));

    OfficeStaffServer::new(resources).run().await?;

    info!("Office Staff Server stopped");
    Ok(())
}
