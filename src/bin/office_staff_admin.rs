// ABOUTME: Administrative CLI for provisioning office staff accounts out of band
// ABOUTME: Creates the account and its staff profile with a bcrypt-hashed password
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Office Staff Admin CLI
//!
//! ```bash
//! office-staff-admin create-staff --username alice --email alice@example.com \
//!     --password 'changeme' --department Finance --full-name 'Alice Doe'
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use office_staff_server::{
    config::{DatabaseConfig, DatabaseUrl},
    constants::limits,
    database::Database,
    logging,
    models::NewOfficeStaff,
    security::password::hash_password,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "office-staff-admin")]
#[command(about = "Office staff account administration")]
struct Cli {
    /// Database URL (defaults to `DATABASE_URL` or `sqlite:office_staff.db`)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Bcrypt cost for the password hash
    #[arg(long, env = "BCRYPT_COST", default_value_t = bcrypt::DEFAULT_COST)]
    bcrypt_cost: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an office staff account with its profile
    CreateStaff {
        /// Unique login name
        #[arg(long)]
        username: String,
        /// Unique email address
        #[arg(long)]
        email: String,
        /// Initial password
        #[arg(long)]
        password: String,
        /// Department
        #[arg(long)]
        department: String,
        /// Full name
        #[arg(long)]
        full_name: Option<String>,
        /// Age in years
        #[arg(long)]
        age: Option<i64>,
        /// Sex
        #[arg(long)]
        sex: Option<String>,
        /// Contact number
        #[arg(long)]
        contact_no: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_from_env()?;

    let url = cli
        .database_url
        .as_deref()
        .map(DatabaseUrl::parse_url)
        .transpose()?
        .unwrap_or_default();
    let database = Database::new(&DatabaseConfig {
        url,
        max_connections: 1,
        acquire_timeout_secs: limits::DEFAULT_ACQUIRE_TIMEOUT_SECS,
    })
    .await?;

    match cli.command {
        Command::CreateStaff {
            username,
            email,
            password,
            department,
            full_name,
            age,
            sex,
            contact_no,
        } => {
            let password_hash = hash_password(&password, cli.bcrypt_cost).await?;
            let account = database
                .create_office_staff(&NewOfficeStaff {
                    username,
                    email,
                    password_hash,
                    department: Some(department),
                    full_name,
                    age,
                    sex,
                    contact_no,
                })
                .await
                .context("Failed to create office staff account")?;

            info!(account_id = account.id, staff_id = account.staff_id, "Created office staff account");
            println!(
                "Created office staff account {} (staff profile {}) for {}",
                account.id, account.staff_id, account.username
            );
        }
    }

    database.close().await;
    Ok(())
}
