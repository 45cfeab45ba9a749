//! Sealbox - PKI configuration console tooling
//!
//! This is the entry point for the Sealbox console CLI. It validates action
//! configuration files, dumps the form field schema, inspects certificates,
//! and resolves action capabilities against a set of granted paths.

use clap::{Parser, Subcommand};
use sealbox_config::mount::MountConfig;
use sealbox_error::SealboxError;
use sealbox_pki::{CapabilityResolver, StaticOracle};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(name = "validate")]
    #[command(about = "Validate an action configuration file")]
    Validate {
        #[arg(long, short = 'f')]
        #[arg(help = "Path to the action file example: ./action.yaml")]
        file: String,
    },

    #[command(name = "schema")]
    #[command(about = "Print the configuration field schema as JSON")]
    Schema {
        #[arg(long, help = "Print a single field instead of the whole table")]
        field: Option<String>,
    },

    #[command(name = "inspect")]
    #[command(about = "Parse a PEM certificate and print its summary")]
    Inspect {
        #[arg(long, short = 'c')]
        #[arg(help = "Path to the certificate PEM file")]
        cert: String,
    },

    #[command(name = "capabilities")]
    #[command(about = "Resolve action capabilities against a set of granted paths")]
    Capabilities {
        #[arg(long, short = 'f')]
        #[arg(help = "Path to the action file")]
        file: String,

        #[arg(long, short = 'c')]
        #[arg(help = "Path to the mount config file; defaults apply when omitted")]
        config: Option<String>,

        #[arg(long = "grant")]
        #[arg(help = "Path the current actor may create at; repeatable")]
        grants: Vec<String>,
    },
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = handle_commands(cli.command) {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

fn handle_commands(command: Commands) -> Result<(), SealboxError> {
    match command {
        Commands::Validate { file } => handle_validate(&file),
        Commands::Schema { field } => handle_schema(field.as_deref()),
        Commands::Inspect { cert } => handle_inspect(&cert),
        Commands::Capabilities {
            file,
            config,
            grants,
        } => handle_capabilities(&file, config.as_deref(), grants),
    }
}

fn handle_validate(file: &str) -> Result<(), SealboxError> {
    info!("Validating action file: {}", file);

    let config = sealbox_config::action::from_file(file)?;
    let failures = sealbox_pki::validate(&config);

    if failures.is_empty() {
        info!(
            "{} configuration is valid",
            config.action_type.as_str()
        );
        return Ok(());
    }

    for failure in &failures {
        error!("{}: {}", failure.field, failure.message);
    }
    Err(SealboxError::ConfigError(format!(
        "{} validation failure(s)",
        failures.len()
    )))
}

fn handle_schema(field: Option<&str>) -> Result<(), SealboxError> {
    let rendered = match field {
        Some(name) => {
            let entry = sealbox_types::schema::field(name)
                .ok_or_else(|| SealboxError::ConfigError(format!("Unknown field: {}", name)))?;
            serde_json::to_string_pretty(entry)
        }
        None => serde_json::to_string_pretty(sealbox_types::schema::SCHEMA),
    }
    .map_err(|e| SealboxError::InternalError(e.to_string()))?;

    println!("{}", rendered);
    Ok(())
}

fn handle_inspect(cert_path: &str) -> Result<(), SealboxError> {
    let pem = std::fs::read_to_string(cert_path).map_err(|e| {
        SealboxError::CertificateError(format!("Unable to read {:?}: {}", cert_path, e))
    })?;
    let parsed = sealbox_pki::parse_certificate(&pem)?;

    println!(
        "{}",
        serde_json::to_string_pretty(&parsed)
            .map_err(|e| SealboxError::InternalError(e.to_string()))?
    );

    if parsed.is_expired() {
        error!("Certificate is expired");
    } else {
        info!("Certificate expires in {} days", parsed.days_until_expiry());
    }
    Ok(())
}

fn handle_capabilities(
    file: &str,
    config_path: Option<&str>,
    grants: Vec<String>,
) -> Result<(), SealboxError> {
    let mount = match config_path {
        Some(path) => MountConfig::from_file(path)?,
        None => MountConfig::default(),
    };
    mount.store()?;

    let action = sealbox_config::action::from_file(file)?;
    info!(
        "Resolving capabilities for {} on mount {}",
        action.action_type.as_str(),
        mount.mount_path
    );

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| SealboxError::InternalError(format!("Failed to create Tokio runtime: {}", e)))?;

    let capabilities = rt.block_on(async {
        let oracle = Arc::new(StaticOracle::granting(grants));
        let resolver = CapabilityResolver::new(oracle, mount.mount_path.clone());
        resolver.resolve_all(&action).await
    });

    sealbox_store::capabilities::store_snapshot(&mount.mount_path, capabilities);

    println!(
        "{}",
        serde_json::to_string_pretty(&capabilities)
            .map_err(|e| SealboxError::InternalError(e.to_string()))?
    );
    Ok(())
}
