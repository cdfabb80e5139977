//! mapsync - synchronize styles and tile datasets in a mapping-service account.

use std::io::{BufReader, BufWriter};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mapsync::config::{
    CheckTilesetConfig, Cli, Command, DeleteStylesConfig, ProcessDistrictsConfig, RegistryConfig,
    UploadConfig,
};
use mapsync::registry::{Gateway, StyleClient, TilesetClient, UploadClient};
use mapsync::{storage, transform, RegistryError};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::DeleteStyles(config) => run_delete_styles(config).await,
        Command::Upload(config) => run_upload(config).await,
        Command::CheckTileset(config) => run_check_tileset(config).await,
        Command::ProcessDistricts(config) => run_process_districts(config),
    }
}

/// Initialize the tracing/logging subsystem.
///
/// Logs go to stderr: `process-districts` writes its records to stdout.
fn init_logging(verbose: bool) {
    let env_filter = if verbose { "mapsync=debug" } else { "mapsync=info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn gateway_from(config: &RegistryConfig) -> Result<Gateway, RegistryError> {
    Gateway::with_base_url(&config.access_token, &config.username, &config.api_url)
}

// =============================================================================
// delete-styles
// =============================================================================

async fn run_delete_styles(config: DeleteStylesConfig) -> ExitCode {
    let gateway = match gateway_from(&config.registry) {
        Ok(gateway) => gateway,
        Err(e) => {
            error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let styles = StyleClient::new(gateway);
    match styles.delete_styles_with_name(&config.name).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

// =============================================================================
// upload
// =============================================================================

async fn run_upload(config: UploadConfig) -> ExitCode {
    let gateway = match gateway_from(&config.registry) {
        Ok(gateway) => gateway,
        Err(e) => {
            error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let uploads = UploadClient::new(gateway);
    match run_upload_handshake(&uploads, &config).await {
        Ok(()) => {
            info!("Registered upload for tileset {}", config.tileset_id);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Credentials, archive write, then job registration, strictly in order.
/// The credentials are dropped as soon as registration is issued.
async fn run_upload_handshake(
    uploads: &UploadClient,
    config: &UploadConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Requesting staging credentials");
    let creds = uploads.request_credentials().await?;

    info!("Uploading {} to staging bucket", config.archive.display());
    storage::upload_archive(&creds, &config.archive).await?;

    info!("Registering upload job");
    uploads
        .register_upload(&config.tileset_id, &config.tileset_name, &creds.url)
        .await?;
    Ok(())
}

// =============================================================================
// check-tileset
// =============================================================================

async fn run_check_tileset(config: CheckTilesetConfig) -> ExitCode {
    let gateway = match gateway_from(&config.registry) {
        Ok(gateway) => gateway,
        Err(e) => {
            error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let tilesets = TilesetClient::new(gateway);
    match tilesets.tileset_exists(&config.id).await {
        Ok(exists) => {
            // Absence is a valid result, not a failure.
            println!("{}", exists);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

// =============================================================================
// process-districts
// =============================================================================

fn run_process_districts(config: ProcessDistrictsConfig) -> ExitCode {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    match transform::run(BufReader::new(stdin.lock()), &mut writer, config.congress) {
        Ok(written) => {
            info!("Wrote {} district records", written);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
