//! CLI definitions for mapsync.
//!
//! Registry credentials come from flags or the `MAPBOX_ACCESS_TOKEN` /
//! `MAPBOX_USERNAME` environment variables. Every run is stateless: nothing
//! about the remote registry is persisted between invocations.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::registry::DEFAULT_BASE_URL;

/// mapsync - synchronize styles and tile datasets in a mapping-service account.
#[derive(Parser, Debug)]
#[command(name = "mapsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Delete every style whose name matches exactly.
    DeleteStyles(DeleteStylesConfig),

    /// Upload a tileset archive via the staging-credential handshake.
    Upload(UploadConfig),

    /// Check whether a tileset id exists in the account.
    CheckTileset(CheckTilesetConfig),

    /// Rewrite district feature records from stdin to stdout.
    ProcessDistricts(ProcessDistrictsConfig),
}

/// Connection settings shared by all registry commands.
#[derive(Args, Debug, Clone)]
pub struct RegistryConfig {
    /// API access token.
    #[arg(long, env = "MAPBOX_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: String,

    /// Account username substituted into endpoint paths.
    #[arg(long, env = "MAPBOX_USERNAME")]
    pub username: String,

    /// API base URL (override for testing against a local registry).
    #[arg(long, env = "MAPSYNC_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,
}

#[derive(Args, Debug)]
pub struct DeleteStylesConfig {
    #[command(flatten)]
    pub registry: RegistryConfig,

    /// Exact (case-sensitive) style name to delete.
    pub name: String,
}

#[derive(Args, Debug)]
pub struct UploadConfig {
    #[command(flatten)]
    pub registry: RegistryConfig,

    /// Tileset id to create or replace (e.g. "username.districts-118").
    pub tileset_id: String,

    /// Human-readable tileset name.
    pub tileset_name: String,

    /// Path to the tileset archive to upload.
    pub archive: PathBuf,
}

#[derive(Args, Debug)]
pub struct CheckTilesetConfig {
    #[command(flatten)]
    pub registry: RegistryConfig,

    /// Tileset id to look up.
    pub id: String,
}

#[derive(Args, Debug)]
pub struct ProcessDistrictsConfig {
    /// Congress number the districts belong to.
    pub congress: i32,
}

// =============================================================================
// Tests
// =============================================================================
