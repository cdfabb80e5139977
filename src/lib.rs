//! # mapsync
//!
//! Synchronizes resources in a remote mapping-service account as part of a
//! geographic-data publishing pipeline: named rendering styles and tile
//! datasets.
//!
//! The hard part is the style-deletion protocol. The registry offers no
//! locks, is modified concurrently by other actors, and intermittently
//! reports "not found" for resources it just created or deleted. Deletion
//! therefore runs as a three-phase optimistic-concurrency protocol (discover,
//! verify-and-capture-token, conditionally delete) described in
//! [`registry::delete`].
//!
//! ## Modules
//!
//! - [`registry`] - clients for the remote registry API: the shared request
//!   gateway, styles, the conditional delete, the upload handshake, and
//!   tileset lookup
//! - [`storage`] - writes tileset archives to the staging bucket using
//!   handshake credentials
//! - [`transform`] - per-record rewrite of district feature properties
//! - [`config`] - CLI types
//! - [`error`] - error taxonomy
//!
//! Every operation is stateless against the registry: no resource state is
//! cached or persisted between invocations, and transient failures are never
//! retried.

pub mod config;
pub mod error;
pub mod registry;
pub mod storage;
pub mod transform;

// Re-export commonly used types
pub use config::{Cli, Command};
pub use error::{RegistryError, StorageError, TransformError};
pub use registry::{
    AwsCredentials, Etag, Gateway, Style, StyleClient, TilesetClient, UploadClient, UploadJob,
    DEFAULT_BASE_URL,
};
