//! Clients for the remote map registry API.
//!
//! All clients share the [`Gateway`], which owns URL construction,
//! authentication, and response classification. Each client is stateless
//! between calls: nothing fetched from the registry outlives the operation
//! that fetched it.

pub mod delete;
pub mod gateway;
pub mod styles;
pub mod tilesets;
pub mod uploads;

pub use gateway::{Gateway, DEFAULT_BASE_URL};
pub use styles::{Etag, Style, StyleClient};
pub use tilesets::TilesetClient;
pub use uploads::{AwsCredentials, UploadClient, UploadJob};
