//! Writes a tileset archive to the staging bucket.
//!
//! This is the storage side of the upload handshake: the registry hands out
//! short-lived credentials scoped to one object ([`AwsCredentials`]), this
//! module streams the archive there, and the caller then registers the upload
//! job. The credentials live only for the duration of the call.

use std::path::Path;

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::debug;

use crate::error::StorageError;
use crate::registry::AwsCredentials;

/// Region of the registry's staging bucket.
const STAGING_REGION: &str = "us-east-1";

/// Build a one-shot S3 client from handshake credentials.
fn staging_client(creds: &AwsCredentials) -> Client {
    let provider = Credentials::new(
        creds.access_key_id.clone(),
        creds.secret_access_key.clone(),
        Some(creds.session_token.clone()),
        None,
        "mapsync-staging",
    );
    let config = aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new(STAGING_REGION))
        .credentials_provider(provider)
        .build();
    Client::from_conf(config)
}

/// Stream a local archive to the staging object the credentials are scoped to.
///
/// No retry: on failure the caller re-runs the whole handshake, which issues
/// fresh credentials.
pub async fn upload_archive(creds: &AwsCredentials, path: &Path) -> Result<(), StorageError> {
    let body = ByteStream::from_path(path)
        .await
        .map_err(|e| StorageError::Io(std::io::Error::other(e)))?;

    debug!(bucket = %creds.bucket, key = %creds.key, "writing archive to staging bucket");

    let client = staging_client(creds);
    client
        .put_object()
        .bucket(&creds.bucket)
        .key(&creds.key)
        .body(body)
        .send()
        .await
        .map_err(|e| StorageError::S3(e.to_string()))?;

    Ok(())
}
