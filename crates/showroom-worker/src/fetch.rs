use std::path::Path;

use reqwest::Client;
use tracing::debug;

use crate::error::WorkerError;

/// Retrieve the raw bytes of an asset. HTTP(S) URLs go through the shared
/// client; anything else is treated as a filesystem path (with an optional
/// `file://` prefix). This is the pipeline's only external-I/O await point.
pub async fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>, WorkerError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        debug!("Fetching '{url}'");
        let response = client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WorkerError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    } else {
        let path = Path::new(url.strip_prefix("file://").unwrap_or(url));
        debug!("Reading '{}'", path.display());
        tokio::fs::read(path).await.map_err(|source| WorkerError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
