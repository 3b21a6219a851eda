// nodeforge-net/src/http.rs
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use nodeforge_common::error::{ForgeError, Result};
use reqwest::header::{HeaderMap, ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode};
use tokio::fs::File as TokioFile;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::validation::validate_url;

const DOWNLOAD_TIMEOUT_SECS: u64 = 300;
const CONNECT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT_STRING: &str = "nodeforge (Rust; +https://github.com/nodeforge/nodeforge)";

/// Ensures the source tarball exists at `dest`, downloading it from `url`
/// when absent. A tarball already on disk is trusted as-is: the dist layout
/// carries no per-file checksum this tool consumes, so cached files are
/// never re-verified.
pub async fn fetch_source_tarball(url: &str, dest: &Path) -> Result<PathBuf> {
    debug!("Preparing distfile {} to {}", url, dest.display());

    if dest.is_file() {
        info!("{} exists.", dest.display());
        return Ok(dest.to_path_buf());
    }

    validate_url(url)?;
    debug!("Downloading {} to {}", url, dest.display());

    let client = build_http_client()?;
    download_to_path(&client, url, dest).await
}

fn build_http_client() -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, USER_AGENT_STRING.parse().unwrap());
    headers.insert(ACCEPT, "*/*".parse().unwrap());
    Ok(Client::builder()
        .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()?)
}

async fn download_to_path(client: &Client, url: &str, final_path: &Path) -> Result<PathBuf> {
    let file_name = final_path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let download_err =
        |reason: String| ForgeError::Download(file_name.clone(), url.to_string(), reason);

    let temp_path = final_path.with_file_name(format!(".{file_name}.download"));
    debug!("Downloading to temporary path: {}", temp_path.display());
    if temp_path.exists() {
        if let Err(e) = fs::remove_file(&temp_path) {
            warn!(
                "Could not remove existing temporary file {}: {}",
                temp_path.display(),
                e
            );
        }
    }

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| download_err(format!("HTTP request failed: {e}")))?;
    let status = response.status();
    debug!("Received HTTP status: {} for {}", status, url);

    if !status.is_success() {
        return Err(match status {
            StatusCode::NOT_FOUND => download_err("Resource not found (404)".to_string()),
            StatusCode::FORBIDDEN => download_err("Access forbidden (403)".to_string()),
            _ => download_err(format!("HTTP error {status}")),
        });
    }

    let mut temp_file = TokioFile::create(&temp_path)
        .await
        .map_err(|e| download_err(format!("Failed to create {}: {}", temp_path.display(), e)))?;
    let content = response
        .bytes()
        .await
        .map_err(|e| download_err(format!("Failed to read response body: {e}")))?;
    temp_file
        .write_all(&content)
        .await
        .map_err(|e| download_err(format!("Failed to write {}: {}", temp_path.display(), e)))?;
    drop(temp_file);

    fs::rename(&temp_path, final_path).map_err(|e| {
        download_err(format!(
            "Failed to move {} to {}: {}",
            temp_path.display(),
            final_path.display(),
            e
        ))
    })?;
    debug!("Moved downloaded file to {}", final_path.display());
    Ok(final_path.to_path_buf())
}
