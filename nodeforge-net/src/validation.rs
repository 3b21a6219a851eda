// nodeforge-net/src/validation.rs
use nodeforge_common::error::{ForgeError, Result};
use url::Url;

/// Validates a URL, ensuring it uses a fetchable scheme. Plain http stays
/// allowed: the upstream dist server never moved its v0.x archives to https.
pub fn validate_url(url_str: &str) -> Result<()> {
    let url = Url::parse(url_str)
        .map_err(|e| ForgeError::Validation(format!("Failed to parse URL '{url_str}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ForgeError::Validation(format!(
            "Invalid URL scheme for '{url_str}': Must be http or https, but got '{scheme}'"
        ))),
    }
}
