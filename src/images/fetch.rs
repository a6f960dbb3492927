//! HTTP fetch with manual redirect handling.
//!
//! The client is built with its own redirect policy disabled; 301/302/307
//! responses are followed here so relative `Location` targets resolve against
//! the current hop. There is no hop cap: each hop is bounded by the request
//! timeout, cumulative delay across a redirect loop is not.

use reqwest::header;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::AcquireErrorKind;

pub(crate) const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug)]
pub(crate) struct FetchedImage {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

pub(crate) async fn fetch_image(
    client: &reqwest::Client,
    url: &str,
) -> Result<FetchedImage, AcquireErrorKind> {
    let mut current = url.to_string();
    loop {
        debug!("⬇ GET {}", current);
        let response = client.get(&current).send().await?;
        let status = response.status();

        if matches!(status.as_u16(), 301 | 302 | 307) {
            let location = response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
                .ok_or_else(|| {
                    AcquireErrorKind::Malformed(format!("redirect without location from {current}"))
                })?;
            let base = Url::parse(&current).map_err(|e| {
                AcquireErrorKind::Malformed(format!("unparseable redirect base {current}: {e}"))
            })?;
            let next = base.join(&location).map_err(|e| {
                AcquireErrorKind::Malformed(format!("unparseable redirect target {location}: {e}"))
            })?;
            debug!("↪ {} redirected to {}", current, next);
            current = next.to_string();
            continue;
        }

        if status.as_u16() != 200 {
            return Err(AcquireErrorKind::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?.to_vec();
        return Ok(FetchedImage { bytes, content_type });
    }
}
