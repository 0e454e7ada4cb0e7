use crate::{Error, Result, client::USER_AGENT, datasets::MO_HOMEPAGE};
use futures::future;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Image renditions served by the image host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ImageSize {
    Px320,
    Px640,
    Px960,
    Px1280,
}

impl ImageSize {
    /// Width of this rendition in pixels
    #[must_use]
    pub const fn pixels(self) -> u16 {
        match self {
            Self::Px320 => 320,
            Self::Px640 => 640,
            Self::Px960 => 960,
            Self::Px1280 => 1280,
        }
    }

    /// Look up a rendition by pixel width, rejecting anything the host does
    /// not serve before a request is ever made.
    pub fn from_pixels(pixels: u16) -> Result<Self> {
        match pixels {
            320 => Ok(Self::Px320),
            640 => Ok(Self::Px640),
            960 => Ok(Self::Px960),
            1280 => Ok(Self::Px1280),
            other => Err(Error::UnsupportedSize(other)),
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pixels())
    }
}

/// Why one image fetch failed
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server returned status {0}")]
    Status(u16),

    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of one image fetch within a batch
#[derive(Debug)]
pub struct FetchOutcome {
    /// Image id the fetch was for
    pub id: u64,
    /// Path the image was written to, or why it was not
    pub result: std::result::Result<PathBuf, FetchError>,
}

impl FetchOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Batch fetcher configuration
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Host serving the image renditions
    pub base_url: String,
    /// User agent sent with every request
    pub user_agent: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: MO_HOMEPAGE.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Concurrent downloader for observation images
#[derive(Debug, Clone, Default)]
pub struct ImageFetcher {
    config: FetchConfig,
}

impl ImageFetcher {
    /// Create a fetcher pointing at the Mushroom Observer image host
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fetcher with custom configuration
    #[must_use]
    pub const fn with_config(config: FetchConfig) -> Self {
        Self { config }
    }

    /// Fetch one rendition of each image concurrently and save each under
    /// `destination` as `<id>.jpg`.
    ///
    /// The destination directory (including missing ancestors) is created
    /// before any request. All fetches share one pooled client, which is
    /// released when the batch returns. One outcome is returned per input
    /// id, in input order, regardless of completion order; a failed fetch
    /// never aborts its siblings and writes no file. Only directory
    /// creation or client construction can fail the batch as a whole.
    ///
    /// Duplicate ids race to the same path; the last write wins.
    pub async fn fetch_and_save(
        &self,
        ids: &[u64],
        size: ImageSize,
        destination: impl AsRef<Path>,
    ) -> Result<Vec<FetchOutcome>> {
        let destination = destination.as_ref();
        fs::create_dir_all(destination).await?;

        let client = Client::builder()
            .user_agent(self.config.user_agent.as_str())
            .timeout(self.config.timeout)
            .build()?;

        debug!("Fetching {} images at {size}px", ids.len());

        let fetches = ids.iter().map(|&id| {
            let client = client.clone();
            let url = format!("{}/images/{size}/{id}.jpg", self.config.base_url);
            let path = destination.join(format!("{id}.jpg"));

            async move {
                let result = fetch_one(&client, &url, path).await;
                if let Err(ref error) = result {
                    warn!("Image {id} failed: {error}");
                }
                FetchOutcome { id, result }
            }
        });

        Ok(future::join_all(fetches).await)
    }
}

/// Download one image body and write it out whole.
async fn fetch_one(
    client: &Client,
    url: &str,
    path: PathBuf,
) -> std::result::Result<PathBuf, FetchError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(FetchError::Status(status.as_u16()));
    }

    // Buffer the full body before touching the file so a reader never sees
    // a partial image.
    let bytes = response.bytes().await?;

    // Flush before returning: tokio file writes land in an internal buffer
    // and the real write can fail after write_all has already returned Ok.
    let mut file = fs::File::create(&path).await?;
    file.write_all(&bytes).await?;
    file.flush().await?;

    Ok(path)
}

/// Fetch images with a default [`ImageFetcher`]
pub async fn fetch_and_save(
    ids: &[u64],
    size: ImageSize,
    destination: impl AsRef<Path>,
) -> Result<Vec<FetchOutcome>> {
    ImageFetcher::new().fetch_and_save(ids, size, destination).await
}
