//! HTTP client for downloading classifier artifacts from a dataset repository.
//!
//! Files are resolved as `{base}/datasets/{repo}/resolve/main/{file}`, the
//! layout used by Hugging Face Hub dataset repos.

use std::path::{Path, PathBuf};

use supportbrain_ai::ARTIFACT_FILES;
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://huggingface.co";
pub const DEFAULT_REPO: &str = "supportbrain/support-triage-models";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status} for {url}: {body}")]
    Server {
        url: String,
        status: u16,
        body: String,
    },
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Which artifacts a [`fetch_all`](ArtifactClient::fetch_all) call downloaded.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub downloaded: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

pub struct ArtifactClient {
    client: reqwest::Client,
    base_url: String,
    repo: String,
}

impl ArtifactClient {
    /// `base_url` should be like `https://huggingface.co`; a trailing slash is
    /// dropped.
    pub fn new(base_url: &str, repo: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, repo)
    }

    /// Use a preconfigured HTTP client (proxy, timeouts, user agent).
    pub fn with_client(client: reqwest::Client, base_url: &str, repo: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            repo: repo.trim_matches('/').to_string(),
        }
    }

    pub fn artifact_url(&self, file: &str) -> String {
        format!(
            "{}/datasets/{}/resolve/main/{}",
            self.base_url, self.repo, file
        )
    }

    /// Download one artifact into `dest_dir`.
    ///
    /// An existing file is left alone unless `force` is set. Returns whether
    /// a download happened.
    pub async fn fetch(&self, file: &str, dest_dir: &Path, force: bool) -> Result<bool, FetchError> {
        let dest = dest_dir.join(file);
        if !force && tokio::fs::try_exists(&dest).await.unwrap_or(false) {
            debug!(path = %dest.display(), "artifact present, skipping");
            return Ok(false);
        }

        let url = self.artifact_url(file);
        info!(url = %url, "fetching artifact");
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Server {
                url,
                status: status.as_u16(),
                body,
            });
        }
        let bytes = resp.bytes().await?;

        let io_err = |source| FetchError::Io {
            path: dest.clone(),
            source,
        };
        tokio::fs::create_dir_all(dest_dir).await.map_err(io_err)?;
        // Write beside the target, then rename into place.
        let partial = dest.with_extension("part");
        tokio::fs::write(&partial, &bytes).await.map_err(io_err)?;
        tokio::fs::rename(&partial, &dest).await.map_err(io_err)?;

        info!(path = %dest.display(), bytes = bytes.len(), "artifact saved");
        Ok(true)
    }

    /// Download all three stage artifacts, in cascade order.
    pub async fn fetch_all(&self, dest_dir: &Path, force: bool) -> Result<FetchReport, FetchError> {
        let mut report = FetchReport::default();
        for file in ARTIFACT_FILES {
            let path = dest_dir.join(file);
            if self.fetch(file, dest_dir, force).await? {
                report.downloaded.push(path);
            } else {
                report.skipped.push(path);
            }
        }
        info!(
            downloaded = report.downloaded.len(),
            skipped = report.skipped.len(),
            "artifact fetch complete"
        );
        Ok(report)
    }
}
