// src/source/github.rs

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::{Result, WaitgateError};
use crate::source::{RunSource, SourceFuture};
use crate::types::{Artifact, JobRecord, RunContext};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Per-request ceiling; a stalled request becomes an ordinary tick error.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const PER_PAGE: &str = "100";
/// Upper bound on pages fetched per listing.
const MAX_PAGES: u32 = 50;

#[derive(Debug, Deserialize)]
struct ArtifactPage {
    #[serde(default)]
    total_count: u64,
    #[serde(default)]
    artifacts: Vec<Artifact>,
}

#[derive(Debug, Deserialize)]
struct JobPage {
    #[serde(default)]
    total_count: u64,
    #[serde(default)]
    jobs: Vec<JobRecord>,
}

/// [`RunSource`] backed by the GitHub Actions REST API.
#[derive(Debug, Clone)]
pub struct GitHubRunSource {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubRunSource {
    pub fn new(api_url: &str, token: Option<String>, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(request_timeout).build()?;
        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    fn run_url(&self, run: &RunContext, resource: &str) -> String {
        format!(
            "{}/repos/{}/{}/actions/runs/{}/{}",
            self.api_url, run.owner, run.repo, run.run_id, resource
        )
    }

    fn request(&self, url: &str) -> RequestBuilder {
        let mut req = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .header("User-Agent", concat!("waitgate/", env!("CARGO_PKG_VERSION")));

        if let Some(token) = &self.token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        req
    }

    /// GET every page of a listing endpoint.
    ///
    /// Stops once `total_count` items are collected, a page comes back
    /// empty, or `MAX_PAGES` is reached.
    async fn get_all<P, T>(
        &self,
        url: &str,
        extra_query: &[(&str, &str)],
        split: impl Fn(P) -> (u64, Vec<T>),
    ) -> Result<Vec<T>>
    where
        P: DeserializeOwned,
    {
        let mut items = Vec::new();
        let mut page = 1u32;

        loop {
            let page_param = page.to_string();
            let res = self
                .request(url)
                .query(extra_query)
                .query(&[("per_page", PER_PAGE), ("page", page_param.as_str())])
                .send()
                .await?;

            let status = res.status();
            if !status.is_success() {
                let body = res.text().await.unwrap_or_default();
                return Err(WaitgateError::Http(format!(
                    "GET {url} returned {status}: {}",
                    body.trim()
                )));
            }

            let (total, batch) = split(res.json::<P>().await?);
            let fetched = batch.len();
            items.extend(batch);
            debug!(url, page, fetched, total, "fetched listing page");

            if fetched == 0 || items.len() as u64 >= total || page >= MAX_PAGES {
                break;
            }
            page += 1;
        }

        Ok(items)
    }
}

impl RunSource for GitHubRunSource {
    fn list_artifacts<'a>(&'a self, run: &'a RunContext) -> SourceFuture<'a, Vec<Artifact>> {
        Box::pin(async move {
            let url = self.run_url(run, "artifacts");
            self.get_all(&url, &[], |p: ArtifactPage| (p.total_count, p.artifacts))
                .await
        })
    }

    fn list_jobs<'a>(&'a self, run: &'a RunContext) -> SourceFuture<'a, Vec<JobRecord>> {
        Box::pin(async move {
            let url = self.run_url(run, "jobs");
            self.get_all(&url, &[("filter", "latest")], |p: JobPage| {
                (p.total_count, p.jobs)
            })
            .await
        })
    }
}
