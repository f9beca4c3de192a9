// src/wiki/fetch.rs
// =============================================================================
// This module fetches the raw markdown source of a single wiki page.
//
// Strategy:
// - GitHub: ask raw.githubusercontent.com for wiki/{owner}/{repo}/{page}.md
//   If that does not answer with 2xx, try the wiki's git repository once:
//   github.com/{owner}/{repo}.wiki.git/raw/master/{page}.md
// - GitLab: gitlab.com/{owner}/{repo}/-/wikis/{page}.md, no fallback
// - Anything else: rejected before any network call is made
//
// When both GitHub attempts fail, the error reports the status of the FIRST
// request. The fallback's own status is only logged.
//
// Rust concepts:
// - FromStr: turning the "type" string into a Provider enum
// - async functions: For network I/O
// - Result + ?: For error propagation
// =============================================================================

use super::error::{Result, WikiError};
use reqwest::header::ACCEPT;
use reqwest::{Client, Response};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;
use url::Url;

// Every request identifies itself with this user-agent
pub const USER_AGENT: &str = concat!("wikibash/", env!("CARGO_PKG_VERSION"));

const GITHUB_RAW_BASE: &str = "https://raw.githubusercontent.com/";
const GITHUB_BASE: &str = "https://github.com/";
const GITLAB_BASE: &str = "https://gitlab.com/";

// The wiki hosting services we know how to read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Github,
    Gitlab,
}

impl FromStr for Provider {
    type Err = WikiError;

    // Matching is exact: "GitHub" is not "github"
    fn from_str(value: &str) -> Result<Self> {
        match value {
            "github" => Ok(Provider::Github),
            "gitlab" => Ok(Provider::Gitlab),
            other => Err(WikiError::UnsupportedProvider(other.to_string())),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Github => f.write_str("github"),
            Provider::Gitlab => f.write_str("gitlab"),
        }
    }
}

/// Base URLs of the upstream services.
///
/// The public hosts are the default; [`WikiHosts::from_base`] points all
/// three at one mirror or test server.
#[derive(Debug, Clone)]
pub struct WikiHosts {
    pub github_raw: Url,
    pub github: Url,
    pub gitlab: Url,
}

impl WikiHosts {
    pub fn public() -> Result<Self> {
        Ok(Self {
            github_raw: Url::parse(GITHUB_RAW_BASE)?,
            github: Url::parse(GITHUB_BASE)?,
            gitlab: Url::parse(GITLAB_BASE)?,
        })
    }

    /// Serves every provider from the same base URL.
    /// The three URL layouts never collide, so one server can answer all of them.
    pub fn from_base(base: &str) -> Result<Self> {
        let base = Url::parse(base)?;
        Ok(Self {
            github_raw: base.clone(),
            github: base.clone(),
            gitlab: base,
        })
    }
}

// Downloads wiki pages
//
// Cloning is cheap: reqwest::Client is reference counted internally, so
// clones share one connection pool.
#[derive(Debug, Clone)]
pub struct WikiFetcher {
    client: Client,
    hosts: WikiHosts,
}

impl WikiFetcher {
    // Creates a fetcher
    //
    // Parameters:
    //   hosts: where to send requests
    //   timeout: optional per-request timeout. None means requests may wait
    //            forever, which is how the service behaves unless configured.
    pub fn new(hosts: WikiHosts, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            hosts,
        })
    }

    // Fetches the markdown source of one wiki page
    //
    // Parameters:
    //   provider: "github" or "gitlab" (anything else fails without I/O)
    //   owner, repo: the project the wiki belongs to
    //   page: wiki page name without the .md extension (e.g. "Home")
    //
    // Returns: the page body as text
    pub async fn fetch(&self, provider: &str, owner: &str, repo: &str, page: &str) -> Result<String> {
        let provider = provider.parse::<Provider>()?;
        debug!("Reading {} wiki page {}/{}/{}", provider, owner, repo, page);

        match provider {
            Provider::Github => self.fetch_github(owner, repo, page).await,
            Provider::Gitlab => self.fetch_gitlab(owner, repo, page).await,
        }
    }

    async fn fetch_github(&self, owner: &str, repo: &str, page: &str) -> Result<String> {
        let url = endpoint(&self.hosts.github_raw, &format!("wiki/{owner}/{repo}/{page}.md"))?;
        debug!("Fetching {}", url);

        let response = self.get_plain_text(url).await?;
        if response.status().is_success() {
            return Ok(response.text().await?);
        }

        let status = response.status();
        let fallback = endpoint(
            &self.hosts.github,
            &format!("{owner}/{repo}.wiki.git/raw/master/{page}.md"),
        )?;
        debug!("Primary returned {}, trying fallback {}", status, fallback);

        // Only the user-agent goes along here, no Accept header
        match self.client.get(fallback).send().await {
            Ok(response) if response.status().is_success() => Ok(response.text().await?),
            Ok(response) => {
                debug!("Fallback returned {}", response.status());
                Err(WikiError::Status { status })
            }
            Err(e) => {
                debug!("Fallback request failed: {}", e);
                Err(WikiError::Status { status })
            }
        }
    }

    async fn fetch_gitlab(&self, owner: &str, repo: &str, page: &str) -> Result<String> {
        let url = endpoint(&self.hosts.gitlab, &format!("{owner}/{repo}/-/wikis/{page}.md"))?;
        debug!("Fetching {}", url);

        let response = self.get_plain_text(url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WikiError::Status { status });
        }

        Ok(response.text().await?)
    }

    async fn get_plain_text(&self, url: Url) -> Result<Response> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "text/plain")
            .send()
            .await?;
        Ok(response)
    }
}

// Appends a relative path to a base URL, one segment at a time.
//
// Segments are percent-encoded, so a page called "Getting Started"
// becomes "Getting%20Started" and an owner like "a:b" can never be read
// as a URL scheme.
fn endpoint(base: &Url, path: &str) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(path.split('/'));
    Ok(url)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does `provider.parse::<Provider>()?` do?
//    - str::parse calls our FromStr implementation
//    - An unknown provider becomes WikiError::UnsupportedProvider
//    - The ? returns that error before we ever touch the network
//
// 2. Why a match guard (`Ok(response) if ...`)?
//    - It lets one match handle "got a 2xx", "got some other status" and
//      "no response at all" without nesting ifs inside the Ok arm
//
// 3. Why keep `status` around?
//    - StatusCode is Copy, so we can hold on to it after the primary
//      response is dropped and report it if the fallback also fails
// -----------------------------------------------------------------------------
