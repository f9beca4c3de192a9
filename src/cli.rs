// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every configuration value can come from a flag or from an environment
// variable (the `env = ...` attributes), which is how the service is usually
// deployed: WIKI_PAGES and EXCLUDE_PREFIXES set in the environment, then
// `wikibash serve`.
// =============================================================================

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "wikibash",
    version,
    about = "Serve the shell snippets embedded in GitHub/GitLab wiki pages",
    long_about = "wikibash downloads wiki pages, pulls out their ```bash / ```shell / ```sh blocks, \
                  drops unwanted lines and hands back plain text you can pipe into a shell."
)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// Settings shared by every subcommand
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// JSON list of wikis: [{"type": "github", "owner": "..", "repo": "..", "pages": ["Home"]}]
    #[arg(long, global = true, env = "WIKI_PAGES", default_value = "[]")]
    pub wiki_pages: String,

    /// Comma-separated line prefixes to strip from every snippet (e.g. "sudo,rm ")
    #[arg(long, global = true, env = "EXCLUDE_PREFIXES", default_value = "")]
    pub exclude_prefixes: String,

    /// Give up on an upstream request after this many seconds.
    /// Unset means no timeout at all.
    #[arg(long, global = true, env = "FETCH_TIMEOUT_SECS")]
    pub fetch_timeout_secs: Option<u64>,

    /// Read every provider from this base URL instead of the public hosts
    /// (a mirror or a local test server)
    #[arg(long, global = true, env = "UPSTREAM_BASE_URL")]
    pub upstream_base_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP service (GET /, /bash and /fetch)
    ///
    /// Example: wikibash serve --bind 127.0.0.1:3000
    Serve {
        /// Address to listen on
        #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
        bind: String,
    },

    /// Print the combined script for every configured wiki page
    ///
    /// Example: WIKI_PAGES='[...]' wikibash bash | sh
    Bash,

    /// Print the snippets of a single wiki page
    ///
    /// Example: wikibash fetch --owner user --repo project --page Install
    Fetch {
        /// Wiki provider: github or gitlab
        #[arg(long = "type", default_value = "github")]
        provider: String,

        /// Owner (user, organisation or group) of the project
        #[arg(long)]
        owner: String,

        /// Project name
        #[arg(long)]
        repo: String,

        /// Wiki page name without the .md extension
        #[arg(long, default_value = "Home")]
        page: String,
    },
}
