// Command-line configuration.
// Parsed with clap, then validated into the settings the app runs with.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::{FolioError, Result};

/// Repositories featured on the Projects page.
pub const SELECTED_REPOS: &[&str] = &[
    "AI-Mock-Interview",
    "StrategicTrio",
    "CineMind",
    "CodeSpark",
    "HarryPotter-Trivia",
    "PokeDex",
    "MLFlow",
];

#[derive(Parser, Debug, Clone)]
#[command(name = "folio")]
#[command(about = "Terminal portfolio with projects, skills, and a contact form")]
pub struct Args {
    /// GitHub user whose repositories are listed
    #[arg(short, long, default_value = "aakash-01-1996")]
    pub user: String,

    /// Only show these repositories (repeatable); defaults to the featured list
    #[arg(long = "repo")]
    pub repos: Vec<String>,

    /// Show every non-fork repository instead of the featured list
    #[arg(long, conflicts_with = "repos")]
    pub all_repos: bool,

    /// How long fetched projects stay cached, in seconds
    #[arg(long, default_value_t = 60 * 60)]
    pub cache_ttl_secs: u64,

    /// Minimum time between contact form submissions, in milliseconds
    #[arg(long, default_value_t = 3000)]
    pub cooldown_ms: u64,

    /// Give up on GitHub after this many seconds
    #[arg(long, default_value_t = 10)]
    pub fetch_timeout_secs: u64,

    /// Formspree form id receiving contact messages
    #[arg(long, default_value = "movgnpaj")]
    pub form_id: String,

    /// Cache directory (defaults to the platform cache dir)
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Keep the cache in memory only
    #[arg(long)]
    pub no_cache: bool,

    /// GitHub API root, for Enterprise installs
    #[arg(long, value_name = "URL")]
    pub github_api: Option<String>,

    /// Never contact GitHub; serve cached or fallback projects
    #[arg(long)]
    pub offline: bool,

    /// Write the projects page as HTML to this file and exit
    #[arg(long, value_name = "FILE")]
    pub export_html: Option<PathBuf>,
}

/// Validated runtime settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub user: String,
    pub allow_list: Vec<String>,
    pub cache_ttl: Duration,
    pub cooldown: Duration,
    pub fetch_timeout: Duration,
    pub form_id: String,
    pub cache_dir: Option<PathBuf>,
    pub github_api: Option<String>,
    pub offline: bool,
    pub export_html: Option<PathBuf>,
}

fn positive(value: u64, what: &str) -> Result<u64> {
    if value == 0 {
        return Err(FolioError::InvalidConfiguration(format!(
            "{} must be greater than zero",
            what
        )));
    }
    Ok(value)
}

fn is_github_login(user: &str) -> bool {
    !user.is_empty()
        && user.len() <= 39
        && !user.starts_with('-')
        && user.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

impl TryFrom<Args> for Config {
    type Error = FolioError;

    fn try_from(args: Args) -> Result<Self> {
        if !is_github_login(&args.user) {
            return Err(FolioError::InvalidConfiguration(format!(
                "'{}' is not a valid GitHub username",
                args.user
            )));
        }
        if args.form_id.is_empty() || !args.form_id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(FolioError::InvalidConfiguration(format!(
                "'{}' is not a valid form id",
                args.form_id
            )));
        }

        let allow_list = if args.all_repos {
            Vec::new()
        } else if args.repos.is_empty() {
            SELECTED_REPOS.iter().map(|s| s.to_string()).collect()
        } else {
            args.repos
        };

        if let Some(api) = &args.github_api {
            if !crate::security::is_valid_url(api) {
                return Err(FolioError::InvalidConfiguration(format!(
                    "'{}' is not a valid API url",
                    api
                )));
            }
        }

        let cache_dir = if args.no_cache {
            None
        } else {
            args.cache_dir.or_else(crate::cache::cache_dir)
        };

        Ok(Self {
            user: args.user,
            allow_list,
            cache_ttl: Duration::from_secs(positive(args.cache_ttl_secs, "cache ttl")?),
            cooldown: Duration::from_millis(positive(args.cooldown_ms, "cooldown")?),
            fetch_timeout: Duration::from_secs(positive(args.fetch_timeout_secs, "fetch timeout")?),
            form_id: args.form_id,
            cache_dir,
            github_api: args.github_api.map(|api| api.trim_end_matches('/').to_string()),
            offline: args.offline,
            export_html: args.export_html,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config> {
        let mut argv = vec!["folio"];
        argv.extend_from_slice(args);
        Config::try_from(Args::parse_from(argv))
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["--no-cache"]).unwrap();
        assert_eq!(config.user, "aakash-01-1996");
        assert_eq!(config.cache_ttl, Duration::from_secs(3600));
        assert_eq!(config.cooldown, Duration::from_millis(3000));
        assert_eq!(config.allow_list.len(), SELECTED_REPOS.len());
        assert!(config.cache_dir.is_none());
    }

    #[test]
    fn test_zero_durations_rejected() {
        assert!(matches!(
            parse(&["--cooldown-ms", "0"]),
            Err(FolioError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            parse(&["--cache-ttl-secs", "0"]),
            Err(FolioError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_repo_selection() {
        let config = parse(&["--repo", "CineMind", "--repo", "PokeDex"]).unwrap();
        assert_eq!(config.allow_list, vec!["CineMind", "PokeDex"]);

        let config = parse(&["--all-repos"]).unwrap();
        assert!(config.allow_list.is_empty());
    }

    #[test]
    fn test_user_validation() {
        assert!(parse(&["--user", "octocat"]).is_ok());
        assert!(parse(&["--user", "../orgs"]).is_err());
        assert!(parse(&["--user=-dash"]).is_err());
    }

    #[test]
    fn test_explicit_cache_dir() {
        let config = parse(&["--cache-dir", "/tmp/folio-test"]).unwrap();
        assert_eq!(config.cache_dir, Some(PathBuf::from("/tmp/folio-test")));
    }

    #[test]
    fn test_github_api_override() {
        let config = parse(&["--github-api", "https://ghe.example.com/api/v3/"]).unwrap();
        assert_eq!(
            config.github_api.as_deref(),
            Some("https://ghe.example.com/api/v3")
        );
        assert!(parse(&["--github-api", "ftp://ghe.example.com"]).is_err());
        assert!(parse(&[]).unwrap().github_api.is_none());
    }
}
