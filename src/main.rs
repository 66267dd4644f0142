// folio: terminal portfolio.
// Entry point; parses configuration, wires services, and runs the TUI.

mod app;
mod cache;
mod clock;
mod config;
mod contact;
mod content;
mod error;
mod export;
mod github;
mod projects;
mod security;
mod state;
mod telemetry;
mod theme;
mod ui;

use std::process::ExitCode;

use clap::Parser;

use crate::app::{App, Services};
use crate::cache::{FileStore, KvStore, MemoryStore, TimedCache};
use crate::config::{Args, Config};
use crate::contact::{ContactController, FormspreeClient};
use crate::error::Result;
use crate::github::GitHubClient;
use crate::projects::load_projects;
use crate::security::SubmissionGate;
use crate::state::{ContactTabState, ProjectsTabState};
use crate::telemetry::{Level, Reason, Telemetry};
use crate::theme::Theme;

/// Quota for the on-disk store, matching a browser's local storage budget.
const STORE_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Reports to stderr when running without the TUI.
struct StderrTelemetry;

impl Telemetry for StderrTelemetry {
    fn report(&mut self, level: Level, reason: Reason, context: &str) {
        if level != Level::Info {
            eprintln!("{:?} [{}] {}", level, reason, context);
        }
    }
}

fn open_cache(config: &Config) -> Result<TimedCache<Box<dyn KvStore>>> {
    let store: Box<dyn KvStore> = match &config.cache_dir {
        Some(dir) => Box::new(FileStore::new(dir).with_quota(STORE_QUOTA_BYTES)),
        None => Box::new(MemoryStore::new().with_quota(STORE_QUOTA_BYTES)),
    };
    Ok(TimedCache::with_system_clock(config.cache_ttl, store)?
        .with_loader_timeout(config.fetch_timeout))
}

fn github_client(config: &Config) -> Result<Option<GitHubClient>> {
    if config.offline {
        return Ok(None);
    }
    let client = GitHubClient::from_env()?;
    Ok(Some(match &config.github_api {
        Some(api) => client.with_base_url(api.clone()),
        None => client,
    }))
}

async fn run(config: Config) -> Result<()> {
    let mut cache = open_cache(&config)?;
    let mut github = github_client(&config)?;

    if let Some(path) = &config.export_html {
        let mut telemetry = StderrTelemetry;
        let fetched = load_projects(&mut cache, github.as_mut(), &config.user, &mut telemetry).await;
        let projects = projects::visible_projects(
            &fetched.payload,
            fetched.source,
            &config.allow_list,
            projects::SortMode::default(),
            &config.user,
        );
        export::write_projects_html(path, content::PROJECTS_HERO.title, &projects)?;
        println!("Wrote {} projects to {}", projects.len(), path.display());
        return Ok(());
    }

    let controller = ContactController::new(SubmissionGate::with_system_clock(config.cooldown)?);
    let form = controller.new_form();
    let theme = Theme::load(&**cache.store());

    let mut services = Services {
        cache,
        github,
        contact: controller,
        transport: FormspreeClient::new(&config.form_id)?,
    };
    let mut app = App::new(
        ProjectsTabState::new(config.user.clone(), config.allow_list.clone()),
        ContactTabState::new(form),
        theme,
    );

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal, &mut services).await;
    ratatui::restore();
    result?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::try_from(Args::parse()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("folio: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("folio: {}", e);
            ExitCode::FAILURE
        }
    }
}
