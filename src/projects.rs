// Portfolio projects sourced from GitHub.
// Maps repositories to project records, loads them through the cache, and derives the view.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::{Fetched, KvStore, Source, TimedCache};
use crate::clock::Clock;
use crate::error::FolioError;
use crate::github::{GitHubClient, Repository};
use crate::telemetry::Telemetry;

/// Store key for the fetched repository list.
pub const CACHE_KEY: &str = "github_projects_cache";

const REPOS_PER_PAGE: u32 = 100;
const DEFAULT_DESCRIPTION: &str = "Work in progress..";

/// A project tile on the Projects page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub github_link: String,
    pub live_link: Option<String>,
    pub stars: u64,
    pub added_date: DateTime<Utc>,
    #[serde(default)]
    pub fork: bool,
}

impl From<Repository> for Project {
    fn from(repo: Repository) -> Self {
        Self {
            name: repo.name,
            description: repo
                .description
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            github_link: repo.html_url,
            live_link: repo.homepage.filter(|h| !h.trim().is_empty()),
            stars: repo.stargazers_count,
            added_date: repo.created_at.or(repo.pushed_at).unwrap_or_else(Utc::now),
            fork: repo.fork,
        }
    }
}

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

/// Placeholder set shown when nothing could be loaded.
pub fn fallback_projects(user: &str) -> Vec<Project> {
    let placeholder = |n: u32, stars: u64, added_date: DateTime<Utc>| Project {
        name: format!("Project {}", n),
        description: format!("This is a description of Project {}.", n),
        github_link: format!("https://github.com/{}/project{}", user, n),
        live_link: None,
        stars,
        added_date,
        fork: false,
    };
    vec![
        placeholder(1, 50, date(2025, 12, 1)),
        placeholder(2, 30, date(2025, 11, 15)),
        placeholder(3, 70, date(2025, 12, 5)),
    ]
}

/// Ordering offered by the sort selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Stars,
    Name,
    Recent,
}

impl SortMode {
    pub fn label(&self) -> &'static str {
        match self {
            SortMode::Stars => "Most Stars",
            SortMode::Name => "A-Z",
            SortMode::Recent => "Recently Added",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            SortMode::Stars => SortMode::Name,
            SortMode::Name => SortMode::Recent,
            SortMode::Recent => SortMode::Stars,
        }
    }

    fn compare(&self, a: &Project, b: &Project) -> Ordering {
        match self {
            SortMode::Stars => b.stars.cmp(&a.stars),
            SortMode::Name => a
                .name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name)),
            SortMode::Recent => b.added_date.cmp(&a.added_date),
        }
    }
}

/// Derive the rendered list from the full loaded set.
///
/// Forks are dropped and, when `allow_list` is non-empty, only exact name
/// matches are kept. A fallback payload or an empty loaded set shows the
/// fallback projects unfiltered.
pub fn visible_projects(
    loaded: &[Project],
    source: Source,
    allow_list: &[String],
    sort: SortMode,
    user: &str,
) -> Vec<Project> {
    let mut projects: Vec<Project> = if loaded.is_empty() {
        fallback_projects(user)
    } else if source == Source::Fallback {
        loaded.to_vec()
    } else {
        loaded
            .iter()
            .filter(|p| !p.fork)
            .filter(|p| allow_list.is_empty() || allow_list.iter().any(|name| *name == p.name))
            .cloned()
            .collect()
    };
    projects.sort_by(|a, b| sort.compare(a, b));
    projects
}

/// Load the full project set, preferring a fresh cached copy.
///
/// `client` is `None` in offline mode, which behaves like a failed fetch.
pub async fn load_projects<S: KvStore, C: Clock>(
    cache: &mut TimedCache<S, C>,
    client: Option<&mut GitHubClient>,
    user: &str,
    telemetry: &mut dyn Telemetry,
) -> Fetched<Vec<Project>> {
    let loader = move || async move {
        let client = client.ok_or_else(|| FolioError::Other("offline mode".to_string()))?;
        let repos = client.get_user_repos(user, REPOS_PER_PAGE).await?;
        Ok::<Vec<Project>, FolioError>(repos.into_iter().map(Project::from).collect())
    };
    cache
        .get(CACHE_KEY, loader, || fallback_projects(user), telemetry)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::config::SELECTED_REPOS;
    use crate::clock::testing::ManualClock;
    use crate::telemetry::{Reason, testing::RecordingTelemetry};
    use std::time::Duration;

    fn project(name: &str, stars: u64, added: DateTime<Utc>) -> Project {
        Project {
            name: name.to_string(),
            description: String::new(),
            github_link: format!("https://github.com/u/{}", name),
            live_link: None,
            stars,
            added_date: added,
            fork: false,
        }
    }

    fn names(projects: &[Project]) -> Vec<&str> {
        projects.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_from_repository_defaults() {
        let repo = Repository {
            name: "CodeSpark".to_string(),
            description: None,
            html_url: "https://github.com/u/CodeSpark".to_string(),
            homepage: Some(String::new()),
            stargazers_count: 3,
            fork: false,
            created_at: None,
            pushed_at: Some(date(2024, 5, 1)),
        };

        let project = Project::from(repo);
        assert_eq!(project.description, "Work in progress..");
        assert_eq!(project.live_link, None);
        assert_eq!(project.added_date, date(2024, 5, 1));
    }

    #[test]
    fn test_sort_by_stars_is_stable() {
        let day = date(2025, 1, 1);
        let loaded = vec![
            project("b", 5, day),
            project("a", 10, day),
            project("c", 5, day),
        ];
        let sorted = visible_projects(&loaded, Source::Remote, &[], SortMode::Stars, "u");
        assert_eq!(names(&sorted), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_by_name_and_recent() {
        let loaded = vec![
            project("pokeDex", 1, date(2024, 1, 1)),
            project("CineMind", 1, date(2025, 6, 1)),
            project("MLFlow", 1, date(2023, 2, 1)),
        ];

        let by_name = visible_projects(&loaded, Source::Remote, &[], SortMode::Name, "u");
        assert_eq!(names(&by_name), vec!["CineMind", "MLFlow", "pokeDex"]);

        let by_date = visible_projects(&loaded, Source::Remote, &[], SortMode::Recent, "u");
        assert_eq!(names(&by_date), vec!["CineMind", "pokeDex", "MLFlow"]);
    }

    #[test]
    fn test_allow_list_and_forks() {
        let day = date(2025, 1, 1);
        let mut forked = project("PokeDex", 9, day);
        forked.fork = true;
        let loaded = vec![
            project("CineMind", 1, day),
            project("cinemind", 2, day),
            project("Unlisted", 3, day),
            forked,
        ];
        let allow = vec!["CineMind".to_string(), "PokeDex".to_string()];

        let visible = visible_projects(&loaded, Source::Remote, &allow, SortMode::Stars, "u");
        assert_eq!(names(&visible), vec!["CineMind"]);

        let unrestricted = visible_projects(&loaded, Source::Remote, &[], SortMode::Stars, "u");
        assert_eq!(names(&unrestricted), vec!["Unlisted", "cinemind", "CineMind"]);
    }

    #[test]
    fn test_empty_set_shows_fallback() {
        let visible = visible_projects(&[], Source::Remote, &[], SortMode::Stars, "someone");
        assert_eq!(names(&visible), vec!["Project 3", "Project 1", "Project 2"]);
        assert!(visible[0].github_link.starts_with("https://github.com/someone/"));
    }

    #[test]
    fn test_view_does_not_touch_loaded_set() {
        let day = date(2025, 1, 1);
        let loaded = vec![project("b", 1, day), project("a", 2, day)];
        let _ = visible_projects(&loaded, Source::Remote, &["a".to_string()], SortMode::Name, "u");
        assert_eq!(names(&loaded), vec!["b", "a"]);
    }

    #[test]
    fn test_fallback_payload_ignores_allow_list() {
        let allow: Vec<String> = SELECTED_REPOS.iter().map(|s| s.to_string()).collect();
        let fallback = fallback_projects("u");

        let visible = visible_projects(&fallback, Source::Fallback, &allow, SortMode::Stars, "u");
        assert_eq!(names(&visible), vec!["Project 3", "Project 1", "Project 2"]);

        let filtered = visible_projects(&fallback, Source::Remote, &allow, SortMode::Stars, "u");
        assert!(filtered.is_empty());
    }

    #[tokio::test]
    async fn test_offline_load_serves_cache_then_fallback() {
        let clock = ManualClock::new(Utc::now());
        let mut cache =
            TimedCache::new(Duration::from_secs(3600), MemoryStore::new(), clock.clone()).unwrap();
        let mut telemetry = RecordingTelemetry::default();

        let first = load_projects(&mut cache, None, "u", &mut telemetry).await;
        assert_eq!(first.source, Source::Fallback);
        assert_eq!(first.payload, fallback_projects("u"));
        assert!(telemetry.has(Reason::FetchFailed));
        assert!(cache.store().is_empty());

        let seeded = vec![project("CineMind", 4, date(2025, 1, 1))];
        let entry = crate::cache::timed::CachedEntry {
            data: &seeded,
            timestamp: clock.now(),
        };
        cache
            .store_mut()
            .set(CACHE_KEY, &serde_json::to_string(&entry).unwrap())
            .unwrap();

        let second = load_projects(&mut cache, None, "u", &mut telemetry).await;
        assert_eq!(second.source, Source::Cache);
        assert_eq!(second.payload, seeded);
    }
}
