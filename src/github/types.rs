// GitHub API response types.
// Only the repository fields the portfolio renders are deserialized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public repository as returned by `/users/{user}/repos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub homepage: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub fork: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub pushed_at: Option<DateTime<Utc>>,
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_repository_with_nulls() {
        let json = r#"{
            "id": 1,
            "name": "PokeDex",
            "description": null,
            "html_url": "https://github.com/aakash-01-1996/PokeDex",
            "homepage": null,
            "stargazers_count": 4,
            "fork": false,
            "created_at": "2024-03-01T12:00:00Z",
            "pushed_at": null
        }"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.name, "PokeDex");
        assert!(repo.description.is_none());
        assert_eq!(repo.stargazers_count, 4);
        assert!(repo.created_at.is_some());
        assert!(repo.pushed_at.is_none());
    }
}
