// GitHub API endpoint functions.

use crate::error::Result;

use super::client::GitHubClient;
use super::types::Repository;

impl GitHubClient {
    /// Get public repositories owned by `user`.
    pub async fn get_user_repos(&mut self, user: &str, per_page: u32) -> Result<Vec<Repository>> {
        let params = [("per_page", per_page.to_string())];
        let response = self
            .get_with_params(&format!("/users/{}/repos", user), &params)
            .await?;
        let repos: Vec<Repository> = response.json().await?;
        Ok(repos)
    }
}
