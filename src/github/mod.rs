// GitHub API module.
// Client and types for reading a user's public repositories.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::GitHubClient;
pub use types::{RateLimit, Repository};
