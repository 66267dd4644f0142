// State management module.
// Per-tab UI state: projects list, contact form, and the console log.

pub mod console;
pub mod contact;
pub mod projects;

pub use console::ConsoleState;
pub use contact::{ContactTabState, Field, Notice};
pub use projects::{LoadingState, ProjectsTabState};
