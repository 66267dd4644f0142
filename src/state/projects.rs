// Projects tab state management.
// Holds the loaded project set and derives the sorted, filtered view on demand.

use ratatui::widgets::ListState;

use crate::cache::{Fetched, Source};
use crate::projects::{Project, SortMode, visible_projects};

/// Loading state for async data.
#[derive(Debug, Clone)]
pub enum LoadingState<T> {
    Idle,
    Loading,
    Loaded(T),
}

impl<T> Default for LoadingState<T> {
    fn default() -> Self {
        LoadingState::Idle
    }
}

impl<T> LoadingState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadingState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

/// Complete state for the Projects tab.
#[derive(Debug, Default)]
pub struct ProjectsTabState {
    /// Full loaded set, as fetched or cached.
    pub loaded: LoadingState<Fetched<Vec<Project>>>,
    pub sort: SortMode,
    pub allow_list: Vec<String>,
    pub user: String,
    pub list_state: ListState,
}

impl ProjectsTabState {
    pub fn new(user: impl Into<String>, allow_list: Vec<String>) -> Self {
        Self {
            user: user.into(),
            allow_list,
            ..Self::default()
        }
    }

    pub fn set_loading(&mut self) {
        self.loaded = LoadingState::Loading;
    }

    pub fn set_loaded(&mut self, fetched: Fetched<Vec<Project>>) {
        self.loaded = LoadingState::Loaded(fetched);
        self.reset_selection();
    }

    pub fn source(&self) -> Option<Source> {
        self.loaded.data().map(|fetched| fetched.source)
    }

    /// The rendered list, recomputed from the loaded set every call.
    pub fn visible(&self) -> Vec<Project> {
        match self.loaded.data() {
            Some(fetched) => {
                visible_projects(
                &fetched.payload,
                fetched.source,
                &self.allow_list,
                self.sort,
                &self.user,
            )
            }
            None => Vec::new(),
        }
    }

    pub fn cycle_sort(&mut self) {
        self.sort = self.sort.next();
        self.reset_selection();
    }

    /// Select the next item in the list.
    pub fn select_next(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Select the previous item in the list.
    pub fn select_prev(&mut self) {
        if self.visible().is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Reset selection to first item.
    fn reset_selection(&mut self) {
        if self.visible().is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn project(name: &str, stars: u64) -> Project {
        Project {
            name: name.to_string(),
            description: String::new(),
            github_link: format!("https://github.com/u/{}", name),
            live_link: None,
            stars,
            added_date: Utc::now(),
            fork: false,
        }
    }

    fn selected_name(state: &ProjectsTabState) -> String {
        let index = state.list_state.selected().unwrap();
        state.visible()[index].name.clone()
    }

    fn loaded_state() -> ProjectsTabState {
        let mut state = ProjectsTabState::new("u", Vec::new());
        state.set_loaded(Fetched {
            payload: vec![project("alpha", 1), project("beta", 5)],
            source: Source::Remote,
        });
        state
    }

    #[test]
    fn test_idle_state_has_no_projects() {
        let state = ProjectsTabState::new("u", Vec::new());
        assert!(state.visible().is_empty());
        assert_eq!(state.source(), None);
    }

    #[test]
    fn test_sort_cycle_reorders_view_only() {
        let mut state = loaded_state();
        assert_eq!(selected_name(&state), "beta");

        state.cycle_sort();
        assert_eq!(state.sort, SortMode::Name);
        assert_eq!(selected_name(&state), "alpha");

        let payload = &state.loaded.data().unwrap().payload;
        assert_eq!(payload[0].name, "alpha");
        assert_eq!(payload[1].name, "beta");
    }

    #[test]
    fn test_selection_clamps_to_list() {
        let mut state = loaded_state();
        state.select_next();
        state.select_next();
        assert_eq!(state.list_state.selected(), Some(1));
        state.select_prev();
        state.select_prev();
        assert_eq!(state.list_state.selected(), Some(0));
    }
}
