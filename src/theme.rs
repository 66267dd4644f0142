// Light/dark theme preference.
// Persisted in the key-value store so the choice survives restarts.

use ratatui::style::Color;

use crate::cache::KvStore;
use crate::error::Result;

const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Colors used across the UI for one theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub highlight_bg: Color,
    pub error: Color,
    pub success: Color,
}

impl Theme {
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Dark => Palette {
                text: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                highlight_bg: Color::DarkGray,
                error: Color::Red,
                success: Color::Green,
            },
            Theme::Light => Palette {
                text: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                highlight_bg: Color::Gray,
                error: Color::Red,
                success: Color::Green,
            },
        }
    }

    /// Saved preference, or the default when none is stored or readable.
    pub fn load(store: &dyn KvStore) -> Self {
        match store.get(THEME_KEY) {
            Ok(Some(value)) if value.trim() == "light" => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn save(&self, store: &mut dyn KvStore) -> Result<()> {
        store.set(THEME_KEY, self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;

    #[test]
    fn test_theme_round_trips_through_store() {
        let mut store = MemoryStore::new();
        assert_eq!(Theme::load(&store), Theme::Dark);

        Theme::Light.save(&mut store).unwrap();
        assert_eq!(Theme::load(&store), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }

    #[test]
    fn test_unknown_value_falls_back_to_dark() {
        let mut store = MemoryStore::new();
        store.set("theme", "sepia").unwrap();
        assert_eq!(Theme::load(&store), Theme::Dark);
    }
}
