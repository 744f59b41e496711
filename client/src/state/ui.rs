//! Shell chrome state: active tab and theme.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// Top-level tabs of the dashboard shell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Dashboard,
    Predict,
    Settings,
    About,
}

impl Tab {
    pub const ALL: [Self; 4] = [Self::Dashboard, Self::Predict, Self::Settings, Self::About];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Predict => "/predict",
            Self::Settings => "/settings",
            Self::About => "/about",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Predict => "Predict",
            Self::Settings => "Settings",
            Self::About => "About",
        }
    }

    /// Tab owning a location path. Unknown paths fall back to the dashboard.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        Self::ALL
            .into_iter()
            .find(|tab| tab.path() != "/" && trimmed == tab.path())
            .unwrap_or_default()
    }
}

/// Colour scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    /// Value persisted in local storage.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// UI state shared by the shell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    pub theme: Theme,
}
