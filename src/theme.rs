//! Light/dark theme with a persisted preference.
//!
//! The preference lives under one key in a small TOML file. When nothing is
//! stored the terminal's reported background decides.

use crate::errors::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Key of the theme in the preferences file.
pub const THEME_KEY: &str = "retail-dashboard-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Theme the environment asks for, from `COLORFGBG` ("fg;bg").
///
/// Backgrounds 0-6 and 8 are the dark ANSI colors. Anything else, or no
/// variable at all, means light.
pub fn system_theme(lookup: impl Fn(&str) -> Option<String>) -> Theme {
    let background = lookup("COLORFGBG")
        .and_then(|value| value.rsplit(';').next().map(str::to_string))
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match background {
        Some(0..=6 | 8) => Theme::Dark,
        _ => Theme::Light,
    }
}

/// String preferences stored as a flat TOML table.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// # Errors
    /// Returns the I/O or TOML error of an unreadable preferences file.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    /// Stores `value` under `key`, keeping the other keys. A file that is
    /// not valid TOML is replaced.
    ///
    /// # Errors
    /// Returns the I/O error of reading or writing the file.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut all = match self.read_all() {
            Ok(all) => all,
            Err(Error::TomlDe(e)) => {
                warn!("Replacing unparsable preferences file {:?}: {}", self.path, e);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        all.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, toml::to_string(&all)?)?;
        debug!("Saved preference {} = {}", key, value);
        Ok(())
    }
}

/// Current theme plus the store it is persisted in.
#[derive(Debug, Clone)]
pub struct ThemeController {
    store: PreferenceStore,
    theme: Theme,
}

impl ThemeController {
    /// Restores the persisted theme, or falls back to `system`.
    ///
    /// An unreadable preferences file or an unrecognized stored value is
    /// ignored.
    #[must_use]
    pub fn load(store: PreferenceStore, system: Theme) -> Self {
        let stored = store.get(THEME_KEY).unwrap_or_else(|e| {
            warn!("Could not read preferences from {:?}: {}", store.path(), e);
            None
        });
        let theme = match stored.as_deref().map(|raw| (raw, Theme::parse(raw))) {
            Some((_, Some(theme))) => theme,
            Some((raw, None)) => {
                warn!("Ignoring unknown stored theme '{}'", raw);
                system
            }
            None => system,
        };
        info!("Theme: {}", theme);
        Self { store, theme }
    }

    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// # Errors
    /// Returns the error of writing the preferences file.
    pub fn set(&mut self, theme: Theme) -> Result<()> {
        self.store.set(THEME_KEY, theme.as_str())?;
        self.theme = theme;
        Ok(())
    }

    /// Switches between light and dark and returns the new theme.
    ///
    /// # Errors
    /// Returns the error of writing the preferences file.
    pub fn toggle(&mut self) -> Result<Theme> {
        self.set(self.theme.toggled())?;
        Ok(self.theme)
    }
}
