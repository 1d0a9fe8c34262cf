use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{io::Write, path::Path};

use flaskbin_countdown::{CountdownFormat, Granularity, SmoothingBand};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_preference(prefers_dark: bool) -> Self {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Value for the page's `data-bs-theme` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The toggle icon offers the opposite theme.
    pub fn icon_class(self) -> &'static str {
        match self {
            Theme::Light => "fas fa-moon",
            Theme::Dark => "fas fa-sun",
        }
    }

    pub fn highlight_theme(self) -> &'static str {
        match self {
            Theme::Light => "atom-one-light",
            Theme::Dark => "atom-one-dark",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CountdownSettings {
    pub granularity: Granularity,
    pub smoothing: bool,
}

impl CountdownSettings {
    pub fn format(&self) -> CountdownFormat {
        let format = CountdownFormat::new(self.granularity);
        if self.smoothing {
            format.with_smoothing(SmoothingBand::ten_minutes())
        } else {
            format
        }
    }
}

/// Display preferences, loaded once at startup and saved explicitly.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageSettings {
    pub theme: Theme,
    #[serde(default)]
    pub countdown: CountdownSettings,
}

impl PageSettings {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            countdown: CountdownSettings::default(),
        }
    }

    /// Loads saved settings, or falls back to the system theme preference
    /// when nothing has been saved yet.
    pub fn load_or_default(path: &Path, prefers_dark: bool) -> Result<Self, anyhow::Error> {
        if !path.exists() {
            return Ok(Self::new(Theme::from_preference(prefers_dark)));
        }

        let str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file {}", path.to_string_lossy()))?;
        let settings: Self = serde_json::from_str(&str).with_context(|| {
            format!(
                "Failed to deserialise PageSettings from file {}",
                path.to_string_lossy()
            )
        })?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), anyhow::Error> {
        let storage_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        std::fs::create_dir_all(storage_dir).with_context(|| {
            format!(
                "Failed to create settings directory {}",
                storage_dir.to_string_lossy()
            )
        })?;

        let json = serde_json::to_string_pretty(&self)
            .context("Failed to serialise PageSettings whilst saving settings")?;

        let mut file = tempfile::Builder::new()
            .tempfile_in(storage_dir)
            .context("Failed to create temporary file whilst saving settings")?;
        file.write_all(json.as_bytes())
            .context("Failed to write data to temporary file whilst saving settings")?;
        file.persist(path).with_context(|| {
            format!(
                "Failed to persist temporary settings file to path {}",
                path.to_string_lossy()
            )
        })?;

        log::debug!("Saved page settings to {}", path.to_string_lossy());
        Ok(())
    }
}
