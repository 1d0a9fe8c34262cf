use std::path::Path;

use crate::{EventHub, PageSettings, Subscription, Theme};

/// Owns the page settings and announces theme changes to subscribers.
pub struct ThemeController {
    settings: PageSettings,
    changes: EventHub<Theme>,
}

impl ThemeController {
    pub fn new(settings: PageSettings) -> Self {
        Self {
            settings,
            changes: EventHub::new(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.settings.theme
    }

    pub fn settings(&self) -> &PageSettings {
        &self.settings
    }

    pub fn on_theme_changed<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&Theme) + Send + Sync + 'static,
    {
        self.changes.subscribe(handler)
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.settings.theme = theme;
        log::info!("Theme set to {}", theme.as_str());
        self.changes.emit(&theme);
    }

    pub fn toggle(&mut self) -> Theme {
        let theme = self.settings.theme.toggled();
        self.set_theme(theme);
        theme
    }

    pub fn save(&self, path: &Path) -> Result<(), anyhow::Error> {
        self.settings.save(path)
    }
}
