mod event_hub;
mod notifications;
mod page_settings;
mod password_strength;
mod paste_form;
mod paste_lifetime;
mod paste_templates;
mod theme_controller;
mod time_since;

use directories::ProjectDirs;
use lazy_static::lazy_static;
use std::path::PathBuf;

pub use event_hub::{EventHub, Subscription};
pub use notifications::{
    apply_count, parse_count_response, spawn_notification_poller, strip_count_prefix,
    title_with_count, FileNotificationSource, NotificationPollerHandle, NotificationSource,
    NotificationView, NOTIFICATION_POLL_PERIOD,
};
pub use page_settings::{CountdownSettings, PageSettings, Theme};
pub use password_strength::{evaluate_password, StrengthLevel, StrengthReport};
pub use paste_form::{NewPaste, PasteFormError};
pub use paste_lifetime::{is_ten_minute_expiration, PasteLifetime};
pub use paste_templates::{
    load_template, DirectoryTemplateSource, PasteEditor, PasteTemplate, TemplateSource,
};
pub use theme_controller::ThemeController;
pub use time_since::time_since;

lazy_static! {
    pub static ref LOCAL_STORAGE_DIR: Option<PathBuf> = ProjectDirs::from("", "", "flaskbin")
        .map(|project| PathBuf::from(project.data_local_dir()));
    pub static ref SETTINGS_PATH: Option<PathBuf> = LOCAL_STORAGE_DIR
        .as_ref()
        .map(|dir| dir.join("settings.json"));
}
