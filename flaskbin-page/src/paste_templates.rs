use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PasteTemplate {
    pub name: String,
    pub content: String,
    pub syntax: String,
}

#[async_trait]
pub trait TemplateSource {
    async fn fetch_template(&self, id: i64) -> Result<PasteTemplate, anyhow::Error>;
}

/// Templates stored as `<id>.json` files.
pub struct DirectoryTemplateSource {
    dir: PathBuf,
}

impl DirectoryTemplateSource {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

#[async_trait]
impl TemplateSource for DirectoryTemplateSource {
    async fn fetch_template(&self, id: i64) -> Result<PasteTemplate, anyhow::Error> {
        let path = self.dir.join(format!("{}.json", id));
        let str = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read file {}", path.to_string_lossy()))?;
        let template = serde_json::from_str(&str).with_context(|| {
            format!(
                "Failed to deserialise PasteTemplate from file {}",
                path.to_string_lossy()
            )
        })?;
        Ok(template)
    }
}

/// Fields of the new paste form a template fills in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PasteEditor {
    pub content: String,
    pub syntax: String,
}

/// Replaces the editor contents with template `id`.
///
/// Non-positive ids are the selector's placeholder entry and do nothing.
/// Existing content is only replaced when `confirm_replace` agrees. A failed
/// fetch is logged and leaves the editor untouched. Returns whether the
/// template was applied.
pub async fn load_template<S, F>(
    source: &S,
    editor: &mut PasteEditor,
    id: i64,
    confirm_replace: F,
) -> bool
where
    S: TemplateSource + ?Sized,
    F: FnOnce() -> bool,
{
    if id <= 0 {
        return false;
    }

    if !editor.content.is_empty() && !confirm_replace() {
        return false;
    }

    match source.fetch_template(id).await {
        Ok(template) => {
            editor.content = template.content;
            editor.syntax = template.syntax;
            log::info!("Applied template {}", template.name);
            true
        }
        Err(error) => {
            log::error!("Failed to load template {}: {:?}", id, error);
            false
        }
    }
}
