use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::PasteLifetime;

const DEFAULT_TITLE: &str = "Untitled";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasteFormError {
    #[error("Please enter paste content")]
    EmptyContent,
}

/// A validated submission of the new paste form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPaste {
    pub title: String,
    pub content: String,
    pub syntax: String,
    pub lifetime: PasteLifetime,
}

impl NewPaste {
    pub fn new(
        title: &str,
        content: String,
        syntax: &str,
        lifetime: PasteLifetime,
    ) -> Result<Self, PasteFormError> {
        if content.trim().is_empty() {
            return Err(PasteFormError::EmptyContent);
        }

        let title = title.trim();
        Ok(Self {
            title: String::from(if title.is_empty() { DEFAULT_TITLE } else { title }),
            content,
            syntax: String::from(if syntax.is_empty() { "text" } else { syntax }),
            lifetime,
        })
    }

    /// Size of the content in bytes.
    pub fn size(&self) -> usize {
        self.content.len()
    }

    pub fn expires_at(&self, created: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.lifetime.expires_at(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_content_is_rejected() {
        assert_eq!(
            NewPaste::new("notes", String::from(" \n\t "), "text", PasteLifetime::Never),
            Err(PasteFormError::EmptyContent)
        );
        assert_eq!(
            PasteFormError::EmptyContent.to_string(),
            "Please enter paste content"
        );
    }

    #[test]
    fn defaults_title_and_syntax() {
        let paste = NewPaste::new("  ", String::from("héllo"), "", PasteLifetime::OneDay).unwrap();
        assert_eq!(paste.title, "Untitled");
        assert_eq!(paste.syntax, "text");
        assert_eq!(paste.size(), 6);
    }
}
