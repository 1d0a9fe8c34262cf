use std::sync::{Arc, Mutex};

/// Anything a countdown can write its text into.
pub trait DisplaySurface {
    fn set_text(&mut self, text: &str);
}

impl DisplaySurface for String {
    fn set_text(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

/// A text cell which can be written by a countdown task and read elsewhere.
#[derive(Clone, Debug, Default)]
pub struct SharedText {
    text: Arc<Mutex<String>>,
}

impl SharedText {
    pub fn new(initial: &str) -> Self {
        Self {
            text: Arc::new(Mutex::new(String::from(initial))),
        }
    }

    pub fn text(&self) -> String {
        match self.text.lock() {
            Ok(text) => text.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl DisplaySurface for SharedText {
    fn set_text(&mut self, text: &str) {
        let mut current = self
            .text
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        current.set_text(text);
    }
}
