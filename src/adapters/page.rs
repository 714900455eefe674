use crate::domain::ports::PageSurface;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Page regions held in memory, keyed by the selector that addresses them.
#[derive(Debug, Default)]
pub struct InMemoryPage {
    regions: Mutex<HashMap<String, String>>,
}

impl InMemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(self, selector: impl Into<String>, inner_html: impl Into<String>) -> Self {
        self.regions().insert(selector.into(), inner_html.into());
        self
    }

    fn regions(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.regions.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn inner_html(&self, selector: &str) -> Option<String> {
        self.regions().get(selector).cloned()
    }
}

impl PageSurface for InMemoryPage {
    fn contains(&self, selector: &str) -> bool {
        self.regions().contains_key(selector)
    }

    fn replace_inner_html(&self, selector: &str, html: &str) -> bool {
        match self.regions().get_mut(selector) {
            Some(region) => {
                *region = html.to_string();
                true
            }
            None => false,
        }
    }
}
