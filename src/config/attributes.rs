use crate::domain::model::{AnchorContext, DEFAULT_RESULT_LIMIT};
use std::collections::HashMap;

/// Declarative `data-*` attributes found on the widget root.
#[derive(Debug, Clone, Default)]
pub struct HostAttributes {
    values: HashMap<String, String>,
}

impl HostAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// `None` when `data-product-id` or `data-url` is missing or blank.
    pub fn anchor_context(&self) -> Option<AnchorContext> {
        let product_id = self.non_blank("data-product-id")?;
        let url = self.non_blank("data-url")?;

        let limit = self
            .get("data-limit")
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_RESULT_LIMIT);

        Some(AnchorContext::new(product_id, url).with_limit(limit))
    }

    fn non_blank(&self, name: &str) -> Option<&str> {
        self.get(name).map(str::trim).filter(|v| !v.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HostAttributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
