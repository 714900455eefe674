use crate::domain::model::{AnchorContext, RecommendedProduct};
use crate::domain::ports::RecommendationSource;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Populate(Vec<RecommendedProduct>),
    Hide,
}

pub struct RecommendationLoader {
    source: Arc<dyn RecommendationSource>,
}

impl RecommendationLoader {
    pub fn new(source: Arc<dyn RecommendationSource>) -> Self {
        Self { source }
    }

    /// One request, no retry. Every failure collapses to `Hide` and is only logged.
    pub async fn load(&self, context: &AnchorContext) -> LoadOutcome {
        tracing::debug!(
            product_id = %context.product_id,
            limit = context.result_limit,
            "Loading complementary products"
        );

        match self.source.fetch_recommendations(context).await {
            Ok(products) if products.is_empty() => {
                tracing::info!(product_id = %context.product_id, "No complementary products returned");
                LoadOutcome::Hide
            }
            Ok(products) => {
                tracing::debug!("Received {} complementary products", products.len());
                LoadOutcome::Populate(products)
            }
            Err(e) => {
                // 推薦失敗不影響購物車，只記錄並隱藏區塊
                tracing::warn!(remote = e.is_remote(), "Error loading complementary products: {}", e);
                LoadOutcome::Hide
            }
        }
    }
}
