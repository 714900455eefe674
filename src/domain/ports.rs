use crate::domain::model::{AnchorContext, CartMutationRequest, CartUpdateEvent, RecommendedProduct};
use crate::utils::error::Result;
use async_trait::async_trait;

pub const CART_UPDATE_EVENT: &str = "cart-update";

#[async_trait]
pub trait RecommendationSource: Send + Sync {
    /// Returns the ranked products for the anchor. An empty list is a valid answer.
    async fn fetch_recommendations(&self, context: &AnchorContext) -> Result<Vec<RecommendedProduct>>;
}

#[async_trait]
pub trait CartGateway: Send + Sync {
    /// Adds line items and returns the cart snapshot the store answered with.
    async fn add_items(&self, request: &CartMutationRequest) -> Result<serde_json::Value>;

    /// Fetches the server-rendered HTML of a cart section.
    async fn fetch_section(&self, section_id: &str) -> Result<String>;
}

/// Page-wide notification channel other widgets listen on.
pub trait CartEventPublisher: Send + Sync {
    fn publish(&self, event: &str, payload: &CartUpdateEvent);
}

/// The one blocking, shopper-visible error surface.
pub trait ShopperAlert: Send + Sync {
    fn alert(&self, message: &str);
}

/// Live page regions outside the widget, addressed by CSS selector.
pub trait PageSurface: Send + Sync {
    fn contains(&self, selector: &str) -> bool;

    /// Replaces the inner HTML of the first match. Returns false when nothing matched.
    fn replace_inner_html(&self, selector: &str, html: &str) -> bool;
}
