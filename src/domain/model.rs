use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_RESULT_LIMIT: usize = 4;

/// Which product to recommend for, how many results, and where to ask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorContext {
    pub product_id: String,
    pub result_limit: usize,
    pub endpoint_url: String,
}

impl AnchorContext {
    pub fn new(product_id: impl Into<String>, endpoint_url: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            result_limit: DEFAULT_RESULT_LIMIT,
            endpoint_url: endpoint_url.into(),
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.result_limit = if limit == 0 { DEFAULT_RESULT_LIMIT } else { limit };
        self
    }
}

/// Variant identifiers arrive as JSON numbers from most storefronts but are kept
/// in whatever shape they came in so the cart endpoint receives them unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariantId {
    Numeric(u64),
    Text(String),
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantId::Numeric(id) => write!(f, "{}", id),
            VariantId::Text(id) => f.write_str(id),
        }
    }
}

impl From<u64> for VariantId {
    fn from(id: u64) -> Self {
        VariantId::Numeric(id)
    }
}

impl From<&str> for VariantId {
    fn from(id: &str) -> Self {
        VariantId::Text(id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    pub price: u64,
    #[serde(default)]
    pub compare_at_price: Option<u64>,
}

impl Variant {
    /// The "was" price, present only when it is strictly above the current price.
    pub fn effective_compare_price(&self) -> Option<u64> {
        self.compare_at_price.filter(|compare| *compare > self.price)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedProduct {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub featured_image: Option<String>,
    pub variants: Vec<Variant>,
}

impl RecommendedProduct {
    /// The representative variant; every decoded product carries at least one.
    pub fn default_variant(&self) -> Option<&Variant> {
        self.variants.first()
    }
}

/// Body of the recommendation endpoint. `products` may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationsResponse {
    #[serde(default)]
    pub products: Option<Vec<RecommendedProduct>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardControlState {
    Idle,
    Submitting,
    Success,
    /// Transient: the controller restores the control and drops back to `Idle`.
    Failed,
}

impl CardControlState {
    pub fn accepts_clicks(self) -> bool {
        matches!(self, CardControlState::Idle)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: VariantId,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartMutationRequest {
    pub items: Vec<LineItem>,
}

impl CartMutationRequest {
    pub fn single(variant_id: VariantId) -> Self {
        Self {
            items: vec![LineItem {
                id: variant_id,
                quantity: 1,
            }],
        }
    }
}

/// Payload published on the cart-update channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartUpdateEvent {
    pub source: String,
    pub product_variant_id: VariantId,
    pub cart_data: serde_json::Value,
}
