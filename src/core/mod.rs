pub mod add_to_cart;
pub mod card;
pub mod cart_sync;
pub mod loader;
pub mod renderer;
pub mod widget;

pub use crate::domain::model::{AnchorContext, CardControlState, RecommendedProduct, Variant, VariantId};
pub use crate::domain::ports::{
    CartEventPublisher, CartGateway, PageSurface, RecommendationSource, ShopperAlert,
};
pub use crate::utils::error::Result;
