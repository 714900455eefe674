use crate::core::add_to_cart::{AddToCartController, CartActions, LOADING_CLASS};
use crate::domain::model::RecommendedProduct;
use crate::utils::html::{escape_html, sized_image_url};
use crate::utils::money::MoneyFormat;
use std::fmt::Write;
use std::sync::Arc;

pub const DEFAULT_IMAGE_SIZE: &str = "200x200";

pub const PLUS_ICON_MARKUP: &str = concat!(
    r#"<span class="svg-wrapper">"#,
    r#"<svg class="icon-plus" aria-hidden="true" focusable="false" role="presentation" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10">"#,
    r#"<path d="M6 4h4v2H6v4H4V6H0V4h4V0h2v4z" fill="currentColor"/>"#,
    r#"</svg></span>"#
);

/// One rendered recommendation plus the controller bound to its add button.
#[derive(Clone)]
pub struct CardHandle {
    pub title: String,
    pub url: String,
    pub image_src: String,
    pub price: String,
    pub compare_price: Option<String>,
    controller: Arc<AddToCartController>,
}

impl CardHandle {
    pub fn controller(&self) -> &Arc<AddToCartController> {
        &self.controller
    }

    pub fn render(&self) -> String {
        let title = escape_html(&self.title);
        let view = self.controller.view();
        let mut html = String::new();

        html.push_str(r#"<div class="cart-complementary__product-card" role="listitem">"#);
        let _ = write!(
            html,
            r#"<img src="{}" alt="{}" class="cart-complementary__product-image" loading="lazy" width="80" height="80" />"#,
            escape_html(&self.image_src),
            title
        );

        html.push_str(r#"<div class="cart-complementary__product-info">"#);
        let _ = write!(
            html,
            r#"<h4 class="cart-complementary__product-title"><a href="{}" class="cart-complementary__product-link">{}</a></h4>"#,
            escape_html(&self.url),
            title
        );
        html.push_str(r#"<div class="cart-complementary__product-price">"#);
        if let Some(compare) = &self.compare_price {
            let _ = write!(
                html,
                r#"<span class="cart-complementary__product-price--compare">{}</span>"#,
                compare
            );
        }
        let _ = write!(
            html,
            r#"<span class="cart-complementary__product-price--current">{}</span>"#,
            self.price
        );
        html.push_str("</div></div>");

        let mut class = String::from("cart-complementary__add-button");
        if view.loading {
            class.push(' ');
            class.push_str(LOADING_CLASS);
        }
        let _ = write!(
            html,
            r#"<button type="button" class="{}" data-variant-id="{}" aria-label="Add {} to cart"{}>{}</button>"#,
            class,
            escape_html(&self.controller.variant_id().to_string()),
            title,
            if view.disabled { " disabled" } else { "" },
            view.content
        );
        html.push_str("</div>");
        html
    }
}

pub struct CardBuilder {
    money: MoneyFormat,
    image_size: String,
    actions: Arc<CartActions>,
}

impl CardBuilder {
    pub fn new(money: MoneyFormat, image_size: impl Into<String>, actions: Arc<CartActions>) -> Self {
        Self {
            money,
            image_size: image_size.into(),
            actions,
        }
    }

    /// Builds a card from the product's first variant. Products without variants yield nothing.
    pub fn build(&self, product: &RecommendedProduct) -> Option<CardHandle> {
        let variant = product.default_variant()?;

        let image_src = product
            .featured_image
            .as_deref()
            .filter(|url| !url.is_empty())
            .map(|url| sized_image_url(url, &self.image_size))
            .unwrap_or_default();

        let controller = AddToCartController::new(
            variant.id.clone(),
            product.title.clone(),
            PLUS_ICON_MARKUP,
            Arc::clone(&self.actions),
        );

        Some(CardHandle {
            title: product.title.clone(),
            url: product.url.clone(),
            image_src,
            price: self.money.format(variant.price),
            compare_price: variant
                .effective_compare_price()
                .map(|compare| self.money.format(compare)),
            controller: Arc::new(controller),
        })
    }
}
