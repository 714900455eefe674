use crate::core::card::{CardBuilder, CardHandle};
use crate::domain::model::RecommendedProduct;

/// Which elements the host markup provides inside the widget root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetMarkup {
    pub has_container: bool,
    pub has_loading_indicator: bool,
}

impl Default for WidgetMarkup {
    fn default() -> Self {
        Self {
            has_container: true,
            has_loading_indicator: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionState {
    Loading,
    Populated,
    Hidden,
}

pub struct SectionRenderer {
    markup: WidgetMarkup,
    state: SectionState,
    loading_hidden: bool,
    loaded: bool,
    cards: Vec<CardHandle>,
}

impl SectionRenderer {
    pub fn new(markup: WidgetMarkup) -> Self {
        Self {
            markup,
            state: SectionState::Loading,
            loading_hidden: false,
            loaded: false,
            cards: Vec::new(),
        }
    }

    pub fn state(&self) -> SectionState {
        self.state
    }

    pub fn cards(&self) -> &[CardHandle] {
        &self.cards
    }

    pub fn populate(&mut self, products: &[RecommendedProduct], builder: &CardBuilder) {
        if !self.markup.has_container {
            tracing::debug!("Product container missing from markup, nothing to populate");
            return;
        }

        // Dropping the old handles drops their controllers with them.
        self.cards.clear();
        self.loading_hidden = true;

        for product in products {
            match builder.build(product) {
                Some(card) => self.cards.push(card),
                None => tracing::warn!(title = %product.title, "Skipping product without variants"),
            }
        }

        // 沒有可顯示的卡片時隱藏整個區塊
        if self.cards.is_empty() {
            tracing::warn!("No renderable complementary products, hiding section");
            self.loaded = false;
            self.hide();
            return;
        }

        self.loaded = true;
        self.state = SectionState::Populated;
    }

    pub fn hide(&mut self) {
        self.state = SectionState::Hidden;
    }

    pub fn render_html(&self) -> String {
        let mut class = String::from("cart-complementary");
        if self.state == SectionState::Hidden {
            class.push_str(" hidden");
        }

        let mut html = format!(r#"<cart-complementary-products class="{}">"#, class);
        if self.markup.has_loading_indicator {
            html.push_str(if self.loading_hidden {
                r#"<div class="cart-complementary__loading hidden"></div>"#
            } else {
                r#"<div class="cart-complementary__loading"></div>"#
            });
        }
        if self.markup.has_container {
            html.push_str(if self.loaded {
                r#"<div class="cart-complementary__products loaded" role="list">"#
            } else {
                r#"<div class="cart-complementary__products" role="list">"#
            });
            for card in &self.cards {
                html.push_str(&card.render());
            }
            html.push_str("</div>");
        }
        html.push_str("</cart-complementary-products>");
        html
    }
}
