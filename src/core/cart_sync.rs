use crate::domain::ports::{CartGateway, PageSurface};
use crate::utils::error::{Result, WidgetError};
use scraper::{Html, Selector};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSurfaceSettings {
    pub section_id: String,
    /// The drawer element whose presence enables the refresh at all.
    pub drawer_element: String,
    pub drawer_selector: String,
    pub icon_selector: String,
}

impl Default for CartSurfaceSettings {
    fn default() -> Self {
        Self {
            section_id: "cart-drawer".to_string(),
            drawer_element: "cart-drawer".to_string(),
            drawer_selector: ".drawer__inner".to_string(),
            icon_selector: "#cart-icon-bubble".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub drawer_replaced: bool,
    pub icon_replaced: bool,
}

/// Refreshes the cart drawer and icon bubble after a successful add.
pub struct CartSurfaceSynchronizer {
    cart: Arc<dyn CartGateway>,
    page: Arc<dyn PageSurface>,
    settings: CartSurfaceSettings,
}

impl CartSurfaceSynchronizer {
    pub fn new(
        cart: Arc<dyn CartGateway>,
        page: Arc<dyn PageSurface>,
        settings: CartSurfaceSettings,
    ) -> Self {
        Self {
            cart,
            page,
            settings,
        }
    }

    /// Never fails: the item is already in the cart, so a stale drawer is only logged.
    pub async fn sync(&self) -> SyncReport {
        if !self.page.contains(&self.settings.drawer_element) {
            tracing::debug!("No cart drawer on the page, skipping surface refresh");
            return SyncReport::default();
        }

        match self.refresh().await {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!("Cart surface refresh failed: {}", e);
                SyncReport::default()
            }
        }
    }

    async fn refresh(&self) -> Result<SyncReport> {
        let html = self.cart.fetch_section(&self.settings.section_id).await?;
        let (drawer, icon) = extract_fragments(
            &html,
            &self.settings.drawer_selector,
            &self.settings.icon_selector,
        )?;

        let report = SyncReport {
            drawer_replaced: self.splice(&self.settings.drawer_selector, drawer),
            icon_replaced: self.splice(&self.settings.icon_selector, icon),
        };
        tracing::debug!(?report, "Cart surfaces refreshed");
        Ok(report)
    }

    fn splice(&self, selector: &str, fragment: Option<String>) -> bool {
        match fragment {
            Some(inner) => self.page.replace_inner_html(selector, &inner),
            None => {
                tracing::debug!(selector, "Fragment missing from section snapshot");
                false
            }
        }
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| WidgetError::SelectorError {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// Pulls the inner HTML of the drawer and icon fragments out of a section snapshot.
pub fn extract_fragments(
    html: &str,
    drawer_selector: &str,
    icon_selector: &str,
) -> Result<(Option<String>, Option<String>)> {
    let drawer = parse_selector(drawer_selector)?;
    let icon = parse_selector(icon_selector)?;
    let document = Html::parse_document(html);

    let inner = |selector: &Selector| document.select(selector).next().map(|el| el.inner_html());
    Ok((inner(&drawer), inner(&icon)))
}
