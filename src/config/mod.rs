pub mod attributes;

use crate::core::cart_sync::CartSurfaceSettings;
use crate::core::widget::WidgetSettings;
use crate::domain::model::{AnchorContext, DEFAULT_RESULT_LIMIT};
use crate::utils::error::{Result, WidgetError};
use crate::utils::money::{MoneyFormat, DEFAULT_MONEY_FORMAT};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    pub storefront: StorefrontConfig,
    #[serde(default)]
    pub widget: WidgetSection,
    #[serde(default)]
    pub cart: CartSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Base for `cart/add.js` and section snapshots. Required; there is no fallback.
    pub routes_root: Option<String>,
    pub recommendations_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetSection {
    pub product_id: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default = "default_money_format")]
    pub money_format: String,
    #[serde(default = "default_image_size")]
    pub image_size: String,
    #[serde(default = "default_source")]
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSection {
    #[serde(default = "default_section_id")]
    pub section_id: String,
    #[serde(default = "default_drawer_element")]
    pub drawer_element: String,
    #[serde(default = "default_drawer_selector")]
    pub drawer_selector: String,
    #[serde(default = "default_icon_selector")]
    pub icon_selector: String,
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
}

fn default_limit() -> usize {
    DEFAULT_RESULT_LIMIT
}

fn default_money_format() -> String {
    DEFAULT_MONEY_FORMAT.to_string()
}

fn default_image_size() -> String {
    crate::core::card::DEFAULT_IMAGE_SIZE.to_string()
}

fn default_source() -> String {
    crate::core::add_to_cart::DEFAULT_EVENT_SOURCE.to_string()
}

fn default_section_id() -> String {
    CartSurfaceSettings::default().section_id
}

fn default_drawer_element() -> String {
    CartSurfaceSettings::default().drawer_element
}

fn default_drawer_selector() -> String {
    CartSurfaceSettings::default().drawer_selector
}

fn default_icon_selector() -> String {
    CartSurfaceSettings::default().icon_selector
}

fn default_cooldown_ms() -> u64 {
    crate::core::add_to_cart::SUCCESS_COOLDOWN.as_millis() as u64
}

impl Default for WidgetSection {
    fn default() -> Self {
        Self {
            product_id: None,
            limit: default_limit(),
            money_format: default_money_format(),
            image_size: default_image_size(),
            source: default_source(),
        }
    }
}

impl Default for CartSection {
    fn default() -> Self {
        Self {
            section_id: default_section_id(),
            drawer_element: default_drawer_element(),
            drawer_selector: default_drawer_selector(),
            icon_selector: default_icon_selector(),
            cooldown_ms: default_cooldown_ms(),
        }
    }
}

impl WidgetConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(WidgetError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| WidgetError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| {
            WidgetError::ConfigError {
                message: format!("env substitution pattern: {}", e),
            }
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn routes_root(&self) -> Result<&str> {
        validation::validate_required_field("storefront.routes_root", &self.storefront.routes_root)
            .map(String::as_str)
    }

    pub fn recommendations_url(&self) -> Result<&str> {
        validation::validate_required_field(
            "storefront.recommendations_url",
            &self.storefront.recommendations_url,
        )
        .map(String::as_str)
    }

    /// The anchor context, or `None` when no product id is configured.
    pub fn anchor_context(&self) -> Result<Option<AnchorContext>> {
        let product_id = match self.widget.product_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id,
            _ => return Ok(None),
        };
        Ok(Some(
            AnchorContext::new(product_id, self.recommendations_url()?).with_limit(self.widget.limit),
        ))
    }

    pub fn widget_settings(&self) -> WidgetSettings {
        WidgetSettings {
            money_format: MoneyFormat::new(self.widget.money_format.clone()),
            image_size: self.widget.image_size.clone(),
            source: self.widget.source.clone(),
            cooldown: Duration::from_millis(self.cart.cooldown_ms),
            cart_surfaces: CartSurfaceSettings {
                section_id: self.cart.section_id.clone(),
                drawer_element: self.cart.drawer_element.clone(),
                drawer_selector: self.cart.drawer_selector.clone(),
                icon_selector: self.cart.icon_selector.clone(),
            },
            ..WidgetSettings::default()
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        // 驗證商店端點
        validation::validate_url("storefront.routes_root", self.routes_root()?)?;
        validation::validate_url("storefront.recommendations_url", self.recommendations_url()?)?;
        // 驗證推薦數量與金額格式
        validation::validate_positive_number("widget.limit", self.widget.limit, 1)?;
        MoneyFormat::new(self.widget.money_format.clone()).validate("widget.money_format")?;
        validation::validate_non_empty_string("widget.image_size", &self.widget.image_size)?;
        // 驗證購物車區塊與選擇器
        validation::validate_non_empty_string("cart.section_id", &self.cart.section_id)?;
        validation::validate_selector("cart.drawer_element", &self.cart.drawer_element)?;
        validation::validate_selector("cart.drawer_selector", &self.cart.drawer_selector)?;
        validation::validate_selector("cart.icon_selector", &self.cart.icon_selector)?;
        validation::validate_range("cart.cooldown_ms", self.cart.cooldown_ms, 0, 60_000)?;
        Ok(())
    }
}

impl Validate for WidgetConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
