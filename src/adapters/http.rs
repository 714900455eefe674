use crate::domain::model::{AnchorContext, CartMutationRequest, RecommendationsResponse, RecommendedProduct};
use crate::domain::ports::{CartGateway, RecommendationSource};
use crate::utils::error::{Result, WidgetError};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Response};
use url::Url;

/// Storefront AJAX endpoints, all resolved against the shop's routes root.
#[derive(Debug, Clone)]
pub struct HttpStorefront {
    client: Client,
    routes_root: Url,
}

impl HttpStorefront {
    pub fn new(routes_root: &str) -> Result<Self> {
        Self::with_client(Client::new(), routes_root)
    }

    pub fn with_client(client: Client, routes_root: &str) -> Result<Self> {
        let mut root = Url::parse(routes_root).map_err(|e| WidgetError::InvalidConfigValueError {
            field: "storefront.routes_root".to_string(),
            value: routes_root.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        // 確保路徑以 / 結尾，否則 join 會取代最後一段
        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }
        Ok(Self {
            client,
            routes_root: root,
        })
    }

    pub fn routes_root(&self) -> &Url {
        &self.routes_root
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.routes_root
            .join(path)
            .map_err(|e| WidgetError::ConfigError {
                message: format!("Cannot resolve '{}' against {}: {}", path, self.routes_root, e),
            })
    }

    /// The host URL, with `product_id` and `limit` added when it does not carry them already.
    pub fn recommendations_url(&self, context: &AnchorContext) -> Result<Url> {
        let mut url = self.endpoint(&context.endpoint_url)?;
        let has_product = url.query_pairs().any(|(key, _)| key == "product_id");
        let has_limit = url.query_pairs().any(|(key, _)| key == "limit");

        if !has_product || !has_limit {
            let mut pairs = url.query_pairs_mut();
            if !has_product {
                pairs.append_pair("product_id", &context.product_id);
            }
            if !has_limit {
                pairs.append_pair("limit", &context.result_limit.to_string());
            }
        }
        Ok(url)
    }

    pub fn section_url(&self, section_id: &str) -> Url {
        let mut url = self.routes_root.clone();
        url.query_pairs_mut().append_pair("section_id", section_id);
        url
    }
}

fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    tracing::debug!("Response status {} from {}", status, response.url());
    if status.is_success() {
        Ok(response)
    } else {
        Err(WidgetError::StatusError {
            url: response.url().to_string(),
            status: status.as_u16(),
        })
    }
}

#[async_trait]
impl RecommendationSource for HttpStorefront {
    async fn fetch_recommendations(&self, context: &AnchorContext) -> Result<Vec<RecommendedProduct>> {
        let url = self.recommendations_url(context)?;
        tracing::debug!("Requesting recommendations from: {}", url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let body = ensure_success(response)?.bytes().await?;
        let parsed: RecommendationsResponse = serde_json::from_slice(&body)?;

        let products = parsed.products.unwrap_or_default();
        if let Some(product) = products.iter().find(|p| p.variants.is_empty()) {
            return Err(WidgetError::MalformedResponse {
                message: format!("product '{}' has no variants", product.title),
            });
        }
        Ok(products)
    }
}

#[async_trait]
impl CartGateway for HttpStorefront {
    async fn add_items(&self, request: &CartMutationRequest) -> Result<serde_json::Value> {
        let url = self.endpoint("cart/add.js")?;
        tracing::debug!("Posting {} line item(s) to {}", request.items.len(), url);

        let response = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;
        let body = ensure_success(response)?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn fetch_section(&self, section_id: &str) -> Result<String> {
        let url = self.section_url(section_id);
        tracing::debug!("Fetching section snapshot: {}", url);

        let response = self.client.get(url).send().await?;
        Ok(ensure_success(response)?.text().await?)
    }
}
