use async_trait::async_trait;
use complementary_cart::core::add_to_cart::{ADD_TO_CART_ERROR, CHECKMARK_MARKUP, SPINNER_MARKUP};
use complementary_cart::core::card::PLUS_ICON_MARKUP;
use complementary_cart::core::{CardControlState, CartGateway, RecommendationSource, ShopperAlert};
use complementary_cart::domain::model::{AnchorContext, CartMutationRequest, RecommendedProduct, Variant, VariantId};
use complementary_cart::domain::ports::CART_UPDATE_EVENT;
use complementary_cart::{
    BroadcastPublisher, ClickOutcome, ComplementaryProducts, InMemoryPage, SectionState,
    WidgetError, WidgetServices, WidgetSettings,
};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const SNAPSHOT: &str = r#"<div id="shopify-section-cart-drawer">
<cart-drawer><div class="drawer__inner"><p>Ceramic Mug</p></div></cart-drawer>
<a id="cart-icon-bubble"><span>1</span></a>
</div>"#;

struct MockStorefront {
    products: Mutex<Vec<RecommendedProduct>>,
    fail_add: bool,
    fail_section: bool,
    add_calls: AtomicUsize,
    section_calls: AtomicUsize,
    last_request: Mutex<Option<CartMutationRequest>>,
}

impl MockStorefront {
    fn new(products: Vec<RecommendedProduct>) -> Self {
        Self {
            products: Mutex::new(products),
            fail_add: false,
            fail_section: false,
            add_calls: AtomicUsize::new(0),
            section_calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }
}

#[async_trait]
impl RecommendationSource for MockStorefront {
    async fn fetch_recommendations(
        &self,
        _context: &AnchorContext,
    ) -> complementary_cart::Result<Vec<RecommendedProduct>> {
        Ok(self.products.lock().unwrap().clone())
    }
}

#[async_trait]
impl CartGateway for MockStorefront {
    async fn add_items(&self, request: &CartMutationRequest) -> complementary_cart::Result<serde_json::Value> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        tokio::task::yield_now().await;
        if self.fail_add {
            return Err(WidgetError::StatusError {
                url: "/cart/add.js".to_string(),
                status: 500,
            });
        }
        Ok(json!({"item_count": 1, "items": [{"id": 101}]}))
    }

    async fn fetch_section(&self, _section_id: &str) -> complementary_cart::Result<String> {
        self.section_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_section {
            return Err(WidgetError::MalformedResponse {
                message: "snapshot unavailable".to_string(),
            });
        }
        Ok(SNAPSHOT.to_string())
    }
}

#[derive(Default)]
struct RecordingAlert {
    messages: Mutex<Vec<String>>,
}

impl ShopperAlert for RecordingAlert {
    fn alert(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

fn product(title: &str, variant_id: u64) -> RecommendedProduct {
    RecommendedProduct {
        title: title.to_string(),
        url: format!("/products/{}", title.to_lowercase()),
        featured_image: Some(format!("//cdn.shop.com/{}.jpg", title.to_lowercase())),
        variants: vec![Variant {
            id: VariantId::Numeric(variant_id),
            price: 1999,
            compare_at_price: Some(2999),
        }],
    }
}

fn drawer_page() -> Arc<InMemoryPage> {
    Arc::new(
        InMemoryPage::new()
            .with_region("cart-drawer", "")
            .with_region(".drawer__inner", "<p>empty</p>")
            .with_region("#cart-icon-bubble", "<span>0</span>"),
    )
}

struct Harness {
    widget: ComplementaryProducts,
    storefront: Arc<MockStorefront>,
    alert: Arc<RecordingAlert>,
    page: Arc<InMemoryPage>,
}

fn harness(
    storefront: MockStorefront,
    page: Arc<InMemoryPage>,
    publisher: Option<BroadcastPublisher>,
) -> Harness {
    let storefront = Arc::new(storefront);
    let alert = Arc::new(RecordingAlert::default());
    let widget = ComplementaryProducts::new(
        WidgetServices {
            recommendations: storefront.clone(),
            cart: storefront.clone(),
            page: page.clone(),
            alert: alert.clone(),
            publisher: publisher.map(|p| Arc::new(p) as Arc<dyn complementary_cart::core::CartEventPublisher>),
        },
        WidgetSettings::default(),
    );
    Harness {
        widget,
        storefront,
        alert,
        page,
    }
}

fn context() -> AnchorContext {
    AnchorContext::new("8812", "/recommendations/products.json")
}

#[tokio::test(start_paused = true)]
async fn test_success_returns_to_idle_after_exact_cooldown() {
    let publisher = BroadcastPublisher::new(4);
    let mut events = publisher.subscribe();
    let h = harness(
        MockStorefront::new(vec![product("Mug", 101)]),
        drawer_page(),
        Some(publisher),
    );
    assert_eq!(h.widget.activate(Some(&context())).await, SectionState::Populated);

    let card = h.widget.card(0).unwrap();
    let controller = card.controller().clone();
    let before = controller.view();
    assert_eq!(before.content, PLUS_ICON_MARKUP);

    let mut states = controller.subscribe();
    let started = tokio::time::Instant::now();
    let click = tokio::spawn({
        let controller = controller.clone();
        async move { controller.activate().await }
    });

    states
        .wait_for(|state| *state == CardControlState::Success)
        .await
        .unwrap();
    let success_view = controller.view();
    assert!(success_view.disabled);
    assert_eq!(success_view.content, CHECKMARK_MARKUP);
    assert!(card.render().contains(" disabled"));

    assert_eq!(click.await.unwrap(), ClickOutcome::Added);
    assert_eq!(started.elapsed().as_millis(), 1500);
    assert_eq!(controller.state(), CardControlState::Idle);
    assert_eq!(controller.view(), before);

    let sent = h.storefront.last_request.lock().unwrap().clone().unwrap();
    assert_eq!(
        serde_json::to_value(sent).unwrap(),
        json!({"items": [{"id": 101, "quantity": 1}]})
    );

    let event = events.recv().await.unwrap();
    assert_eq!(event.name, CART_UPDATE_EVENT);
    assert_eq!(event.payload.source, "cart-complementary-products");
    assert_eq!(event.payload.product_variant_id, VariantId::Numeric(101));
    assert_eq!(event.payload.cart_data["item_count"], json!(1));

    assert_eq!(h.page.inner_html(".drawer__inner").as_deref(), Some("<p>Ceramic Mug</p>"));
    assert_eq!(h.page.inner_html("#cart-icon-bubble").as_deref(), Some("<span>1</span>"));
    assert!(h.alert.messages.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_click_while_submitting_sends_one_request() {
    let h = harness(MockStorefront::new(vec![product("Mug", 101)]), drawer_page(), None);
    h.widget.activate(Some(&context())).await;
    let controller = h.widget.card(0).unwrap().controller().clone();

    // join! polls the first click first, so the second one lands mid-request.
    let (first, second) = tokio::join!(controller.activate(), async {
        assert_eq!(controller.view().content, SPINNER_MARKUP);
        controller.activate().await
    });

    assert_eq!(first, ClickOutcome::Added);
    assert_eq!(second, ClickOutcome::Ignored);
    assert_eq!(h.storefront.add_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_click_during_cooldown_is_ignored() {
    let h = harness(MockStorefront::new(vec![product("Mug", 101)]), drawer_page(), None);
    h.widget.activate(Some(&context())).await;
    let controller = h.widget.card(0).unwrap().controller().clone();

    let (first, second) = tokio::join!(controller.activate(), async {
        tokio::time::sleep(Duration::from_millis(500)).await;
        controller.activate().await
    });

    assert_eq!(first, ClickOutcome::Added);
    assert_eq!(second, ClickOutcome::Ignored);
    assert_eq!(h.storefront.add_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_failure_reenables_without_cooldown_and_alerts_once() {
    let mut storefront = MockStorefront::new(vec![product("Mug", 101)]);
    storefront.fail_add = true;
    let h = harness(storefront, drawer_page(), None);
    h.widget.activate(Some(&context())).await;
    let controller = h.widget.card(0).unwrap().controller().clone();

    let started = tokio::time::Instant::now();
    assert_eq!(controller.activate().await, ClickOutcome::Failed);
    assert_eq!(started.elapsed(), Duration::ZERO);

    let view = controller.view();
    assert!(!view.disabled);
    assert!(!view.loading);
    assert_eq!(view.content, PLUS_ICON_MARKUP);
    assert_eq!(*h.alert.messages.lock().unwrap(), vec![ADD_TO_CART_ERROR.to_string()]);
    assert_eq!(h.storefront.section_calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.page.inner_html("#cart-icon-bubble").as_deref(), Some("<span>0</span>"));

    // The control is usable again straight away.
    assert_eq!(controller.activate().await, ClickOutcome::Failed);
    assert_eq!(h.storefront.add_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_surface_refresh_failure_keeps_success() {
    let mut storefront = MockStorefront::new(vec![product("Mug", 101)]);
    storefront.fail_section = true;
    let h = harness(storefront, drawer_page(), None);
    h.widget.activate(Some(&context())).await;

    let outcome = h.widget.card(0).unwrap().controller().activate().await;

    assert_eq!(outcome, ClickOutcome::Added);
    assert_eq!(h.storefront.section_calls.load(Ordering::SeqCst), 1);
    assert!(h.alert.messages.lock().unwrap().is_empty());
    assert_eq!(h.page.inner_html(".drawer__inner").as_deref(), Some("<p>empty</p>"));
}

#[tokio::test(start_paused = true)]
async fn test_no_drawer_skips_surface_refresh() {
    let page = Arc::new(InMemoryPage::new().with_region("#cart-icon-bubble", "<span>0</span>"));
    let h = harness(MockStorefront::new(vec![product("Mug", 101)]), page, None);
    h.widget.activate(Some(&context())).await;

    let outcome = h.widget.card(0).unwrap().controller().activate().await;

    assert_eq!(outcome, ClickOutcome::Added);
    assert_eq!(h.storefront.section_calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.page.inner_html("#cart-icon-bubble").as_deref(), Some("<span>0</span>"));
}

#[tokio::test(start_paused = true)]
async fn test_cards_are_independent() {
    let h = harness(
        MockStorefront::new(vec![product("Mug", 101), product("Saucer", 202)]),
        drawer_page(),
        None,
    );
    h.widget.activate(Some(&context())).await;
    let first = h.widget.card(0).unwrap().controller().clone();
    let second = h.widget.card(1).unwrap().controller().clone();

    let (a, b) = tokio::join!(first.activate(), second.activate());

    assert_eq!(a, ClickOutcome::Added);
    assert_eq!(b, ClickOutcome::Added);
    assert_eq!(h.storefront.add_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_reload_replaces_cards() {
    let h = harness(
        MockStorefront::new(vec![product("Mug", 101), product("Saucer", 202)]),
        drawer_page(),
        None,
    );
    h.widget.activate(Some(&context())).await;
    assert_eq!(h.widget.cards().len(), 2);

    *h.storefront.products.lock().unwrap() = vec![product("Teapot", 303)];
    assert_eq!(h.widget.activate(Some(&context())).await, SectionState::Populated);

    let cards = h.widget.cards();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].title, "Teapot");
    assert_eq!(h.widget.render_html().matches("cart-complementary__product-card").count(), 1);
}

#[tokio::test]
async fn test_missing_anchor_never_loads() {
    let h = harness(MockStorefront::new(vec![product("Mug", 101)]), drawer_page(), None);

    assert_eq!(h.widget.activate(None).await, SectionState::Hidden);
    assert!(h.widget.cards().is_empty());
}

#[tokio::test]
async fn test_variantless_products_hide_section() {
    let mut bare = product("Mug", 101);
    bare.variants.clear();
    let h = harness(MockStorefront::new(vec![bare]), drawer_page(), None);

    assert_eq!(h.widget.activate(Some(&context())).await, SectionState::Hidden);
    assert!(h.widget.cards().is_empty());

    let html = h.widget.render_html();
    assert!(html.contains("cart-complementary hidden"));
    assert!(!html.contains("loaded"));
}

#[tokio::test]
async fn test_reload_with_only_variantless_products_hides_previous_cards() {
    let h = harness(MockStorefront::new(vec![product("Mug", 101)]), drawer_page(), None);
    assert_eq!(h.widget.activate(Some(&context())).await, SectionState::Populated);

    let mut bare = product("Saucer", 202);
    bare.variants.clear();
    *h.storefront.products.lock().unwrap() = vec![bare];

    assert_eq!(h.widget.activate(Some(&context())).await, SectionState::Hidden);
    assert!(h.widget.cards().is_empty());
}
