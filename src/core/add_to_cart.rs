use crate::core::cart_sync::CartSurfaceSynchronizer;
use crate::domain::model::{CardControlState, CartMutationRequest, CartUpdateEvent, VariantId};
use crate::domain::ports::{CartEventPublisher, CartGateway, ShopperAlert, CART_UPDATE_EVENT};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

pub const SUCCESS_COOLDOWN: Duration = Duration::from_millis(1500);
pub const DEFAULT_EVENT_SOURCE: &str = "cart-complementary-products";
pub const ADD_TO_CART_ERROR: &str =
    "Sorry, there was an error adding this item to your cart. Please try again.";

pub const LOADING_CLASS: &str = "cart-complementary__add-button--loading";

pub const SPINNER_MARKUP: &str = concat!(
    r#"<div class="loading__spinner">"#,
    r#"<svg aria-hidden="true" focusable="false" role="presentation" class="spinner" viewBox="0 0 66 66" xmlns="http://www.w3.org/2000/svg">"#,
    r#"<circle class="path" fill="none" stroke-width="6" cx="33" cy="33" r="30"></circle>"#,
    r#"</svg></div>"#
);

pub const CHECKMARK_MARKUP: &str = concat!(
    r#"<svg class="icon-checkmark" aria-hidden="true" focusable="false" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 12 9" fill="none">"#,
    r#"<path d="M1 4.5L4 7.5L11 1" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/>"#,
    r#"</svg>"#
);

/// Collaborators shared by every card's controller.
pub struct CartActions {
    pub cart: Arc<dyn CartGateway>,
    pub alert: Arc<dyn ShopperAlert>,
    pub publisher: Option<Arc<dyn CartEventPublisher>>,
    pub synchronizer: Option<Arc<CartSurfaceSynchronizer>>,
    pub source: String,
    pub cooldown: Duration,
}

impl CartActions {
    pub fn new(cart: Arc<dyn CartGateway>, alert: Arc<dyn ShopperAlert>) -> Self {
        Self {
            cart,
            alert,
            publisher: None,
            synchronizer: None,
            source: DEFAULT_EVENT_SOURCE.to_string(),
            cooldown: SUCCESS_COOLDOWN,
        }
    }

    pub fn with_publisher(mut self, publisher: Arc<dyn CartEventPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn with_synchronizer(mut self, synchronizer: Arc<CartSurfaceSynchronizer>) -> Self {
        self.synchronizer = Some(synchronizer);
        self
    }

    fn after_success(&self, variant_id: &VariantId, cart_data: serde_json::Value) {
        if let Some(synchronizer) = &self.synchronizer {
            let synchronizer = Arc::clone(synchronizer);
            tokio::spawn(async move {
                synchronizer.sync().await;
            });
        }

        match &self.publisher {
            Some(publisher) => {
                let event = CartUpdateEvent {
                    source: self.source.clone(),
                    product_variant_id: variant_id.clone(),
                    cart_data,
                };
                publisher.publish(CART_UPDATE_EVENT, &event);
            }
            None => tracing::debug!("No cart event publisher configured, skipping notification"),
        }
    }
}

/// What the add button looks like; derived from the state, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlView {
    pub disabled: bool,
    pub loading: bool,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The control was busy; nothing was sent.
    Ignored,
    Added,
    Failed,
}

pub struct AddToCartController {
    variant_id: VariantId,
    product_title: String,
    idle_content: String,
    state: watch::Sender<CardControlState>,
    actions: Arc<CartActions>,
}

impl AddToCartController {
    pub fn new(
        variant_id: VariantId,
        product_title: impl Into<String>,
        idle_content: impl Into<String>,
        actions: Arc<CartActions>,
    ) -> Self {
        let (state, _) = watch::channel(CardControlState::Idle);
        Self {
            variant_id,
            product_title: product_title.into(),
            idle_content: idle_content.into(),
            state,
            actions,
        }
    }

    pub fn variant_id(&self) -> &VariantId {
        &self.variant_id
    }

    pub fn product_title(&self) -> &str {
        &self.product_title
    }

    pub fn state(&self) -> CardControlState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<CardControlState> {
        self.state.subscribe()
    }

    pub fn view(&self) -> ControlView {
        let content = match self.state() {
            CardControlState::Idle | CardControlState::Failed => self.idle_content.clone(),
            CardControlState::Submitting => SPINNER_MARKUP.to_string(),
            CardControlState::Success => CHECKMARK_MARKUP.to_string(),
        };
        let busy = !self.state().accepts_clicks();
        ControlView {
            disabled: busy,
            loading: busy,
            content,
        }
    }

    /// Runs one click through the whole lifecycle, returning once the control is idle again.
    pub async fn activate(&self) -> ClickOutcome {
        let claimed = self.state.send_if_modified(|state| {
            if state.accepts_clicks() {
                *state = CardControlState::Submitting;
                true
            } else {
                false
            }
        });
        if !claimed {
            tracing::debug!(variant = %self.variant_id, "Add button busy, ignoring click");
            return ClickOutcome::Ignored;
        }

        tracing::debug!(variant = %self.variant_id, title = %self.product_title, "Adding to cart");
        let request = CartMutationRequest::single(self.variant_id.clone());

        match self.actions.cart.add_items(&request).await {
            Ok(cart_data) => {
                self.state.send_replace(CardControlState::Success);
                tracing::info!(variant = %self.variant_id, "Added to cart");
                self.actions.after_success(&self.variant_id, cart_data);

                tokio::time::sleep(self.actions.cooldown).await;
                self.state.send_replace(CardControlState::Idle);
                ClickOutcome::Added
            }
            Err(e) => {
                tracing::error!(variant = %self.variant_id, "Error adding to cart: {}", e);
                self.state.send_replace(CardControlState::Failed);
                self.state.send_replace(CardControlState::Idle);
                self.actions.alert.alert(ADD_TO_CART_ERROR);
                ClickOutcome::Failed
            }
        }
    }
}
