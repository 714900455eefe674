use crate::core::add_to_cart::{CartActions, DEFAULT_EVENT_SOURCE, SUCCESS_COOLDOWN};
use crate::core::card::{CardBuilder, CardHandle, DEFAULT_IMAGE_SIZE};
use crate::core::cart_sync::{CartSurfaceSettings, CartSurfaceSynchronizer};
use crate::core::loader::{LoadOutcome, RecommendationLoader};
use crate::core::renderer::{SectionRenderer, SectionState, WidgetMarkup};
use crate::domain::model::AnchorContext;
use crate::domain::ports::{
    CartEventPublisher, CartGateway, PageSurface, RecommendationSource, ShopperAlert,
};
use crate::utils::money::MoneyFormat;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// External collaborators, injected once at construction.
#[derive(Clone)]
pub struct WidgetServices {
    pub recommendations: Arc<dyn RecommendationSource>,
    pub cart: Arc<dyn CartGateway>,
    pub page: Arc<dyn PageSurface>,
    pub alert: Arc<dyn ShopperAlert>,
    pub publisher: Option<Arc<dyn CartEventPublisher>>,
}

#[derive(Debug, Clone)]
pub struct WidgetSettings {
    pub money_format: MoneyFormat,
    pub image_size: String,
    pub source: String,
    pub cooldown: Duration,
    pub cart_surfaces: CartSurfaceSettings,
    pub markup: WidgetMarkup,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            money_format: MoneyFormat::default(),
            image_size: DEFAULT_IMAGE_SIZE.to_string(),
            source: DEFAULT_EVENT_SOURCE.to_string(),
            cooldown: SUCCESS_COOLDOWN,
            cart_surfaces: CartSurfaceSettings::default(),
            markup: WidgetMarkup::default(),
        }
    }
}

/// The complementary-products widget. Construction does no I/O; `activate` does the loading.
pub struct ComplementaryProducts {
    loader: RecommendationLoader,
    builder: CardBuilder,
    section: Mutex<SectionRenderer>,
}

impl ComplementaryProducts {
    pub fn new(services: WidgetServices, settings: WidgetSettings) -> Self {
        let synchronizer = CartSurfaceSynchronizer::new(
            Arc::clone(&services.cart),
            Arc::clone(&services.page),
            settings.cart_surfaces.clone(),
        );

        let mut actions = CartActions::new(services.cart, services.alert)
            .with_synchronizer(Arc::new(synchronizer));
        if let Some(publisher) = services.publisher {
            actions = actions.with_publisher(publisher);
        }
        actions.source = settings.source;
        actions.cooldown = settings.cooldown;

        Self {
            loader: RecommendationLoader::new(services.recommendations),
            builder: CardBuilder::new(settings.money_format, settings.image_size, Arc::new(actions)),
            section: Mutex::new(SectionRenderer::new(settings.markup)),
        }
    }

    fn section(&self) -> MutexGuard<'_, SectionRenderer> {
        // Renderer state stays consistent even if a holder panicked mid-render.
        self.section.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Loads recommendations for the anchor. Without an anchor product nothing is fetched
    /// and the widget hides.
    pub async fn activate(&self, context: Option<&AnchorContext>) -> SectionState {
        let Some(context) = context else {
            tracing::debug!("No anchor product configured, widget disabled");
            self.section().hide();
            return SectionState::Hidden;
        };

        let outcome = self.loader.load(context).await;

        let mut section = self.section();
        match outcome {
            LoadOutcome::Populate(products) => section.populate(&products, &self.builder),
            LoadOutcome::Hide => section.hide(),
        }
        section.state()
    }

    pub fn state(&self) -> SectionState {
        self.section().state()
    }

    pub fn cards(&self) -> Vec<CardHandle> {
        self.section().cards().to_vec()
    }

    pub fn card(&self, index: usize) -> Option<CardHandle> {
        self.section().cards().get(index).cloned()
    }

    pub fn render_html(&self) -> String {
        self.section().render_html()
    }
}
