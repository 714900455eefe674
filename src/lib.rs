pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{BroadcastPublisher, ConsoleAlert, HttpStorefront, InMemoryPage};
pub use config::{attributes::HostAttributes, WidgetConfig};
pub use crate::core::add_to_cart::{AddToCartController, ClickOutcome};
pub use crate::core::renderer::SectionState;
pub use crate::core::widget::{ComplementaryProducts, WidgetServices, WidgetSettings};
pub use utils::error::{Result, WidgetError};
