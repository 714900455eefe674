// Adapters layer: concrete implementations of the domain ports.

pub mod alert;
pub mod http;
pub mod notify;
pub mod page;

pub use alert::ConsoleAlert;
pub use http::HttpStorefront;
pub use notify::{BroadcastPublisher, PublishedEvent};
pub use page::InMemoryPage;
