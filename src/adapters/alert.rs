use crate::domain::ports::ShopperAlert;

/// Shows shopper-facing errors on stderr for terminal use.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleAlert;

impl ShopperAlert for ConsoleAlert {
    fn alert(&self, message: &str) {
        tracing::warn!("Shopper alert: {}", message);
        eprintln!("❌ {}", message);
    }
}
