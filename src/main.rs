use anyhow::Context;
use clap::Parser;
use complementary_cart::core::cart_sync::CartSurfaceSettings;
use complementary_cart::utils::{logger, validation::Validate};
use complementary_cart::{
    BroadcastPublisher, ClickOutcome, ComplementaryProducts, ConsoleAlert, HttpStorefront,
    InMemoryPage, SectionState, WidgetConfig, WidgetServices,
};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "complementary-cart")]
#[command(about = "Load complementary products for a cart and add them in place")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "widget.toml")]
    config: String,

    /// Override the anchor product id from config
    #[arg(long)]
    product_id: Option<String>,

    /// Override the result limit from config
    #[arg(long)]
    limit: Option<usize>,

    /// Add the card at this position to the cart after loading
    #[arg(long)]
    add: Option<usize>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn page_for(settings: &CartSurfaceSettings) -> InMemoryPage {
    InMemoryPage::new()
        .with_region(settings.drawer_element.clone(), "")
        .with_region(settings.drawer_selector.clone(), "")
        .with_region(settings.icon_selector.clone(), "")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("📁 Loading configuration from: {}", args.config);
    let mut config = match WidgetConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 命令列參數覆寫配置
    if let Some(product_id) = args.product_id {
        tracing::info!("🔧 Anchor product overridden to: {}", product_id);
        config.widget.product_id = Some(product_id);
    }
    if let Some(limit) = args.limit {
        config.widget.limit = limit;
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let settings = config.widget_settings();
    let storefront = Arc::new(HttpStorefront::new(config.routes_root()?)?);
    let page = Arc::new(page_for(&settings.cart_surfaces));
    let publisher = BroadcastPublisher::new(16);

    // 訂閱購物車更新事件並輸出到日誌
    let mut events = publisher.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            tracing::info!(
                "📣 {} from {} (variant {})",
                event.name,
                event.payload.source,
                event.payload.product_variant_id
            );
        }
    });

    let widget = ComplementaryProducts::new(
        WidgetServices {
            recommendations: storefront.clone(),
            cart: storefront,
            page: page.clone(),
            alert: Arc::new(ConsoleAlert),
            publisher: Some(Arc::new(publisher)),
        },
        settings.clone(),
    );

    let context = config.anchor_context()?;
    let state = widget.activate(context.as_ref()).await;
    tracing::info!("Widget state after activation: {:?}", state);
    println!("{}", widget.render_html());

    let Some(index) = args.add else {
        return Ok(());
    };
    if state != SectionState::Populated {
        anyhow::bail!("no cards rendered, nothing to add");
    }

    let card = widget
        .card(index)
        .with_context(|| format!("no card at position {}", index))?;
    match card.controller().activate().await {
        ClickOutcome::Added => {
            println!("✅ Added '{}' to cart", card.title);
            let surfaces = [
                &settings.cart_surfaces.drawer_selector,
                &settings.cart_surfaces.icon_selector,
            ];
            for selector in surfaces {
                println!("{}: {}", selector, page.inner_html(selector).unwrap_or_default());
            }
        }
        ClickOutcome::Failed => std::process::exit(2),
        ClickOutcome::Ignored => tracing::warn!("Add button was busy"),
    }

    Ok(())
}
