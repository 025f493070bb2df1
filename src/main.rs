//! Recent Sidebar console demo.
//!
//! Records a few product views, opens the sidebar, prints its HTML, then
//! closes it with Escape. Pass `--persist` to use the on-disk database in the
//! platform data directory instead of an in-memory one.

use std::rc::Rc;

use recent_sidebar::app::App;
use recent_sidebar::managers::clock::SystemClock;
use recent_sidebar::managers::recent_products_store::RecentProductsStoreTrait;
use recent_sidebar::platform;
use recent_sidebar::types::product::NewViewedProduct;
use recent_sidebar::types::settings::SidebarSettings;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  📦 {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let persist = std::env::args().any(|arg| arg == "--persist");
    let mut app = if persist {
        App::new(&platform::default_storage_path(), None)?
    } else {
        App::in_memory(SidebarSettings::default(), Rc::new(SystemClock))?
    };

    section("Recording product views");
    let catalog = [
        ("101", "울 블렌드 코트", "/images/101.jpg", "/product/101"),
        ("205", "캐시미어 머플러", "/images/205.jpg", "/product/205"),
        ("318", "레더 첼시 부츠", "", "/product/318"),
    ];
    for (id, name, image, link) in catalog {
        app.view_product(NewViewedProduct::new(id, name, image, link))?;
        println!("  Viewed {} ({})", name, link);
    }
    app.view_product(NewViewedProduct::new("101", "울 블렌드 코트", "/images/101.jpg", "/product/101"))?;
    println!("  Viewed 울 블렌드 코트 again (moves to the front)");
    println!(
        "  Store holds {} products",
        app.store.borrow().recent_products().len()
    );
    println!();

    section("Sidebar open");
    app.open_sidebar();
    println!(
        "  scroll locked = {}, key listeners = {}",
        app.document.scroll_lock_count() > 0,
        app.document.listener_count()
    );
    println!("{}", app.render_html());
    println!();

    section("Row click + Escape");
    if app.sidebar.click_product("205") {
        println!("  Navigated to {}", app.navigator.current().unwrap_or_default());
    }
    let closed = app.press_key("Escape");
    println!(
        "  Escape closed sidebar = {}, scroll locked = {}, key listeners = {}",
        closed,
        app.document.scroll_lock_count() > 0,
        app.document.listener_count()
    );
    println!();

    app.shutdown();
    println!("  ✓ Done");
    Ok(())
}
