//! kedai - storefront command line
//!
//! Drives a storefront session from the terminal, one command per step:
//!
//! ```text
//! kedai [--env dev] [--catalog path] add Latte add Latte less 0 show checkout
//! kedai reserve reservation.yaml
//! kedai theme
//! ```
//!
//! Handoff links are printed on stdout; logs go to stderr and the log file
//! (none when `log_dir` is empty).

use std::sync::Arc;

use anyhow::{Context, bail};

use kedai::config::AppConfig;
use kedai::handoff::ConsoleSink;
use kedai::money::format_currency;
use kedai::preference::FileStore;
use kedai::validation::{ContactRequest, ReservationRequest};
use kedai::{Catalog, ShopError, Storefront};

fn get_flag_value(names: &[&str]) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if names.contains(&args[i].as_str()) && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

fn get_env() -> String {
    get_flag_value(&["--env", "-e"]).unwrap_or_else(|| "dev".to_string())
}

/// Positional arguments with `--flag value` pairs removed
fn get_commands() -> Vec<String> {
    let mut out = Vec::new();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg.starts_with('-') {
            args.next();
            continue;
        }
        out.push(arg);
    }
    out
}

fn read_yaml<T: serde::de::DeserializeOwned>(path: &str) -> anyhow::Result<T> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    serde_yaml::from_str(&content).with_context(|| format!("Failed to parse {}", path))
}

fn print_cart(shop: &Storefront) {
    if shop.order().is_empty() {
        println!("(cart is empty)");
        return;
    }
    for (idx, line) in shop.order().lines().iter().enumerate() {
        println!("[{}] {} x{}", idx, line.name, line.quantity);
    }
    println!("{}", shop.cart_summary());
}

fn print_menu(shop: &Storefront, category: Option<&str>) {
    let currency = &shop.config().currency;
    for item in shop.catalog().items() {
        if category.is_some_and(|c| c != item.category) {
            continue;
        }
        println!(
            "{:<28} {:>12}  [{}]",
            item.name,
            format_currency(item.price, currency),
            item.category
        );
    }
}

/// Report a storefront error the way the page shows a notification
fn notify(err: &ShopError) {
    eprintln!("{}", err);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let app_config = AppConfig::load(&env)?;
    let _log_guard = kedai::logging::init_logging(&app_config);

    tracing::info!("Starting kedai storefront in {} mode", env);

    let shop_config = app_config.shop.clone();
    let catalog_path =
        get_flag_value(&["--catalog", "-c"]).unwrap_or_else(|| shop_config.catalog_path.clone());
    let catalog = Catalog::load(&catalog_path)?;
    let preferences = FileStore::new(&shop_config.preference_path);

    let mut shop = Storefront::new(
        shop_config,
        catalog,
        Box::new(preferences),
        Arc::new(ConsoleSink),
    );

    let commands = get_commands();
    if commands.is_empty() {
        bail!("no command given (try: menu, add <item>, show, checkout, reserve <file>, theme)");
    }

    let mut iter = commands.iter().map(String::as_str);
    while let Some(cmd) = iter.next() {
        match cmd {
            "menu" => print_menu(&shop, None),
            "tab" => {
                let category = iter.next().context("tab needs a category")?;
                print_menu(&shop, Some(category));
            }
            "search" => {
                let term = iter.next().unwrap_or("");
                for item in shop.catalog().search(term) {
                    println!("{}", item.name);
                }
            }
            "add" => {
                let name = iter.next().context("add needs an item name")?;
                if !shop.add_to_cart(name) {
                    eprintln!("'{}' is not on the menu", name);
                }
            }
            "remove" => {
                let index: usize = iter
                    .next()
                    .context("remove needs a line index")?
                    .parse()
                    .context("line index must be a number")?;
                shop.remove_from_cart(index);
            }
            "less" => {
                let index: usize = iter
                    .next()
                    .context("less needs a line index")?
                    .parse()
                    .context("line index must be a number")?;
                if shop.decrement_in_cart(index).is_none() {
                    eprintln!("no cart line at index {}", index);
                }
            }
            "show" => print_cart(&shop),
            "checkout" => {
                if let Err(e) = shop.checkout().await {
                    notify(&e);
                }
            }
            "reserve" => {
                let path = iter.next().context("reserve needs a yaml file")?;
                let req: ReservationRequest = read_yaml(path)?;
                let today = chrono::Local::now().date_naive();
                match shop.submit_reservation_on(&req, today).await {
                    Ok(_) => eprintln!("Reservation request sent via WhatsApp!"),
                    Err(e) => notify(&e),
                }
            }
            "contact" => {
                let path = iter.next().context("contact needs a yaml file")?;
                let req: ContactRequest = read_yaml(path)?;
                match shop.submit_contact(&req).await {
                    Ok(_) => eprintln!("Message sent via WhatsApp!"),
                    Err(e) => notify(&e),
                }
            }
            "theme" => {
                let theme = shop.toggle_theme()?;
                println!("theme: {}", theme);
            }
            other => bail!("unknown command '{}'", other),
        }
    }

    Ok(())
}
