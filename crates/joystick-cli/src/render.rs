//! Terminal rendering for catalog, detail, and admin views.
//!
//! All price strings come out of [`format_price_line`], which leans on the
//! shared pricing module, so the three views cannot disagree about a
//! reconstructed base.

use joystick_core::{pricing, Product};

/// Sale-aware price line: `$39.99` without a sale, or
/// `was $59.99 -> $41.99 SALE PRICE` when one is active.
pub(crate) fn format_price_line(current: f64, sale_fraction: f64) -> String {
    if pricing::is_active_sale(sale_fraction) {
        let base = pricing::round2(pricing::reconstruct_base(current, sale_fraction));
        format!("was ${base:.2} -> ${current:.2} SALE PRICE")
    } else {
        format!("${current:.2}")
    }
}

pub(crate) fn stock_label(product: &Product) -> &'static str {
    if product.in_stock() {
        "In Stock"
    } else {
        "Out of Stock"
    }
}

/// Label for the admin table's sale column: `20%`, `30%`, `50%`, or `-`.
pub(crate) fn tier_label(product: &Product) -> String {
    if product.has_active_sale() {
        format!("{:.0}%", product.sale_fraction() * 100.0)
    } else {
        "-".to_owned()
    }
}

/// One catalog card: name, price line, genre, stock.
pub(crate) fn print_catalog_card(product: &Product) {
    println!("{}", product.name);
    println!(
        "  {}",
        format_price_line(product.price, product.sale_fraction())
    );
    println!("  Genre: {}", product.genre);
    println!("  {}", stock_label(product));
    println!();
}

/// The full detail view for one product.
pub(crate) fn print_detail(product: &Product) {
    println!("{}", product.name);
    println!(
        "{}",
        format_price_line(product.price, product.sale_fraction())
    );
    println!("Platform: {}", product.platform);
    println!("Genre: {}", product.genre);
    println!(
        "Description: {}",
        product.description.as_deref().unwrap_or("-")
    );
    println!("Availability: {}", stock_label(product));
}

/// Back-office table: one row per product plus the active sale tier.
pub(crate) fn print_admin_table(products: &[Product]) {
    if products.is_empty() {
        println!("No products yet.");
        return;
    }

    println!(
        "{:<5} {:<30} {:<18} {:>10} {:>6}  {:<5}",
        "ID", "NAME", "GENRE", "PRICE", "STOCK", "SALE"
    );
    for product in products {
        println!(
            "{:<5} {:<30} {:<18} {:>10} {:>6}  {:<5}",
            product.id,
            product.name,
            product.genre,
            format!("${:.2}", product.price),
            product.quantity,
            tier_label(product),
        );
    }
}
