//! Back-office session and command handlers.
//!
//! [`AdminSession`] owns the product list `Resource` and the base-price
//! cache for one admin interaction. Every mutation follows the same
//! reconciliation policy: apply the local change optimistically on success,
//! and on failure surface the error *and* refetch so local state snaps back
//! to server truth.

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, bail, Context};
use rand::Rng;

use joystick_client::{Resource, StoreClient};
use joystick_core::{pricing, BasePriceCache, Product, ProductForm, SaleUpdate, PLATFORM};

use crate::render;

pub(crate) struct AdminSession {
    client: StoreClient,
    products: Resource<Vec<Product>>,
    base_prices: BasePriceCache,
}

impl AdminSession {
    pub(crate) fn new(client: StoreClient) -> Self {
        Self {
            client,
            products: Resource::new(),
            base_prices: BasePriceCache::new(),
        }
    }

    /// Full fetch cycle against `GET /products`, then seeds the base-price
    /// cache for any product seen for the first time.
    pub(crate) async fn refetch(&mut self) {
        let ticket = self.products.begin();
        let result = self.client.list_products().await;
        self.products.resolve(ticket, result);
        self.seed_base_prices();
    }

    /// Records each product's reconstructed base the first time it shows
    /// up. Existing entries are never overwritten: repeated toggles must
    /// keep computing from the same base or rounding drift compounds.
    fn seed_base_prices(&mut self) {
        let observed: Vec<(i64, f64)> = self
            .products
            .data()
            .map(|products| {
                products
                    .iter()
                    .map(|p| (p.id, pricing::seed_base(p.price, p.sale_fraction())))
                    .collect()
            })
            .unwrap_or_default();

        for (id, seeded) in observed {
            let stored = self.base_prices.upsert_if_absent(id, seeded);
            if (stored - seeded).abs() > 0.005 {
                // Server row drifted (edited out-of-band?); first
                // observation still wins.
                tracing::debug!(id, stored, server = seeded, "cached base disagrees with server");
            }
        }
    }

    pub(crate) fn products(&self) -> Option<&[Product]> {
        self.products.data().map(Vec::as_slice)
    }

    pub(crate) fn error(&self) -> Option<&str> {
        self.products.error()
    }

    #[cfg(test)]
    pub(crate) fn base_prices(&self) -> &BasePriceCache {
        &self.base_prices
    }

    /// Applies a discount tier (or 0 to clear). The new current price is
    /// computed from the *cached* base, never from the server's
    /// possibly-discounted price.
    pub(crate) async fn set_sale(&mut self, id: i64, target: f64) -> anyhow::Result<()> {
        let product = self
            .products
            .data()
            .and_then(|products| products.iter().find(|p| p.id == id))
            .ok_or_else(|| anyhow!("no product with id {id}"))?;

        let base = self.base_prices.get(id).unwrap_or(product.price);
        let new_price = pricing::sale_price(base, target);

        let update = SaleUpdate {
            price: new_price,
            sale_percent: target,
        };
        match self.client.apply_sale(id, update).await {
            Ok(_) => {
                self.products.update(|products| {
                    if let Some(p) = products.iter_mut().find(|p| p.id == id) {
                        p.price = new_price;
                        p.sale_percent = Some(target);
                    }
                });
                Ok(())
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "sale update failed; resynchronizing");
                self.refetch().await;
                Err(e).context(format!("sale update failed for product {id}"))
            }
        }
    }

    /// Clears any active sale, restoring the cached base as current price.
    pub(crate) async fn clear_sale(&mut self, id: i64) -> anyhow::Result<()> {
        self.set_sale(id, 0.0).await
    }

    /// Deletes a product, removing its row and purging its base-price
    /// entry on success.
    pub(crate) async fn delete(&mut self, id: i64) -> anyhow::Result<()> {
        match self.client.delete_product(id).await {
            Ok(()) => {
                self.products.update(|products| products.retain(|p| p.id != id));
                self.base_prices.remove(id);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "delete failed; resynchronizing");
                self.refetch().await;
                Err(e).context(format!("failed to delete product {id}"))
            }
        }
    }

    /// Creates a product. Validation runs before any network call; on
    /// success the created row is appended and its base price seeded.
    pub(crate) async fn create(&mut self, form: ProductForm) -> anyhow::Result<Product> {
        form.validate()?;
        match self.client.create_product(&form).await {
            Ok(created) => {
                self.base_prices.upsert_if_absent(
                    created.id,
                    pricing::seed_base(created.price, created.sale_fraction()),
                );
                let row = created.clone();
                self.products.update(|products| products.push(row));
                Ok(created)
            }
            Err(e) => {
                tracing::warn!(error = %e, "create failed; resynchronizing");
                self.refetch().await;
                Err(e).context("failed to create product")
            }
        }
    }

    /// Edits a product with the full tracked field set, replacing the local
    /// row on success.
    pub(crate) async fn edit(&mut self, id: i64, form: ProductForm) -> anyhow::Result<Product> {
        form.validate()?;
        match self.client.update_product(id, &form).await {
            Ok(updated) => {
                let row = updated.clone();
                self.products.update(|products| {
                    if let Some(slot) = products.iter_mut().find(|p| p.id == id) {
                        *slot = row;
                    }
                });
                Ok(updated)
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "edit failed; resynchronizing");
                self.refetch().await;
                Err(e).context(format!("failed to update product {id}"))
            }
        }
    }

    fn print_table(&self) {
        match (self.products(), self.error()) {
            (_, Some(err)) => println!("Error: {err}"),
            (Some(products), None) => render::print_admin_table(products),
            (None, None) => println!("No products yet."),
        }
    }
}

/// `joystick admin list`
pub(crate) async fn run_list(client: StoreClient) -> anyhow::Result<()> {
    let mut session = AdminSession::new(client);
    session.refetch().await;
    println!("Admin Portal");
    session.print_table();
    Ok(())
}

/// `joystick admin add …`
#[allow(clippy::too_many_arguments)]
pub(crate) async fn run_add(
    client: StoreClient,
    name: String,
    genre: String,
    price: f64,
    quantity: Option<i64>,
    description: Option<String>,
    image_url: Option<String>,
) -> anyhow::Result<()> {
    let form = ProductForm {
        name,
        genre,
        platform: PLATFORM.to_owned(),
        price,
        description: description.unwrap_or_default(),
        // The shop seeds new titles with a small random stock level when
        // the clerk leaves quantity blank.
        quantity: quantity.unwrap_or_else(random_stock),
        image_url: image_url.map(|u| u.trim().to_owned()).unwrap_or_default(),
    };

    let mut session = AdminSession::new(client);
    session.refetch().await;
    if let Some(err) = session.error() {
        bail!("could not load the admin list: {err}");
    }

    let created = session.create(form).await?;
    println!("Created #{}: {}", created.id, created.name);
    println!();
    session.print_table();
    Ok(())
}

/// `joystick admin edit <ID> …` — loads the record, merges the provided
/// overrides onto it, validates, then issues the full-field PATCH.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn run_edit(
    client: StoreClient,
    id: i64,
    name: Option<String>,
    genre: Option<String>,
    price: Option<f64>,
    quantity: Option<i64>,
    description: Option<String>,
    image_url: Option<String>,
) -> anyhow::Result<()> {
    let current = match client.get_product(id).await {
        Ok(product) => product,
        Err(err) => {
            println!("Error: {err}");
            return Ok(());
        }
    };

    let mut form = ProductForm::from_product(&current);
    if let Some(name) = name {
        form.name = name;
    }
    if let Some(genre) = genre {
        form.genre = genre;
    }
    if let Some(price) = price {
        form.price = price;
    }
    if let Some(quantity) = quantity {
        form.quantity = quantity;
    }
    if let Some(description) = description {
        form.description = description;
    }
    if let Some(image_url) = image_url {
        form.image_url = image_url.trim().to_owned();
    }

    let mut session = AdminSession::new(client);
    session.refetch().await;
    let updated = session.edit(id, form).await?;
    println!("Updated #{}: {}", updated.id, updated.name);
    println!();
    session.print_table();
    Ok(())
}

/// `joystick admin delete <ID> [--yes]`
pub(crate) async fn run_delete(client: StoreClient, id: i64, yes: bool) -> anyhow::Result<()> {
    if !yes && !confirm(&format!("Delete product {id}? [y/N] "))? {
        println!("Aborted.");
        return Ok(());
    }

    let mut session = AdminSession::new(client);
    session.refetch().await;
    if let Some(err) = session.error() {
        bail!("could not load the admin list: {err}");
    }

    session.delete(id).await?;
    println!("Deleted #{id}.");
    println!();
    session.print_table();
    Ok(())
}

/// `joystick admin sale <ID> (--percent 20|30|50 | --clear)`
pub(crate) async fn run_sale(
    client: StoreClient,
    id: i64,
    percent: Option<u32>,
    clear: bool,
) -> anyhow::Result<()> {
    let mut session = AdminSession::new(client);
    session.refetch().await;
    if let Some(err) = session.error() {
        bail!("could not load the admin list: {err}");
    }

    match (percent, clear) {
        (Some(percent), false) => {
            let fraction = f64::from(percent) / 100.0;
            if !pricing::SALE_TIERS.contains(&fraction) {
                bail!("unsupported sale tier {percent}%; pick 20, 30, or 50");
            }
            session.set_sale(id, fraction).await?;
            println!("Applied {percent}% sale to #{id}.");
        }
        (None, true) => {
            session.clear_sale(id).await?;
            println!("Cleared sale on #{id}.");
        }
        _ => bail!("pass exactly one of --percent or --clear"),
    }

    println!();
    session.print_table();
    Ok(())
}

/// Blocking y/N prompt on stdin.
fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn random_stock() -> i64 {
    rand::rng().random_range(5..25)
}
