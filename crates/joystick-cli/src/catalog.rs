//! Customer-facing views: the searchable catalog and the product detail
//! page. Both read through a [`Resource`] and render a textual error in
//! place of content when the fetch fails, leaving any prior payload alone.

use joystick_client::{Resource, StoreClient};
use joystick_core::Product;

use crate::render;

/// Catalog list state: the product array behind the public grid.
pub(crate) struct CatalogView {
    client: StoreClient,
    products: Resource<Vec<Product>>,
}

impl CatalogView {
    pub(crate) fn new(client: StoreClient) -> Self {
        Self {
            client,
            products: Resource::new(),
        }
    }

    /// One full fetch cycle against `GET /products`.
    pub(crate) async fn refetch(&mut self) {
        let ticket = self.products.begin();
        let result = self.client.list_products().await;
        self.products.resolve(ticket, result);
    }

    pub(crate) fn error(&self) -> Option<&str> {
        self.products.error()
    }

    /// Products matching the search term (all of them for a blank term).
    pub(crate) fn filtered(&self, term: &str) -> Vec<&Product> {
        self.products
            .data()
            .map(|products| products.iter().filter(|p| p.matches_query(term)).collect())
            .unwrap_or_default()
    }
}

/// `joystick catalog [--search TERM]`
pub(crate) async fn run_catalog(client: StoreClient, search: Option<String>) -> anyhow::Result<()> {
    let mut view = CatalogView::new(client);
    view.refetch().await;

    if let Some(err) = view.error() {
        println!("Error: {err}");
        return Ok(());
    }

    println!("In-Store Catalog");
    println!();
    let term = search.unwrap_or_default();
    let matches = view.filtered(&term);
    if matches.is_empty() {
        println!("No products matched.");
        return Ok(());
    }
    for product in matches {
        render::print_catalog_card(product);
    }
    Ok(())
}

/// `joystick show <ID> [--from-admin]`
///
/// With `--from-admin` the command finishes by re-rendering the admin table,
/// so "back" from a detail view always lands on the admin list instead of a
/// dead end.
pub(crate) async fn run_show(client: StoreClient, id: i64, from_admin: bool) -> anyhow::Result<()> {
    let mut detail: Resource<Product> = Resource::new();
    let ticket = detail.begin();
    let result = client.get_product(id).await;
    detail.resolve(ticket, result);

    match (detail.data(), detail.error()) {
        (_, Some(err)) => println!("Error: {err}"),
        (Some(product), None) => render::print_detail(product),
        (None, None) => println!("Not found."),
    }

    if from_admin {
        println!();
        println!("Admin Portal");
        match client.list_products().await {
            Ok(products) => render::print_admin_table(&products),
            Err(err) => println!("Error: {err}"),
        }
    }
    Ok(())
}
