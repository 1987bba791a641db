use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use joystick_core::{AppConfig, Product, ProductForm, SaleUpdate};

use crate::error::StoreError;

/// Typed client for the storefront's REST data server.
///
/// Wraps `reqwest` with uniform status handling: any non-2xx response maps
/// to [`StoreError::UnexpectedStatus`], which displays as `HTTP <status>`.
/// Use [`StoreClient::new`] in the binary and
/// [`StoreClient::with_base_url`] to point at a mock server in tests.
pub struct StoreClient {
    client: Client,
    base_url: Url,
}

impl StoreClient {
    /// Creates a client from the loaded application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`StoreError::InvalidBaseUrl`] if the
    /// configured base URL does not parse.
    pub fn new(config: &AppConfig) -> Result<Self, StoreError> {
        Self::with_base_url(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with an explicit base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`StoreError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise away any trailing slash so joined paths never double up.
        let trimmed = base_url.trim_end_matches('/');
        let base_url = Url::parse(trimmed).map_err(|e| StoreError::InvalidBaseUrl {
            url: trimmed.to_owned(),
            reason: e.to_string(),
        })?;

        // URLs like `mailto:` have no path segments and cannot serve as a
        // resource root; reject them up front so url_for never panics.
        if base_url.cannot_be_a_base() {
            return Err(StoreError::InvalidBaseUrl {
                url: trimmed.to_owned(),
                reason: "URL cannot serve as a base".to_owned(),
            });
        }

        Ok(Self { client, base_url })
    }

    /// `GET /products` — the full catalog.
    ///
    /// # Errors
    ///
    /// - [`StoreError::UnexpectedStatus`] on any non-2xx status.
    /// - [`StoreError::Http`] on network failure.
    /// - [`StoreError::Deserialize`] if the body is not a product array.
    pub async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let url = self.url_for(&["products"]);
        let response = self.send_checked(self.client.get(url.clone()), &url).await?;
        Self::decode_json(response, &url).await
    }

    /// `GET /products/{id}` — a single product; a missing id surfaces as
    /// `HTTP 404`.
    ///
    /// # Errors
    ///
    /// Same variants as [`StoreClient::list_products`].
    pub async fn get_product(&self, id: i64) -> Result<Product, StoreError> {
        let url = self.url_for(&["products", &id.to_string()]);
        let response = self.send_checked(self.client.get(url.clone()), &url).await?;
        Self::decode_json(response, &url).await
    }

    /// `POST /products` — create a product; the server assigns the id.
    ///
    /// # Errors
    ///
    /// Same variants as [`StoreClient::list_products`].
    pub async fn create_product(&self, form: &ProductForm) -> Result<Product, StoreError> {
        let url = self.url_for(&["products"]);
        let response = self
            .send_checked(self.client.post(url.clone()).json(form), &url)
            .await?;
        Self::decode_json(response, &url).await
    }

    /// `PATCH /products/{id}` with the full tracked field set (edit form).
    ///
    /// # Errors
    ///
    /// Same variants as [`StoreClient::list_products`].
    pub async fn update_product(
        &self,
        id: i64,
        form: &ProductForm,
    ) -> Result<Product, StoreError> {
        let url = self.url_for(&["products", &id.to_string()]);
        let response = self
            .send_checked(self.client.patch(url.clone()).json(form), &url)
            .await?;
        Self::decode_json(response, &url).await
    }

    /// `PATCH /products/{id}` with `{price, salePercent}` — the discount
    /// toggle. The caller computes `price` from the cached base, never from
    /// the server's possibly-discounted value.
    ///
    /// # Errors
    ///
    /// Same variants as [`StoreClient::list_products`].
    pub async fn apply_sale(&self, id: i64, update: SaleUpdate) -> Result<Product, StoreError> {
        let url = self.url_for(&["products", &id.to_string()]);
        let response = self
            .send_checked(self.client.patch(url.clone()).json(&update), &url)
            .await?;
        Self::decode_json(response, &url).await
    }

    /// `DELETE /products/{id}` — no response body.
    ///
    /// # Errors
    ///
    /// - [`StoreError::UnexpectedStatus`] on any non-2xx status.
    /// - [`StoreError::Http`] on network failure.
    pub async fn delete_product(&self, id: i64) -> Result<(), StoreError> {
        let url = self.url_for(&["products", &id.to_string()]);
        self.send_checked(self.client.delete(url.clone()), &url)
            .await?;
        Ok(())
    }

    /// Joins path segments onto the base URL with proper encoding.
    fn url_for(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        {
            // with_base_url rejects cannot-be-a-base URLs, so the segment
            // view always exists.
            let Ok(mut parts) = url.path_segments_mut() else {
                unreachable!("base URL validated at construction");
            };
            parts.pop_if_empty();
            parts.extend(segments);
        }
        url
    }

    /// Sends the request and asserts a 2xx status.
    async fn send_checked(
        &self,
        request: reqwest::RequestBuilder,
        url: &Url,
    ) -> Result<Response, StoreError> {
        tracing::debug!(%url, "storefront request");
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    /// Reads the response body and parses it as JSON into `T`.
    async fn decode_json<T: DeserializeOwned>(
        response: Response,
        url: &Url,
    ) -> Result<T, StoreError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| StoreError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
