use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pricing;

/// The only platform this shop stocks.
pub const PLATFORM: &str = "PC";

/// Genres the create/edit forms accept, in menu order.
pub const GENRES: [&str; 5] = [
    "Sports",
    "FPS",
    "Open World/RPG",
    "Action/Adventure",
    "Racing",
];

/// A catalog product as stored by the data server.
///
/// `price` is the *current* price: when `sale_percent` is set, it is the
/// already-discounted amount and the full base price must be reconstructed
/// through [`pricing::reconstruct_base`].
///
/// Boundary note: prices travel as JSON numbers, so they are `f64` here;
/// every mutation rounds through [`pricing::round2`] before hitting the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub genre: String,
    pub platform: String,
    pub price: f64,
    pub quantity: i64,
    /// Active discount as a fraction in `[0, 1)`; absent means no sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Product {
    /// Active sale fraction, treating an absent `salePercent` as 0.
    #[must_use]
    pub fn sale_fraction(&self) -> f64 {
        self.sale_percent.unwrap_or(0.0)
    }

    /// Returns `true` when a displayable sale is active (fraction strictly
    /// between 0 and 1; anything else would invert or divide-by-zero the
    /// base computation).
    #[must_use]
    pub fn has_active_sale(&self) -> bool {
        pricing::is_active_sale(self.sale_fraction())
    }

    /// Full non-discounted price, reconstructed from the current price and
    /// the active sale fraction.
    #[must_use]
    pub fn base_price(&self) -> f64 {
        pricing::reconstruct_base(self.price, self.sale_fraction())
    }

    /// Returns `true` if at least one unit is in stock.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// Case-insensitive substring match over name, genre, and platform —
    /// the catalog search box semantics.
    #[must_use]
    pub fn matches_query(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        [&self.name, &self.genre, &self.platform]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }
}

/// Field set sent by the create form (`POST /products`) and the edit form
/// (`PATCH /products/{id}`). The server assigns `id` on create.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    pub genre: String,
    pub platform: String,
    pub price: f64,
    pub description: String,
    pub quantity: i64,
    pub image_url: String,
}

impl ProductForm {
    /// Builds a form pre-filled from an existing product, for the edit flow.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            genre: product.genre.clone(),
            platform: PLATFORM.to_owned(),
            price: product.price,
            description: product.description.clone().unwrap_or_default(),
            quantity: product.quantity,
            image_url: product.image_url.clone().unwrap_or_default(),
        }
    }

    /// Client-side validation, run before any network call.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule: name/genre present, genre known,
    /// price and quantity non-negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.genre.trim().is_empty() {
            return Err(ValidationError::MissingField("genre"));
        }
        if !GENRES.contains(&self.genre.as_str()) {
            return Err(ValidationError::UnknownGenre(self.genre.clone()));
        }
        if self.price < 0.0 {
            return Err(ValidationError::NegativePrice(self.price));
        }
        if self.quantity < 0 {
            return Err(ValidationError::NegativeQuantity(self.quantity));
        }
        Ok(())
    }
}

/// Discount-toggle body: `PATCH /products/{id}` with the recomputed current
/// price and the tier that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleUpdate {
    pub price: f64,
    pub sale_percent: f64,
}

/// A form field failed client-side validation; nothing was sent.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("unknown genre \"{0}\"")]
    UnknownGenre(String),

    #[error("price must be >= 0, got {0}")]
    NegativePrice(f64),

    #[error("quantity must be >= 0, got {0}")]
    NegativeQuantity(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forza() -> Product {
        Product {
            id: 1,
            name: "Forza Horizon 5".to_owned(),
            genre: "Racing".to_owned(),
            platform: PLATFORM.to_owned(),
            price: 50.0,
            quantity: 5,
            sale_percent: None,
            description: None,
            image_url: None,
        }
    }

    fn valid_form() -> ProductForm {
        ProductForm {
            name: "Forza Horizon 5".to_owned(),
            genre: "Racing".to_owned(),
            platform: PLATFORM.to_owned(),
            price: 59.99,
            description: String::new(),
            quantity: 10,
            image_url: String::new(),
        }
    }

    #[test]
    fn sale_fraction_defaults_to_zero() {
        let p = forza();
        assert_eq!(p.sale_fraction(), 0.0);
        assert!(!p.has_active_sale());
    }

    #[test]
    fn base_price_equals_current_without_sale() {
        let p = forza();
        assert_eq!(p.base_price(), 50.0);
    }

    #[test]
    fn base_price_reconstructs_under_active_sale() {
        let mut p = forza();
        p.price = 40.0;
        p.sale_percent = Some(0.2);
        assert!(p.has_active_sale());
        assert!((p.base_price() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn fraction_of_one_or_more_is_not_an_active_sale() {
        let mut p = forza();
        p.sale_percent = Some(1.0);
        assert!(!p.has_active_sale());
        assert_eq!(p.base_price(), p.price);
    }

    #[test]
    fn matches_query_is_case_insensitive_across_fields() {
        let p = forza();
        assert!(p.matches_query("forza"));
        assert!(p.matches_query("RACING"));
        assert!(p.matches_query("pc"));
        assert!(!p.matches_query("fps"));
    }

    #[test]
    fn matches_query_blank_term_matches_everything() {
        let p = forza();
        assert!(p.matches_query(""));
        assert!(p.matches_query("   "));
    }

    #[test]
    fn deserializes_wire_format_with_optional_fields_absent() {
        let p: Product = serde_json::from_str(
            r#"{"id":1,"name":"Forza Horizon 5","genre":"Racing","platform":"PC","price":50,"quantity":5}"#,
        )
        .expect("wire product should deserialize");
        assert_eq!(p.id, 1);
        assert_eq!(p.sale_percent, None);
        assert_eq!(p.description, None);
    }

    #[test]
    fn deserializes_camel_case_sale_and_image_fields() {
        let p: Product = serde_json::from_str(
            r#"{"id":2,"name":"Elden Ring","genre":"Open World/RPG","platform":"PC","price":41.99,"quantity":3,"salePercent":0.3,"imageUrl":"https://example.com/er.jpg"}"#,
        )
        .expect("wire product should deserialize");
        assert_eq!(p.sale_percent, Some(0.3));
        assert_eq!(p.image_url.as_deref(), Some("https://example.com/er.jpg"));
    }

    #[test]
    fn sale_update_serializes_camel_case() {
        let body = serde_json::to_value(SaleUpdate {
            price: 40.0,
            sale_percent: 0.2,
        })
        .expect("serialization failed");
        assert_eq!(body, serde_json::json!({"price": 40.0, "salePercent": 0.2}));
    }

    #[test]
    fn product_form_serializes_full_field_set() {
        let body = serde_json::to_value(valid_form()).expect("serialization failed");
        let obj = body.as_object().expect("object body");
        for key in [
            "name",
            "genre",
            "platform",
            "price",
            "description",
            "quantity",
            "imageUrl",
        ] {
            assert!(obj.contains_key(key), "missing key {key}: {body}");
        }
    }

    #[test]
    fn validate_accepts_a_complete_form() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_name() {
        let mut form = valid_form();
        form.name = "   ".to_owned();
        assert!(matches!(
            form.validate(),
            Err(ValidationError::MissingField("name"))
        ));
    }

    #[test]
    fn validate_rejects_missing_genre() {
        let mut form = valid_form();
        form.genre = String::new();
        assert!(matches!(
            form.validate(),
            Err(ValidationError::MissingField("genre"))
        ));
    }

    #[test]
    fn validate_rejects_unknown_genre() {
        let mut form = valid_form();
        form.genre = "Puzzle".to_owned();
        assert!(matches!(
            form.validate(),
            Err(ValidationError::UnknownGenre(ref g)) if g == "Puzzle"
        ));
    }

    #[test]
    fn validate_rejects_negative_price() {
        let mut form = valid_form();
        form.price = -1.0;
        assert!(matches!(
            form.validate(),
            Err(ValidationError::NegativePrice(_))
        ));
    }

    #[test]
    fn from_product_fills_defaults_for_absent_optionals() {
        let form = ProductForm::from_product(&forza());
        assert_eq!(form.description, "");
        assert_eq!(form.image_url, "");
        assert_eq!(form.platform, PLATFORM);
        assert_eq!(form.quantity, 5);
    }
}
