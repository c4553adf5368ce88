//! Product catalog models.
//!
//! A product is a frame with a price, categorization, and a list of color
//! variants. Each color carries its own stock count and image set, stored
//! together as one JSONB document the way the catalog treats them: an
//! ordered list edited as a unit from the dashboard.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use lina_optic_core::{LocalizedText, ProductId};

/// One color variant of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductColor {
    /// Localized display name of the color.
    pub color_name: LocalizedText,
    /// Image filenames for this color (served from /uploads).
    #[serde(default)]
    pub images: Vec<String>,
    /// Units in stock for this color.
    #[serde(default)]
    pub stock: i32,
}

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub brand: String,
    /// Top-level category (e.g. "hommes", "femmes", "enfants").
    pub main_category: String,
    /// Secondary category (e.g. "optique", "solaire").
    pub sub_category: String,
    /// Frame shape (e.g. "ronde", "carrée"); optional detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_shape: Option<String>,
    /// Featured on the home page carousel.
    pub trending: bool,
    /// Crossed-out previous price, if the product is discounted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_price: Option<Decimal>,
    /// Current selling price.
    pub new_price: Decimal,
    /// Cover image filename (served from /uploads).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    /// Color variants with their stock and images.
    pub colors: Vec<ProductColor>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Total units in stock across all color variants.
    #[must_use]
    pub fn total_stock(&self) -> i64 {
        self.colors.iter().map(|c| i64::from(c.stock)).sum()
    }
}

/// Payload for creating or fully updating a product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub brand: String,
    pub main_category: String,
    #[serde(default)]
    pub sub_category: String,
    #[serde(default)]
    pub frame_shape: Option<String>,
    #[serde(default)]
    pub trending: bool,
    #[serde(default)]
    pub old_price: Option<Decimal>,
    pub new_price: Decimal,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub colors: Vec<ProductColor>,
}

impl ProductInput {
    /// Validate the payload before it reaches the database.
    ///
    /// # Errors
    ///
    /// Returns a human-readable message describing the first failed check.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title must not be empty".to_owned());
        }
        if self.main_category.trim().is_empty() {
            return Err("mainCategory must not be empty".to_owned());
        }
        if self.new_price <= Decimal::ZERO {
            return Err("newPrice must be greater than zero".to_owned());
        }
        if let Some(old_price) = self.old_price
            && old_price <= Decimal::ZERO
        {
            return Err("oldPrice must be greater than zero".to_owned());
        }
        for color in &self.colors {
            if color.color_name.is_empty() {
                return Err("every color needs a name in at least one language".to_owned());
            }
            if color.stock < 0 {
                return Err("color stock must not be negative".to_owned());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_input() -> ProductInput {
        ProductInput {
            title: "Ray-Ban Aviator".to_owned(),
            description: "Monture métallique classique".to_owned(),
            brand: "Ray-Ban".to_owned(),
            main_category: "hommes".to_owned(),
            sub_category: "solaire".to_owned(),
            frame_shape: None,
            trending: true,
            old_price: Some(Decimal::new(25900, 2)),
            new_price: Decimal::new(19900, 2),
            cover_image: Some("aviator.webp".to_owned()),
            colors: vec![ProductColor {
                color_name: LocalizedText::french("Doré"),
                images: vec!["aviator-gold-1.webp".to_owned()],
                stock: 4,
            }],
        }
    }

    #[test]
    fn test_validate_accepts_valid_input() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        let mut input = valid_input();
        input.title = "   ".to_owned();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_price() {
        let mut input = valid_input();
        input.new_price = Decimal::ZERO;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_stock() {
        let mut input = valid_input();
        input.colors[0].stock = -1;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unnamed_color() {
        let mut input = valid_input();
        input.colors[0].color_name = LocalizedText::default();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_input_deserializes_camel_case() {
        let json = r#"{
            "title": "Persol 714",
            "mainCategory": "hommes",
            "subCategory": "solaire",
            "newPrice": "349.00",
            "trending": false,
            "colors": [
                {"colorName": {"fr": "Havane"}, "images": [], "stock": 2}
            ]
        }"#;
        let input: ProductInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.title, "Persol 714");
        assert_eq!(input.sub_category, "solaire");
        assert_eq!(input.colors.len(), 1);
        assert_eq!(input.colors[0].stock, 2);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_total_stock_sums_colors() {
        let product = Product {
            id: ProductId::new(1),
            title: "Test".to_owned(),
            description: String::new(),
            brand: String::new(),
            main_category: "femmes".to_owned(),
            sub_category: String::new(),
            frame_shape: None,
            trending: false,
            old_price: None,
            new_price: Decimal::new(9900, 2),
            cover_image: None,
            colors: vec![
                ProductColor {
                    color_name: LocalizedText::french("Noir"),
                    images: vec![],
                    stock: 3,
                },
                ProductColor {
                    color_name: LocalizedText::french("Rouge"),
                    images: vec![],
                    stock: 5,
                },
            ],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(product.total_stock(), 8);
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let product = Product {
            id: ProductId::new(9),
            title: "Test".to_owned(),
            description: String::new(),
            brand: String::new(),
            main_category: "femmes".to_owned(),
            sub_category: "optique".to_owned(),
            frame_shape: None,
            trending: true,
            old_price: None,
            new_price: Decimal::new(12900, 2),
            cover_image: None,
            colors: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["mainCategory"], "femmes");
        assert_eq!(value["newPrice"], "129.00");
        assert!(value.get("frameShape").is_none());
        assert!(value.get("coverImage").is_none());
    }
}
