//! Seed the catalog from a YAML fixture file.
//!
//! The fixture file is a list of products in the same camelCase shape the
//! API accepts:
//!
//! ```yaml
//! products:
//!   - title: Ray-Ban Aviator
//!     brand: Ray-Ban
//!     mainCategory: hommes
//!     subCategory: solaire
//!     newPrice: "349.00"
//!     trending: true
//!     colors:
//!       - colorName: { fr: Doré }
//!         images: []
//!         stock: 5
//! ```

use std::path::Path;

use secrecy::SecretString;
use serde::Deserialize;

use lina_optic_server::db::{self, ProductRepository};
use lina_optic_server::models::product::ProductInput;

/// Root of the YAML fixture file.
#[derive(Debug, Deserialize)]
pub struct SeedCatalog {
    pub products: Vec<ProductInput>,
}

/// Validate every product in the catalog, collecting all failures.
fn validate_catalog(catalog: &SeedCatalog) -> Vec<String> {
    let mut errors = Vec::new();
    for (index, product) in catalog.products.iter().enumerate() {
        if let Err(err) = product.validate() {
            errors.push(format!("product #{}: {err}", index + 1));
        }
    }
    errors
}

/// Seed products from a YAML file.
///
/// # Arguments
///
/// * `file_path` - Path to the YAML fixture file
/// * `clear_existing` - If true, delete existing products first
///
/// # Errors
///
/// Returns an error if environment variables are missing, the file cannot
/// be read or parsed, validation fails, or database operations fail.
pub async fn products(
    file_path: &str,
    clear_existing: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .or_else(|_| std::env::var("DB_URL"))
        .map(SecretString::from)
        .map_err(|_| "DATABASE_URL not set")?;

    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    tracing::info!(path = %file_path, "Loading catalog fixtures");

    // Read and validate YAML before connecting to the database
    let content = tokio::fs::read_to_string(path).await?;
    let catalog: SeedCatalog = serde_yaml::from_str(&content)?;

    tracing::info!(products = catalog.products.len(), "Parsed fixture file");

    let errors = validate_catalog(&catalog);
    if !errors.is_empty() {
        tracing::error!("Fixture validation failed:");
        for err in &errors {
            tracing::error!("  - {err}");
        }
        return Err(format!("{} validation errors found", errors.len()).into());
    }

    let pool = db::create_pool(&database_url).await?;
    tracing::info!("Connected to database");

    if clear_existing {
        sqlx::query("DELETE FROM products").execute(&pool).await?;
        tracing::info!("Cleared existing products");
    }

    let repo = ProductRepository::new(&pool);
    for input in &catalog.products {
        let product = repo.create(input).await?;
        tracing::info!(id = %product.id, title = %product.title, "Seeded product");
    }

    tracing::info!(count = catalog.products.len(), "Seeding complete");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
products:
  - title: Ray-Ban Aviator
    brand: Ray-Ban
    mainCategory: hommes
    subCategory: solaire
    newPrice: "349.00"
    trending: true
    colors:
      - colorName: { fr: "Doré" }
        images: []
        stock: 5
  - title: Vogue VO5239
    brand: Vogue
    mainCategory: femmes
    subCategory: optique
    newPrice: "189.00"
"#;

    #[test]
    fn test_fixture_parses_and_validates() {
        let catalog: SeedCatalog = serde_yaml::from_str(FIXTURE).unwrap();
        assert_eq!(catalog.products.len(), 2);
        assert_eq!(catalog.products[0].colors.len(), 1);
        assert!(validate_catalog(&catalog).is_empty());
    }

    #[test]
    fn test_validation_collects_all_failures() {
        let broken = r#"
products:
  - title: ""
    mainCategory: hommes
    newPrice: "10.00"
  - title: Ok
    mainCategory: ""
    newPrice: "10.00"
"#;
        let catalog: SeedCatalog = serde_yaml::from_str(broken).unwrap();
        let errors = validate_catalog(&catalog);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("product #1"));
        assert!(errors[1].contains("product #2"));
    }
}
