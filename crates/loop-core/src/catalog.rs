//! # Catalog Query
//!
//! Builds the product listing request from the shopper's filters.
//!
//! ```text
//! /product/getAllProducts?limit=10&page=1
//!                         &category=Bridal%20Wear,Kurta   (only with categories)
//!                         &max=15000                      (only below the ceiling)
//! ```
//!
//! Each category name is percent-encoded on its own (a literal `,` inside a
//! name becomes `%2C`) and the encoded names are joined with a bare `,`.

use url::form_urlencoded;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::ValidationResult;

/// Product listing endpoint.
pub const CATALOG_PATH: &str = "/product/getAllProducts";

/// Products per page on the catalog page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page the API is asked for.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Price slider ceiling. A maximum at or above it means "no price filter".
pub const PRICE_FILTER_CEILING: Money = Money::from_rupees(200_000);

/// Filters chosen on the catalog page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub categories: Vec<String>,
    pub max_price: Money,
    pub page: u32,
    pub limit: u32,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        CatalogQuery {
            categories: Vec::new(),
            max_price: PRICE_FILTER_CEILING,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl CatalogQuery {
    /// Checks paging and the price filter.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.page == 0 {
            return Err(ValidationError::MustBePositive {
                field: "page".to_string(),
            });
        }

        if !(1..=MAX_PAGE_SIZE).contains(&self.limit) {
            return Err(ValidationError::OutOfRange {
                field: "limit".to_string(),
                min: 1,
                max: i64::from(MAX_PAGE_SIZE),
            });
        }

        if !self.max_price.is_positive() {
            return Err(ValidationError::MustBePositive {
                field: "maxPrice".to_string(),
            });
        }

        Ok(())
    }

    /// Whether the price filter narrows the listing at all.
    pub fn filters_price(&self) -> bool {
        self.max_price < PRICE_FILTER_CEILING
    }

    /// Path and query string for the listing request.
    ///
    /// ## Example
    /// ```rust
    /// use loop_core::catalog::CatalogQuery;
    /// use loop_core::Money;
    ///
    /// let query = CatalogQuery {
    ///     categories: vec!["Bridal Wear".to_string(), "Kurta".to_string()],
    ///     max_price: Money::from_rupees(15000),
    ///     ..CatalogQuery::default()
    /// };
    /// assert_eq!(
    ///     query.to_path().unwrap(),
    ///     "/product/getAllProducts?limit=10&page=1&category=Bridal%20Wear,Kurta&max=15000"
    /// );
    /// ```
    pub fn to_path(&self) -> ValidationResult<String> {
        self.validate()?;

        let mut path = format!("{}?limit={}&page={}", CATALOG_PATH, self.limit, self.page);

        let categories: Vec<String> = self
            .categories
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(encode_component)
            .collect();

        if !categories.is_empty() {
            path.push_str("&category=");
            path.push_str(&categories.join(","));
        }

        if self.filters_price() {
            path.push_str(&format!("&max={}", self.max_price.rupees()));
        }

        Ok(path)
    }
}

/// Percent-encodes one query component.
///
/// Spaces become `%20` rather than the form-encoding `+`, so the value reads
/// the same to any query decoder.
pub fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
