//! # Product Commands
//!
//! Catalog browsing and product reviews.
//!
//! ```text
//! storefront products --category "Bridal Wear" --max-price 15000
//!     ──► GET  /product/getAllProducts?limit=10&page=1&category=Bridal%20Wear&max=15000
//!
//! storefront review --product-id p1 --name Hira --email ... --note ...
//!     ──► POST /reviews/add { name, email, photos, reviewNote, productId }
//! ```

use loop_core::catalog::CatalogQuery;
use loop_core::validation::validate_review;
use loop_core::ReviewRequest;
use tracing::debug;

use super::ApiCall;
use crate::error::ApiError;
use crate::state::ConfigState;

pub const REVIEW_ADD_PATH: &str = "/reviews/add";

/// Builds the product listing request for the chosen filters.
pub fn browse_catalog(config: &ConfigState, query: &CatalogQuery) -> Result<ApiCall<()>, ApiError> {
    debug!(
        categories = query.categories.len(),
        max_price = query.max_price.rupees(),
        page = query.page,
        "browse_catalog command"
    );

    let path = query
        .to_path()
        .map_err(|e| ApiError::validation(e.to_string()))?;

    Ok(ApiCall::get(config.endpoint(&path)))
}

/// Validates a review and builds the request that posts it.
///
/// Text fields are sent trimmed.
pub fn submit_review(
    config: &ConfigState,
    review: ReviewRequest,
) -> Result<ApiCall<ReviewRequest>, ApiError> {
    debug!(product_id = %review.product_id, photos = review.photos.len(), "submit_review command");

    validate_review(&review).map_err(|e| ApiError::validation(e.to_string()))?;

    let review = ReviewRequest {
        name: review.name.trim().to_string(),
        email: review.email.trim().to_string(),
        photos: review.photos.iter().map(|p| p.trim().to_string()).collect(),
        review_note: review.review_note.trim().to_string(),
        product_id: review.product_id.trim().to_string(),
    };

    Ok(ApiCall::post(config.endpoint(REVIEW_ADD_PATH), review))
}
