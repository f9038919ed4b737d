//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    CartItem     │   │    LineItem     │   │  OrderRequest   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  _id, storeId   │──►│  id             │   │  userId         │       │
//! │  │  title, size    │   │  unit_price     │   │  products[]     │       │
//! │  │  price          │   └─────────────────┘   │  totalPrice     │       │
//! │  │  productListing │                         │  rewardsUsage   │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ RewardsBalance  │   │ ConversionRate  │   │  VendorOrder    │       │
//! │  │  points (u32)   │   │  PKR per point  │   │  (history row)  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Names
//! Types that travel to or from the commerce API keep its field names
//! (`_id`, camelCase) so the JSON is interchangeable with what the web
//! frontend already stores and posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::DEFAULT_CONVERSION_RATE;

// =============================================================================
// Rewards
// =============================================================================

/// Loyalty points held by a user account.
///
/// Unsigned, so a negative balance cannot reach the pricing calculator.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct RewardsBalance(u32);

impl RewardsBalance {
    #[inline]
    pub const fn new(points: u32) -> Self {
        RewardsBalance(points)
    }

    #[inline]
    pub const fn points(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Currency value of one reward point, in rupees.
///
/// Always strictly positive: the calculator divides by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ConversionRate(i64);

impl ConversionRate {
    /// Creates a conversion rate, rejecting zero and negative values.
    ///
    /// ## Example
    /// ```rust
    /// use loop_core::ConversionRate;
    ///
    /// assert_eq!(ConversionRate::new(100).unwrap().rupees_per_point(), 100);
    /// assert!(ConversionRate::new(0).is_err());
    /// ```
    pub fn new(rupees_per_point: i64) -> Result<Self, ValidationError> {
        if rupees_per_point <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "conversion rate".to_string(),
            });
        }
        Ok(ConversionRate(rupees_per_point))
    }

    #[inline]
    pub const fn rupees_per_point(&self) -> i64 {
        self.0
    }

    /// Value of one point as money.
    #[inline]
    pub const fn point_value(&self) -> Money {
        Money::from_rupees(self.0)
    }
}

impl Default for ConversionRate {
    fn default() -> Self {
        ConversionRate(DEFAULT_CONVERSION_RATE)
    }
}

impl TryFrom<i64> for ConversionRate {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        ConversionRate::new(value)
    }
}

impl From<ConversionRate> for i64 {
    fn from(rate: ConversionRate) -> Self {
        rate.0
    }
}

// =============================================================================
// Listing Type
// =============================================================================

/// Whether a listing is rented out or sold outright.
///
/// Serialized as `"Rent"`/`"Sale"`; read leniently through
/// [`ListingType::from_label`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub enum ListingType {
    /// Garment is rented for a date; the default when a listing says nothing.
    #[default]
    Rent,
    /// Garment is sold.
    Sale,
}

impl<'de> Deserialize<'de> for ListingType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(ListingType::from_label(label.as_deref()))
    }
}

impl ListingType {
    /// Parses a free-form listing label the way the product page reads it:
    /// `"sale"` in any case is a sale, anything else is a rental.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some(l) if l.trim().eq_ignore_ascii_case("sale") => ListingType::Sale,
            _ => ListingType::Rent,
        }
    }

    /// Rentals need a date on the request form; sales don't.
    #[inline]
    pub const fn requires_date(&self) -> bool {
        matches!(self, ListingType::Rent)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// The part of a cart entry the pricing calculator needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// Unique within the cart.
    pub id: String,
    pub unit_price: Money,
}

impl LineItem {
    pub fn new(id: impl Into<String>, unit_price: Money) -> Self {
        LineItem {
            id: id.into(),
            unit_price,
        }
    }
}

// =============================================================================
// Cart Item
// =============================================================================

fn default_brand() -> String {
    "N/A".to_string()
}

/// A product in the shopper's cart.
///
/// Snapshot of the listing taken when it was added: the cart keeps showing
/// the same title and price even if the vendor edits the listing afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    /// Product ID as issued by the commerce API.
    #[serde(rename = "_id")]
    pub id: String,

    /// Store (vendor) that owns the listing.
    pub store_id: String,

    pub title: String,

    /// First product image, if any.
    #[serde(default)]
    pub image: Option<String>,

    /// Price at time of adding (frozen).
    pub price: Money,

    pub size: String,

    #[serde(default)]
    pub product_listing: ListingType,

    #[serde(default = "default_brand")]
    pub product_brand: String,

    #[ts(as = "String")]
    pub date_added: DateTime<Utc>,
}

impl CartItem {
    /// Returns the pricing view of this item.
    pub fn line_item(&self) -> LineItem {
        LineItem::new(self.id.clone(), self.price)
    }
}

// =============================================================================
// Orders
// =============================================================================

/// Order status as stored by the commerce API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum OrderStatus {
    #[default]
    Pending,
    Complete,
    /// Any status this client doesn't know about yet.
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Complete => "Complete",
            OrderStatus::Unknown => "Unknown",
        }
    }
}

/// One product in an order creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderLine {
    pub product_id: String,
    pub store_id: String,
    pub quantity: u32,
}

/// Body of `POST /order/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderRequest {
    pub user_id: String,
    pub status: OrderStatus,
    pub products: Vec<OrderLine>,
    /// Amount due: the discounted total when rewards were redeemed.
    pub total_price: Money,
    /// Tells the API to deduct the redeemed points from the account.
    pub rewards_usage: bool,
}

/// A product line in the vendor's order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderedProduct {
    pub product_id: String,
    pub quantity: u32,
}

/// An order as returned by `GET /order/all?storeId=...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VendorOrder {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub store_id: String,
    pub status: OrderStatus,
    #[serde(default)]
    pub products: Vec<OrderedProduct>,
    pub total_price: Money,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// One page of vendor order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderHistoryPage {
    pub page_number: u32,
    pub limit: u32,
    pub total_records: u64,
    pub total_pages: u32,
    #[serde(default)]
    pub orders: Vec<VendorOrder>,
}

// =============================================================================
// Rental Request
// =============================================================================

/// Contact and delivery details submitted from the product page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RentalRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub city: String,
    pub address: String,
    pub phone: String,
    /// Requested rental date; only meaningful for rentals.
    #[serde(default)]
    pub date: Option<String>,
}

// =============================================================================
// Product Review
// =============================================================================

/// Review posted to `/reviews/add` from a product page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReviewRequest {
    pub name: String,
    pub email: String,
    /// Uploaded image URLs, at most [`crate::MAX_REVIEW_PHOTOS`].
    #[serde(default)]
    pub photos: Vec<String>,
    pub review_note: String,
    pub product_id: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_rate_rejects_non_positive() {
        assert!(ConversionRate::new(0).is_err());
        assert!(ConversionRate::new(-100).is_err());
        assert_eq!(ConversionRate::default().rupees_per_point(), 100);
    }

    #[test]
    fn test_conversion_rate_deserialize_validates() {
        let rate: ConversionRate = serde_json::from_str("250").unwrap();
        assert_eq!(rate.rupees_per_point(), 250);
        assert!(serde_json::from_str::<ConversionRate>("0").is_err());
    }

    #[test]
    fn test_listing_from_label() {
        assert_eq!(ListingType::from_label(Some("Sale")), ListingType::Sale);
        assert_eq!(ListingType::from_label(Some(" SALE ")), ListingType::Sale);
        assert_eq!(ListingType::from_label(Some("Rent")), ListingType::Rent);
        assert_eq!(ListingType::from_label(None), ListingType::Rent);
        assert!(ListingType::Rent.requires_date());
        assert!(!ListingType::Sale.requires_date());
    }

    #[test]
    fn test_listing_label_is_read_leniently() {
        let listing = |json: &str| serde_json::from_str::<ListingType>(json).unwrap();
        assert_eq!(listing(r#""sale""#), ListingType::Sale);
        assert_eq!(listing(r#""SALE""#), ListingType::Sale);
        assert_eq!(listing(r#""Rental""#), ListingType::Rent);
        assert_eq!(listing("null"), ListingType::Rent);
        assert_eq!(serde_json::to_string(&ListingType::Sale).unwrap(), r#""Sale""#);
    }

    #[test]
    fn test_cart_item_reads_frontend_json() {
        let json = r#"{
            "_id": "65f1a2b3c4d5e6f708091a2b",
            "storeId": "store-9",
            "title": "Embroidered Lehenga",
            "image": "https://res.cloudinary.com/demo/lehenga.jpg",
            "price": 15000,
            "size": "M",
            "productListing": "Rent",
            "dateAdded": "2025-03-05T16:07:00Z"
        }"#;

        let item: CartItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "65f1a2b3c4d5e6f708091a2b");
        assert_eq!(item.price, Money::from_rupees(15000));
        assert_eq!(item.product_brand, "N/A");
        assert_eq!(item.line_item().unit_price.rupees(), 15000);
    }

    #[test]
    fn test_review_wire_format() {
        let review = ReviewRequest {
            name: "Hira".to_string(),
            email: "hira@example.pk".to_string(),
            photos: vec![],
            review_note: "Fits well".to_string(),
            product_id: "p1".to_string(),
        };

        let value = serde_json::to_value(&review).unwrap();
        assert_eq!(value["reviewNote"], "Fits well");
        assert_eq!(value["productId"], "p1");
        assert_eq!(value["photos"], serde_json::json!([]));
    }

    #[test]
    fn test_order_request_wire_format() {
        let request = OrderRequest {
            user_id: "u1".to_string(),
            status: OrderStatus::Complete,
            products: vec![OrderLine {
                product_id: "p1".to_string(),
                store_id: "s1".to_string(),
                quantity: 1,
            }],
            total_price: Money::from_rupees(3000),
            rewards_usage: true,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["userId"], "u1");
        assert_eq!(value["status"], "Complete");
        assert_eq!(value["products"][0]["productId"], "p1");
        assert_eq!(value["totalPrice"], 3000);
        assert_eq!(value["rewardsUsage"], true);
    }

    #[test]
    fn test_unknown_order_status_is_tolerated() {
        let status: OrderStatus = serde_json::from_str("\"Shipped\"").unwrap();
        assert_eq!(status, OrderStatus::Unknown);
    }
}
