use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use visio_core::{DomainError, DomainResult, Entity, EntityId, Money};

/// Product identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub EntityId);

visio_core::impl_entity_id!(ProductId, "ProductId");

/// Catalog and stock fields supplied when creating or updating a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetails {
    pub sku: String,
    pub name: String,
    pub category: Option<String>,
    pub price: Money,
    pub cost: Money,
    pub stock_quantity: i64,
    pub min_stock_level: i64,
}

/// Product entity: catalog data plus the current stock level.
///
/// `stock_quantity` is only ever written with the output of the stock
/// adjustment calculator (or a validated non-negative level), so it never
/// goes below zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    id: ProductId,
    sku: String,
    name: String,
    category: Option<String>,
    price: Money,
    cost: Money,
    stock_quantity: i64,
    min_stock_level: i64,
    created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(
        id: ProductId,
        details: ProductDetails,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        validate(&details)?;
        Ok(Self {
            id,
            sku: details.sku.trim().to_string(),
            name: details.name.trim().to_string(),
            category: details.category,
            price: details.price,
            cost: details.cost,
            stock_quantity: details.stock_quantity,
            min_stock_level: details.min_stock_level,
            created_at,
        })
    }

    /// Replace catalog and stock fields (identity and creation time stay).
    pub fn update(&mut self, details: ProductDetails) -> DomainResult<()> {
        validate(&details)?;
        self.sku = details.sku.trim().to_string();
        self.name = details.name.trim().to_string();
        self.category = details.category;
        self.price = details.price;
        self.cost = details.cost;
        self.stock_quantity = details.stock_quantity;
        self.min_stock_level = details.min_stock_level;
        Ok(())
    }

    /// Persist a new stock level. Callers obtain the level from the stock
    /// adjustment calculator; a negative level is rejected outright.
    pub fn set_stock_level(&mut self, new_level: i64) -> DomainResult<()> {
        if new_level < 0 {
            return Err(DomainError::invariant("stock cannot go negative"));
        }
        self.stock_quantity = new_level;
        Ok(())
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn cost(&self) -> Money {
        self.cost
    }

    pub fn stock_quantity(&self) -> i64 {
        self.stock_quantity
    }

    pub fn min_stock_level(&self) -> i64 {
        self.min_stock_level
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.min_stock_level
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.stock_quantity == 0
    }

    /// Value of the stock on hand at the current sell price.
    pub fn stock_value(&self) -> Money {
        self.price.times(self.stock_quantity)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn validate(details: &ProductDetails) -> DomainResult<()> {
    if details.sku.trim().is_empty() {
        return Err(DomainError::validation("sku cannot be empty"));
    }
    if details.name.trim().is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    if details.stock_quantity < 0 {
        return Err(DomainError::validation("stock_quantity must not be negative"));
    }
    if details.min_stock_level < 0 {
        return Err(DomainError::validation("min_stock_level must not be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn details(sku: &str, stock: i64, min: i64) -> ProductDetails {
        ProductDetails {
            sku: sku.to_string(),
            name: "Laptop Pro 15".to_string(),
            category: Some("Electronics".to_string()),
            price: Money::new(dec!(1299.99)).unwrap(),
            cost: Money::new(dec!(900)).unwrap(),
            stock_quantity: stock,
            min_stock_level: min,
        }
    }

    #[test]
    fn new_product_trims_and_keeps_fields() {
        let p = Product::new(ProductId::new(), details("  LP-001 ", 50, 10), Utc::now()).unwrap();
        assert_eq!(p.sku(), "LP-001");
        assert_eq!(p.stock_quantity(), 50);
        assert!(!p.is_low_stock());
    }

    #[test]
    fn empty_sku_is_rejected() {
        let err = Product::new(ProductId::new(), details("   ", 0, 0), Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn negative_stock_is_rejected() {
        let err = Product::new(ProductId::new(), details("LP-001", -1, 0), Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn low_stock_when_at_or_below_minimum() {
        let p = Product::new(ProductId::new(), details("DL-007", 8, 10), Utc::now()).unwrap();
        assert!(p.is_low_stock());
        assert!(!p.is_out_of_stock());
    }

    #[test]
    fn set_stock_level_rejects_negative() {
        let mut p = Product::new(ProductId::new(), details("LP-001", 5, 0), Utc::now()).unwrap();
        let err = p.set_stock_level(-1).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert_eq!(p.stock_quantity(), 5);
    }

    #[test]
    fn stock_value_uses_sell_price() {
        let p = Product::new(ProductId::new(), details("LP-001", 3, 0), Utc::now()).unwrap();
        assert_eq!(p.stock_value().amount(), dec!(3899.97));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: a created product never reports a negative stock.
            #[test]
            fn created_stock_is_non_negative(stock in 0i64..10_000, min in 0i64..10_000) {
                let p = Product::new(ProductId::new(), details("LP-001", stock, min), Utc::now()).unwrap();
                prop_assert!(p.stock_quantity() >= 0);
                prop_assert_eq!(p.is_low_stock(), stock <= min);
            }
        }
    }
}
