//! Top-grossing products

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{duration_factor, round_to};
use crate::period::DateRange;

/// A catalog entry with its revenue over a 28-day period
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub base_revenue: f64,
    pub img_url: String,
}

impl CatalogItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, base_revenue: f64) -> Self {
        let id = id.into();
        Self {
            img_url: format!("https://picsum.photos/40/40?random={}", id),
            id,
            name: name.into(),
            base_revenue,
        }
    }
}

/// A ranked product for the current period
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub revenue: f64,
    pub pct_change: f64,
    pub img_url: String,
}

/// The built-in storefront catalog
pub fn default_catalog() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new("1", "Consola PS5 Standard Digital Edition", 1_250_345.75),
        CatalogItem::new("2", "Smart LED Google TV RCA 55\" UHD 4K", 880_112.50),
        CatalogItem::new("3", "Smart LED Google TV TCL 55\" UHD 4K", 750_980.90),
        CatalogItem::new("4", "iPhone 15 Pro Max 256GB Titanium Blue", 1_850_670.20),
        CatalogItem::new("5", "Samsung Galaxy S24 Ultra 512GB", 1_675_320.00),
        CatalogItem::new("6", "MacBook Air M3 Chip 13-inch", 1_100_850.30),
        CatalogItem::new("7", "Logitech MX Master 3S Wireless Mouse", 95_234.80),
    ]
}

/// Scale the catalog to `current` and rank by revenue, highest first
pub fn compute_top_products<R: Rng + ?Sized>(
    current: &DateRange,
    catalog: &[CatalogItem],
    rng: &mut R,
) -> Vec<Product> {
    let factor = duration_factor(current.day_count());

    let mut products: Vec<Product> = catalog
        .iter()
        .map(|item| Product {
            id: item.id.clone(),
            name: item.name.clone(),
            revenue: round_to(item.base_revenue * factor * rng.gen_range(0.95..1.05), 2),
            pct_change: round_to((rng.gen::<f64>() - 0.5) * 30.0, 2),
            img_url: item.img_url.clone(),
        })
        .collect();

    products.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    products
}
