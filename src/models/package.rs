//! Coaching package catalog
//!
//! The catalog is a compile-time constant, not a stored entity: packages are
//! never persisted per purchase, and there is no API resource for them. The
//! four tiers below are the complete offering.

use once_cell::sync::Lazy;
use serde::Serialize;

/// A fixed-price coaching tier.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    /// Catalog identifier (stored on a user as `current_package`)
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Duration in months
    pub duration_months: u32,
    /// Price for the full duration
    pub price: u32,
    /// Ordered feature list
    pub features: &'static [&'static str],
}

static CATALOG: Lazy<Vec<Package>> = Lazy::new(|| {
    vec![
        Package {
            id: "monthly",
            name: "1 Month Package",
            duration_months: 1,
            price: 500,
            features: &[
                "15-min zoom consultation",
                "Diet planning",
                "Exercise routines",
                "Progress tracking",
            ],
        },
        Package {
            id: "quarterly",
            name: "3 Month Package",
            duration_months: 3,
            price: 1000,
            features: &[
                "15-min zoom consultation",
                "Diet planning",
                "Exercise routines",
                "Progress tracking",
                "10% discount",
            ],
        },
        Package {
            id: "halfYearly",
            name: "6 Month Package",
            duration_months: 6,
            price: 4500,
            features: &[
                "15-min zoom consultation",
                "Diet planning",
                "Exercise routines",
                "Progress tracking",
                "25% discount",
                "Priority scheduling",
            ],
        },
        Package {
            id: "yearly",
            name: "12 Month Package",
            duration_months: 12,
            price: 6000,
            features: &[
                "15-min zoom consultation",
                "Diet planning",
                "Exercise routines",
                "Progress tracking",
                "50% discount",
                "Priority scheduling",
                "24/7 WhatsApp support",
            ],
        },
    ]
});

/// The full package catalog, cheapest tier first.
pub fn package_catalog() -> &'static [Package] {
    &CATALOG
}
