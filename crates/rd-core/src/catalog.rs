//! The product catalog: the read-only list of furniture the shop sells.
//!
//! The catalog is supplied by the storefront and assumed static for a
//! session. The placement store only ever reads it — to validate product
//! keys on add and to resolve model/thumbnail paths for the presenter.

use crate::id::ProductId;
use smallvec::{SmallVec, smallvec};
use std::collections::HashMap;

/// Room category a product belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    LivingRoom,
    DiningRoom,
    Bedroom,
}

impl Category {
    /// The storefront's URL slug for this category.
    pub fn slug(&self) -> &'static str {
        match self {
            Category::LivingRoom => "living-room",
            Category::DiningRoom => "dining-room",
            Category::Bedroom => "bedroom",
        }
    }
}

/// One sellable furniture product.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    /// Display price in the shop currency.
    pub price: f32,
    pub description: String,
    /// Path to the 3D asset the presenter loads (glTF binary).
    pub model_path: String,
    /// Thumbnail image paths, primary first.
    pub thumbnails: SmallVec<[String; 2]>,
    pub in_stock: bool,
    pub featured: bool,
}

/// Ordered, read-only product listing with O(1) lookup by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item. Replaces an existing entry with the same id in place,
    /// preserving its position in the listing order.
    pub fn insert(&mut self, item: CatalogItem) {
        match self.index.get(&item.id) {
            Some(&pos) => self.items[pos] = item,
            None => {
                self.index.insert(item.id, self.items.len());
                self.items.push(item);
            }
        }
    }

    /// Items in listing order.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn get(&self, id: ProductId) -> Option<&CatalogItem> {
        self.index.get(&id).map(|&pos| &self.items[pos])
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The built-in furniture line-up the shop ships with.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for (key, name, category, price, description) in BUILTIN_PRODUCTS {
            catalog.insert(CatalogItem {
                id: ProductId::intern(key),
                name: (*name).to_string(),
                category: *category,
                price: *price,
                description: (*description).to_string(),
                model_path: format!("/models/{key}.glb"),
                thumbnails: smallvec![format!("/images/{key}.png")],
                in_stock: true,
                featured: matches!(category, Category::LivingRoom),
            });
        }
        catalog
    }
}

const BUILTIN_PRODUCTS: &[(&str, &str, Category, f32, &str)] = &[
    (
        "yellow_sofa",
        "Minimalist Sectional Sofa",
        Category::LivingRoom,
        1899.99,
        "Modular sectional sofa with hypoallergenic fabric covers",
    ),
    (
        "vin_arm_chair",
        "Vintage Armchair",
        Category::LivingRoom,
        649.99,
        "Vintage-inspired armchair with tufted upholstery and solid wood legs",
    ),
    (
        "wooden_coffee_table",
        "Reclaimed Wood Coffee Table",
        Category::LivingRoom,
        499.99,
        "Eco-friendly coffee table crafted from reclaimed wood with metal accents",
    ),
    (
        "love_seat",
        "Reclining Loveseat",
        Category::LivingRoom,
        899.99,
        "Cozy two-seater recliner loveseat with adjustable headrests",
    ),
    (
        "glass_dining_table",
        "Glass Top Dining Table",
        Category::DiningRoom,
        1099.99,
        "Elegant glass top dining table with stainless steel base",
    ),
    (
        "dining_bench",
        "Upholstered Dining Bench",
        Category::DiningRoom,
        299.99,
        "Backless dining bench with padded linen seat",
    ),
    (
        "high_back_chair",
        "High Back Dining Chair",
        Category::DiningRoom,
        249.99,
        "High back dining chair with turned hardwood legs",
    ),
    (
        "nesting_tables",
        "Nesting Side Tables",
        Category::DiningRoom,
        379.99,
        "Set of two nesting side tables in walnut veneer",
    ),
    (
        "storage_bed",
        "Upholstered Storage Bed",
        Category::Bedroom,
        1799.99,
        "Queen storage bed with hydraulic lift and upholstered headboard",
    ),
    (
        "mirrored_dresser",
        "Mirrored Dresser",
        Category::Bedroom,
        699.99,
        "Dresser with a full-width mirror and six soft-close drawers",
    ),
    (
        "linen_chair",
        "Linen Accent Chair",
        Category::Bedroom,
        329.99,
        "Slipper-style accent chair in washed linen",
    ),
    (
        "floating_nightstand",
        "Floating Nightstand",
        Category::Bedroom,
        259.99,
        "Wall-mounted nightstand with hidden cable routing",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_listing_is_ordered_and_indexed() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), BUILTIN_PRODUCTS.len());
        assert_eq!(catalog.items()[0].name, "Minimalist Sectional Sofa");

        let sofa = catalog.get(ProductId::intern("yellow_sofa")).unwrap();
        assert_eq!(sofa.model_path, "/models/yellow_sofa.glb");
        assert!(catalog.contains(sofa.id));
        assert!(!catalog.contains(ProductId::intern("no_such_product")));
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut catalog = Catalog::builtin();
        let id = ProductId::intern("love_seat");
        let pos_before = catalog
            .items()
            .iter()
            .position(|item| item.id == id)
            .unwrap();

        let mut updated = catalog.get(id).unwrap().clone();
        updated.price = 799.99;
        catalog.insert(updated);

        assert_eq!(catalog.len(), BUILTIN_PRODUCTS.len());
        let pos_after = catalog
            .items()
            .iter()
            .position(|item| item.id == id)
            .unwrap();
        assert_eq!(pos_before, pos_after);
        assert_eq!(catalog.get(id).unwrap().price, 799.99);
    }
}
