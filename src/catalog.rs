//! Menu catalog
//!
//! The trusted source of item prices. Loaded once from YAML and then
//! queried by the UI for category tabs, the gallery filter and search.

use std::fs;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core_types::Rupiah;
use crate::money::{MoneyError, parse_price};

/// Gallery filter value that shows every picture
pub const GALLERY_ALL: &str = "all";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse catalog yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid price for '{item}': {source}")]
    InvalidPrice { item: String, source: MoneyError },

    #[error("Duplicate menu item: {0}")]
    DuplicateItem(String),

    #[error("Menu item name must not be empty")]
    EmptyName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub name: String,
    pub price: Rupiah,
    pub category: String,
    pub description: String,
    /// Free-form labels ("signature", "vegetarian"), searchable
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub image: String,
}

// ============================================================
// RAW FILE FORMAT
// ============================================================

/// Prices may be written as YAML integers or as digit strings
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Whole(u64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct RawMenuItem {
    name: String,
    price: RawPrice,
    category: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    items: Vec<RawMenuItem>,
    #[serde(default)]
    gallery: Vec<GalleryItem>,
}

// ============================================================
// CATALOG
// ============================================================

/// Menu items in display order with a name index for price lookup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<MenuItem>,
    name_to_index: FxHashMap<String, usize>,
    gallery: Vec<GalleryItem>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and parse a catalog file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_yaml(&content)?;
        tracing::info!(
            path = %path.display(),
            items = catalog.items.len(),
            gallery = catalog.gallery.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn from_yaml(content: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_yaml::from_str(content)?;
        let mut catalog = Self::new();
        for item in raw.items {
            let price = match item.price {
                RawPrice::Whole(value) => value,
                RawPrice::Text(text) => {
                    parse_price(&text).map_err(|source| CatalogError::InvalidPrice {
                        item: item.name.clone(),
                        source,
                    })?
                }
            };
            catalog.insert(MenuItem {
                name: item.name,
                price,
                category: item.category,
                description: item.description,
                tags: item.tags,
            })?;
        }
        catalog.gallery = raw.gallery;
        Ok(catalog)
    }

    /// Append an item. Names are trimmed and must be unique.
    pub fn insert(&mut self, mut item: MenuItem) -> Result<(), CatalogError> {
        item.name = item.name.trim().to_string();
        if item.name.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if self.name_to_index.contains_key(&item.name) {
            return Err(CatalogError::DuplicateItem(item.name));
        }
        self.name_to_index.insert(item.name.clone(), self.items.len());
        self.items.push(item);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&MenuItem> {
        self.name_to_index.get(name).map(|&idx| &self.items[idx])
    }

    #[inline]
    pub fn price_of(&self, name: &str) -> Option<Rupiah> {
        self.get(name).map(|item| item.price)
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct categories in first-seen order (menu tabs)
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.category.as_str()) {
                seen.push(&item.category);
            }
        }
        seen
    }

    /// Items of one menu tab
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a MenuItem> + 'a {
        self.items
            .iter()
            .filter(move |item| item.category == category)
    }

    /// Gallery pictures for a filter tab; [`GALLERY_ALL`] shows everything
    pub fn gallery(&self, filter: &str) -> Vec<&GalleryItem> {
        self.gallery
            .iter()
            .filter(|g| filter == GALLERY_ALL || g.category == filter)
            .collect()
    }

    /// Case-insensitive substring match on name, description or any tag.
    /// A blank term matches every item.
    pub fn search(&self, term: &str) -> Vec<&MenuItem> {
        let term = term.trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| {
                term.is_empty()
                    || item.name.to_lowercase().contains(&term)
                    || item.description.to_lowercase().contains(&term)
                    || item.tags.iter().any(|tag| tag.to_lowercase().contains(&term))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
items:
  - name: Latte
    price: 25000
    category: coffee
    description: Espresso with steamed milk
  - name: Kopi Susu Gula Aren
    price: "22000"
    category: coffee
    description: Iced coffee with palm sugar
    tags: [signature, iced]
  - name: Croissant
    price: 18000
    category: pastry
    description: Butter croissant, baked daily
    tags: [Vegetarian]
gallery:
  - title: Morning bar
    category: interior
  - title: Latte art
    category: coffee
"#;

    #[test]
    fn test_load_sample() {
        let catalog = Catalog::from_yaml(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.price_of("Latte"), Some(25000));
        assert_eq!(catalog.price_of("Kopi Susu Gula Aren"), Some(22000));
        assert_eq!(catalog.price_of("Matcha"), None);
    }

    #[test]
    fn test_categories_first_seen_order() {
        let catalog = Catalog::from_yaml(SAMPLE).unwrap();
        assert_eq!(catalog.categories(), vec!["coffee", "pastry"]);
        assert_eq!(catalog.in_category("coffee").count(), 2);
        assert_eq!(catalog.in_category("tea").count(), 0);
    }

    #[test]
    fn test_gallery_filter() {
        let catalog = Catalog::from_yaml(SAMPLE).unwrap();
        assert_eq!(catalog.gallery(GALLERY_ALL).len(), 2);
        let coffee = catalog.gallery("coffee");
        assert_eq!(coffee.len(), 1);
        assert_eq!(coffee[0].title, "Latte art");
    }

    #[test]
    fn test_search_name_and_description() {
        let catalog = Catalog::from_yaml(SAMPLE).unwrap();

        let names = |term: &str| -> Vec<String> {
            catalog.search(term).iter().map(|i| i.name.clone()).collect()
        };
        assert_eq!(names("LATTE"), vec!["Latte"]);
        assert_eq!(names("milk"), vec!["Latte"]);
        assert_eq!(names("coffee"), vec!["Kopi Susu Gula Aren"]);
        assert_eq!(names("  ").len(), 3);
        assert!(names("sushi").is_empty());
    }

    #[test]
    fn test_search_matches_tags() {
        let catalog = Catalog::from_yaml(SAMPLE).unwrap();

        assert!(catalog.get("Latte").unwrap().tags.is_empty());
        assert_eq!(
            catalog.get("Croissant").unwrap().tags,
            vec!["Vegetarian".to_string()]
        );

        let names = |term: &str| -> Vec<String> {
            catalog.search(term).iter().map(|i| i.name.clone()).collect()
        };
        assert_eq!(names("Signature"), vec!["Kopi Susu Gula Aren"]);
        assert_eq!(names("vegetarian"), vec!["Croissant"]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let yaml = "items:\n  - {name: Latte, price: 1, category: c}\n  - {name: ' Latte ', price: 2, category: c}\n";
        assert!(matches!(
            Catalog::from_yaml(yaml),
            Err(CatalogError::DuplicateItem(name)) if name == "Latte"
        ));
    }

    #[test]
    fn test_invalid_price_rejected() {
        let yaml = "items:\n  - {name: Latte, price: '25,000', category: c}\n";
        assert!(matches!(
            Catalog::from_yaml(yaml),
            Err(CatalogError::InvalidPrice { item, .. }) if item == "Latte"
        ));

        let yaml = "items:\n  - {name: Latte, price: -5, category: c}\n";
        assert!(Catalog::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Catalog::load("/nonexistent/catalog.yaml"),
            Err(CatalogError::Io { .. })
        ));
    }
}
