//! Catalog records: products and categories.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::id::ProductId;
use super::price::discounted_price;

/// A product as listed by the catalog API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub discount_percentage: Decimal,
    #[serde(default)]
    pub rating: Option<Decimal>,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    /// Unit price after the catalog discount, rounded to cents.
    #[must_use]
    pub fn discounted_price(&self) -> Decimal {
        discounted_price(self.price, self.discount_percentage)
    }

    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock.is_none_or(|stock| stock > 0)
    }
}

/// One page of products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProductPage {
    pub products: Vec<Product>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
}

/// A product category.
///
/// Older catalog deployments return categories as bare slugs, newer ones as
/// `{slug, name, url}` objects; both deserialize into this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Category {
    pub slug: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Category {
    /// Build a category from a slug, deriving a display name from it.
    #[must_use]
    pub fn from_slug(slug: &str) -> Self {
        let name = slug
            .split('-')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars).collect()
                })
            })
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            slug: slug.to_owned(),
            name,
            url: None,
        }
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Slug(String),
            Full {
                slug: String,
                name: Option<String>,
                url: Option<String>,
            },
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Slug(slug) => Self::from_slug(&slug),
            Wire::Full { slug, name, url } => {
                let mut category = Self::from_slug(&slug);
                if let Some(name) = name {
                    category.name = name;
                }
                category.url = url;
                category
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_category_accepts_both_shapes() {
        let categories: Vec<Category> = serde_json::from_str(
            r#"["home-decoration", {"slug": "laptops", "name": "Laptops", "url": "https://x/laptops"}]"#,
        )
        .unwrap();
        assert_eq!(categories[0].name, "Home Decoration");
        assert_eq!(categories[1].slug, "laptops");
        assert_eq!(categories[1].url.as_deref(), Some("https://x/laptops"));
    }

    #[test]
    fn test_product_from_catalog_json() {
        let product: Product = serde_json::from_str(
            r#"{"id": 1, "title": "iPhone 9", "price": 549, "discountPercentage": 12.96,
                "stock": 94, "brand": "Apple", "category": "smartphones"}"#,
        )
        .unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.discounted_price(), Decimal::new(47785, 2));
        assert!(product.in_stock());
        assert!(product.images.is_empty());
    }
}
