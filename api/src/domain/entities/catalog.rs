//! Catalog domain entities
//!
//! Collection -> Category -> Product, with products optionally nesting under
//! a parent product up to four levels deep. The active catalog feeds the
//! denormalized navbar JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::DomainError;

pub const MAX_PRODUCT_DEPTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectionId(pub Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub Uuid);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub Uuid);

impl CollectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl CategoryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl ProductId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Top-level catalog node ("Collection" in the storefront)
#[derive(Debug, Clone, Serialize)]
pub struct Collection {
    pub id: CollectionId,
    pub name: String,
    pub heading: Option<String>,
    pub description: Option<String>,
    pub price_range: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub collection_id: CollectionId,
    pub name: String,
    pub image: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub collection_id: Option<CollectionId>,
    pub category_id: Option<CategoryId>,
    /// Parent product when nested; depth bounded by [`MAX_PRODUCT_DEPTH`]
    pub parent_id: Option<ProductId>,
    pub name: String,
    pub is_new: bool,
    pub heading: Option<String>,
    pub description: Option<String>,
    pub price: i64,
    pub discounted_price: Option<i64>,
    pub currency: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub is_active: bool,
}

/// Fields whose change invalidates the navbar cache
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavIdentity {
    pub name: String,
    pub image: Option<String>,
    pub link: Option<String>,
    pub is_new: bool,
}

impl Collection {
    pub fn nav_identity(&self) -> NavIdentity {
        NavIdentity {
            name: self.name.clone(),
            image: self.image.clone(),
            link: self.link.clone(),
            is_new: false,
        }
    }
}

impl Category {
    pub fn nav_identity(&self) -> NavIdentity {
        NavIdentity {
            name: self.name.clone(),
            image: self.image.clone(),
            link: self.link.clone(),
            is_new: false,
        }
    }
}

impl Product {
    pub fn nav_identity(&self) -> NavIdentity {
        NavIdentity {
            name: self.name.clone(),
            image: self.image.clone(),
            link: self.link.clone(),
            is_new: self.is_new,
        }
    }
}

/// Verify a product chain stays within the nesting limit. `ancestors` is the
/// parent chain from immediate parent upward, as stored.
pub fn check_product_depth(ancestors: &[ProductId]) -> Result<(), DomainError> {
    // The new product sits one level below its deepest ancestor
    if ancestors.len() + 1 > MAX_PRODUCT_DEPTH {
        return Err(DomainError::Validation(
            "Products can only be nested up to 4 levels.".to_string(),
        ));
    }
    Ok(())
}

/// Fully assembled active catalog, as loaded by the repository
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogTree {
    pub collections: Vec<Collection>,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
}

impl CatalogTree {
    /// Build the filtered hierarchical navbar view: name/image/link per
    /// node, `is_new` on products, collections ordered by `sort_order`.
    pub fn to_nav_json(&self) -> Value {
        let mut collections: Vec<&Collection> =
            self.collections.iter().filter(|c| c.is_active).collect();
        collections.sort_by_key(|c| c.sort_order);

        let nodes: Vec<Value> = collections
            .iter()
            .map(|collection| {
                let categories: Vec<Value> = self
                    .categories
                    .iter()
                    .filter(|cat| cat.is_active && cat.collection_id == collection.id)
                    .map(|cat| {
                        let products = self.nav_products(|p| p.category_id == Some(cat.id));
                        serde_json::json!({
                            "name": cat.name,
                            "image": cat.image.clone().unwrap_or_default(),
                            "link": cat.link.clone().unwrap_or_default(),
                            "Products": products,
                        })
                    })
                    .collect();

                serde_json::json!({
                    "name": collection.name,
                    "image": collection.image.clone().unwrap_or_default(),
                    "link": collection.link.clone().unwrap_or_default(),
                    "Categories": categories,
                })
            })
            .collect();

        Value::Array(nodes)
    }

    fn nav_products<F>(&self, select: F) -> Vec<Value>
    where
        F: Fn(&Product) -> bool,
    {
        self.products
            .iter()
            .filter(|p| p.is_active && p.parent_id.is_none() && select(p))
            .map(|p| self.nav_product_node(p))
            .collect()
    }

    fn nav_product_node(&self, product: &Product) -> Value {
        let children: Vec<Value> = self
            .products
            .iter()
            .filter(|p| p.is_active && p.parent_id == Some(product.id))
            .map(|p| self.nav_product_node(p))
            .collect();

        serde_json::json!({
            "name": product.name,
            "image": product.image.clone().unwrap_or_default(),
            "link": product.link.clone().unwrap_or_default(),
            "is_new": product.is_new,
            "Products": children,
        })
    }
}
