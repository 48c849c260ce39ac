//! Catalog service
//!
//! Collection/category/product CRUD plus the denormalized navbar cache.
//! Writes compare the nav identity (name/image/link/is_new) before and
//! after; the navbar is only rebuilt when one of those fields changed.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::entities::{
    check_product_depth, CatalogTree, Category, CategoryId, Collection, CollectionId, Content,
    Product, ProductId,
};
use crate::domain::ports::{
    CatalogRepository, ContentRepository, NewCategory, NewCollection, NewProduct, ObjectStorage,
    UpdateCategory, UpdateCollection, UpdateProduct,
};
use crate::error::AppError;

pub struct CatalogService<CR, CO, S>
where
    CR: CatalogRepository,
    CO: ContentRepository,
    S: ObjectStorage,
{
    catalog: Arc<CR>,
    contents: Arc<CO>,
    storage: Arc<S>,
    navbar_object_key: String,
}

impl<CR, CO, S> CatalogService<CR, CO, S>
where
    CR: CatalogRepository,
    CO: ContentRepository,
    S: ObjectStorage,
{
    pub fn new(
        catalog: Arc<CR>,
        contents: Arc<CO>,
        storage: Arc<S>,
        navbar_object_key: String,
    ) -> Self {
        Self {
            catalog,
            contents,
            storage,
            navbar_object_key,
        }
    }

    pub async fn browse(&self) -> Result<CatalogTree, AppError> {
        Ok(self.catalog.load_tree().await?)
    }

    pub async fn navbar(&self) -> Result<Option<Content>, AppError> {
        Ok(self.contents.find_navbar().await?)
    }

    pub async fn search_products(
        &self,
        query: Option<&str>,
        is_new: Option<bool>,
    ) -> Result<Vec<Product>, AppError> {
        Ok(self.catalog.search_products(query, is_new).await?)
    }

    pub async fn create_collection(
        &self,
        collection: NewCollection,
        created_by: &str,
    ) -> Result<Collection, AppError> {
        let created = self.catalog.create_collection(&collection, created_by).await?;
        // New nodes always change the navbar
        self.rebuild_navbar(created_by).await?;
        Ok(created)
    }

    pub async fn update_collection(
        &self,
        id: &CollectionId,
        changes: UpdateCollection,
        updated_by: &str,
    ) -> Result<Collection, AppError> {
        let before = self
            .catalog
            .find_collection(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Collection not found.".to_string()))?;

        let after = self.catalog.update_collection(id, &changes, updated_by).await?;

        if before.nav_identity() != after.nav_identity()
            || before.is_active != after.is_active
            || before.sort_order != after.sort_order
        {
            self.rebuild_navbar(updated_by).await?;
        }

        Ok(after)
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        Ok(self.catalog.list_categories().await?)
    }

    pub async fn create_category(
        &self,
        category: NewCategory,
        created_by: &str,
    ) -> Result<Category, AppError> {
        if self
            .catalog
            .find_collection(&category.collection_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Collection not found.".to_string()));
        }

        let created = self.catalog.create_category(&category, created_by).await?;
        self.rebuild_navbar(created_by).await?;
        Ok(created)
    }

    pub async fn update_category(
        &self,
        id: &CategoryId,
        changes: UpdateCategory,
        updated_by: &str,
    ) -> Result<Category, AppError> {
        let before = self
            .catalog
            .find_category(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found.".to_string()))?;

        let after = self.catalog.update_category(id, &changes, updated_by).await?;

        if before.nav_identity() != after.nav_identity() || before.is_active != after.is_active {
            self.rebuild_navbar(updated_by).await?;
        }

        Ok(after)
    }

    pub async fn create_product(
        &self,
        product: NewProduct,
        created_by: &str,
    ) -> Result<Product, AppError> {
        if let Some(parent_id) = product.parent_id {
            if self.catalog.find_product(&parent_id).await?.is_none() {
                return Err(AppError::NotFound("Parent product not found.".to_string()));
            }
            let mut chain = self.catalog.product_ancestors(&parent_id).await?;
            chain.insert(0, parent_id);
            check_product_depth(&chain)?;
        }

        let created = self.catalog.create_product(&product, created_by).await?;
        self.rebuild_navbar(created_by).await?;
        Ok(created)
    }

    pub async fn update_product(
        &self,
        id: &ProductId,
        changes: UpdateProduct,
        updated_by: &str,
    ) -> Result<Product, AppError> {
        let before = self
            .catalog
            .find_product(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found.".to_string()))?;

        let after = self.catalog.update_product(id, &changes, updated_by).await?;

        if before.nav_identity() != after.nav_identity() || before.is_active != after.is_active {
            self.rebuild_navbar(updated_by).await?;
        }

        Ok(after)
    }

    /// Rebuild the navbar JSON from the active catalog and write it to both
    /// the shared storage document and the contents row. The storage
    /// document is download-modify-upload; only its `nav_links` key is
    /// touched. Storage failures are logged, the database row is the source
    /// the API serves from.
    pub async fn rebuild_navbar(&self, updated_by: &str) -> Result<Content, AppError> {
        let tree = self.catalog.load_tree().await?;
        let nav = tree.to_nav_json();

        if let Err(e) = self.sync_storage_document(&nav).await {
            tracing::error!(error = %e, "Navbar storage sync failed");
        }

        Ok(self.contents.upsert_navbar(&nav, updated_by).await?)
    }

    async fn sync_storage_document(&self, nav: &Value) -> Result<(), crate::error::StorageError> {
        let existing = self.storage.download(&self.navbar_object_key).await?;

        let mut document: Value = existing
            .and_then(|body| serde_json::from_str(&body).ok())
            .unwrap_or_else(|| serde_json::json!({}));

        document["nav_links"] = nav.clone();

        self.storage
            .upload(&self.navbar_object_key, document.to_string())
            .await
    }
}
