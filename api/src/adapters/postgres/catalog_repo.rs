//! PostgreSQL adapter for CatalogRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::entities::{
    CatalogTree, Category, CategoryId, Collection, CollectionId, Product, ProductId,
};
use crate::domain::ports::{
    CatalogRepository, NewCategory, NewCollection, NewProduct, UpdateCategory, UpdateCollection,
    UpdateProduct,
};
use crate::entity::{categories, collections, products};
use crate::error::DomainError;

pub struct PostgresCatalogRepository {
    db: DatabaseConnection,
}

impl PostgresCatalogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<collections::Model> for Collection {
    fn from(m: collections::Model) -> Self {
        Collection {
            id: CollectionId(m.id),
            name: m.name,
            heading: m.heading,
            description: m.description,
            price_range: m.price_range,
            image: m.image,
            link: m.link,
            sort_order: m.sort_order,
            is_active: m.is_active,
        }
    }
}

impl From<categories::Model> for Category {
    fn from(m: categories::Model) -> Self {
        Category {
            id: CategoryId(m.id),
            collection_id: CollectionId(m.collection_id),
            name: m.name,
            image: m.image,
            description: m.description,
            link: m.link,
            is_active: m.is_active,
        }
    }
}

impl From<products::Model> for Product {
    fn from(m: products::Model) -> Self {
        Product {
            id: ProductId(m.id),
            collection_id: m.collection_id.map(CollectionId),
            category_id: m.category_id.map(CategoryId),
            parent_id: m.parent_id.map(ProductId),
            name: m.name,
            is_new: m.is_new,
            heading: m.heading,
            description: m.description,
            price: m.price,
            discounted_price: m.discounted_price,
            currency: m.currency,
            image: m.image,
            link: m.link,
            is_active: m.is_active,
        }
    }
}

#[async_trait]
impl CatalogRepository for PostgresCatalogRepository {
    async fn load_tree(&self) -> Result<CatalogTree, DomainError> {
        let collections = collections::Entity::find()
            .order_by_asc(collections::Column::SortOrder)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let categories = categories::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let products = products::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(CatalogTree {
            collections: collections.into_iter().map(Into::into).collect(),
            categories: categories.into_iter().map(Into::into).collect(),
            products: products.into_iter().map(Into::into).collect(),
        })
    }

    async fn find_collection(
        &self,
        id: &CollectionId,
    ) -> Result<Option<Collection>, DomainError> {
        let result = collections::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(result.map(Into::into))
    }

    async fn create_collection(
        &self,
        collection: &NewCollection,
        created_by: &str,
    ) -> Result<Collection, DomainError> {
        let now = Utc::now().fixed_offset();
        let result = collections::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(collection.name.clone()),
            heading: Set(collection.heading.clone()),
            description: Set(collection.description.clone()),
            price_range: Set(collection.price_range.clone()),
            image: Set(collection.image.clone()),
            link: Set(collection.link.clone()),
            sort_order: Set(collection.sort_order),
            is_active: Set(true),
            created_by: Set(created_by.to_string()),
            updated_by: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn update_collection(
        &self,
        id: &CollectionId,
        changes: &UpdateCollection,
        updated_by: &str,
    ) -> Result<Collection, DomainError> {
        let mut model = collections::ActiveModel {
            id: Set(id.0),
            updated_by: Set(Some(updated_by.to_string())),
            updated_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        };
        if let Some(name) = &changes.name {
            model.name = Set(name.clone());
        }
        if let Some(heading) = &changes.heading {
            model.heading = Set(Some(heading.clone()));
        }
        if let Some(description) = &changes.description {
            model.description = Set(Some(description.clone()));
        }
        if let Some(price_range) = &changes.price_range {
            model.price_range = Set(Some(price_range.clone()));
        }
        if let Some(image) = &changes.image {
            model.image = Set(Some(image.clone()));
        }
        if let Some(link) = &changes.link {
            model.link = Set(Some(link.clone()));
        }
        if let Some(sort_order) = changes.sort_order {
            model.sort_order = Set(sort_order);
        }
        if let Some(is_active) = changes.is_active {
            model.is_active = Set(is_active);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        let result = categories::Entity::find()
            .filter(categories::Column::IsActive.eq(true))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_category(&self, id: &CategoryId) -> Result<Option<Category>, DomainError> {
        let result = categories::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(result.map(Into::into))
    }

    async fn create_category(
        &self,
        category: &NewCategory,
        created_by: &str,
    ) -> Result<Category, DomainError> {
        let now = Utc::now().fixed_offset();
        let result = categories::ActiveModel {
            id: Set(Uuid::new_v4()),
            collection_id: Set(category.collection_id.0),
            name: Set(category.name.clone()),
            image: Set(category.image.clone()),
            description: Set(category.description.clone()),
            link: Set(category.link.clone()),
            is_active: Set(true),
            created_by: Set(created_by.to_string()),
            updated_by: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn update_category(
        &self,
        id: &CategoryId,
        changes: &UpdateCategory,
        updated_by: &str,
    ) -> Result<Category, DomainError> {
        let mut model = categories::ActiveModel {
            id: Set(id.0),
            updated_by: Set(Some(updated_by.to_string())),
            updated_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        };
        if let Some(name) = &changes.name {
            model.name = Set(name.clone());
        }
        if let Some(image) = &changes.image {
            model.image = Set(Some(image.clone()));
        }
        if let Some(description) = &changes.description {
            model.description = Set(Some(description.clone()));
        }
        if let Some(link) = &changes.link {
            model.link = Set(Some(link.clone()));
        }
        if let Some(is_active) = changes.is_active {
            model.is_active = Set(is_active);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn find_product(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        let result = products::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;
        Ok(result.map(Into::into))
    }

    async fn product_ancestors(&self, id: &ProductId) -> Result<Vec<ProductId>, DomainError> {
        let mut ancestors = Vec::new();
        let mut current = Some(*id);

        while let Some(pid) = current {
            let model = products::Entity::find_by_id(pid.0)
                .one(&self.db)
                .await
                .map_err(|e| DomainError::Database(e.to_string()))?;

            match model.and_then(|m| m.parent_id) {
                Some(parent) => {
                    let parent = ProductId(parent);
                    ancestors.push(parent);
                    current = Some(parent);
                }
                None => current = None,
            }

            // Defensive bound in case of a cycle in stored data
            if ancestors.len() > 16 {
                return Err(DomainError::Internal(
                    "Product parent chain too deep".to_string(),
                ));
            }
        }

        Ok(ancestors)
    }

    async fn create_product(
        &self,
        product: &NewProduct,
        created_by: &str,
    ) -> Result<Product, DomainError> {
        let now = Utc::now().fixed_offset();
        let result = products::ActiveModel {
            id: Set(Uuid::new_v4()),
            collection_id: Set(product.collection_id.map(|c| c.0)),
            category_id: Set(product.category_id.map(|c| c.0)),
            parent_id: Set(product.parent_id.map(|p| p.0)),
            name: Set(product.name.clone()),
            is_new: Set(product.is_new),
            heading: Set(product.heading.clone()),
            description: Set(product.description.clone()),
            price: Set(product.price),
            discounted_price: Set(product.discounted_price),
            currency: Set(product.currency.clone()),
            image: Set(product.image.clone()),
            link: Set(product.link.clone()),
            is_active: Set(true),
            created_by: Set(created_by.to_string()),
            updated_by: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn update_product(
        &self,
        id: &ProductId,
        changes: &UpdateProduct,
        updated_by: &str,
    ) -> Result<Product, DomainError> {
        let mut model = products::ActiveModel {
            id: Set(id.0),
            updated_by: Set(Some(updated_by.to_string())),
            updated_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        };
        if let Some(name) = &changes.name {
            model.name = Set(name.clone());
        }
        if let Some(is_new) = changes.is_new {
            model.is_new = Set(is_new);
        }
        if let Some(heading) = &changes.heading {
            model.heading = Set(Some(heading.clone()));
        }
        if let Some(description) = &changes.description {
            model.description = Set(Some(description.clone()));
        }
        if let Some(price) = changes.price {
            model.price = Set(price);
        }
        if let Some(discounted_price) = changes.discounted_price {
            model.discounted_price = Set(Some(discounted_price));
        }
        if let Some(currency) = &changes.currency {
            model.currency = Set(Some(currency.clone()));
        }
        if let Some(image) = &changes.image {
            model.image = Set(Some(image.clone()));
        }
        if let Some(link) = &changes.link {
            model.link = Set(Some(link.clone()));
        }
        if let Some(is_active) = changes.is_active {
            model.is_active = Set(is_active);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn search_products(
        &self,
        query: Option<&str>,
        is_new: Option<bool>,
    ) -> Result<Vec<Product>, DomainError> {
        let mut find = products::Entity::find().filter(products::Column::IsActive.eq(true));

        if let Some(q) = query {
            find = find.filter(products::Column::Name.contains(q));
        }
        if let Some(flag) = is_new {
            find = find.filter(products::Column::IsNew.eq(flag));
        }

        let result = find
            .order_by_asc(products::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
