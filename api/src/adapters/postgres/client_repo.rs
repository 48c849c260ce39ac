//! PostgreSQL adapter for ClientRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use crate::domain::entities::{Client, ClientId, NewClient};
use crate::domain::ports::ClientRepository;
use crate::entity::clients;
use crate::error::DomainError;

pub struct PostgresClientRepository {
    db: DatabaseConnection,
}

impl PostgresClientRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<clients::Model> for Client {
    fn from(m: clients::Model) -> Self {
        Client {
            id: ClientId(m.id),
            name: m.name,
            email: m.email,
            phone: m.phone,
            address: m.address,
            city: m.city,
            postal_code: m.postal_code,
            created_by: m.created_by,
            updated_by: m.updated_by,
            created_at: m.created_at.with_timezone(&Utc),
            updated_at: m.updated_at.with_timezone(&Utc),
        }
    }
}

pub(crate) fn client_active_model(
    client: &NewClient,
    created_by: &str,
) -> clients::ActiveModel {
    let now = Utc::now().fixed_offset();
    clients::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(client.name.clone()),
        email: Set(client.email.clone()),
        phone: Set(client.phone.clone()),
        address: Set(client.address.clone()),
        city: Set(client.city.clone()),
        postal_code: Set(client.postal_code.clone()),
        created_by: Set(created_by.to_string()),
        updated_by: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

#[async_trait]
impl ClientRepository for PostgresClientRepository {
    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, DomainError> {
        let result = clients::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn create(&self, client: &NewClient, created_by: &str) -> Result<Client, DomainError> {
        let result = client_active_model(client, created_by)
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }
}
