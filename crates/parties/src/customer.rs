use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use visio_core::{DomainError, DomainResult, Entity, EntityId};

/// Customer identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub EntityId);

visio_core::impl_entity_id!(CustomerId, "CustomerId");

/// Optional contact information for a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Customer entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    email: String,
    contact: ContactInfo,
    created_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(
        id: CustomerId,
        name: String,
        email: String,
        contact: ContactInfo,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.trim().to_string();
        let email = normalize_email(&email)?;
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        Ok(Self {
            id,
            name,
            email,
            contact,
            created_at,
        })
    }

    pub fn update(&mut self, name: String, email: String, contact: ContactInfo) -> DomainResult<()> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        self.email = normalize_email(&email)?;
        self.name = name;
        self.contact = contact;
        Ok(())
    }

    pub fn id_typed(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Lowercase and minimally validate an email address.
fn normalize_email(raw: &str) -> DomainResult<String> {
    let email = raw.trim().to_lowercase();
    // Enough for an internal tool; full RFC validation is not the goal.
    if email.is_empty() || !email.contains('@') {
        return Err(DomainError::validation(format!("invalid email: {raw:?}")));
    }
    Ok(email)
}
