//! User repository: the identity store

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use common::error::StoreError;
use tracing::info;

use crate::error::{DomainError, DomainResult};
use crate::models::{User, UserId};

/// Identity store contract
pub trait UserRepository: Send + Sync {
    /// Store a new user
    ///
    /// Fails with [`DomainError::Conflict`] when the email is already taken.
    fn insert(&self, user: User) -> DomainResult<User>;

    /// Find a user by ID
    fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>>;

    /// Find a user by normalised email
    fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
}

/// Identity store held in process memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    /// Create an empty user repository
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn insert(&self, user: User) -> DomainResult<User> {
        info!("Creating new user: {}", user.email);

        let mut users = self.users.write().map_err(StoreError::poisoned)?;
        if users.values().any(|existing| existing.email == user.email) {
            return Err(DomainError::conflict("Email já cadastrado!"));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let users = self.users.read().map_err(StoreError::poisoned)?;
        Ok(users.get(&id).cloned())
    }

    fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let users = self.users.read().map_err(StoreError::poisoned)?;
        Ok(users.values().find(|user| user.email == email).cloned())
    }
}
