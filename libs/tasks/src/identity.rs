//! Registration, authentication and current-user resolution

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::SharedClock;
use crate::error::{DomainError, DomainResult};
use crate::models::{User, UserId};
use crate::repositories::UserRepository;
use crate::validation;

/// Raw registration fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub birth_date: String,
    pub password: String,
}

impl Registration {
    fn has_blank_field(&self) -> bool {
        self.full_name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.birth_date.trim().is_empty()
            || self.password.is_empty()
    }
}

/// Identity service over the user store
#[derive(Clone)]
pub struct IdentityService {
    users: Arc<dyn UserRepository>,
    clock: SharedClock,
}

impl IdentityService {
    /// Create a new identity service
    pub fn new(users: Arc<dyn UserRepository>, clock: SharedClock) -> Self {
        Self { users, clock }
    }

    /// Register a new user
    ///
    /// Checks run in a fixed order so the first failing rule is the one
    /// reported: presence, email shape, birth date, password length, then
    /// email uniqueness.
    pub fn register(&self, registration: &Registration) -> DomainResult<User> {
        if registration.has_blank_field() {
            return Err(DomainError::validation("Todos os campos são obrigatórios!"));
        }

        let email = validation::validate_email(&registration.email)?;
        let now = self.clock.utc();
        let birth_date = validation::validate_birth_date(&registration.birth_date, now)?;
        validation::validate_password(&registration.password)?;
        let full_name = validation::validate_full_name(&registration.full_name)?;

        if self.users.find_by_email(&email)?.is_some() {
            return Err(DomainError::conflict("Email já cadastrado!"));
        }

        let user = self.users.insert(User {
            id: UserId::new(),
            full_name,
            email,
            birth_date,
            password: registration.password.clone(),
            registered_at: now,
        })?;

        info!("Registered user: {}", user.id);
        Ok(user)
    }

    /// Look up a user by email and exact password
    ///
    /// An unknown email and a wrong password both yield `Ok(None)`.
    pub fn authenticate(&self, email: &str, password: &str) -> DomainResult<Option<User>> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(DomainError::validation("Email e senha são obrigatórios!"));
        }

        let email = validation::normalize_email(email);
        let user = self
            .users
            .find_by_email(&email)?
            .filter(|user| user.password_matches(password));

        match &user {
            Some(user) => info!("User authenticated: {}", user.id),
            None => warn!("Rejected login attempt"),
        }

        Ok(user)
    }

    /// Resolve the principal behind a session
    pub fn current_user(&self, id: UserId) -> DomainResult<Option<User>> {
        self.users.find_by_id(id)
    }

    /// Create the demo account available right after start-up
    pub fn seed_demo_user(&self) -> DomainResult<User> {
        let birth_date = NaiveDate::from_ymd_opt(1990, 1, 1)
            .ok_or_else(|| DomainError::Internal("invalid demo birth date".to_string()))?;

        let user = self.users.insert(User {
            id: UserId::new(),
            full_name: "Usuário Admin".to_string(),
            email: "admin@teste.com".to_string(),
            birth_date,
            password: "123456".to_string(),
            registered_at: self.clock.utc(),
        })?;

        info!("Seeded demo user: {}", user.email);
        Ok(user)
    }
}
