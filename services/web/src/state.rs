//! Application state shared across handlers

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use mockable::DefaultClock;
use tasks::repositories::{InMemoryTaskRepository, InMemoryUserRepository, TaskRepository};
use tasks::{IdentityService, SharedClock, StatisticsAggregator, TaskLifecycle};

use crate::config::AppConfig;
use crate::session::SessionManager;
use crate::views::Views;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub identity: IdentityService,
    pub tasks: TaskLifecycle,
    pub statistics: StatisticsAggregator,
    pub sessions: SessionManager,
    pub views: Views,
    pub started_at: Instant,
}

impl AppState {
    /// Wire empty in-memory stores to the services using the system clock
    pub fn new(config: AppConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(DefaultClock))
    }

    /// Same as [`AppState::new`] with an explicit time source
    pub fn with_clock(config: AppConfig, clock: SharedClock) -> Result<Self> {
        let task_repository: Arc<dyn TaskRepository> = Arc::new(InMemoryTaskRepository::new());

        Ok(Self {
            identity: IdentityService::new(Arc::new(InMemoryUserRepository::new()), clock.clone()),
            tasks: TaskLifecycle::new(task_repository.clone(), clock),
            statistics: StatisticsAggregator::new(task_repository),
            sessions: SessionManager::new(config.session_ttl()),
            views: Views::new()?,
            config: Arc::new(config),
            started_at: Instant::now(),
        })
    }
}
