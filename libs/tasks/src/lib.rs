//! Domain core for the TaskDesk application
//!
//! Users register and log in through the [`identity`] service; each user then
//! manages personal tasks through the [`lifecycle`] service and reads derived
//! figures from the [`statistics`] aggregator. Both stores live behind the
//! traits in [`repositories`], so the in-memory implementations can be
//! swapped for persistent ones without touching the services.

pub mod elapsed;
pub mod error;
pub mod identity;
pub mod lifecycle;
pub mod models;
pub mod repositories;
pub mod statistics;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

/// Source of "now" shared by the services
pub type SharedClock = Arc<dyn mockable::Clock + Send + Sync>;

pub use error::{DomainError, DomainResult};
pub use identity::{IdentityService, Registration};
pub use lifecycle::TaskLifecycle;
pub use statistics::StatisticsAggregator;
