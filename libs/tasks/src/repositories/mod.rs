//! Repositories for the identity and task stores

pub mod task;
pub mod user;

pub use task::{InMemoryTaskRepository, TaskRepository};
pub use user::{InMemoryUserRepository, UserRepository};
