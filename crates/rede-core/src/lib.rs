pub mod auth;
pub mod error;
pub mod membership;
pub mod models;

pub use error::AppError;
pub use models::{Logo, Module, ModuleMembership, News, User};
