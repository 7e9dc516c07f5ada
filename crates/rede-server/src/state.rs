use rede_core::auth::AuthConfig;
use rede_db::Database;

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
pub struct AppState {
    pub db: Database,
    /// Token signing configuration. The secret comes from the environment
    /// and has no default.
    pub auth: AuthConfig,
}
