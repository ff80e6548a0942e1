//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// User Roles
// =============================================================================

/// Default role assigned to new users
pub const ROLE_USER: &str = "user";

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// Account Status
// =============================================================================

/// Status of an account allowed to authenticate
pub const STATUS_ACTIVE: &str = "activo";

/// Status of a disabled account
pub const STATUS_INACTIVE: &str = "inactivo";

// =============================================================================
// Notes
// =============================================================================

/// Owner assigned to a note created without an explicit `user_id`
pub const DEFAULT_NOTE_OWNER_ID: i32 = 1;

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// Database
// =============================================================================

/// Default database connection URL (for development)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://notes.db?mode=rwc";

/// Default size of the connection pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 10;

// =============================================================================
// Validation
// =============================================================================

/// Note title length bounds
pub const MIN_TITLE_LENGTH: u64 = 1;
pub const MAX_TITLE_LENGTH: u64 = 200;
