//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

/// Guest session expiry in hours
pub const GUEST_SESSION_EXPIRY_HOURS: i64 = 4;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

/// Username minimum length
pub const MIN_USERNAME_LENGTH: u64 = 3;

/// Username maximum length
pub const MAX_USERNAME_LENGTH: u64 = 32;

// =============================================================================
// AVAILABILITY CONDITIONS
// =============================================================================

/// Stable identifiers for the built-in availability conditions.
///
/// The chain evaluates conditions in ascending id order, so the numbering
/// doubles as evaluation priority. Ids are spaced by 10 so site-local rules
/// can be interleaved without renumbering. An id, once assigned, never
/// changes: persisted references and the registry both rely on it.
pub mod condition_ids {
    /// Booking has been disabled for the option entirely.
    pub const BOOKING_DISABLED: i32 = 0;
    /// The user must be logged in (and not a guest).
    pub const IS_LOGGED_IN: i32 = 10;
    /// The user already holds a booked place.
    pub const ALREADY_BOOKED: i32 = 20;
    /// The user is already on the waiting list.
    pub const ON_WAITLIST: i32 = 30;
    /// The option is restricted to members of certain cohorts.
    pub const ENROLLED_IN_COHORTS: i32 = 40;
    /// All places and all waiting-list places are taken.
    pub const FULLY_BOOKED: i32 = 50;
    /// Booking requests go to the waiting list until confirmed.
    pub const ASK_FOR_CONFIRMATION: i32 = 60;
    /// A price is attached, so booking runs through checkout.
    pub const PRICE_IS_SET: i32 = 70;
    /// Terminal rule that surfaces the "Book now" button.
    pub const BOOK_IT: i32 = 80;
}

// =============================================================================
// USER ROLES & CAPABILITIES
// =============================================================================

/// User role identifiers
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const MANAGER: &str = "manager";
    pub const TEACHER: &str = "teacher";
    pub const STUDENT: &str = "student";
    pub const GUEST: &str = "guest";

    /// All user roles
    pub const ALL: &[&str] = &[ADMIN, MANAGER, TEACHER, STUDENT, GUEST];
}

// =============================================================================
// SHORTCODES
// =============================================================================

/// Shortcode handler names
pub mod shortcodes {
    pub const BULK_OPERATIONS: &str = "bulkoperations";
}

/// DOM id of the bulk-operations admin table
pub const OPTION_BULK_OPERATIONS_TABLE_ID: &str = "optionbulkoperationstable";

// =============================================================================
// SESSION KEYS
// =============================================================================

/// Redis key prefix for the post-login redirect URL
pub const SESSION_WANTS_URL_PREFIX: &str = "session:wantsurl:";

/// Redis key prefix for cached table specs
pub const TABLE_CACHE_PREFIX: &str = "tablecache:";

/// Seconds a cached table spec stays valid
pub const TABLE_CACHE_TTL_SECS: u64 = 3600;

/// Seconds a stashed redirect URL stays valid
pub const SESSION_WANTS_URL_TTL_SECS: u64 = 1800;

// =============================================================================
// API VERSIONING
// =============================================================================

/// Current API version
pub const API_VERSION: &str = "v1";

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page size for paginated results
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum page size for paginated results
pub const MAX_PAGE_SIZE: u32 = 100;

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum booking option title length
pub const MAX_OPTION_TITLE_LENGTH: u64 = 256;

/// Maximum booking option description length
pub const MAX_OPTION_DESCRIPTION_LENGTH: u64 = 65535;

/// Length of generated option identifier codes
pub const OPTION_IDENTIFIER_LENGTH: usize = 8;
