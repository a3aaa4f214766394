// =============================================================================
// SESSION
// =============================================================================

/// Length of one play session (seconds)
pub const SESSION_SECONDS: u32 = 600;

/// Remaining time under which the clock turns amber (seconds)
pub const CLOCK_WARNING_SECONDS: u32 = 120;

/// Remaining time under which the clock turns red (seconds)
pub const CLOCK_CRITICAL_SECONDS: u32 = 30;

// =============================================================================
// PERSISTENCE
// =============================================================================

/// Directory for all on-disk state
pub const STORE_DIR: &str = ".mayday";

/// Subdirectory of STORE_DIR holding key-value entries
pub const KV_DIR: &str = "store";

/// Key under which the status map is stored
pub const STATUS_KEY: &str = "ship_status";

// =============================================================================
// API & MODELS
// =============================================================================

/// Maximum tokens for one model turn
pub const MAX_RESPONSE_TOKENS: u32 = 1024;

/// Anthropic API endpoint
pub const API_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";

/// Anthropic API version
pub const API_VERSION: &str = "2023-06-01";

// =============================================================================
// UI
// =============================================================================

/// Main loop poll interval (milliseconds)
pub const EVENT_POLL_MS: u64 = 8;

/// Minimum time between two renders (milliseconds)
pub const RENDER_THROTTLE_MS: u64 = 16;

/// Spinner frame interval (milliseconds)
pub const SPINNER_INTERVAL_MS: u64 = 120;

/// Width of the sidebar (columns)
pub const SIDEBAR_WIDTH: u16 = 34;

/// Scroll amount for arrow keys
pub const SCROLL_ARROW_AMOUNT: u16 = 3;

/// Scroll amount for PageUp/PageDown
pub const SCROLL_PAGE_AMOUNT: u16 = 10;
