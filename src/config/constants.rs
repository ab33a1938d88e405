// * Configuration Constants
// * Central location for all configurable thresholds and timeouts

// * Default navigation/fetch deadline in milliseconds (both tiers)
pub const PAGE_TIMEOUT_MS: u64 = 20_000;

// * Deadline for the slow path's best-effort network-settle wait
pub const NETWORK_IDLE_TIMEOUT_MS: u64 = 5_000;

// * Body text is capped at this many characters after whitespace collapsing
pub const BODY_TEXT_CAP_CHARS: usize = 5_000;

// * Maximum number of product-photo candidates kept on a page record
pub const MAX_PRODUCT_PHOTOS: usize = 5;

// * Below this many chars of body text a titleless, descriptionless page is thin
pub const THIN_BODY_TEXT_CHARS: usize = 50;

// * Below this many chars of body text a page with framework markers is a client shell
pub const SHELL_TEXT_THRESHOLD_CHARS: usize = 100;

// * Minimum paragraph length for the description fallback
pub const DESCRIPTION_MIN_PARAGRAPH_CHARS: usize = 40;

// * Fixed desktop viewport presented by the renderer
pub const VIEWPORT_WIDTH: u32 = 1_366;
pub const VIEWPORT_HEIGHT: u32 = 768;
