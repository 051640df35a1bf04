/// Distance between the top of a comment and the start of its reply region, comment expanded
pub const EXPANDED_LINE_OFFSET: f64 = 80.0;
/// Distance between the top of a comment and the start of its reply region, comment collapsed
pub const COLLAPSED_LINE_OFFSET: f64 = 40.0;
/// Top of the thread overlay relative to the comment container
pub const THREAD_OVERLAY_TOP: f64 = 16.0;
/// Top of the vertical thread line relative to the thread overlay
pub const THREAD_LINE_TOP: f64 = 24.0;
/// Additional upward shift of the curved connectors, so that they end on the child's anchor
pub const CURVE_OFFSET_ADJUSTMENT: f64 = 5.0;
pub const EXPANDED_TOGGLE_TOP: f64 = 61.0;
pub const COLLAPSED_TOGGLE_TOP: f64 = 0.0;

/// Depth at which replies stop being rendered inline
pub const MAX_RENDER_DEPTH: usize = 32;

pub const COMMENTS_QUERY_SCOPE: &str = "comments";
pub const COMMENTS_TABLE: &str = "comments";
pub const COMMENT_ANCHOR_PREFIX: &str = "avatar-";
