//! Text renderings of posts, forms, and the signed-in user.
//!
//! Views return strings; commands decide where they go.

mod dashboard;
mod detail;
mod forms;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};

pub use dashboard::{EMPTY_DASHBOARD, render_dashboard};
pub use detail::{PostMeta, post_meta, render_detail};
pub use forms::{render_auth_errors, render_step, render_user};

const FALLBACK_DATE_FORMAT: &str = "%b %-d, %Y";

/// Format `date` with a user-supplied pattern, falling back to the default
/// pattern when it does not parse.
pub fn format_date(date: &DateTime<Utc>, pattern: &str) -> String {
    let valid = !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error));
    let pattern = if valid { pattern } else { FALLBACK_DATE_FORMAT };
    date.format(pattern).to_string()
}

pub fn format_optional_date(date: Option<&DateTime<Utc>>, pattern: &str) -> String {
    date.map_or_else(|| "N/A".to_string(), |d| format_date(d, pattern))
}
