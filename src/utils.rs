use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

/// Default upper bound on a sanitized name, in characters
pub const DEFAULT_MAX_FILENAME_LENGTH: usize = 100;

static INVALID_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("static pattern"));

/// Convert a page title into a file-system safe name
///
/// Characters invalid in Windows file names become `_` and the result is cut
/// to `max_length` characters.
pub fn sanitize_filename(name: &str, max_length: usize) -> String {
    let cleaned = INVALID_CHARS.replace_all(name, "_");
    // ':' must never survive, whatever the pattern above says
    let cleaned = cleaned.replace(':', "");

    if cleaned.chars().count() > max_length {
        cleaned.chars().take(max_length).collect()
    } else {
        cleaned
    }
}

/// Wait for client-side rendering to finish after a navigation
pub async fn settle(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
