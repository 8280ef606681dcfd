use once_cell::sync::Lazy;
use regex::Regex;

const MAX_FIELD_LENGTH: usize = 500;

static JS_SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)javascript:").unwrap());
static EVENT_HANDLER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)on\w+=").unwrap());

/// Strips markup-significant characters and script-looking fragments from
/// free-text form input and bounds its length to 500 chars. Idempotent and
/// infallible: callers decide whether an empty result is acceptable.
pub fn sanitize_input(input: &str) -> String {
    sanitize_with_limit(input, MAX_FIELD_LENGTH)
}

/// Same cleanup as [`sanitize_input`] with a caller-chosen length bound,
/// for fields like the contact message that allow more than 500 chars.
pub fn sanitize_with_limit(input: &str, max_length: usize) -> String {
    let without_angles: String = input
        .trim()
        .chars()
        .filter(|char| *char != '<' && *char != '>')
        .collect();

    // Stripping can splice a new match together ("javajavascript:script:"),
    // so replace until a fixpoint is reached. Every replacement shortens the
    // string, which bounds the loop.
    let mut cleaned = without_angles;
    loop {
        let stripped = JS_SCHEME.replace_all(&cleaned, "");
        let stripped = EVENT_HANDLER.replace_all(&stripped, "").into_owned();

        if stripped == cleaned {
            break;
        }
        cleaned = stripped;
    }

    let truncated: String = cleaned.chars().take(max_length).collect();

    truncated.trim().to_string()
}
