/// Default base URL for Gemini transport requests.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Normalize a base URL plus model id to a `generateContent` endpoint.
///
/// Normalization rules:
/// 1) keep URLs already ending in `:generateContent` unchanged
/// 2) append `:generateContent` when the path ends in `/models/<model>`
/// 3) append `/models/<model>:generateContent` otherwise
pub fn normalize_generate_content_url(input: &str, model: &str) -> String {
    let base = if input.trim().is_empty() {
        DEFAULT_GEMINI_BASE_URL
    } else {
        input.trim()
    };

    let trimmed = base.trim_end_matches('/');
    if trimmed.ends_with(":generateContent") {
        return trimmed.to_string();
    }

    let model = model.trim();
    let model_suffix = format!("/models/{model}");
    if trimmed.ends_with(&model_suffix) {
        return format!("{trimmed}:generateContent");
    }
    format!("{trimmed}/models/{model}:generateContent")
}
