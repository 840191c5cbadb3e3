const MAX_VISIBLE_CHARS: usize = 200;

const SECRET_PREFIXES: [&str; 5] = ["Bearer ", "api_key=", "password=", "secret=", "token="];

/// Shortens model prompts/replies and upstream bodies for logging and
/// masks anything that looks like a credential.
pub fn sanitize_for_log(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = trimmed.chars().count();
    let visible = if total_chars > MAX_VISIBLE_CHARS {
        let head: String = trimmed.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{head}... ({total_chars} chars total)")
    } else {
        trimmed.to_string()
    };

    redact_secrets(&visible)
}

fn redact_secrets(text: &str) -> String {
    let mut result = text.to_string();

    for prefix in SECRET_PREFIXES {
        let mut search_from = 0;
        while let Some(found) = result[search_from..].find(prefix) {
            let value_start = search_from + found + prefix.len();
            let value_end = result[value_start..]
                .find(|c: char| c.is_whitespace() || matches!(c, '&' | '"' | '\'' | ','))
                .map(|i| value_start + i)
                .unwrap_or(result.len());

            result.replace_range(value_start..value_end, "[REDACTED]");
            search_from = value_start + "[REDACTED]".len();
        }
    }

    // OpenAI-style keys can appear without a prefix in upstream error bodies.
    result
        .split_inclusive(char::is_whitespace)
        .map(|word| {
            if word.trim_start_matches(['"', '\'']).starts_with("sk-") {
                let trailing: String = word.chars().filter(|c| c.is_whitespace()).collect();
                format!("[REDACTED]{trailing}")
            } else {
                word.to_string()
            }
        })
        .collect()
}
