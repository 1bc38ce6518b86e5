//! Cleanup for raw model output before JSON deserialization.

/// Strips markdown code fences and trims to the outermost `{...}` object.
/// Models routinely wrap JSON in ```json fences or lead with prose; both
/// are tolerated here.
pub fn extract_json_payload(text: &str) -> &str {
    let text = strip_fences(text.trim());
    extract_object(text)
}

fn strip_fences(text: &str) -> &str {
    let body = if let Some(rest) = text.strip_prefix("```json") {
        rest
    } else if let Some(rest) = text.strip_prefix("```") {
        rest
    } else {
        return text;
    };
    let body = body.trim_start();
    match body.strip_suffix("```") {
        Some(inner) => inner.trim(),
        None => body,
    }
}

/// Returns the slice from the first `{` through the last `}`, or the input
/// unchanged when no such pair exists.
fn extract_object(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_json_with_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(extract_json_payload(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_fenced_json_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(extract_json_payload(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_bare_json_passthrough() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(extract_json_payload(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_prose_around_object() {
        let input = "Here is your path:\n{\"title\": \"Learn Go\"}\nEnjoy!";
        assert_eq!(extract_json_payload(input), "{\"title\": \"Learn Go\"}");
    }

    #[test]
    fn test_unclosed_fence() {
        let input = "```json\n{\"key\": 1}";
        assert_eq!(extract_json_payload(input), "{\"key\": 1}");
    }

    #[test]
    fn test_no_object_left_unchanged() {
        assert_eq!(extract_json_payload("no json here"), "no json here");
    }
}
