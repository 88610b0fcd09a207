/// First balanced top-level `{...}` block in `input`; braces inside strings are ignored.
pub fn extract_first_json(input: &str) -> Option<&str> {
    let mut start: Option<usize> = None;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, byte) in input.bytes().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' => {
                if depth == 0 {
                    start = Some(idx);
                }
                depth += 1;
            }
            b'}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    if let Some(begin) = start {
                        return Some(&input[begin..=idx]);
                    }
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_object_inside_prose() {
        let raw = "Sure! Here you go:\n```json\n{\"category\": \"tools\", \"needsUrlContent\": false}\n```\nHope that helps.";
        assert_eq!(
            extract_first_json(raw),
            Some("{\"category\": \"tools\", \"needsUrlContent\": false}")
        );
    }

    #[test]
    fn ignores_braces_inside_strings() {
        let raw = r#"{"category": "a}b", "note": "\"{x"} trailing {"second": 1}"#;
        assert_eq!(
            extract_first_json(raw),
            Some(r#"{"category": "a}b", "note": "\"{x"}"#)
        );
    }

    #[test]
    fn nested_objects_stay_whole() {
        let raw = r#"x {"a": {"b": 1}} y"#;
        assert_eq!(extract_first_json(raw), Some(r#"{"a": {"b": 1}}"#));
    }

    #[test]
    fn unbalanced_input_yields_nothing() {
        assert_eq!(extract_first_json("{\"category\": \"tools\""), None);
        assert_eq!(extract_first_json("no json here"), None);
    }
}
