//! JavaScript snippets executed in the page by the CDP backend
//!
//! Element interactions that have no first-class CDP command are expressed as
//! small scripts over `document.querySelector`. All selector and value
//! strings are escaped before embedding.

/// Escape a string for safe use inside a single-quoted JavaScript literal
///
/// Covers the line separators U+2028/U+2029, which terminate a JavaScript
/// string literal even though they are not ASCII newlines.
pub fn escape_js_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '`' => out.push_str("\\`"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out
}

/// Expression resolving a selector to an element or `null`
pub fn query(selector: &str) -> String {
    format!("document.querySelector('{}')", escape_js_str(selector))
}

/// Expression counting the nodes a selector matches
pub fn query_count(selector: &str) -> String {
    format!(
        "document.querySelectorAll('{}').length",
        escape_js_str(selector)
    )
}

/// Build a script that runs `body` with the resolved element bound to `el`
///
/// Evaluates to `null` when the selector does not resolve.
pub fn on_element(selector: &str, body: &str) -> String {
    format!(
        "(() => {{ const el = {}; if (!el) return null; return ({}); }})()",
        query(selector),
        body
    )
}

/// Like [`on_element`], but binds the n-th node matching the selector
pub fn on_nth_element(selector: &str, index: usize, body: &str) -> String {
    format!(
        "(() => {{ const el = document.querySelectorAll('{}')[{}]; \
         if (!el) return null; return ({}); }})()",
        escape_js_str(selector),
        index,
        body
    )
}

/// Scroll the page by pixel deltas
pub fn scroll_by(delta_x: f64, delta_y: f64) -> String {
    format!("window.scrollBy({}, {})", delta_x, delta_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_quotes_and_backslashes() {
        assert_eq!(escape_js_str("a'b"), "a\\'b");
        assert_eq!(escape_js_str(r"a\b"), r"a\\b");
        assert_eq!(escape_js_str("a\"b"), "a\\\"b");
    }

    #[test]
    fn escapes_line_breaks_backticks_and_js_line_separators() {
        assert_eq!(escape_js_str("a\nb"), "a\\nb");
        assert_eq!(escape_js_str("a\r\nb"), "a\\r\\nb");
        assert_eq!(escape_js_str("a`b"), "a\\`b");
        assert_eq!(escape_js_str("a\u{2028}b"), "a\\u2028b");
        assert_eq!(escape_js_str("a\u{2029}b"), "a\\u2029b");
    }

    #[test]
    fn query_embeds_escaped_selector() {
        assert_eq!(
            query("#login 'form'"),
            "document.querySelector('#login \\'form\\'')"
        );
    }

    #[test]
    fn on_element_guards_null() {
        let script = on_element("#btn", "el.disabled");
        assert!(script.contains("if (!el) return null"));
        assert!(script.contains("document.querySelector('#btn')"));
    }

    #[test]
    fn on_nth_element_indexes_the_node_list() {
        let script = on_nth_element("a.button", 2, "el.textContent");
        assert!(script.contains("document.querySelectorAll('a.button')[2]"));
    }
}
