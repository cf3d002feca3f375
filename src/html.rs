//! Small helpers for HTML fragment emission.

/// Escape text content for use inside an HTML fragment.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

pub(crate) fn tag(name: &str, content: &str) -> String {
    format!("<{name}>{content}</{name}>")
}

/// Emit `name` with an inline `style` attribute; plain tag when there
/// are no style properties.
pub(crate) fn styled(name: &str, styles: &[(&str, String)], content: &str) -> String {
    if styles.is_empty() {
        return tag(name, content);
    }
    let css: String = styles.iter().map(|(k, v)| format!("{k}:{v};")).collect();
    format!("<{name} style=\"{css}\">{content}</{name}>")
}

pub(crate) fn anchor(href: &str, content: &str) -> String {
    format!("<a href=\"{}\" target=\"_blank\">{content}</a>", escape(href))
}
