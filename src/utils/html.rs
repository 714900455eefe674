/// Escapes text so it can be placed in element content or a quoted attribute value.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Inserts `_{size}` before the extension of the URL's last path segment.
///
/// Query string and fragment are preserved. A URL whose last segment has no
/// extension is returned unchanged.
pub fn sized_image_url(url: &str, size: &str) -> String {
    let split_at = url.find(['?', '#']).unwrap_or(url.len());
    let (path, suffix) = url.split_at(split_at);

    let segment_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    match path[segment_start..].rfind('.') {
        Some(dot) if dot > 0 => {
            let dot = segment_start + dot;
            format!("{}_{}{}{}", &path[..dot], size, &path[dot..], suffix)
        }
        _ => url.to_string(),
    }
}
