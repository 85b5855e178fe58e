use percent_encoding::percent_decode;

/// Escape HTML special characters. Works on raw bytes since page bodies
/// need not be UTF-8.
pub fn escape_html_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b'&' => out.extend_from_slice(b"&amp;"),
            b'<' => out.extend_from_slice(b"&lt;"),
            b'>' => out.extend_from_slice(b"&gt;"),
            b'"' => out.extend_from_slice(b"&quot;"),
            b'\'' => out.extend_from_slice(b"&#39;"),
            _ => out.push(b),
        }
    }
    out
}

/// First value of `key` in an `application/x-www-form-urlencoded` body.
///
/// Values decode to raw bytes: `+` becomes a space and `%XX` the byte it
/// names, with no UTF-8 check.
pub fn form_value(form: &[u8], key: &str) -> Option<Vec<u8>> {
    form.split(|&b| b == b'&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (name, value) = match pair.iter().position(|&b| b == b'=') {
                Some(eq) => (&pair[..eq], &pair[eq + 1..]),
                None => (pair, &[][..]),
            };
            (decode_form_component(name) == key.as_bytes()).then(|| decode_form_component(value))
        })
}

fn decode_form_component(raw: &[u8]) -> Vec<u8> {
    let spaced: Vec<u8> = raw.iter().map(|&b| if b == b'+' { b' ' } else { b }).collect();
    percent_decode(&spaced).collect()
}

/// Content type for a static asset extension
pub fn content_type_for(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "css" => "text/css; charset=utf-8",
        "js" => "text/javascript; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        let escaped = escape_html_bytes(b"<a href=\"x\">'&'</a>");
        assert_eq!(escaped, b"&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;".to_vec());
    }

    #[test]
    fn bytes_escape_keeps_invalid_utf8() {
        assert_eq!(escape_html_bytes(b"\xff<"), b"\xff&lt;".to_vec());
    }

    #[test]
    fn form_values_decode_to_raw_bytes() {
        assert_eq!(form_value(b"body=%FF%FEab", "body"), Some(b"\xff\xfeab".to_vec()));
        assert_eq!(form_value(b"x=1&body=Hello+%5BWorld%5D%2B", "body"), Some(b"Hello [World]+".to_vec()));
        assert_eq!(form_value(b"body=first&body=second", "body"), Some(b"first".to_vec()));
        assert_eq!(form_value(b"b%6Fdy=enc", "body"), Some(b"enc".to_vec()));
        assert_eq!(form_value(b"body", "body"), Some(Vec::new()));
        assert_eq!(form_value(b"bad=%zz", "bad"), Some(b"%zz".to_vec()));
        assert_eq!(form_value(b"", "body"), None);
        assert_eq!(form_value(b"other=1", "body"), None);
    }

    #[test]
    fn content_types() {
        assert_eq!(content_type_for("css"), "text/css; charset=utf-8");
        assert_eq!(content_type_for("PNG"), "image/png");
        assert_eq!(content_type_for("bin"), "application/octet-stream");
    }
}
