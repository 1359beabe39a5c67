//! Utility functions and helpers

/// Insert `separator` between every group of three integer digits.
///
/// Works on an already formatted number such as `-1234567.50`; the sign and
/// the fractional part are left alone. An empty separator returns the input.
pub fn group_thousands(formatted: &str, separator: &str) -> String {
    if separator.is_empty() {
        return formatted.to_string();
    }

    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integer, fraction) = match unsigned.find('.') {
        Some(pos) => unsigned.split_at(pos),
        None => (unsigned, ""),
    };

    let mut grouped = String::new();
    let len = integer.chars().count();
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(c);
    }

    format!("{}{}{}", sign, grouped, fraction)
}

/// Escape text for safe inclusion in HTML bodies and attribute values
pub fn escape_html(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
