//! Date helper functions

use chrono::NaiveDateTime;

use crate::content::parse_date;

/// Format a front-matter date using a date-fns format string
///
/// # Examples
/// ```ignore
/// format_post_date("2023-02-10", "MMMM dd, yyyy") // -> "February 10, 2023"
/// ```
///
/// A date that cannot be parsed is shown as written.
pub fn format_post_date(raw: &str, format: &str) -> String {
    match parse_date(raw) {
        Some(date) => format_date(&date, format),
        None => raw.to_string(),
    }
}

/// Format a date using a date-fns format string
pub fn format_date(date: &NaiveDateTime, format: &str) -> String {
    date.format(&date_fns_to_chrono_format(format)).to_string()
}

/// Machine-readable form for `<time datetime>` and meta tags
pub fn date_iso(date: &NaiveDateTime) -> String {
    date.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// ISO form of a front-matter date, or the text as written when it does
/// not parse
pub fn machine_date(raw: &str) -> String {
    parse_date(raw)
        .map(|date| date_iso(&date))
        .unwrap_or_else(|| raw.to_string())
}

/// Generate a <time> HTML element
pub fn time_tag(raw: &str, format: &str) -> String {
    let text = super::html_escape(&format_post_date(raw, format));
    match parse_date(raw) {
        Some(date) => format!(r#"<time datetime="{}">{}</time>"#, date_iso(&date), text),
        None => format!("<time>{}</time>", text),
    }
}

/// Convert a date-fns format string to a chrono one.
///
/// Tokens are runs of the same letter; text in single quotes is literal.
fn date_fns_to_chrono_format(format: &str) -> String {
    let chars: Vec<char> = format.chars().collect();
    let mut result = String::with_capacity(format.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            // Quoted literal
            i += 1;
            while i < chars.len() && chars[i] != '\'' {
                push_literal(&mut result, chars[i]);
                i += 1;
            }
            i += 1;
            continue;
        }

        if !c.is_ascii_alphabetic() {
            push_literal(&mut result, c);
            i += 1;
            continue;
        }

        let run = chars[i..].iter().take_while(|&&x| x == c).count();
        let spec = match (c, run) {
            ('y', 2) => "%y",
            ('y', _) => "%Y",
            ('M', 1) => "%-m",
            ('M', 2) => "%m",
            ('M', 3) => "%b",
            ('M', _) => "%B",
            ('d', 1) => "%-d",
            ('d', _) => "%d",
            ('E', 4) => "%A",
            ('E', _) => "%a",
            ('H', 1) => "%-H",
            ('H', _) => "%H",
            ('h', 1) => "%-I",
            ('h', _) => "%I",
            ('m', _) => "%M",
            ('s', _) => "%S",
            ('a', _) => "%p",
            _ => {
                for _ in 0..run {
                    push_literal(&mut result, c);
                }
                i += run;
                continue;
            }
        };
        result.push_str(spec);
        i += run;
    }

    result
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}
