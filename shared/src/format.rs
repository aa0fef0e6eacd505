use std::fmt::Write;

/// Digit grouping of a locale: the separator and the shortest number that gets one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Grouping {
    separator: char,
    min_digits: usize,
}

impl Grouping {
    const fn new(separator: char, min_digits: usize) -> Self {
        Self {
            separator,
            min_digits,
        }
    }
}

/// Look up grouping by the primary subtag of a Django language code
/// (`de`, `fr-fr`, `zh-hans`, ...). Unknown languages group like English.
fn grouping_for(language: &str) -> Grouping {
    let primary = language
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    match primary.as_str() {
        "de" | "it" => Grouping::new('.', 4),
        "es" => Grouping::new('.', 5),
        "fr" => Grouping::new('\u{202f}', 4),
        "ru" | "uk" => Grouping::new('\u{a0}', 4),
        "pl" => Grouping::new('\u{a0}', 5),
        _ => Grouping::new(',', 4),
    }
}

/// Format an integer with the digit grouping of `language`.
pub fn format_number(value: u64, language: &str) -> String {
    let mut out = String::with_capacity(24);
    write_number(&mut out, value, language);
    out
}

pub fn write_number(buf: &mut String, value: u64, language: &str) {
    buf.clear();
    let grouping = grouping_for(language);
    let mut digits = String::with_capacity(20);
    let _ = write!(digits, "{value}");

    if digits.len() < grouping.min_digits {
        buf.push_str(&digits);
        return;
    }

    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            buf.push(grouping.separator);
        }
        buf.push(ch);
    }
}
