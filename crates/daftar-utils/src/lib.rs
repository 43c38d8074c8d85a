//! Utility functions and helpers

const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];
const ARABIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

/// Format a number with thousands separators
pub fn format_number(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut result = String::new();
    for (count, c) in digits.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    if n < 0 {
        result.push('-');
    }
    result.chars().rev().collect()
}

/// Replace ASCII digits with Persian digits
pub fn to_persian_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) if c.is_ascii_digit() => PERSIAN_DIGITS[d as usize],
            _ => c,
        })
        .collect()
}

/// Replace Persian and Arabic-Indic digits with ASCII digits.
///
/// Anything else passes through untouched.
pub fn to_latin_digits(s: &str) -> String {
    s.chars()
        .map(|c| {
            PERSIAN_DIGITS
                .iter()
                .position(|&p| p == c)
                .or_else(|| ARABIC_DIGITS.iter().position(|&a| a == c))
                .map(|d| char::from(b'0' + d as u8))
                .unwrap_or(c)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(6_500_000), "6,500,000");
        assert_eq!(format_number(-1_234), "-1,234");
    }

    #[test]
    fn test_persian_digits() {
        assert_eq!(to_persian_digits("1403/08/15"), "۱۴۰۳/۰۸/۱۵");
    }

    #[test]
    fn test_latin_digits() {
        assert_eq!(to_latin_digits("۱۴۰۳/۰۸/۱۵"), "1403/08/15");
        assert_eq!(to_latin_digits("١٤٠٣/٠٨/١٥"), "1403/08/15");
        assert_eq!(to_latin_digits("abc"), "abc");
    }
}
