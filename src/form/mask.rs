/// Brazilian mobile numbers: two-digit area code plus nine digits.
pub const MAX_PHONE_DIGITS: usize = 11;

/// Re-applies the `(DD) D DDDD-DDDD` mask to whatever the user typed.
/// Non-digits are dropped and anything past eleven digits is discarded.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(MAX_PHONE_DIGITS)
        .collect();

    match digits.len() {
        0 => String::new(),
        1..=2 => format!("({}", digits),
        3..=7 => format!("({}) {}", &digits[..2], &digits[2..]),
        _ => format!(
            "({}) {} {}-{}",
            &digits[..2],
            &digits[2..3],
            &digits[3..7],
            &digits[7..]
        ),
    }
}
