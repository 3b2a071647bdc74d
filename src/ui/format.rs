/// Whole count with a space as thousands separator: `1234567.9` → `1 234 567`.
/// The fraction is truncated.
pub fn format_count(value: f64) -> String {
    if !value.is_finite() {
        return "—".to_string();
    }
    let whole = value.trunc() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if whole < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// Table cell text for a possibly undefined value.
pub fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "—".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_spaces() {
        assert_eq!(format_count(0.0), "0");
        assert_eq!(format_count(999.0), "999");
        assert_eq!(format_count(1000.0), "1 000");
        assert_eq!(format_count(1_234_567.9), "1 234 567");
        assert_eq!(format_count(-45_000.0), "-45 000");
    }

    #[test]
    fn undefined_values_show_a_dash() {
        assert_eq!(format_count(f64::INFINITY), "—");
        assert_eq!(format_metric(None), "—");
        assert_eq!(format_metric(Some(1.15)), "1.15");
    }
}
