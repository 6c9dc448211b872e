//! Lenient number handling for hand-typed quantities

/// Parse a form value as a number, falling back to 0.
///
/// Reads the longest leading decimal number (`"12 kg"` is 12, `"1e3"` is 1000).
/// Blank, unparseable and non-finite input all yield 0. Never fails.
pub fn parse_numeric_or_zero(raw: &str) -> f64 {
    leading_number(raw.trim())
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn leading_number(s: &str) -> &str {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        let frac_digits = frac_end - (end + 1);
        if mantissa_digits + frac_digits > 0 {
            mantissa_digits += frac_digits;
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    &s[..end]
}

/// Render a quantity the way the challan prints it: integral values without
/// a fractional part, everything else in shortest round-trip form.
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_numeric_or_zero("250"), 250.0);
        assert_eq!(parse_numeric_or_zero(" 12.5 "), 12.5);
        assert_eq!(parse_numeric_or_zero("-3"), -3.0);
        assert_eq!(parse_numeric_or_zero(".5"), 0.5);
    }

    #[test]
    fn test_blank_and_garbage_are_zero() {
        assert_eq!(parse_numeric_or_zero(""), 0.0);
        assert_eq!(parse_numeric_or_zero("   "), 0.0);
        assert_eq!(parse_numeric_or_zero("abc"), 0.0);
        assert_eq!(parse_numeric_or_zero("-"), 0.0);
        assert_eq!(parse_numeric_or_zero("."), 0.0);
        assert_eq!(parse_numeric_or_zero("NaN"), 0.0);
        assert_eq!(parse_numeric_or_zero("inf"), 0.0);
    }

    #[test]
    fn test_leading_prefix_is_used() {
        assert_eq!(parse_numeric_or_zero("12 kg"), 12.0);
        assert_eq!(parse_numeric_or_zero("7.5kg"), 7.5);
        assert_eq!(parse_numeric_or_zero("1e3"), 1000.0);
        assert_eq!(parse_numeric_or_zero("4e"), 4.0);
        assert_eq!(parse_numeric_or_zero("1,200"), 1.0);
    }

    #[test]
    fn test_overflow_is_zero() {
        assert_eq!(parse_numeric_or_zero("1e400"), 0.0);
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(5000.0), "5000");
        assert_eq!(format_quantity(0.0), "0");
        assert_eq!(format_quantity(12.5), "12.5");
        assert_eq!(format_quantity(-4.0), "-4");
    }
}
