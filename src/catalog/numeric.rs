//! Lenient numeric parsing for the free-text `year` and `price` fields.
//!
//! Both parsers read the longest numeric prefix after leading whitespace and
//! ignore whatever follows, so `"1959 reissue"` is 1959 and `"24.99 USD"` is
//! 24.99. Text without a leading number yields `None`.

/// Parse a leading (optionally signed) integer, saturating at the `i64` bounds.
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }

    // The slice is all digits, so the only possible failure is overflow.
    Some(s[..end].parse().unwrap_or(if bytes[0] == b'-' {
        i64::MIN
    } else {
        i64::MAX
    }))
}

/// Parse a leading decimal number, with optional fraction and exponent.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let digit_run = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digit_run(end);
    let mut digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digit_run(end + 1);
        digits += frac_end - (end + 1);
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digit_run(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}
