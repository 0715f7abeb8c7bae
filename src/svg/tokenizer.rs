//! Path data tokenizer
//!
//! Scans a `d` attribute left to right into command letters and numbers.
//! Numbers follow `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`
//! and may run together whenever a sign or a second decimal point starts the
//! next one: `10.5.6` is `10.5`, `.6` and `30-40` is `30`, `-40`.
//! Anything else (whitespace, commas, unknown letters) is skipped.

/// A single lexical token of path data
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Command(char),
    Number(f64),
}

const COMMAND_LETTERS: &str = "MmLlHhVvCcSsQqTtAaZz";

pub fn tokenize(data: &str) -> Vec<Token> {
    let bytes = data.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let byte = bytes[pos];
        if COMMAND_LETTERS.as_bytes().contains(&byte) {
            tokens.push(Token::Command(byte as char));
            pos += 1;
            continue;
        }
        match scan_number(bytes, pos) {
            Some((value, next)) => {
                tokens.push(Token::Number(value));
                pos = next;
            }
            None => pos += 1,
        }
    }

    tokens
}

/// Every numeric literal in `text`, in order, ignoring everything else.
///
/// Used for `points` lists and transform arguments.
pub fn numbers(text: &str) -> Vec<f64> {
    let bytes = text.as_bytes();
    let mut values = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        match scan_number(bytes, pos) {
            Some((value, next)) => {
                values.push(value);
                pos = next;
            }
            None => pos += 1,
        }
    }
    values
}

/// Parse the numeric literal at the start of `text`, after leading
/// whitespace, ignoring any trailing unit suffix (`"12px"` is 12).
pub fn leading_number(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    scan_number(trimmed.as_bytes(), 0).map(|(value, _)| value)
}

/// Try to read one numeric literal starting exactly at `start`.
///
/// Returns the value and the index just past the literal.
fn scan_number(bytes: &[u8], start: usize) -> Option<(f64, usize)> {
    let mut pos = start;

    if matches!(bytes.get(pos), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_start = pos;
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    let int_digits = pos - int_start;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        let frac_start = pos + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        frac_digits = frac_end - frac_start;
        // "5." is a complete literal, a bare "." is not
        if int_digits > 0 || frac_digits > 0 {
            pos = frac_end;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp_pos = pos + 1;
        if matches!(bytes.get(exp_pos), Some(b'+' | b'-')) {
            exp_pos += 1;
        }
        let exp_digits_start = exp_pos;
        while bytes.get(exp_pos).is_some_and(u8::is_ascii_digit) {
            exp_pos += 1;
        }
        if exp_pos > exp_digits_start {
            pos = exp_pos;
        }
    }

    let literal = std::str::from_utf8(&bytes[start..pos]).ok()?;
    let value = literal.parse::<f64>().ok()?;
    Some((value, pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use Token::{Command, Number};

    #[test]
    fn commands_and_numbers() {
        assert_eq!(
            tokenize("M 10 20 L 30 40"),
            vec![
                Command('M'),
                Number(10.0),
                Number(20.0),
                Command('L'),
                Number(30.0),
                Number(40.0)
            ]
        );
    }

    #[test]
    fn sign_and_second_decimal_point_split_numbers() {
        assert_eq!(
            tokenize("L30-40"),
            vec![Command('L'), Number(30.0), Number(-40.0)]
        );
        assert_eq!(
            tokenize("10.5.6"),
            vec![Number(10.5), Number(0.6)]
        );
        assert_eq!(
            tokenize("-.5-.7"),
            vec![Number(-0.5), Number(-0.7)]
        );
    }

    #[test]
    fn scientific_notation() {
        assert_eq!(tokenize("1e5"), vec![Number(100000.0)]);
        assert_eq!(tokenize("1.5e-2"), vec![Number(0.015)]);
        assert_eq!(tokenize("-3E+4"), vec![Number(-30000.0)]);
    }

    #[test]
    fn separators_and_unknown_letters_are_skipped() {
        assert_eq!(
            tokenize("M10,20\tX\n30"),
            vec![Command('M'), Number(10.0), Number(20.0), Number(30.0)]
        );
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn exponent_without_digits_is_not_consumed() {
        // "e" here is just an unknown letter
        assert_eq!(tokenize("5e"), vec![Number(5.0)]);
    }

    #[test]
    fn trailing_point_literal() {
        assert_eq!(tokenize("5. 6"), vec![Number(5.0), Number(6.0)]);
    }

    #[test]
    fn leading_number_ignores_units() {
        assert_eq!(leading_number(" 12px"), Some(12.0));
        assert_eq!(leading_number("abc"), None);
        assert_eq!(numbers("1,2 3-4"), vec![1.0, 2.0, 3.0, -4.0]);
    }
}
