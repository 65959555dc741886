//! Rule implementations registered for text elements.

use crate::rules::RuleExecutor;
use crate::types::Value;

#[cfg(feature = "pattern")]
use crate::error::Result;
#[cfg(feature = "pattern")]
use regex::Regex;

/// Rejects empty strings.
pub(crate) struct NotEmptyText;

impl RuleExecutor for NotEmptyText {
    fn is_valid(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) => !s.is_empty(),
            _ => false,
        }
    }
}

/// Rejects strings without any non-whitespace character.
pub(crate) struct NotBlankText;

impl RuleExecutor for NotBlankText {
    fn is_valid(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) => !s.trim().is_empty(),
            _ => false,
        }
    }
}

/// Inclusive character-count bounds.
pub(crate) struct TextLength {
    pub(crate) min: u64,
    pub(crate) max: u64,
}

impl RuleExecutor for TextLength {
    fn is_valid(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) => {
                let len = s.chars().count() as u64;
                len >= self.min && len <= self.max
            }
            _ => false,
        }
    }
}

/// Whole-string regular expression match.
#[cfg(feature = "pattern")]
pub(crate) struct TextPattern {
    regex: Regex,
}

#[cfg(feature = "pattern")]
const EMAIL_PATTERN: &str = r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$";

#[cfg(feature = "pattern")]
const URL_PATTERN: &str = r"^[A-Za-z][A-Za-z0-9+.-]*://[^\s/$.?#][^\s]*$";

#[cfg(feature = "pattern")]
impl TextPattern {
    pub(crate) fn compile(pattern: &str) -> Result<Self> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    pub(crate) fn email() -> Result<Self> {
        Self::compile(EMAIL_PATTERN)
    }

    pub(crate) fn url() -> Result<Self> {
        Self::compile(URL_PATTERN)
    }
}

#[cfg(feature = "pattern")]
impl RuleExecutor for TextPattern {
    fn is_valid(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) => self.regex.is_match(s),
            _ => false,
        }
    }
}

/// Luhn checksum over the string's digits.
pub(crate) struct TextLuhn {
    pub(crate) ignore_non_digit_characters: bool,
}

impl TextLuhn {
    /// Builds the Luhn executor from a credit-card configuration; the
    /// attribute carries over field by field.
    pub(crate) fn from_credit_card(ignore_non_digit_characters: bool) -> Self {
        Self {
            ignore_non_digit_characters,
        }
    }

    fn check(&self, text: &str) -> bool {
        let Some(digits) = collect_digits(text, self.ignore_non_digit_characters) else {
            return false;
        };
        if digits.len() < 2 {
            return false;
        }
        let (payload, check) = digits.split_at(digits.len() - 1);
        let sum: u32 = payload
            .iter()
            .rev()
            .enumerate()
            .map(|(i, &d)| {
                if i % 2 == 0 {
                    let doubled = d * 2;
                    if doubled > 9 { doubled - 9 } else { doubled }
                } else {
                    d
                }
            })
            .sum();
        (sum + check[0]) % 10 == 0
    }
}

impl RuleExecutor for TextLuhn {
    fn is_valid(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) => self.check(s),
            _ => false,
        }
    }
}

/// Generic modulo-10 checksum: digits at odd positions from the right are
/// multiplied by `multiplier`, digits at even positions by `weight`.
pub(crate) struct TextMod10 {
    pub(crate) multiplier: u32,
    pub(crate) weight: u32,
    pub(crate) ignore_non_digit_characters: bool,
}

impl TextMod10 {
    fn check(&self, text: &str) -> bool {
        let Some(digits) = collect_digits(text, self.ignore_non_digit_characters) else {
            return false;
        };
        if digits.len() < 2 {
            return false;
        }
        let (payload, check) = digits.split_at(digits.len() - 1);
        let sum: u64 = payload
            .iter()
            .rev()
            .enumerate()
            .map(|(i, &d)| {
                let factor = if i % 2 == 0 { self.multiplier } else { self.weight };
                u64::from(d) * u64::from(factor)
            })
            .sum();
        u64::from(check[0]) == (10 - sum % 10) % 10
    }
}

impl RuleExecutor for TextMod10 {
    fn is_valid(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) => self.check(s),
            _ => false,
        }
    }
}

/// Modulo-11 checksum: weights grow from 2 up to `threshold` from the
/// rightmost payload digit, then wrap around. A computed check digit of 10
/// or 11 is matched against the configured stand-in characters.
pub(crate) struct TextMod11 {
    pub(crate) threshold: u32,
    pub(crate) treat_check10_as: char,
    pub(crate) treat_check11_as: char,
    pub(crate) ignore_non_digit_characters: bool,
}

impl TextMod11 {
    fn check(&self, text: &str) -> bool {
        let chars: Vec<char> = if self.ignore_non_digit_characters {
            text.chars()
                .filter(|c| {
                    c.is_ascii_digit() || *c == self.treat_check10_as || *c == self.treat_check11_as
                })
                .collect()
        } else {
            text.chars().collect()
        };
        if chars.len() < 2 {
            return false;
        }
        let check_char = chars[chars.len() - 1];
        let payload = &chars[..chars.len() - 1];

        let span = u64::from(self.threshold.saturating_sub(1).max(1));
        let mut sum: u64 = 0;
        for (i, c) in payload.iter().rev().enumerate() {
            let Some(digit) = c.to_digit(10) else {
                return false;
            };
            let weight = 2 + (i as u64 % span);
            sum += u64::from(digit) * weight;
        }
        let expected = match 11 - (sum % 11) {
            10 => self.treat_check10_as,
            11 => self.treat_check11_as,
            digit => match char::from_digit(digit as u32, 10) {
                Some(c) => c,
                None => return false,
            },
        };
        check_char == expected
    }
}

impl RuleExecutor for TextMod11 {
    fn is_valid(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) => self.check(s),
            _ => false,
        }
    }
}

/// Extracts the digit values of `text`. `None` when a non-digit character
/// survives filtering.
fn collect_digits(text: &str, ignore_other: bool) -> Option<Vec<u32>> {
    let mut digits = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c.to_digit(10) {
            Some(d) => digits.push(d),
            None if ignore_other => continue,
            None => return None,
        }
    }
    Some(digits)
}
