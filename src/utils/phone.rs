use regex::Regex;
use std::sync::LazyLock;

static WHATSAPP_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\-]+$").expect("valid whatsapp number regex"));

pub const WHATSAPP_MIN_LEN: usize = 7;
pub const WHATSAPP_MAX_LEN: usize = 15;

/// Why a WhatsApp number was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneProblem {
    TooShort,
    TooLong,
    InvalidCharacters,
}

impl PhoneProblem {
    pub fn message(self) -> &'static str {
        match self {
            PhoneProblem::TooShort => "WhatsApp number must be at least 7 digits",
            PhoneProblem::TooLong => "WhatsApp number must be less than 15 digits",
            PhoneProblem::InvalidCharacters => "WhatsApp number can only contain digits and dashes",
        }
    }
}

/// 7-15 characters, digits and dashes only. Length is checked first.
pub fn validate_whatsapp_number(number: &str) -> Result<(), PhoneProblem> {
    let len = number.chars().count();
    if len < WHATSAPP_MIN_LEN {
        return Err(PhoneProblem::TooShort);
    }
    if len > WHATSAPP_MAX_LEN {
        return Err(PhoneProblem::TooLong);
    }
    if !WHATSAPP_NUMBER.is_match(number) {
        return Err(PhoneProblem::InvalidCharacters);
    }
    Ok(())
}

/// Formats a number as it is typed.
///
/// Non-digits are dropped. For the home region, once more than three digits
/// are present the value becomes `XXX-XXXX`, keeping only the first seven digits.
pub fn format_whatsapp_input(raw: &str, home_region: bool) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if home_region && digits.len() > 3 {
        let tail: String = digits.chars().skip(3).take(4).collect();
        format!("{}-{}", &digits[..3], tail)
    } else {
        digits
    }
}
