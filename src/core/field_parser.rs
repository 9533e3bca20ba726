use crate::platform_layer::{FieldEntry, FormSnapshot};
use std::fmt;

/// Non-fatal complaint about one form field. The save still proceeds with
/// the substituted value; the notice is surfaced as a transient warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldNotice {
    InvalidNumericInput { label: String, raw: String },
    InvalidCharacterInput { raw: String },
}

impl fmt::Display for FieldNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldNotice::InvalidNumericInput { label, raw } => {
                write!(f, "invalid numeric input for '{label}': '{raw}'")
            }
            FieldNotice::InvalidCharacterInput { raw } => {
                write!(f, "invalid character input: '{raw}'")
            }
        }
    }
}

/// Field values extracted from a [`FormSnapshot`], with substitutions
/// already applied where the raw text was unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFields {
    pub number1: i32,
    pub number2: i32,
    pub number3: i32,
    pub character: char,
    pub notices: Vec<FieldNotice>,
}

/// Parses all four entry fields. Unparseable integers become `0`,
/// anything but a single character becomes `' '`; each substitution
/// records exactly one notice.
pub fn parse_form(form: &FormSnapshot) -> ParsedFields {
    let mut notices = Vec::new();

    let number1 = parse_integer_field(&form.number1, &mut notices);
    let number2 = parse_integer_field(&form.number2, &mut notices);
    let number3 = parse_integer_field(&form.number3, &mut notices);
    let character = parse_character_field(&form.character, &mut notices);

    ParsedFields {
        number1,
        number2,
        number3,
        character,
        notices,
    }
}

fn parse_integer_field(entry: &FieldEntry, notices: &mut Vec<FieldNotice>) -> i32 {
    match entry.text.parse::<i32>() {
        Ok(value) => value,
        Err(_) => {
            notices.push(FieldNotice::InvalidNumericInput {
                label: entry.label.clone(),
                raw: entry.text.clone(),
            });
            0
        }
    }
}

fn parse_character_field(entry: &FieldEntry, notices: &mut Vec<FieldNotice>) -> char {
    let mut chars = entry.text.chars();
    match (chars.next(), chars.next()) {
        (Some(single), None) => single,
        _ => {
            notices.push(FieldNotice::InvalidCharacterInput {
                raw: entry.text.clone(),
            });
            ' '
        }
    }
}
