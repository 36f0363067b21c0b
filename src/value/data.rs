//! Numeric word values
//!
//! NC values are kept as the literal token so a program serializes back to
//! exactly what was read. The parsed number is derived once at construction.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::ValueError;

/// A value with plain numeric semantics (`S700`, `G43`, `P8000`)
#[derive(Debug, Clone, PartialEq)]
pub struct NumericalValue {
    raw: String,
    number: Decimal,
    indefinite: bool,
}

/// A value on a coordinate axis, where a bare integer means thousandths
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateValue {
    raw: String,
    number: Decimal,
    indefinite: bool,
}

impl NumericalValue {
    pub fn parse(raw: &str) -> Result<Self, ValueError> {
        let (number, indefinite) = parse_literal(raw, false)?;
        Ok(Self {
            raw: raw.to_string(),
            number,
            indefinite,
        })
    }

    /// Build from a number, dropping insignificant zeros (`700`, `12.5`)
    pub fn from_number(number: Decimal) -> Result<Self, ValueError> {
        Self::parse(&number.normalize().to_string())
    }

    pub fn number(&self) -> Decimal {
        self.number
    }

    pub fn is_indefinite(&self) -> bool {
        self.indefinite
    }
}

impl CoordinateValue {
    pub fn parse(raw: &str) -> Result<Self, ValueError> {
        let (number, indefinite) = parse_literal(raw, true)?;
        Ok(Self {
            raw: raw.to_string(),
            number,
            indefinite,
        })
    }

    /// Build from a number, always writing a decimal point (`-10.`, `-3.5`)
    pub fn from_number(number: Decimal) -> Result<Self, ValueError> {
        let normalized = number.normalize();
        let raw = if normalized.scale() == 0 {
            format!("{}.", normalized)
        } else {
            normalized.to_string()
        };
        Self::parse(&raw)
    }

    pub fn number(&self) -> Decimal {
        self.number
    }

    pub fn is_indefinite(&self) -> bool {
        self.indefinite
    }
}

impl fmt::Display for NumericalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl fmt::Display for CoordinateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Either kind of word value
#[derive(Debug, Clone, PartialEq)]
pub enum ValueData {
    Numerical(NumericalValue),
    Coordinate(CoordinateValue),
}

impl ValueData {
    pub fn number(&self) -> Decimal {
        match self {
            ValueData::Numerical(value) => value.number(),
            ValueData::Coordinate(value) => value.number(),
        }
    }

    /// True for placeholder runs like `***`
    pub fn is_indefinite(&self) -> bool {
        match self {
            ValueData::Numerical(value) => value.is_indefinite(),
            ValueData::Coordinate(value) => value.is_indefinite(),
        }
    }

    /// A new value of the same kind holding `number`
    pub fn with_number(&self, number: Decimal) -> Result<Self, ValueError> {
        Ok(match self {
            ValueData::Numerical(_) => ValueData::Numerical(NumericalValue::from_number(number)?),
            ValueData::Coordinate(_) => {
                ValueData::Coordinate(CoordinateValue::from_number(number)?)
            }
        })
    }
}

impl fmt::Display for ValueData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueData::Numerical(value) => fmt::Display::fmt(value, f),
            ValueData::Coordinate(value) => fmt::Display::fmt(value, f),
        }
    }
}

/// Parse a literal token into `(number, indefinite)`
fn parse_literal(
    raw: &str,
    bare_integer_is_thousandths: bool,
) -> Result<(Decimal, bool), ValueError> {
    if !raw.is_empty() && raw.chars().all(|c| c == '*') {
        return Ok((Decimal::ZERO, true));
    }
    if raw.contains('*') {
        return Err(ValueError::MixedIndefinite(raw.to_string()));
    }
    if raw.chars().any(|c| !(c.is_ascii_digit() || c == '.' || c == '-')) {
        return Err(ValueError::OutOfRange(raw.to_string()));
    }

    let not_numeric = || ValueError::NotNumeric(raw.to_string());

    if raw.contains('.') {
        let (sign, magnitude) = match raw.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", raw),
        };
        let mut text = format!("{sign}{}", if magnitude.starts_with('.') { "0" } else { "" });
        text.push_str(magnitude);
        if text.ends_with('.') {
            text.push('0');
        }
        let number = Decimal::from_str(&text).map_err(|_| not_numeric())?;
        Ok((number, false))
    } else {
        let integer: i64 = raw.parse().map_err(|_| not_numeric())?;
        let number = if bare_integer_is_thousandths {
            Decimal::new(integer, 3)
        } else {
            Decimal::from(integer)
        };
        Ok((number, false))
    }
}
