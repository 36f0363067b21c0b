//! Word and variable addresses

use std::fmt;

use crate::error::ValueError;

/// A single-letter word address like `X` or `S`
///
/// The letter is kept exactly as written so lowercase input round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(char);

impl Address {
    pub fn new(letter: char) -> Result<Self, ValueError> {
        if letter.is_ascii_alphabetic() {
            Ok(Self(letter))
        } else {
            Err(ValueError::InvalidAddress(letter))
        }
    }

    pub fn letter(&self) -> char {
        self.0
    }

    /// Case-insensitive comparison against an address letter
    pub fn is(&self, letter: char) -> bool {
        self.0.eq_ignore_ascii_case(&letter)
    }

    /// Axis-like addresses whose bare integers are thousandths
    pub fn is_coordinate(&self) -> bool {
        matches!(
            self.0.to_ascii_uppercase(),
            'X' | 'Y' | 'Z' | 'U' | 'V' | 'W' | 'I' | 'J' | 'K' | 'R' | 'Q'
        )
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The number part of a `#<n>=` variable assignment
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableAddress(String);

impl VariableAddress {
    pub fn new(digits: &str) -> Result<Self, ValueError> {
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(digits.to_string()))
        } else {
            Err(ValueError::InvalidVariableAddress(digits.to_string()))
        }
    }

    pub fn number(&self) -> u32 {
        // digits were validated; only absurdly long addresses can overflow
        self.0.parse().unwrap_or(u32::MAX)
    }
}

impl fmt::Display for VariableAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_keeps_case() {
        let address = Address::new('x').unwrap();
        assert_eq!(address.to_string(), "x");
        assert!(address.is('X'));
        assert!(address.is_coordinate());
    }

    #[test]
    fn test_address_rejects_non_letter() {
        assert_eq!(Address::new('1'), Err(ValueError::InvalidAddress('1')));
        assert_eq!(Address::new('#'), Err(ValueError::InvalidAddress('#')));
    }

    #[test]
    fn test_spindle_is_not_coordinate() {
        assert!(!Address::new('S').unwrap().is_coordinate());
        assert!(!Address::new('F').unwrap().is_coordinate());
    }

    #[test]
    fn test_variable_address_keeps_leading_zeros() {
        let address = VariableAddress::new("0100").unwrap();
        assert_eq!(address.to_string(), "0100");
        assert_eq!(address.number(), 100);
        assert!(VariableAddress::new("1a").is_err());
        assert!(VariableAddress::new("").is_err());
    }
}
