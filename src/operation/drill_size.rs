//! Inch drill sizes
//!
//! Number (`#30`), letter (`#F`) and fractional (`3/16`) drill sizes with
//! their metric equivalents. A table is built once and shared read-only.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::NcError;

static IDENTIFIER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:#\d+|#[A-Z]|\d+/\d+)$").expect("invalid drill size identifier regex")
});

/// One inch drill size
#[derive(Debug, Clone, PartialEq)]
pub struct DrillSizeData {
    size_identifier: String,
    inch: Decimal,
    millimeter: Decimal,
}

impl DrillSizeData {
    pub fn new(size_identifier: &str, inch: Decimal, millimeter: Decimal) -> Result<Self, NcError> {
        if !IDENTIFIER_PATTERN.is_match(size_identifier) {
            return Err(NcError::InvalidDrillSizeData(format!(
                "サイズ '{}' は #番号、#アルファベット、分数のいずれかで指定してください",
                size_identifier
            )));
        }
        if inch <= Decimal::ZERO || millimeter <= Decimal::ZERO {
            return Err(NcError::InvalidDrillSizeData(format!(
                "サイズ '{}' の寸法は0より大きい値にしてください (inch: {}, mm: {})",
                size_identifier, inch, millimeter
            )));
        }

        Ok(Self {
            size_identifier: size_identifier.to_string(),
            inch,
            millimeter,
        })
    }

    pub fn size_identifier(&self) -> &str {
        &self.size_identifier
    }

    pub fn inch(&self) -> Decimal {
        self.inch
    }

    pub fn millimeter(&self) -> Decimal {
        self.millimeter
    }
}

/// Root of a drill size file (matches TOML)
#[derive(Debug, Deserialize)]
struct DrillSizeFile {
    sizes: Vec<DrillSizeRow>,
}

#[derive(Debug, Deserialize)]
struct DrillSizeRow {
    identifier: String,
    inch: Decimal,
    millimeter: Decimal,
}

/// Lookup table of drill sizes
#[derive(Debug, Clone, Default)]
pub struct DrillSizeTable {
    sizes: Vec<DrillSizeData>,
}

impl DrillSizeTable {
    pub fn new(sizes: Vec<DrillSizeData>) -> Self {
        Self { sizes }
    }

    /// The drill size table shipped with the crate
    pub fn builtin() -> Result<Self, NcError> {
        let embedded_toml = include_str!("../../resources/drill_sizes.toml");
        Self::from_toml_str(embedded_toml)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, NcError> {
        let file: DrillSizeFile =
            toml::from_str(content).map_err(|e| NcError::InvalidDrillSizeData(e.to_string()))?;

        let sizes = file
            .sizes
            .into_iter()
            .map(|row| DrillSizeData::new(&row.identifier, row.inch, row.millimeter))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { sizes })
    }

    /// Exact identifier lookup
    pub fn find(&self, size_identifier: &str) -> Option<&DrillSizeData> {
        self.sizes
            .iter()
            .find(|size| size.size_identifier == size_identifier)
    }

    /// Millimeter diameter for an identifier, failing on unknown sizes
    pub fn millimeter_of(&self, size_identifier: &str) -> Result<Decimal, NcError> {
        self.find(size_identifier)
            .map(DrillSizeData::millimeter)
            .ok_or_else(|| NcError::DrillSizeNotFound(size_identifier.to_string()))
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_identifier_shapes() {
        assert!(DrillSizeData::new("#30", dec!(0.1285), dec!(3.26)).is_ok());
        assert!(DrillSizeData::new("#F", dec!(0.257), dec!(6.53)).is_ok());
        assert!(DrillSizeData::new("3/16", dec!(0.1875), dec!(4.76)).is_ok());

        assert!(DrillSizeData::new("3-16", dec!(0.1875), dec!(4.76)).is_err());
        assert!(DrillSizeData::new("#f", dec!(0.257), dec!(6.53)).is_err());
        assert!(DrillSizeData::new("F", dec!(0.257), dec!(6.53)).is_err());
    }

    #[test]
    fn test_measurements_must_be_positive() {
        let err = DrillSizeData::new("1/4", dec!(0), dec!(6.35)).unwrap_err();
        assert!(matches!(err, NcError::InvalidDrillSizeData(_)));
        assert!(DrillSizeData::new("1/4", dec!(0.25), dec!(-6.35)).is_err());
    }

    #[test]
    fn test_builtin_table() {
        let table = DrillSizeTable::builtin().expect("embedded drill sizes parse");
        assert!(!table.is_empty());
        assert_eq!(table.millimeter_of("3/16").unwrap(), dec!(4.76));
        assert_eq!(table.millimeter_of("1/4").unwrap(), dec!(6.35));
        assert!(table.find("#F").is_some());
        assert!(table.find("#30").is_some());
    }

    #[test]
    fn test_missing_size() {
        let table = DrillSizeTable::new(vec![]);
        match table.millimeter_of("#99") {
            Err(NcError::DrillSizeNotFound(identifier)) => assert_eq!(identifier, "#99"),
            other => panic!("Expected DrillSizeNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_from_toml_rejects_bad_rows() {
        let content = r#"
[[sizes]]
identifier = "abc"
inch = 0.1
millimeter = 2.54
"#;
        assert!(DrillSizeTable::from_toml_str(content).is_err());
    }
}
