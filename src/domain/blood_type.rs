use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

/// One of the eight ABO and Rh blood groups tracked by the inventory.
///
/// The set is closed. The canonical text form uses an ASCII hyphen for the
/// negative groups (`A-`, not `A−`), and that is the form written to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum BloodType {
    /// A, Rh positive
    APositive,
    /// A, Rh negative
    ANegative,
    /// B, Rh positive
    BPositive,
    /// B, Rh negative
    BNegative,
    /// AB, Rh positive
    AbPositive,
    /// AB, Rh negative
    AbNegative,
    /// O, Rh positive
    OPositive,
    /// O, Rh negative
    ONegative,
}

impl BloodType {
    /// Every blood type, in display order.
    pub const ALL: [Self; 8] = [
        Self::APositive,
        Self::ANegative,
        Self::BPositive,
        Self::BNegative,
        Self::AbPositive,
        Self::AbNegative,
        Self::OPositive,
        Self::ONegative,
    ];

    /// Returns the canonical text form, e.g. `"AB+"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::APositive => "A+",
            Self::ANegative => "A-",
            Self::BPositive => "B+",
            Self::BNegative => "B-",
            Self::AbPositive => "AB+",
            Self::AbNegative => "AB-",
            Self::OPositive => "O+",
            Self::ONegative => "O-",
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodType {
    type Err = InvalidBloodType;

    /// Parses the canonical form exactly. Case folding and other input
    /// normalisation belong to the caller.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|blood_type| blood_type.as_str() == s)
            .ok_or_else(|| InvalidBloodType(s.to_string()))
    }
}

impl TryFrom<String> for BloodType {
    type Error = InvalidBloodType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<&str> for BloodType {
    type Error = InvalidBloodType;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for BloodType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Error returned when a string is not one of the eight known blood types.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("Invalid blood type '{0}': expected one of A+, A-, B+, B-, AB+, AB-, O+, O-")]
pub struct InvalidBloodType(String);

impl InvalidBloodType {
    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.0
    }
}
