//! Employee id and office definitions.

use std::ops::RangeInclusive;

use crate::IdError;

/// The reserved id that wins every tie it takes part in.
pub const DEFAULT_PREFERRED_ID: EmployeeId = EmployeeId(1099);

// =============================================================================
// Employee
// =============================================================================

/// An employee id.
///
/// Ids are positive integers; ordering follows the numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EmployeeId(u32);

impl EmployeeId {
    /// Creates an id from a raw value.
    ///
    /// Returns `IdError::Zero` for zero.
    pub fn new(id: u32) -> Result<Self, IdError> {
        if id == 0 {
            return Err(IdError::Zero);
        }
        Ok(Self(id))
    }

    /// Returns the underlying integer value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Returns the office whose range contains this id, if any.
    #[must_use]
    pub fn office(&self) -> Option<Office> {
        Office::of(*self)
    }

    /// Parses an id from a string.
    ///
    /// Only ASCII digits are accepted; signs and inner whitespace are rejected.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        if s.is_empty() {
            return Err(IdError::Empty);
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IdError::NotNumeric(s.to_string()));
        }

        let value = s
            .parse::<u32>()
            .map_err(|_| IdError::NotNumeric(s.to_string()))?;

        Self::new(value)
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for EmployeeId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<u32> for EmployeeId {
    type Error = IdError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<EmployeeId> for u32 {
    fn from(id: EmployeeId) -> Self {
        id.0
    }
}

impl serde::Serialize for EmployeeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u32(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for EmployeeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = u32::deserialize(deserializer)?;
        Self::new(id).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Offices
// =============================================================================

/// The two offices a project team is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Office {
    /// First member of every team.
    Stockholm,
    /// Second member of every team.
    London,
}

impl Office {
    /// All offices, in team-member order.
    pub const ALL: [Office; 2] = [Office::Stockholm, Office::London];

    /// Returns the inclusive id range owned by this office.
    #[must_use]
    pub const fn range(&self) -> RangeInclusive<u32> {
        match self {
            Office::Stockholm => 1000..=1999,
            Office::London => 2000..=2999,
        }
    }

    /// Returns the office name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Office::Stockholm => "stockholm",
            Office::London => "london",
        }
    }

    /// Returns true if the id falls in this office's range.
    #[must_use]
    pub fn contains(&self, id: EmployeeId) -> bool {
        self.range().contains(&id.value())
    }

    /// Returns the office whose range contains the id.
    #[must_use]
    pub fn of(id: EmployeeId) -> Option<Office> {
        Self::ALL.into_iter().find(|office| office.contains(id))
    }

    /// Validates that the id belongs to this office.
    pub fn check(&self, id: EmployeeId) -> Result<EmployeeId, IdError> {
        if self.contains(id) {
            return Ok(id);
        }
        let range = self.range();
        Err(IdError::OutOfRange {
            id: id.value(),
            office: self.name(),
            min: *range.start(),
            max: *range.end(),
        })
    }

    /// Returns every id in this office, in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = EmployeeId> {
        // Office ranges never contain zero.
        self.range().map(EmployeeId)
    }
}

impl std::fmt::Display for Office {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_employee_id_parse() {
        let id: EmployeeId = "1042".parse().unwrap();
        assert_eq!(id.value(), 1042);
        assert_eq!(id.to_string(), "1042");
    }

    #[test]
    fn test_employee_id_empty() {
        let result: Result<EmployeeId, _> = "".parse();
        assert!(matches!(result.unwrap_err(), IdError::Empty));
    }

    #[test]
    fn test_employee_id_not_numeric() {
        for input in ["abc", "12a", "+12", "-5", "1 2", "99999999999"] {
            let result: Result<EmployeeId, _> = input.parse();
            assert!(
                matches!(result, Err(IdError::NotNumeric(_))),
                "expected NotNumeric for {input:?}"
            );
        }
    }

    #[test]
    fn test_employee_id_zero() {
        assert!(matches!(EmployeeId::parse("0"), Err(IdError::Zero)));
        assert!(matches!(EmployeeId::parse("000"), Err(IdError::Zero)));
        assert!(EmployeeId::new(0).is_err());
    }

    #[test]
    fn test_employee_id_json_is_bare_integer() {
        let id = EmployeeId::new(2317).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "2317");

        let parsed: EmployeeId = serde_json::from_str("2317").unwrap();
        assert_eq!(parsed, id);

        assert!(serde_json::from_str::<EmployeeId>("0").is_err());
    }

    #[test]
    fn test_office_of() {
        let sto = EmployeeId::new(1000).unwrap();
        let lon = EmployeeId::new(2999).unwrap();
        let none = EmployeeId::new(3000).unwrap();

        assert_eq!(Office::of(sto), Some(Office::Stockholm));
        assert_eq!(Office::of(lon), Some(Office::London));
        assert_eq!(Office::of(none), None);
    }

    #[test]
    fn test_office_check() {
        let lon = EmployeeId::new(2001).unwrap();
        let err = Office::Stockholm.check(lon).unwrap_err();
        assert!(err.is_range_error());
        assert_eq!(
            err.to_string(),
            "employee id 2001 is outside the stockholm range [1000:1999]"
        );
        assert!(Office::London.check(lon).is_ok());
    }

    #[test]
    fn test_office_ranges_disjoint() {
        let sto = Office::Stockholm.range();
        let lon = Office::London.range();
        assert!(sto.end() < lon.start());
        assert_eq!(Office::Stockholm.ids().count(), 1000);
    }

    #[test]
    fn test_preferred_id_is_stockholm() {
        assert_eq!(DEFAULT_PREFERRED_ID.office(), Some(Office::Stockholm));
    }

    proptest! {
        #[test]
        fn prop_display_parse_roundtrip(raw in 1u32..) {
            let id = EmployeeId::new(raw).unwrap();
            let parsed: EmployeeId = id.to_string().parse().unwrap();
            prop_assert_eq!(id, parsed);
        }
    }
}
