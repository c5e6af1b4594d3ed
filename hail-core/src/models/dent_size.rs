use serde::{Deserialize, Serialize};

/// Largest dent on a panel, ascending severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DentSize {
    /// Dime
    #[serde(rename = "D")]
    Dime,
    /// Nickel
    #[serde(rename = "N")]
    Nickel,
    /// Quarter
    #[serde(rename = "Q")]
    Quarter,
    /// Half dollar or larger
    #[serde(rename = "H")]
    HalfDollar,
}

impl DentSize {
    pub const ALL: [DentSize; 4] = [Self::Dime, Self::Nickel, Self::Quarter, Self::HalfDollar];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dime => "D",
            Self::Nickel => "N",
            Self::Quarter => "Q",
            Self::HalfDollar => "H",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "D" => Some(Self::Dime),
            "N" => Some(Self::Nickel),
            "Q" => Some(Self::Quarter),
            "H" => Some(Self::HalfDollar),
            _ => None,
        }
    }

    /// Column index into a pricing row.
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Dime => "Dime",
            Self::Nickel => "Nickel",
            Self::Quarter => "Quarter",
            Self::HalfDollar => "Half Dollar",
        }
    }
}

impl std::fmt::Display for DentSize {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn sizes_are_ordered_by_severity() {
        assert!(DentSize::Dime < DentSize::Nickel);
        assert!(DentSize::Nickel < DentSize::Quarter);
        assert!(DentSize::Quarter < DentSize::HalfDollar);
    }

    #[test]
    fn parse_accepts_only_single_letter_codes() {
        assert_eq!(DentSize::parse("Q"), Some(DentSize::Quarter));
        assert_eq!(DentSize::parse("X"), None);
        assert_eq!(DentSize::parse("Dime"), None);
    }

    #[test]
    fn index_matches_declaration_order() {
        let indexes: Vec<_> = DentSize::ALL.iter().map(DentSize::index).collect();

        assert_eq!(indexes, vec![0, 1, 2, 3]);
    }
}
