//! Base repair prices by panel group, dent-count bracket and dent size.
//!
//! # Flat panels (HOOD, ROOF, TRUNK)
//!
//! | Bracket | D    | N    | Q    | H    |
//! |---------|------|------|------|------|
//! | 1-5     | 125  | 155  | 185  | 215  |
//! | 6-15    | 185  | 215  | 255  | 325  |
//! | 16-30   | 255  | 325  | 375  | 425  |
//! | 31-50   | 375  | 425  | 475  | 575  |
//! | 51-75   | 475  | 525  | 625  | 800  |
//! | 76-100  | 625  | 725  | 850  | CR   |
//! | 101-150 | 850  | 1000 | 1200 | 1500 |
//! | 151-200 | 1200 | 1500 | 1800 | CR   |
//! | 201-300 | CR   | CR   | CR   | CR   |
//!
//! # Side panels (fenders, doors, quarters, rails)
//!
//! | Bracket | D   | N   | Q   | H   |
//! |---------|-----|-----|-----|-----|
//! | 1-5     | 95  | 125 | 155 | 185 |
//! | 6-15    | 135 | 175 | 215 | 255 |
//! | 16-30   | 185 | 255 | 325 | 375 |
//! | 31-50   | 325 | 375 | 425 | CR  |
//! | 51+     | CR  | CR  | CR  | CR  |
//!
//! `CR` cells need a manual quote and never take the aluminum surcharge.

use rust_decimal::Decimal;

use crate::models::{DentSize, PanelGroup, PanelType};

/// Surcharge applied to priced cells for aluminum panels.
pub const ALUMINUM_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Inclusive dent-count range selecting one row of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DentCountBracket {
    UpTo5,
    UpTo15,
    UpTo30,
    UpTo50,
    UpTo75,
    UpTo100,
    UpTo150,
    UpTo200,
    UpTo300,
}

impl DentCountBracket {
    pub const ALL: [DentCountBracket; 9] = [
        Self::UpTo5,
        Self::UpTo15,
        Self::UpTo30,
        Self::UpTo50,
        Self::UpTo75,
        Self::UpTo100,
        Self::UpTo150,
        Self::UpTo200,
        Self::UpTo300,
    ];

    /// Bracket containing `count`, or `None` outside 1..=300.
    pub fn for_count(count: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|bracket| {
            let (low, high) = bracket.bounds();
            (i64::from(low)..=i64::from(high)).contains(&count)
        })
    }

    /// Inclusive `(low, high)` dent counts.
    pub fn bounds(&self) -> (u16, u16) {
        match self {
            Self::UpTo5 => (1, 5),
            Self::UpTo15 => (6, 15),
            Self::UpTo30 => (16, 30),
            Self::UpTo50 => (31, 50),
            Self::UpTo75 => (51, 75),
            Self::UpTo100 => (76, 100),
            Self::UpTo150 => (101, 150),
            Self::UpTo200 => (151, 200),
            Self::UpTo300 => (201, 300),
        }
    }

    /// Row label, e.g. `"16-30"`.
    pub fn label(&self) -> String {
        let (low, high) = self.bounds();
        format!("{low}-{high}")
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// One table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceCell {
    /// Whole-dollar base price.
    Base(u32),
    /// Custom repair, priced by hand.
    CustomRepair,
}

impl PriceCell {
    pub fn base_price(&self) -> Option<Decimal> {
        match self {
            Self::Base(dollars) => Some(Decimal::from(*dollars)),
            Self::CustomRepair => None,
        }
    }
}

use self::PriceCell::{Base as P, CustomRepair as CR};

type PriceRows = [[PriceCell; 4]; 9];

const FLAT_PANEL_PRICES: PriceRows = [
    [P(125), P(155), P(185), P(215)],
    [P(185), P(215), P(255), P(325)],
    [P(255), P(325), P(375), P(425)],
    [P(375), P(425), P(475), P(575)],
    [P(475), P(525), P(625), P(800)],
    [P(625), P(725), P(850), CR],
    [P(850), P(1000), P(1200), P(1500)],
    [P(1200), P(1500), P(1800), CR],
    [CR, CR, CR, CR],
];

const SIDE_PANEL_PRICES: PriceRows = [
    [P(95), P(125), P(155), P(185)],
    [P(135), P(175), P(215), P(255)],
    [P(185), P(255), P(325), P(375)],
    [P(325), P(375), P(425), CR],
    [CR, CR, CR, CR],
    [CR, CR, CR, CR],
    [CR, CR, CR, CR],
    [CR, CR, CR, CR],
    [CR, CR, CR, CR],
];

/// Read-only view over the compiled-in price rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct PricingTable;

impl PricingTable {
    pub fn new() -> Self {
        Self
    }

    pub fn cell(
        &self,
        panel: PanelType,
        bracket: DentCountBracket,
        size: DentSize,
    ) -> PriceCell {
        let rows = match panel.group() {
            PanelGroup::Flat => &FLAT_PANEL_PRICES,
            PanelGroup::Side => &SIDE_PANEL_PRICES,
        };
        rows[bracket.index()][size.index()]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn aluminum_multiplier_is_one_and_a_half() {
        assert_eq!(ALUMINUM_MULTIPLIER, dec!(1.5));
    }

    // =========================================================================
    // bracket tests
    // =========================================================================

    #[test]
    fn bracket_boundaries_are_inclusive() {
        assert_eq!(DentCountBracket::for_count(1), Some(DentCountBracket::UpTo5));
        assert_eq!(DentCountBracket::for_count(5), Some(DentCountBracket::UpTo5));
        assert_eq!(DentCountBracket::for_count(6), Some(DentCountBracket::UpTo15));
        assert_eq!(DentCountBracket::for_count(50), Some(DentCountBracket::UpTo50));
        assert_eq!(DentCountBracket::for_count(51), Some(DentCountBracket::UpTo75));
        assert_eq!(DentCountBracket::for_count(200), Some(DentCountBracket::UpTo200));
        assert_eq!(DentCountBracket::for_count(201), Some(DentCountBracket::UpTo300));
        assert_eq!(DentCountBracket::for_count(300), Some(DentCountBracket::UpTo300));
    }

    #[test]
    fn counts_outside_range_have_no_bracket() {
        assert_eq!(DentCountBracket::for_count(0), None);
        assert_eq!(DentCountBracket::for_count(-4), None);
        assert_eq!(DentCountBracket::for_count(301), None);
        assert_eq!(DentCountBracket::for_count(1_000_000), None);
    }

    #[test]
    fn brackets_cover_every_count_without_gaps() {
        for count in 1..=300 {
            let bracket = DentCountBracket::for_count(count).expect("bracket for count");
            let (low, high) = bracket.bounds();
            assert!(i64::from(low) <= count && count <= i64::from(high));
        }
    }

    #[test]
    fn bracket_labels() {
        let labels: Vec<_> = DentCountBracket::ALL.iter().map(|b| b.label()).collect();

        assert_eq!(
            labels,
            vec![
                "1-5", "6-15", "16-30", "31-50", "51-75", "76-100", "101-150", "151-200",
                "201-300"
            ]
        );
    }

    // =========================================================================
    // cell tests
    // =========================================================================

    #[test]
    fn flat_panels_share_one_curve() {
        let table = PricingTable::new();
        for bracket in DentCountBracket::ALL {
            for size in DentSize::ALL {
                let hood = table.cell(PanelType::Hood, bracket, size);
                assert_eq!(table.cell(PanelType::Roof, bracket, size), hood);
                assert_eq!(table.cell(PanelType::Trunk, bracket, size), hood);
            }
        }
    }

    #[test]
    fn side_panels_share_one_curve() {
        let table = PricingTable::new();
        for panel in PanelType::ALL
            .into_iter()
            .filter(|p| p.group() == PanelGroup::Side)
        {
            for bracket in DentCountBracket::ALL {
                for size in DentSize::ALL {
                    assert_eq!(
                        table.cell(panel, bracket, size),
                        table.cell(PanelType::Lff, bracket, size)
                    );
                }
            }
        }
    }

    #[test]
    fn side_panels_are_custom_repair_from_51_dents() {
        let table = PricingTable::new();
        for bracket in &DentCountBracket::ALL[4..] {
            for size in DentSize::ALL {
                assert_eq!(table.cell(PanelType::Rrail, *bracket, size), PriceCell::CustomRepair);
            }
        }
        assert_eq!(
            table.cell(PanelType::Lq, DentCountBracket::UpTo50, DentSize::HalfDollar),
            PriceCell::CustomRepair
        );
        assert_eq!(
            table.cell(PanelType::Lq, DentCountBracket::UpTo50, DentSize::Quarter),
            PriceCell::Base(425)
        );
    }

    #[test]
    fn flat_panel_custom_repair_cells() {
        let table = PricingTable::new();

        assert_eq!(
            table.cell(PanelType::Hood, DentCountBracket::UpTo100, DentSize::HalfDollar),
            PriceCell::CustomRepair
        );
        assert_eq!(
            table.cell(PanelType::Hood, DentCountBracket::UpTo150, DentSize::HalfDollar),
            PriceCell::Base(1500)
        );
        assert_eq!(
            table.cell(PanelType::Hood, DentCountBracket::UpTo200, DentSize::HalfDollar),
            PriceCell::CustomRepair
        );
        assert_eq!(
            table.cell(PanelType::Roof, DentCountBracket::UpTo300, DentSize::Dime),
            PriceCell::CustomRepair
        );
    }

    #[test]
    fn base_price_is_none_for_custom_repair() {
        assert_eq!(PriceCell::Base(95).base_price(), Some(dec!(95)));
        assert_eq!(PriceCell::CustomRepair.base_price(), None);
    }
}
