//! Header counters shown above each table.

use crate::records::{AllianceInfo, ShipClassEntry};

/// Entity count and total mass of a ship-class section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionTotals {
    pub count: u64,
    pub mass: u64,
}

impl SectionTotals {
    pub fn of(entries: &[ShipClassEntry]) -> Self {
        entries.iter().fold(Self::default(), |acc, entry| Self {
            count: acc.count + entry.count,
            mass: acc.mass + entry.mass,
        })
    }
}

/// Alliances on the scan, not counting the unaffiliated pseudo-alliance.
pub fn alliance_total(alliances: &[AllianceInfo]) -> usize {
    alliances.iter().filter(|a| !a.is_unaffiliated()).count()
}

/// Summed `count` of structures, deployables or starbases.
pub fn item_total(entries: &[ShipClassEntry]) -> u64 {
    entries.iter().map(|entry| entry.count).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ship(count: u64, mass: u64) -> ShipClassEntry {
        ShipClassEntry {
            count,
            mass,
            ..ShipClassEntry::default()
        }
    }

    #[test]
    fn section_totals_sum_count_and_mass() {
        let totals = SectionTotals::of(&[ship(3, 1_000_000), ship(1, 13_000_000)]);
        assert_eq!(
            totals,
            SectionTotals {
                count: 4,
                mass: 14_000_000
            }
        );
        assert_eq!(SectionTotals::of(&[]), SectionTotals::default());
    }

    #[test]
    fn unaffiliated_alliance_is_not_counted() {
        let alliance = |id| AllianceInfo {
            id,
            ..AllianceInfo::default()
        };
        assert_eq!(alliance_total(&[alliance(1), alliance(99_003_214), alliance(498_125_261)]), 2);
        assert_eq!(alliance_total(&[alliance(1)]), 0);
    }

    #[test]
    fn item_total_sums_counts() {
        assert_eq!(item_total(&[ship(2, 0), ship(5, 0)]), 7);
        assert_eq!(item_total(&[]), 0);
    }
}
