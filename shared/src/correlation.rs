//! Declarative description of how rows in sibling tables relate to each other.
//!
//! Each scan view has one [`CorrelationGraph`]. For every trigger [`Dimension`]
//! it lists the tables whose rows follow the triggering row, the key used to
//! find them, and which finer-grained tables must be free of sticky rows before
//! a coarser table may drop its sticky state.

/// Every table a scan view can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableId {
    Alliances,
    Corporations,
    Pilots,
    ShipClassesAll,
    ShipClassesOngrid,
    ShipClassesOffgrid,
    ShipTypes,
    UpwellStructures,
    Deployables,
    Starbases,
    FleetShipClasses,
    FleetShipTypes,
    FleetPilots,
}

impl TableId {
    /// Class on the `<table>` element.
    pub const fn table_class(self) -> &'static str {
        match self {
            Self::Alliances => "aa-intel-alliance-participation-list",
            Self::Corporations => "aa-intel-corporation-participation-list",
            Self::Pilots => "aa-intel-pilot-participation-list",
            Self::ShipClassesAll => "aa-intel-dscan-ship-classes-all-list",
            Self::ShipClassesOngrid => "aa-intel-dscan-ship-classes-ongrid-list",
            Self::ShipClassesOffgrid => "aa-intel-dscan-ship-classes-offgrid-list",
            Self::ShipTypes | Self::FleetShipTypes => "aa-intel-dscan-ship-types-list",
            Self::UpwellStructures => "aa-intel-dscan-upwell-structures-list",
            Self::Deployables => "aa-intel-dscan-deployables-list",
            Self::Starbases => "aa-intel-dscan-starbases-list",
            Self::FleetShipClasses => "aa-intel-dscan-ship-classes-ship-classes-list",
            Self::FleetPilots => "aa-intel-fleetcomp-pilot-ships-list",
        }
    }

    /// Class stamped on every `<tr>` of the table.
    pub const fn row_class(self) -> &'static str {
        match self {
            Self::Alliances => "aa-intel-alliance-participation-item",
            Self::Corporations => "aa-intel-corporation-participation-item",
            Self::Pilots => "aa-intel-pilot-participation-item",
            Self::ShipClassesAll => "aa-intel-shipclass-all-item",
            Self::ShipClassesOngrid => "aa-intel-shipclass-ongrid-item",
            Self::ShipClassesOffgrid => "aa-intel-shipclass-offgrid-item",
            Self::ShipTypes | Self::FleetShipTypes => "aa-intel-shiptype-item",
            Self::UpwellStructures => "aa-intel-structuretype-item",
            Self::Deployables => "aa-intel-deployabletype-item",
            Self::Starbases => "aa-intel-starbasetype-item",
            Self::FleetShipClasses => "aa-intel-shipclass-item",
            Self::FleetPilots => "aa-intel-fleetcomp-pilot-item",
        }
    }

    /// Slug used for the loading/empty panels of the table's section.
    pub const fn section_slug(self) -> &'static str {
        match self {
            Self::Alliances => "alliance-participation-list",
            Self::Corporations => "corporation-participation-list",
            Self::Pilots => "pilot-participation-list",
            Self::ShipClassesAll => "all",
            Self::ShipClassesOngrid => "ongrid",
            Self::ShipClassesOffgrid => "offgrid",
            Self::ShipTypes | Self::FleetShipTypes => "ship-types",
            Self::UpwellStructures => "upwell-structures",
            Self::Deployables => "deployables",
            Self::Starbases => "starbases",
            Self::FleetShipClasses => "ship-classes",
            Self::FleetPilots => "fleetcomp-pilot-ships",
        }
    }
}

/// An attribute rows are joined on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CorrelationKey {
    Alliance,
    Corporation,
    Character,
    ShipType,
    ShipClass,
    StructureType,
    DeployableType,
    StarbaseType,
}

impl CorrelationKey {
    pub const fn data_attribute(self) -> &'static str {
        match self {
            Self::Alliance => "data-alliance-id",
            Self::Corporation => "data-corporation-id",
            Self::Character => "data-character-id",
            Self::ShipType => "data-shiptype-id",
            Self::ShipClass => "data-shipclass-id",
            Self::StructureType => "data-structuretype-id",
            Self::DeployableType => "data-deployabletype-id",
            Self::StarbaseType => "data-starbasetype-id",
        }
    }

    /// Prefix of the `aa-intel-<key>-id-<value>` row class.
    pub const fn class_prefix(self) -> &'static str {
        match self {
            Self::Alliance => "aa-intel-alliance-id-",
            Self::Corporation => "aa-intel-corporation-id-",
            Self::Character => "aa-intel-character-id-",
            Self::ShipType => "aa-intel-shiptype-id-",
            Self::ShipClass => "aa-intel-shipclass-id-",
            Self::StructureType => "aa-intel-structuretype-id-",
            Self::DeployableType => "aa-intel-deployabletype-id-",
            Self::StarbaseType => "aa-intel-starbasetype-id-",
        }
    }
}

/// Correlation keys carried by one row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowKeys(Vec<(CorrelationKey, u64)>);

impl RowKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: CorrelationKey, value: u64) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: CorrelationKey, value: u64) {
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: CorrelationKey) -> Option<u64> {
        self.0.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CorrelationKey, u64)> + '_ {
        self.0.iter().copied()
    }

    /// `aa-intel-alliance-id-5 aa-intel-corporation-id-7 ...`
    pub fn id_classes(&self) -> String {
        self.0
            .iter()
            .map(|(key, value)| format!("{}{value}", key.class_prefix()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The table kind an event was triggered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Alliance,
    Corporation,
    Pilot,
    ShipClass,
    ShipType,
    /// Hover-only rows (structures, deployables, starbases).
    Item,
}

impl Dimension {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Alliance => "alliance",
            Self::Corporation => "corporation",
            Self::Pilot => "pilot",
            Self::ShipClass => "shipclass",
            Self::ShipType => "shiptype",
            Self::Item => "item",
        }
    }
}

/// Rows of `table` whose `key` equals the triggering row's `key` follow it.
///
/// On sticky removal a link with non-empty `witnesses` is only cleared once no
/// row with the same key value in any witness table is still sticky.
#[derive(Debug, Clone, Copy)]
pub struct Link {
    pub table: TableId,
    pub key: CorrelationKey,
    pub witnesses: &'static [TableId],
}

impl Link {
    pub const fn is_guarded(&self) -> bool {
        !self.witnesses.is_empty()
    }
}

/// A sticky row is only released by a click once every witness row sharing
/// its `key` is sticky too; otherwise the click re-applies sticky.
#[derive(Debug, Clone, Copy)]
pub struct Saturation {
    pub key: CorrelationKey,
    pub witnesses: &'static [TableId],
}

#[derive(Debug, Clone, Copy)]
pub struct DimensionRule {
    pub dimension: Dimension,
    pub links: &'static [Link],
    pub saturation: Option<Saturation>,
}

#[derive(Debug)]
pub struct CorrelationGraph {
    pub name: &'static str,
    pub rules: &'static [DimensionRule],
}

impl CorrelationGraph {
    pub fn rule(&self, dimension: Dimension) -> Option<&DimensionRule> {
        self.rules.iter().find(|rule| rule.dimension == dimension)
    }

    /// Dimensions without a rule only ever highlight their own row.
    pub fn sticky_enabled(&self, dimension: Dimension) -> bool {
        self.rule(dimension).is_some()
    }
}

const DSCAN_SHIP_CLASS_TABLES: &[TableId] = &[
    TableId::ShipClassesAll,
    TableId::ShipClassesOngrid,
    TableId::ShipClassesOffgrid,
];

pub const CHAT_SCAN: CorrelationGraph = CorrelationGraph {
    name: "chatscan",
    rules: &[
        DimensionRule {
            dimension: Dimension::Alliance,
            links: &[
                Link {
                    table: TableId::Alliances,
                    key: CorrelationKey::Alliance,
                    witnesses: &[],
                },
                Link {
                    table: TableId::Corporations,
                    key: CorrelationKey::Alliance,
                    witnesses: &[],
                },
                Link {
                    table: TableId::Pilots,
                    key: CorrelationKey::Alliance,
                    witnesses: &[],
                },
            ],
            saturation: None,
        },
        DimensionRule {
            dimension: Dimension::Corporation,
            links: &[
                Link {
                    table: TableId::Corporations,
                    key: CorrelationKey::Corporation,
                    witnesses: &[],
                },
                Link {
                    table: TableId::Pilots,
                    key: CorrelationKey::Corporation,
                    witnesses: &[],
                },
                Link {
                    table: TableId::Alliances,
                    key: CorrelationKey::Alliance,
                    witnesses: &[TableId::Pilots, TableId::Corporations],
                },
            ],
            saturation: None,
        },
        DimensionRule {
            dimension: Dimension::Pilot,
            links: &[
                Link {
                    table: TableId::Pilots,
                    key: CorrelationKey::Character,
                    witnesses: &[],
                },
                Link {
                    table: TableId::Corporations,
                    key: CorrelationKey::Corporation,
                    witnesses: &[TableId::Pilots],
                },
                Link {
                    table: TableId::Alliances,
                    key: CorrelationKey::Alliance,
                    witnesses: &[TableId::Pilots, TableId::Corporations],
                },
            ],
            saturation: None,
        },
    ],
};

pub const DSCAN: CorrelationGraph = CorrelationGraph {
    name: "dscan",
    rules: &[
        DimensionRule {
            dimension: Dimension::ShipClass,
            links: &[
                Link {
                    table: TableId::ShipClassesAll,
                    key: CorrelationKey::ShipClass,
                    witnesses: &[],
                },
                Link {
                    table: TableId::ShipClassesOngrid,
                    key: CorrelationKey::ShipClass,
                    witnesses: &[],
                },
                Link {
                    table: TableId::ShipClassesOffgrid,
                    key: CorrelationKey::ShipClass,
                    witnesses: &[],
                },
                Link {
                    table: TableId::ShipTypes,
                    key: CorrelationKey::ShipType,
                    witnesses: DSCAN_SHIP_CLASS_TABLES,
                },
            ],
            saturation: None,
        },
        DimensionRule {
            dimension: Dimension::ShipType,
            links: &[
                Link {
                    table: TableId::ShipClassesAll,
                    key: CorrelationKey::ShipType,
                    witnesses: &[],
                },
                Link {
                    table: TableId::ShipClassesOngrid,
                    key: CorrelationKey::ShipType,
                    witnesses: &[],
                },
                Link {
                    table: TableId::ShipClassesOffgrid,
                    key: CorrelationKey::ShipType,
                    witnesses: &[],
                },
                Link {
                    table: TableId::ShipTypes,
                    key: CorrelationKey::ShipType,
                    witnesses: &[],
                },
            ],
            saturation: Some(Saturation {
                key: CorrelationKey::ShipType,
                witnesses: DSCAN_SHIP_CLASS_TABLES,
            }),
        },
    ],
};

pub const FLEET_COMPOSITION: CorrelationGraph = CorrelationGraph {
    name: "fleetcomposition",
    rules: &[
        DimensionRule {
            dimension: Dimension::ShipClass,
            links: &[
                Link {
                    table: TableId::FleetShipClasses,
                    key: CorrelationKey::ShipClass,
                    witnesses: &[],
                },
                Link {
                    table: TableId::FleetShipTypes,
                    key: CorrelationKey::ShipType,
                    witnesses: &[TableId::FleetShipClasses],
                },
                Link {
                    table: TableId::FleetPilots,
                    key: CorrelationKey::ShipType,
                    witnesses: &[TableId::FleetShipClasses],
                },
            ],
            saturation: None,
        },
        DimensionRule {
            dimension: Dimension::ShipType,
            links: &[
                Link {
                    table: TableId::FleetShipClasses,
                    key: CorrelationKey::ShipType,
                    witnesses: &[],
                },
                Link {
                    table: TableId::FleetShipTypes,
                    key: CorrelationKey::ShipType,
                    witnesses: &[],
                },
                Link {
                    table: TableId::FleetPilots,
                    key: CorrelationKey::ShipType,
                    witnesses: &[],
                },
            ],
            saturation: Some(Saturation {
                key: CorrelationKey::ShipType,
                witnesses: &[TableId::FleetShipClasses],
            }),
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    fn all_graphs() -> [&'static CorrelationGraph; 3] {
        [&CHAT_SCAN, &DSCAN, &FLEET_COMPOSITION]
    }

    #[test]
    fn guarded_links_never_witness_their_own_table() {
        for graph in all_graphs() {
            for rule in graph.rules {
                for link in rule.links {
                    assert!(
                        !link.witnesses.contains(&link.table),
                        "{}/{}: {:?} witnesses itself",
                        graph.name,
                        rule.dimension.as_str(),
                        link.table
                    );
                }
            }
        }
    }

    #[test]
    fn dimensions_are_unique_per_graph() {
        for graph in all_graphs() {
            for (i, rule) in graph.rules.iter().enumerate() {
                assert!(
                    graph.rules[i + 1..]
                        .iter()
                        .all(|other| other.dimension != rule.dimension),
                    "{} declares {} twice",
                    graph.name,
                    rule.dimension.as_str()
                );
            }
        }
    }

    #[test]
    fn item_rows_are_hover_only() {
        assert!(!DSCAN.sticky_enabled(Dimension::Item));
        assert!(DSCAN.sticky_enabled(Dimension::ShipType));
        assert!(!CHAT_SCAN.sticky_enabled(Dimension::ShipClass));
    }

    #[test]
    fn row_keys_overwrite_and_render_classes() {
        let mut keys = RowKeys::new()
            .with(CorrelationKey::Corporation, 7)
            .with(CorrelationKey::Alliance, 5);
        keys.insert(CorrelationKey::Alliance, 6);

        assert_eq!(keys.get(CorrelationKey::Alliance), Some(6));
        assert_eq!(keys.get(CorrelationKey::ShipType), None);
        assert_eq!(
            keys.id_classes(),
            "aa-intel-corporation-id-7 aa-intel-alliance-id-6"
        );
    }

    #[test]
    fn fleet_page_reuses_dscan_table_classes() {
        assert_eq!(
            TableId::FleetShipTypes.table_class(),
            "aa-intel-dscan-ship-types-list"
        );
        assert_eq!(
            TableId::FleetShipClasses.table_class(),
            "aa-intel-dscan-ship-classes-ship-classes-list"
        );
        assert_eq!(
            TableId::FleetPilots.table_class(),
            "aa-intel-fleetcomp-pilot-ships-list"
        );
    }
}
