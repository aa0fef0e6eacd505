use leptos::prelude::*;

use aa_intel_shared::panels::{fleet_pilot_info_panel, html_escape, ship_info_panel};
use aa_intel_shared::settings::ScanDataText;
use aa_intel_shared::{
    CorrelationKey, Dimension, FleetPilotEntry, RowKeys, ShipClassEntry, ShipTypeEntry, TableId,
    format_number,
};

use crate::app::SettingsStore;
use crate::table::{Column, SortDirection, SortKey, TableSpec, data_table};

static SHIP_CLASSES: TableSpec<ShipClassEntry> = TableSpec {
    table: TableId::FleetShipClasses,
    label: "fleet ship classes",
    dimension: Dimension::ShipClass,
    columns: &[
        Column::new(
            "Ship",
            |s: &ShipClassEntry, _: &ScanDataText| ship_info_panel(s),
            |s: &ShipClassEntry| s.name.clone(),
        )
        .sorted_by(|s: &ShipClassEntry| SortKey::text(&s.name))
        .class("text-ellipsis"),
        Column::new(
            "Count",
            |s: &ShipClassEntry, _: &ScanDataText| s.count.to_string(),
            |s: &ShipClassEntry| s.count.to_string(),
        )
        .sorted_by(|s: &ShipClassEntry| SortKey::Number(s.count))
        .class("text-end")
        .width(45),
        Column::new(
            "Ship type",
            |s: &ShipClassEntry, _: &ScanDataText| s.type_name.clone(),
            |s: &ShipClassEntry| s.type_name.clone(),
        )
        .hidden(),
    ],
    order: (1, SortDirection::Desc),
    row_keys: |s: &ShipClassEntry| {
        RowKeys::new()
            .with(CorrelationKey::ShipClass, s.id)
            .with(CorrelationKey::ShipType, s.type_id)
    },
};

static SHIP_TYPES: TableSpec<ShipTypeEntry> = TableSpec {
    table: TableId::FleetShipTypes,
    label: "fleet ship types",
    dimension: Dimension::ShipType,
    columns: &[
        Column::new(
            "Ship type",
            |t: &ShipTypeEntry, _: &ScanDataText| html_escape(&t.name),
            |t: &ShipTypeEntry| t.name.clone(),
        )
        .sorted_by(|t: &ShipTypeEntry| SortKey::text(&t.name)),
        Column::new(
            "Count",
            |t: &ShipTypeEntry, _: &ScanDataText| t.count.to_string(),
            |t: &ShipTypeEntry| t.count.to_string(),
        )
        .sorted_by(|t: &ShipTypeEntry| SortKey::Number(t.count))
        .class("text-end")
        .width(45),
    ],
    order: (1, SortDirection::Desc),
    row_keys: |t: &ShipTypeEntry| RowKeys::new().with(CorrelationKey::ShipType, t.id),
};

static PILOTS: TableSpec<FleetPilotEntry> = TableSpec {
    table: TableId::FleetPilots,
    label: "fleet composition",
    dimension: Dimension::ShipType,
    columns: &[
        Column::new(
            "Pilot",
            |p: &FleetPilotEntry, _: &ScanDataText| fleet_pilot_info_panel(p),
            |p: &FleetPilotEntry| p.name.clone(),
        )
        .sorted_by(|p: &FleetPilotEntry| SortKey::text(&p.name))
        .class("fix-eve-image-position"),
        Column::new(
            "Ship",
            |p: &FleetPilotEntry, _: &ScanDataText| html_escape(&p.ship),
            |p: &FleetPilotEntry| p.ship.clone(),
        )
        .sorted_by(|p: &FleetPilotEntry| SortKey::text(&p.ship)),
        Column::new(
            "System",
            |p: &FleetPilotEntry, _: &ScanDataText| html_escape(&p.solarsystem),
            |p: &FleetPilotEntry| p.solarsystem.clone(),
        )
        .sorted_by(|p: &FleetPilotEntry| SortKey::text(&p.solarsystem)),
    ],
    order: (0, SortDirection::Asc),
    row_keys: |p: &FleetPilotEntry| {
        RowKeys::new()
            .with(CorrelationKey::ShipClass, p.ship_id)
            .with(CorrelationKey::ShipType, p.ship_type_id)
    },
};

/// Fleet composition: hulls, hull groups and who flies what.
#[component]
pub fn FleetComposition() -> impl IntoView {
    let SettingsStore(settings) = expect_context();
    let (urls, language) = settings.with_value(|s| (s.url.clone(), s.language.django.clone()));
    let pilots = RwSignal::new(0u64);

    view! {
        <div class="aa-intel-fleetcomp">
            <div class="row">
                <div class="col-md-6 aa-intel-section-ship-classes">
                    <h4>"Ship classes"</h4>
                    <div class="table-dscan-ship-classes-ship-classes">
                        {data_table(&SHIP_CLASSES, urls.get_ship_classes.clone(), |_: &[ShipClassEntry]| {})}
                    </div>
                </div>
                <div class="col-md-6 aa-intel-section-ship-types">
                    <h4>"Ship types"</h4>
                    <div class="table-dscan-ship-types">
                        {data_table(&SHIP_TYPES, urls.get_ship_types.clone(), |_: &[ShipTypeEntry]| {})}
                    </div>
                </div>
            </div>
            <div class="row">
                <div class="col-md-12 aa-intel-section-fleetcomp-pilot-ships">
                    <h4>
                        "Pilots "
                        <span class="badge bg-secondary" id="aa-intel-fleet-participation-count">
                            {move || format_number(pilots.get(), &language)}
                        </span>
                    </h4>
                    <div class="table-fleetcomp-pilot-ships">
                        {data_table(&PILOTS, urls.get_fleet_composition.clone(), move |rows: &[FleetPilotEntry]| {
                            pilots.set(rows.len() as u64);
                        })}
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::visible_rows;

    #[test]
    fn pilot_rows_follow_their_hull_group() {
        let pilot = FleetPilotEntry {
            id: 9,
            name: "Rounon Dax".into(),
            ship: "Hurricane".into(),
            ship_id: 24_690,
            ship_type_id: 419,
            ..FleetPilotEntry::default()
        };
        let keys = (PILOTS.row_keys)(&pilot);
        assert_eq!(keys.get(CorrelationKey::ShipClass), Some(24_690));
        assert_eq!(keys.get(CorrelationKey::ShipType), Some(419));
        assert_eq!(keys.get(CorrelationKey::Character), None);
        assert_eq!(PILOTS.dimension, Dimension::ShipType);
    }

    #[test]
    fn pilots_can_be_filtered_by_system() {
        let pilot = |name: &str, system: &str| FleetPilotEntry {
            name: name.into(),
            solarsystem: system.into(),
            ..FleetPilotEntry::default()
        };
        let rows = vec![pilot("Zed", "Jita"), pilot("Amy", "Amarr"), pilot("Bob", "Jita")];

        assert_eq!(
            visible_rows(&rows, PILOTS.columns, PILOTS.order, "jita"),
            vec![2, 0]
        );
    }

    #[test]
    fn ship_cells_are_escaped() {
        let pilot = FleetPilotEntry {
            ship: "<Rifter>".into(),
            ..FleetPilotEntry::default()
        };
        let cell = (PILOTS.columns[1].cell)(&pilot, &ScanDataText::default());
        assert_eq!(cell, "&lt;Rifter&gt;");
    }
}
