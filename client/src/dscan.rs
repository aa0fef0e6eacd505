use leptos::prelude::*;

use aa_intel_shared::panels::{html_escape, ship_info_panel};
use aa_intel_shared::settings::ScanDataText;
use aa_intel_shared::totals::{SectionTotals, item_total};
use aa_intel_shared::{
    CorrelationKey, Dimension, RowKeys, ShipClassEntry, ShipTypeEntry, TableId, format_number,
};

use crate::app::SettingsStore;
use crate::table::{Column, SortDirection, SortKey, TableSpec, data_table};

const PANEL_CLASS: &str = "text-ellipsis fix-eve-image-position";

const SHIP_CLASS_COLUMNS: &[Column<ShipClassEntry>] = &[
    Column::new(
        "Ship",
        |s: &ShipClassEntry, _: &ScanDataText| ship_info_panel(s),
        |s: &ShipClassEntry| s.name.clone(),
    )
    .sorted_by(|s: &ShipClassEntry| SortKey::text(&s.name))
    .class(PANEL_CLASS),
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
];

/// Structures, deployables and starbases: image, name and count.
const ITEM_COLUMNS: &[Column<ShipClassEntry>] = &[
    Column::new(
        "Name",
        |s: &ShipClassEntry, _: &ScanDataText| ship_info_panel(s),
        |s: &ShipClassEntry| s.name.clone(),
    )
    .sorted_by(|s: &ShipClassEntry| SortKey::text(&s.name))
    .class(PANEL_CLASS),
    Column::new(
        "Count",
        |s: &ShipClassEntry, _: &ScanDataText| s.count.to_string(),
        |s: &ShipClassEntry| s.count.to_string(),
    )
    .sorted_by(|s: &ShipClassEntry| SortKey::Number(s.count))
    .class("text-end")
    .width(35),
];

fn ship_class_keys(s: &ShipClassEntry) -> RowKeys {
    RowKeys::new()
        .with(CorrelationKey::ShipClass, s.id)
        .with(CorrelationKey::ShipType, s.type_id)
}

const fn ship_class_table(table: TableId, label: &'static str) -> TableSpec<ShipClassEntry> {
    TableSpec {
        table,
        label,
        dimension: Dimension::ShipClass,
        columns: SHIP_CLASS_COLUMNS,
        order: (1, SortDirection::Desc),
        row_keys: ship_class_keys,
    }
}

const fn item_table(
    table: TableId,
    label: &'static str,
    key: fn(&ShipClassEntry) -> RowKeys,
) -> TableSpec<ShipClassEntry> {
    TableSpec {
        table,
        label,
        dimension: Dimension::Item,
        columns: ITEM_COLUMNS,
        order: (1, SortDirection::Desc),
        row_keys: key,
    }
}

static SHIP_CLASSES_ALL: TableSpec<ShipClassEntry> =
    ship_class_table(TableId::ShipClassesAll, "all ship classes");
static SHIP_CLASSES_ONGRID: TableSpec<ShipClassEntry> =
    ship_class_table(TableId::ShipClassesOngrid, "on grid ship classes");
static SHIP_CLASSES_OFFGRID: TableSpec<ShipClassEntry> =
    ship_class_table(TableId::ShipClassesOffgrid, "off grid ship classes");

static SHIP_TYPES: TableSpec<ShipTypeEntry> = TableSpec {
    table: TableId::ShipTypes,
    label: "ship types",
    dimension: Dimension::ShipType,
    columns: &[
        Column::new(
            "Ship type",
            |t: &ShipTypeEntry, _: &ScanDataText| html_escape(&t.name),
            |t: &ShipTypeEntry| t.name.clone(),
        )
        .sorted_by(|t: &ShipTypeEntry| SortKey::text(&t.name))
        .class(PANEL_CLASS),
        Column::new(
            "Count",
            |t: &ShipTypeEntry, _: &ScanDataText| t.count.to_string(),
            |t: &ShipTypeEntry| t.count.to_string(),
        )
        .sorted_by(|t: &ShipTypeEntry| SortKey::Number(t.count))
        .class("text-end")
        .width(35),
    ],
    order: (1, SortDirection::Desc),
    row_keys: |t: &ShipTypeEntry| RowKeys::new().with(CorrelationKey::ShipType, t.id),
};

static UPWELL_STRUCTURES: TableSpec<ShipClassEntry> = item_table(
    TableId::UpwellStructures,
    "upwell structures",
    |s: &ShipClassEntry| RowKeys::new().with(CorrelationKey::StructureType, s.id),
);
static DEPLOYABLES: TableSpec<ShipClassEntry> = item_table(
    TableId::Deployables,
    "deployables",
    |s: &ShipClassEntry| RowKeys::new().with(CorrelationKey::DeployableType, s.id),
);
static STARBASES: TableSpec<ShipClassEntry> = item_table(
    TableId::Starbases,
    "starbases",
    |s: &ShipClassEntry| RowKeys::new().with(CorrelationKey::StarbaseType, s.id),
);

/// One ship-class section with its count and mass header.
#[component]
fn ShipClassSection(
    spec: &'static TableSpec<ShipClassEntry>,
    title: &'static str,
    url: Option<String>,
) -> impl IntoView {
    let SettingsStore(settings) = expect_context();
    let language = settings.with_value(|s| s.language.django.clone());
    let totals = RwSignal::new(SectionTotals::default());
    let slug = spec.table.section_slug();

    let count_language = language.clone();
    view! {
        <div class=format!("col-md-4 aa-intel-section-{slug}")>
            <h4>
                {title} " "
                <span class="badge bg-secondary" id=format!("aa-intel-dscan-{slug}-count")>
                    {move || format_number(totals.get().count, &count_language)}
                </span>
                " "
                <small class="text-muted">
                    <span id=format!("aa-intel-dscan-{slug}-mass")>
                        {move || format_number(totals.get().mass, &language)}
                    </span>
                    " kg"
                </small>
            </h4>
            <div class=format!("table-dscan-ship-classes-{slug}")>
                {data_table(spec, url, move |rows: &[ShipClassEntry]| {
                    totals.set(SectionTotals::of(rows));
                })}
            </div>
        </div>
    }
}

/// One hover-only section of things found on grid.
#[component]
fn ItemSection(
    spec: &'static TableSpec<ShipClassEntry>,
    title: &'static str,
    url: Option<String>,
    found: RwSignal<bool>,
) -> impl IntoView {
    let SettingsStore(settings) = expect_context();
    let language = settings.with_value(|s| s.language.django.clone());
    let total = RwSignal::new(0u64);
    let slug = spec.table.section_slug();

    view! {
        <div class=format!("col-md-4 col-aa-intel-{slug}")>
            <h4>
                {title} " "
                <span class="badge bg-secondary" id=format!("aa-intel-dscan-{slug}-count")>
                    {move || format_number(total.get(), &language)}
                </span>
            </h4>
            {data_table(spec, url, move |rows: &[ShipClassEntry]| {
                total.set(item_total(rows));
                if !rows.is_empty() {
                    found.set(true);
                }
            })}
        </div>
    }
}

/// Directional scan: ship classes (all, on grid, off grid), ship types, and
/// what else is on grid.
#[component]
pub fn DScan() -> impl IntoView {
    let SettingsStore(settings) = expect_context();
    let urls = settings.with_value(|s| s.url.clone());
    let interesting_on_grid = RwSignal::new(false);

    view! {
        <div class="aa-intel-dscan">
            <div class="row">
                <ShipClassSection spec=&SHIP_CLASSES_ALL title="All" url=urls.get_ship_classes_all.clone() />
                <ShipClassSection spec=&SHIP_CLASSES_ONGRID title="On grid" url=urls.get_ship_classes_ongrid.clone() />
                <ShipClassSection spec=&SHIP_CLASSES_OFFGRID title="Off grid" url=urls.get_ship_classes_offgrid.clone() />
            </div>
            <div class="row">
                <div class="col-md-4 aa-intel-section-ship-types">
                    <h4>"Ship types"</h4>
                    <div class="table-dscan-ship-types">
                        {data_table(&SHIP_TYPES, urls.get_ship_types.clone(), |_: &[ShipTypeEntry]| {})}
                    </div>
                </div>
            </div>
            <div
                class=move || if interesting_on_grid.get() { "row" } else { "row d-none" }
                id="aa-intel-dscan-row-interesting-on-grid"
            >
                <ItemSection spec=&UPWELL_STRUCTURES title="Upwell structures" url=urls.get_structures_on_grid.clone() found=interesting_on_grid />
                <ItemSection spec=&DEPLOYABLES title="Deployables" url=urls.get_deployables_on_grid.clone() found=interesting_on_grid />
                <ItemSection spec=&STARBASES title="Starbases" url=urls.get_starbases_on_grid.clone() found=interesting_on_grid />
            </div>
        </div>
    }
}
