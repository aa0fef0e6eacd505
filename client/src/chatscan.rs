use leptos::prelude::*;

use aa_intel_shared::panels::{
    alliance_info_panel, corporation_info_panel, html_escape, pilot_info_panel,
};
use aa_intel_shared::settings::ScanDataText;
use aa_intel_shared::totals::alliance_total;
use aa_intel_shared::{
    AllianceInfo, CorporationInfo, CorrelationKey, Dimension, PilotInfo, RowKeys, TableId,
    format_number,
};

use crate::app::SettingsStore;
use crate::table::{Column, SortDirection, SortKey, TableSpec, data_table};

const PANEL_CLASS: &str = "text-ellipsis fix-eve-image-position";

static ALLIANCES: TableSpec<AllianceInfo> = TableSpec {
    table: TableId::Alliances,
    label: "alliance list",
    dimension: Dimension::Alliance,
    columns: &[
        Column::new(
            "Alliance",
            |a: &AllianceInfo, text: &ScanDataText| alliance_info_panel(a, false, text),
            |a: &AllianceInfo| a.name.clone(),
        )
        .sorted_by(|a: &AllianceInfo| SortKey::text(&a.name))
        .class(PANEL_CLASS),
        Column::new(
            "Pilots",
            |a: &AllianceInfo, _: &ScanDataText| a.count.to_string(),
            |a: &AllianceInfo| a.count.to_string(),
        )
        .sorted_by(|a: &AllianceInfo| SortKey::Number(a.count))
        .class("text-end")
        .width(35),
        Column::new(
            "Ticker",
            |a: &AllianceInfo, _: &ScanDataText| a.ticker.clone(),
            |a: &AllianceInfo| a.ticker.clone(),
        )
        .hidden(),
    ],
    order: (1, SortDirection::Desc),
    row_keys: |a: &AllianceInfo| RowKeys::new().with(CorrelationKey::Alliance, a.id),
};

static CORPORATIONS: TableSpec<CorporationInfo> = TableSpec {
    table: TableId::Corporations,
    label: "corporation list",
    dimension: Dimension::Corporation,
    columns: &[
        Column::new(
            "Corporation",
            |c: &CorporationInfo, text: &ScanDataText| corporation_info_panel(c, false, text),
            |c: &CorporationInfo| c.name.clone(),
        )
        .sorted_by(|c: &CorporationInfo| SortKey::text(&c.name))
        .class(PANEL_CLASS),
        Column::new(
            "Pilots",
            |c: &CorporationInfo, _: &ScanDataText| c.count.to_string(),
            |c: &CorporationInfo| c.count.to_string(),
        )
        .sorted_by(|c: &CorporationInfo| SortKey::Number(c.count))
        .class("text-end")
        .width(35),
        Column::new(
            "Ticker",
            |c: &CorporationInfo, _: &ScanDataText| c.ticker.clone(),
            |c: &CorporationInfo| c.ticker.clone(),
        )
        .hidden(),
        Column::new(
            "Alliance",
            |c: &CorporationInfo, _: &ScanDataText| c.alliance.name.clone(),
            |c: &CorporationInfo| c.alliance.name.clone(),
        )
        .hidden(),
        Column::new(
            "Alliance ticker",
            |c: &CorporationInfo, _: &ScanDataText| c.alliance.ticker.clone(),
            |c: &CorporationInfo| c.alliance.ticker.clone(),
        )
        .hidden(),
    ],
    order: (1, SortDirection::Desc),
    row_keys: |c: &CorporationInfo| {
        RowKeys::new()
            .with(CorrelationKey::Corporation, c.id)
            .with(CorrelationKey::Alliance, c.alliance.id)
    },
};

static PILOTS: TableSpec<PilotInfo> = TableSpec {
    table: TableId::Pilots,
    label: "pilot list",
    dimension: Dimension::Pilot,
    columns: &[
        Column::new(
            "Pilot",
            |p: &PilotInfo, _: &ScanDataText| pilot_info_panel(p),
            |p: &PilotInfo| p.name.clone(),
        )
        .sorted_by(|p: &PilotInfo| SortKey::text(&p.name))
        .class(PANEL_CLASS),
        Column::new(
            "Alliance",
            |p: &PilotInfo, text: &ScanDataText| {
                alliance_info_panel(&p.alliance, true, text)
                    + &html_escape(&p.alliance.ticker)
            },
            |p: &PilotInfo| p.alliance.ticker.clone(),
        )
        .sorted_by(|p: &PilotInfo| SortKey::text(&p.alliance.ticker))
        .width(125),
        Column::new(
            "Corporation",
            |p: &PilotInfo, text: &ScanDataText| {
                corporation_info_panel(&p.corporation, true, text)
                    + &html_escape(&p.corporation.ticker)
            },
            |p: &PilotInfo| p.corporation.ticker.clone(),
        )
        .sorted_by(|p: &PilotInfo| SortKey::text(&p.corporation.ticker))
        .width(125),
        Column::new(
            "Alliance name",
            |p: &PilotInfo, _: &ScanDataText| p.alliance.name.clone(),
            |p: &PilotInfo| p.alliance.name.clone(),
        )
        .hidden(),
        Column::new(
            "Corporation name",
            |p: &PilotInfo, _: &ScanDataText| p.corporation.name.clone(),
            |p: &PilotInfo| p.corporation.name.clone(),
        )
        .hidden(),
    ],
    order: (0, SortDirection::Asc),
    row_keys: |p: &PilotInfo| {
        RowKeys::new()
            .with(CorrelationKey::Character, p.id)
            .with(CorrelationKey::Corporation, p.corporation.id)
            .with(CorrelationKey::Alliance, p.alliance.id)
    },
};

/// Local chat scan: alliances, corporations and pilots side by side.
#[component]
pub fn ChatScan() -> impl IntoView {
    let SettingsStore(settings) = expect_context();
    let (urls, language) = settings.with_value(|s| (s.url.clone(), s.language.django.clone()));

    let alliances = RwSignal::new(0u64);
    let corporations = RwSignal::new(0u64);
    let pilots = RwSignal::new(0u64);
    let count = move |signal: RwSignal<u64>| {
        let language = language.clone();
        move || format_number(signal.get(), &language)
    };

    view! {
        <div class="aa-intel-chatscan row">
            <div class="col-md-4 aa-intel-section-alliances">
                <h4>
                    "Alliances "
                    <span class="badge bg-secondary" id="aa-intel-alliances-count">{count(alliances)}</span>
                </h4>
                <div class="table-local-scan-alliances">
                    {data_table(&ALLIANCES, urls.get_alliance_list.clone(), move |rows: &[AllianceInfo]| {
                        alliances.set(alliance_total(rows) as u64);
                    })}
                </div>
            </div>
            <div class="col-md-4 aa-intel-section-corporations">
                <h4>
                    "Corporations "
                    <span class="badge bg-secondary" id="aa-intel-corporations-count">{count(corporations)}</span>
                </h4>
                <div class="table-local-scan-corporations">
                    {data_table(&CORPORATIONS, urls.get_corporation_list.clone(), move |rows: &[CorporationInfo]| {
                        corporations.set(rows.len() as u64);
                    })}
                </div>
            </div>
            <div class="col-md-4 aa-intel-section-pilots">
                <h4>
                    "Pilots "
                    <span class="badge bg-secondary" id="aa-intel-pilots-count">{count(pilots)}</span>
                </h4>
                <div class="table-local-scan-pilots">
                    {data_table(&PILOTS, urls.get_pilot_list.clone(), move |rows: &[PilotInfo]| {
                        pilots.set(rows.len() as u64);
                    })}
                </div>
            </div>
        </div>
    }
}
