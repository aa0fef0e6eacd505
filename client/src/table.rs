//! Sortable, filterable tables bound to the highlight engine.
//!
//! Each table is described by a static [`TableSpec`]. The table fetches its
//! section, shows a loading panel while the request is in flight and an empty
//! panel when there is nothing to show, then registers every row with the
//! engine and renders it.

use std::cmp::Ordering;
use std::sync::Arc;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use wasm_bindgen_futures::spawn_local;

use aa_intel_shared::settings::{DataTablesText, ScanDataText};
use aa_intel_shared::{CorrelationKey, Dimension, RowId, RowKeys, TableId, format_number};

use crate::app::SettingsStore;
use crate::fetch;
use crate::highlight::{Highlights, row_class};
use crate::tooltip;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    Number(u64),
    Text(String),
}

impl SortKey {
    pub fn text(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

pub type CellFn<T> = fn(&T, &ScanDataText) -> String;
pub type TextFn<T> = fn(&T) -> String;
pub type SortFn<T> = fn(&T) -> SortKey;

pub struct Column<T> {
    pub title: &'static str,
    /// Cell markup, inserted as-is.
    pub cell: CellFn<T>,
    /// Plain text the filter matches against. Hidden columns are searched too.
    pub search: TextFn<T>,
    pub sort: Option<SortFn<T>>,
    pub class: &'static str,
    pub width: Option<u32>,
    pub visible: bool,
}

impl<T> Column<T> {
    pub const fn new(title: &'static str, cell: CellFn<T>, search: TextFn<T>) -> Self {
        Self {
            title,
            cell,
            search,
            sort: None,
            class: "",
            width: None,
            visible: true,
        }
    }

    pub const fn sorted_by(mut self, sort: SortFn<T>) -> Self {
        self.sort = Some(sort);
        self
    }

    pub const fn class(mut self, class: &'static str) -> Self {
        self.class = class;
        self
    }

    pub const fn width(mut self, px: u32) -> Self {
        self.width = Some(px);
        self
    }

    pub const fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

pub struct TableSpec<T: 'static> {
    pub table: TableId,
    /// Name used in log messages.
    pub label: &'static str,
    pub dimension: Dimension,
    pub columns: &'static [Column<T>],
    pub order: (usize, SortDirection),
    pub row_keys: fn(&T) -> RowKeys,
}

/// Indices of the records that match `query`, in display order.
///
/// Every whitespace-separated term of the query must appear (case-insensitive)
/// in the searchable text of some column. Sorting is stable.
pub fn visible_rows<T>(
    records: &[T],
    columns: &[Column<T>],
    order: (usize, SortDirection),
    query: &str,
) -> Vec<usize> {
    let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();

    let mut shown: Vec<usize> = (0..records.len())
        .filter(|&i| {
            if terms.is_empty() {
                return true;
            }
            let haystack = columns
                .iter()
                .map(|column| (column.search)(&records[i]))
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase();
            terms.iter().all(|term| haystack.contains(term.as_str()))
        })
        .collect();

    let (column, direction) = order;
    if let Some(sort) = columns.get(column).and_then(|c| c.sort) {
        shown.sort_by(|&a, &b| {
            let ord = sort(&records[a]).cmp(&sort(&records[b]));
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
    }

    shown
}

/// Clicking a header sorts by it ascending; clicking it again flips direction.
pub fn next_order(current: (usize, SortDirection), clicked: usize) -> (usize, SortDirection) {
    match current {
        (column, SortDirection::Asc) if column == clicked => (clicked, SortDirection::Desc),
        (column, SortDirection::Desc) if column == clicked => (clicked, SortDirection::Asc),
        _ => (clicked, SortDirection::Asc),
    }
}

fn header_class(sortable: bool, index: usize, order: (usize, SortDirection)) -> &'static str {
    match (sortable, order) {
        (false, _) => "",
        (true, (column, SortDirection::Asc)) if column == index => "sorting sorting_asc",
        (true, (column, SortDirection::Desc)) if column == index => "sorting sorting_desc",
        (true, _) => "sorting",
    }
}

fn fill(template: &str, start: &str, end: &str, total: &str, max: &str) -> String {
    template
        .replace("_START_", start)
        .replace("_END_", end)
        .replace("_TOTAL_", total)
        .replace("_MAX_", max)
}

/// The hovered row, if filtering just took it out of `shown`. Such a row never
/// gets its `mouseleave`, so its highlight has to be released by hand.
pub fn hover_dropped(hovered: Option<RowId>, ids: &[RowId], shown: &[usize]) -> Option<RowId> {
    let row = hovered?;
    if shown.iter().any(|&i| ids.get(i) == Some(&row)) {
        None
    } else {
        Some(row)
    }
}

/// Summary line under a table.
pub fn info_line(text: &DataTablesText, shown: usize, total: usize, language: &str) -> String {
    let max = format_number(total as u64, language);
    let mut line = if shown == 0 {
        fill(&text.info_empty, "0", "0", "0", &max)
    } else {
        let count = format_number(shown as u64, language);
        fill(&text.info, &format_number(1, language), &count, &count, &max)
    };

    if shown != total {
        line.push(' ');
        line.push_str(&fill(&text.info_filtered, "", "", "", &max));
    }
    line
}

enum Section<T> {
    Loading,
    Empty,
    Ready {
        records: Arc<[T]>,
        ids: Arc<[RowId]>,
    },
}

impl<T> Clone for Section<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Loading => Self::Loading,
            Self::Empty => Self::Empty,
            Self::Ready { records, ids } => Self::Ready {
                records: Arc::clone(records),
                ids: Arc::clone(ids),
            },
        }
    }
}

/// Fetch `url` and render the section described by `spec`.
///
/// `on_loaded` receives the records once they arrive, for header totals.
pub fn data_table<T>(
    spec: &'static TableSpec<T>,
    url: Option<String>,
    on_loaded: impl Fn(&[T]) + 'static,
) -> impl IntoView
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    let highlights: Highlights = expect_context();
    let SettingsStore(settings) = expect_context();
    let (text, scan_text, language, timeout_ms) = settings.with_value(|s| {
        (
            s.language.data_tables.clone(),
            s.translation.scan_data.clone(),
            s.language.django.clone(),
            s.fetch_timeout_ms,
        )
    });

    let section: RwSignal<Section<T>> = RwSignal::new(Section::Loading);

    match url {
        Some(url) => spawn_local(async move {
            let Some(rows) = fetch::fetch_section::<T>(spec.label, &url, timeout_ms).await else {
                section.set(Section::Empty);
                return;
            };
            on_loaded(&rows);
            if rows.is_empty() {
                section.set(Section::Empty);
                return;
            }

            let mut ids = Vec::with_capacity(rows.len());
            highlights.0.update(|engine| {
                for row in &rows {
                    ids.push(engine.insert_row(spec.table, (spec.row_keys)(row)));
                }
            });
            section.set(Section::Ready {
                records: rows.into(),
                ids: ids.into(),
            });
            Timeout::new(0, move || tooltip::init(spec.table.table_class())).forget();
        }),
        None => {
            web_sys::console::info_1(&format!("No URL configured for {}", spec.label).into());
            section.set(Section::Empty);
        }
    }

    let slug = spec.table.section_slug();
    move || match section.get() {
        Section::Loading => view! {
            <div class=format!("aa-intel-loading-table-info aa-intel-loading-table-info-{slug}")>
                {text.loading.clone()}
            </div>
        }
        .into_any(),
        Section::Empty => view! {
            <div class=format!("aa-intel-empty-table-info aa-intel-empty-table-info-{slug}")>
                {text.empty_table.clone()}
            </div>
        }
        .into_any(),
        Section::Ready { records, ids } => ready_table(
            spec,
            records,
            ids,
            highlights,
            text.clone(),
            scan_text.clone(),
            language.clone(),
        )
        .into_any(),
    }
}

fn ready_table<T>(
    spec: &'static TableSpec<T>,
    records: Arc<[T]>,
    ids: Arc<[RowId]>,
    highlights: Highlights,
    text: DataTablesText,
    scan_text: ScanDataText,
    language: String,
) -> impl IntoView
where
    T: Send + Sync + 'static,
{
    let order = RwSignal::new(spec.order);
    let query = RwSignal::new(String::new());
    let total = records.len();
    let shown = {
        let records = Arc::clone(&records);
        Memo::new(move |_| query.with(|q| visible_rows(&records, spec.columns, order.get(), q)))
    };

    let headers = spec
        .columns
        .iter()
        .enumerate()
        .filter(|(_, column)| column.visible)
        .map(|(index, column)| {
            let sortable = column.sort.is_some();
            view! {
                <th
                    class=move || header_class(sortable, index, order.get())
                    style=column.width.map(|px| format!("width: {px}px;"))
                    on:click=move |_| {
                        if sortable {
                            order.update(|o| *o = next_order(*o, index));
                        }
                    }
                >
                    {column.title}
                </th>
            }
        })
        .collect_view();

    let hovered = StoredValue::new(None::<RowId>);
    {
        let ids = Arc::clone(&ids);
        Effect::new(move |_| {
            let released = shown.with(|shown| hover_dropped(hovered.get_value(), &ids, shown));
            if let Some(row) = released {
                hovered.set_value(None);
                highlights.leave(spec.dimension, row);
            }
        });
    }

    let visible_columns = spec.columns.iter().filter(|c| c.visible).count();
    let zero_records = text.zero_records.clone();
    let body = move || {
        let shown = shown.get();
        if shown.is_empty() {
            return view! {
                <tr>
                    <td class="dataTables_empty" colspan=visible_columns.to_string()>
                        {zero_records.clone()}
                    </td>
                </tr>
            }
            .into_any();
        }
        shown
            .into_iter()
            .map(|i| table_row(spec, &records[i], ids[i], highlights, hovered, &scan_text))
            .collect_view()
            .into_any()
    };

    let search_label = text.search.clone();
    view! {
        <div class="aa-intel-table-wrapper">
            <div class="row">
                <div class="col-sm-12">
                    <div class="dataTables_filter">
                        <label>
                            {search_label}
                            " "
                            <input
                                type="search"
                                class="form-control form-control-sm"
                                prop:value=move || query.get()
                                on:input=move |ev| query.set(event_target_value(&ev))
                            />
                        </label>
                    </div>
                </div>
            </div>
            <div class="row">
                <div class="col-sm-12">
                    <table class=format!("table table-striped table-sm w-100 {}", spec.table.table_class())>
                        <thead>
                            <tr>{headers}</tr>
                        </thead>
                        <tbody>{body}</tbody>
                    </table>
                </div>
            </div>
            <div class="row">
                <div class="col-sm-12">
                    <div class="dataTables_info">
                        {move || info_line(&text, shown.with(Vec::len), total, &language)}
                    </div>
                </div>
            </div>
        </div>
    }
}

fn table_row<T: 'static>(
    spec: &'static TableSpec<T>,
    record: &T,
    id: RowId,
    highlights: Highlights,
    hovered: StoredValue<Option<RowId>>,
    scan_text: &ScanDataText,
) -> impl IntoView + use<T> {
    let keys = (spec.row_keys)(record);
    let static_classes = format!("{} {}", spec.table.row_class(), keys.id_classes());
    let attr = |key: CorrelationKey| keys.get(key).map(|value| value.to_string());
    let dimension = spec.dimension;

    let cells = spec
        .columns
        .iter()
        .filter(|column| column.visible)
        .map(|column| {
            let html = (column.cell)(record, scan_text);
            view! { <td class=column.class inner_html=html /> }
        })
        .collect_view();

    view! {
        <tr
            class=move || row_class(&static_classes, highlights.state(id))
            data-alliance-id=attr(CorrelationKey::Alliance)
            data-corporation-id=attr(CorrelationKey::Corporation)
            data-character-id=attr(CorrelationKey::Character)
            data-shiptype-id=attr(CorrelationKey::ShipType)
            data-shipclass-id=attr(CorrelationKey::ShipClass)
            data-structuretype-id=attr(CorrelationKey::StructureType)
            data-deployabletype-id=attr(CorrelationKey::DeployableType)
            data-starbasetype-id=attr(CorrelationKey::StarbaseType)
            on:mouseenter=move |_| {
                hovered.set_value(Some(id));
                highlights.enter(dimension, id);
            }
            on:mouseleave=move |_| {
                hovered.set_value(None);
                highlights.leave(dimension, id);
            }
            on:click=move |ev| highlights.click(dimension, id, &ev)
        >
            {cells}
        </tr>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pilot {
        name: &'static str,
        corporation: &'static str,
        count: u64,
    }

    const COLUMNS: &[Column<Pilot>] = &[
        Column::new(
            "Pilot",
            |p: &Pilot, _: &ScanDataText| p.name.to_string(),
            |p: &Pilot| p.name.to_string(),
        )
        .sorted_by(|p: &Pilot| SortKey::text(p.name)),
        Column::new(
            "Count",
            |p: &Pilot, _: &ScanDataText| p.count.to_string(),
            |p: &Pilot| p.count.to_string(),
        )
        .sorted_by(|p: &Pilot| SortKey::Number(p.count))
        .class("text-end"),
        Column::new(
            "Corporation",
            |p: &Pilot, _: &ScanDataText| p.corporation.to_string(),
            |p: &Pilot| p.corporation.to_string(),
        )
        .hidden(),
    ];

    fn pilots() -> Vec<Pilot> {
        vec![
            Pilot {
                name: "charlie",
                corporation: "Rabbits Rising",
                count: 3,
            },
            Pilot {
                name: "Alpha",
                corporation: "Brave Newbies",
                count: 10,
            },
            Pilot {
                name: "bravo",
                corporation: "Rabbits Rising",
                count: 3,
            },
        ]
    }

    #[test]
    fn sorts_text_case_insensitively() {
        let rows = pilots();
        assert_eq!(
            visible_rows(&rows, COLUMNS, (0, SortDirection::Asc), ""),
            vec![1, 2, 0]
        );
        assert_eq!(
            visible_rows(&rows, COLUMNS, (0, SortDirection::Desc), ""),
            vec![0, 2, 1]
        );
    }

    #[test]
    fn numeric_sort_is_stable_for_ties() {
        let rows = pilots();
        assert_eq!(
            visible_rows(&rows, COLUMNS, (1, SortDirection::Desc), ""),
            vec![1, 0, 2]
        );
        assert_eq!(
            visible_rows(&rows, COLUMNS, (1, SortDirection::Asc), ""),
            vec![0, 2, 1]
        );
    }

    #[test]
    fn filter_matches_every_term_including_hidden_columns() {
        let rows = pilots();
        assert_eq!(
            visible_rows(&rows, COLUMNS, (0, SortDirection::Asc), "rabbits"),
            vec![2, 0]
        );
        assert_eq!(
            visible_rows(&rows, COLUMNS, (0, SortDirection::Asc), "RABBITS charlie"),
            vec![0]
        );
        assert!(visible_rows(&rows, COLUMNS, (0, SortDirection::Asc), "goons").is_empty());
    }

    #[test]
    fn unsortable_or_unknown_column_keeps_input_order() {
        let rows = pilots();
        assert_eq!(
            visible_rows(&rows, COLUMNS, (2, SortDirection::Asc), ""),
            vec![0, 1, 2]
        );
        assert_eq!(
            visible_rows(&rows, COLUMNS, (9, SortDirection::Desc), ""),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn header_clicks_cycle_direction() {
        assert_eq!(
            next_order((1, SortDirection::Desc), 1),
            (1, SortDirection::Asc)
        );
        assert_eq!(
            next_order((1, SortDirection::Asc), 1),
            (1, SortDirection::Desc)
        );
        assert_eq!(
            next_order((1, SortDirection::Desc), 0),
            (0, SortDirection::Asc)
        );
        assert_eq!(header_class(true, 1, (1, SortDirection::Desc)), "sorting sorting_desc");
        assert_eq!(header_class(true, 0, (1, SortDirection::Desc)), "sorting");
        assert_eq!(header_class(false, 1, (1, SortDirection::Desc)), "");
    }

    #[test]
    fn info_line_fills_placeholders() {
        let text = DataTablesText::default();
        assert_eq!(info_line(&text, 3, 3, "en"), "Showing 1 to 3 of 3 entries");
        assert_eq!(
            info_line(&text, 2, 1500, "en"),
            "Showing 1 to 2 of 2 entries (filtered from 1,500 total entries)"
        );
        assert_eq!(
            info_line(&text, 0, 4, "de"),
            "Showing 0 to 0 of 0 entries (filtered from 4 total entries)"
        );
        assert_eq!(info_line(&text, 0, 0, "en"), "Showing 0 to 0 of 0 entries");
    }

    #[test]
    fn filtered_out_hover_is_released() {
        let ids = [10, 11, 12];
        assert_eq!(hover_dropped(Some(11), &ids, &[0, 2]), Some(11));
        assert_eq!(hover_dropped(Some(11), &ids, &[1]), None);
        assert_eq!(hover_dropped(Some(11), &ids, &[]), Some(11));
        assert_eq!(hover_dropped(None, &ids, &[]), None);
    }

    #[test]
    fn mixed_sort_keys_order_numbers_first() {
        assert!(SortKey::Number(99) < SortKey::text("a"));
        assert!(SortKey::text("Brave") > SortKey::text("alpha"));
        assert_eq!(SortKey::Number(3).cmp(&SortKey::Number(3)), Ordering::Equal);
    }
}
