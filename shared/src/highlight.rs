//! Cross-table highlight and sticky state.
//!
//! The engine is the single source of truth for the visual state of every
//! rendered row. The DOM only projects [`VisualState::css_classes`].

use std::collections::HashMap;

use crate::correlation::{CorrelationGraph, CorrelationKey, Dimension, Link, RowKeys, TableId};

pub const HIGHLIGHT_CLASS: &str = "aa-intel-highlight";
pub const STICKY_CLASS: &str = "aa-intel-highlight-sticky";
/// Clicks on elements with this class never toggle sticky state.
pub const INFORMATION_LINK_CLASS: &str = "aa-intel-information-link";

pub type RowId = usize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisualState {
    pub highlighted: bool,
    pub sticky: bool,
}

impl VisualState {
    pub const fn css_classes(self) -> &'static str {
        match (self.highlighted, self.sticky) {
            (false, false) => "",
            (true, false) => HIGHLIGHT_CLASS,
            (false, true) => STICKY_CLASS,
            (true, true) => "aa-intel-highlight aa-intel-highlight-sticky",
        }
    }
}

/// Whether a click whose target carries `target_classes` should toggle
/// the row's sticky state.
pub fn click_toggles_sticky(target_classes: &str) -> bool {
    !target_classes
        .split_ascii_whitespace()
        .any(|class| class == INFORMATION_LINK_CLASS)
}

/// What a row click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click landed on an information link. The caller stops propagation.
    InformationLink,
    /// The table is hover-only, nothing changed.
    Ignored,
    Toggled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    Highlight,
    Sticky,
}

#[derive(Debug, Clone)]
struct Row {
    table: TableId,
    keys: RowKeys,
    state: VisualState,
}

impl Row {
    fn flag(&self, flag: Flag) -> bool {
        match flag {
            Flag::Highlight => self.state.highlighted,
            Flag::Sticky => self.state.sticky,
        }
    }

    fn set(&mut self, flag: Flag, on: bool) {
        match flag {
            Flag::Highlight => self.state.highlighted = on,
            Flag::Sticky => self.state.sticky = on,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HighlightEngine {
    graph: &'static CorrelationGraph,
    rows: Vec<Row>,
    index: HashMap<(TableId, CorrelationKey, u64), Vec<RowId>>,
}

impl HighlightEngine {
    pub fn new(graph: &'static CorrelationGraph) -> Self {
        Self {
            graph,
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn graph(&self) -> &'static CorrelationGraph {
        self.graph
    }

    /// Register a freshly rendered row. Rows start with no flags set.
    pub fn insert_row(&mut self, table: TableId, keys: RowKeys) -> RowId {
        let id = self.rows.len();
        for (key, value) in keys.iter() {
            self.index.entry((table, key, value)).or_default().push(id);
        }
        self.rows.push(Row {
            table,
            keys,
            state: VisualState::default(),
        });
        id
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn state(&self, row: RowId) -> VisualState {
        self.rows.get(row).map(|r| r.state).unwrap_or_default()
    }

    pub fn table_of(&self, row: RowId) -> Option<TableId> {
        self.rows.get(row).map(|r| r.table)
    }

    /// Rows of `table` whose `key` equals `value`.
    pub fn rows_matching(&self, table: TableId, key: CorrelationKey, value: u64) -> &[RowId] {
        self.index
            .get(&(table, key, value))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn add_highlight(&mut self, dimension: Dimension, row: RowId) {
        self.apply(dimension, row, Flag::Highlight, true);
    }

    pub fn remove_highlight(&mut self, dimension: Dimension, row: RowId) {
        self.apply(dimension, row, Flag::Highlight, false);
    }

    pub fn add_sticky(&mut self, dimension: Dimension, row: RowId) {
        if !self.graph.sticky_enabled(dimension) {
            return;
        }
        self.apply(dimension, row, Flag::Sticky, true);
    }

    /// Clear sticky from `row` and its correlated rows.
    ///
    /// Unguarded links are cleared first. Guarded links are then evaluated in
    /// declaration order, each one only cleared when none of its witness rows
    /// sharing the key is still sticky.
    pub fn remove_sticky(&mut self, dimension: Dimension, row: RowId) {
        let graph = self.graph;
        let Some(rule) = graph.rule(dimension) else {
            return;
        };
        let Some(trigger) = self.rows.get_mut(row) else {
            return;
        };
        trigger.set(Flag::Sticky, false);

        for link in rule.links.iter().filter(|link| !link.is_guarded()) {
            self.set_linked(row, link, Flag::Sticky, false);
        }

        for link in rule.links.iter().filter(|link| link.is_guarded()) {
            let Some(value) = self.rows[row].keys.get(link.key) else {
                continue;
            };
            if self.any_sticky(link.witnesses, link.key, value, None) {
                continue;
            }
            self.set_linked(row, link, Flag::Sticky, false);
        }
    }

    /// Click handling: release a sticky row, or make a row sticky.
    ///
    /// A sticky row of a saturating dimension whose finer rows were partially
    /// released re-applies sticky instead of clearing.
    pub fn toggle_sticky(&mut self, dimension: Dimension, row: RowId) {
        let graph = self.graph;
        let Some(rule) = graph.rule(dimension) else {
            return;
        };
        let Some(current) = self.rows.get(row) else {
            return;
        };

        if !current.state.sticky {
            self.add_sticky(dimension, row);
            return;
        }

        let saturated = match rule.saturation {
            Some(saturation) => match current.keys.get(saturation.key) {
                Some(value) => {
                    self.all_sticky(saturation.witnesses, saturation.key, value, Some(row))
                }
                None => true,
            },
            None => true,
        };

        if saturated {
            self.remove_sticky(dimension, row);
        } else {
            self.add_sticky(dimension, row);
        }
    }

    /// A click on `row` whose target element carries `target_classes`.
    pub fn click(&mut self, dimension: Dimension, row: RowId, target_classes: &str) -> ClickOutcome {
        if !click_toggles_sticky(target_classes) {
            return ClickOutcome::InformationLink;
        }
        if !self.graph.sticky_enabled(dimension) {
            return ClickOutcome::Ignored;
        }
        self.toggle_sticky(dimension, row);
        ClickOutcome::Toggled
    }

    fn apply(&mut self, dimension: Dimension, row: RowId, flag: Flag, on: bool) {
        let Some(trigger) = self.rows.get_mut(row) else {
            return;
        };
        trigger.set(flag, on);

        let graph = self.graph;
        let Some(rule) = graph.rule(dimension) else {
            return;
        };
        for link in rule.links {
            self.set_linked(row, link, flag, on);
        }
    }

    fn set_linked(&mut self, row: RowId, link: &Link, flag: Flag, on: bool) {
        let Some(value) = self.rows[row].keys.get(link.key) else {
            return;
        };
        let Some(targets) = self.index.get(&(link.table, link.key, value)) else {
            return;
        };
        for &target in targets {
            self.rows[target].set(flag, on);
        }
    }

    fn witness_rows<'a>(
        &'a self,
        tables: &'a [TableId],
        key: CorrelationKey,
        value: u64,
        exclude: Option<RowId>,
    ) -> impl Iterator<Item = &'a Row> + 'a {
        tables
            .iter()
            .flat_map(move |&table| self.rows_matching(table, key, value).iter().copied())
            .filter(move |&id| Some(id) != exclude)
            .map(move |id| &self.rows[id])
    }

    fn any_sticky(
        &self,
        tables: &[TableId],
        key: CorrelationKey,
        value: u64,
        exclude: Option<RowId>,
    ) -> bool {
        self.witness_rows(tables, key, value, exclude)
            .any(|row| row.flag(Flag::Sticky))
    }

    fn all_sticky(
        &self,
        tables: &[TableId],
        key: CorrelationKey,
        value: u64,
        exclude: Option<RowId>,
    ) -> bool {
        self.witness_rows(tables, key, value, exclude)
            .all(|row| row.flag(Flag::Sticky))
    }
}
