use leptos::prelude::*;
use wasm_bindgen::JsCast;

use aa_intel_shared::{ClickOutcome, Dimension, HighlightEngine, RowId, VisualState};

/// Shared view-model for every table on the page.
#[derive(Clone, Copy)]
pub(crate) struct Highlights(pub RwSignal<HighlightEngine>);

impl Highlights {
    pub fn state(self, row: RowId) -> VisualState {
        self.0.with(|engine| engine.state(row))
    }

    pub fn enter(self, dimension: Dimension, row: RowId) {
        self.0.update(|engine| engine.add_highlight(dimension, row));
    }

    pub fn leave(self, dimension: Dimension, row: RowId) {
        self.0.update(|engine| engine.remove_highlight(dimension, row));
    }

    /// Row click. Clicks on information links open the link and leave sticky
    /// state alone.
    pub fn click(self, dimension: Dimension, row: RowId, ev: &web_sys::MouseEvent) {
        let target_classes = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .map(|el| el.class_name())
            .unwrap_or_default();

        let mut outcome = ClickOutcome::Ignored;
        self.0.maybe_update(|engine| {
            outcome = engine.click(dimension, row, &target_classes);
            outcome == ClickOutcome::Toggled
        });
        if outcome == ClickOutcome::InformationLink {
            ev.stop_propagation();
        }
    }
}

/// `class` value of a row: its static classes plus the projected state.
pub(crate) fn row_class(static_classes: &str, state: VisualState) -> String {
    let projected = state.css_classes();
    if projected.is_empty() {
        static_classes.to_string()
    } else {
        format!("{static_classes} {projected}")
    }
}

#[cfg(test)]
mod tests {
    use super::row_class;
    use aa_intel_shared::VisualState;

    #[test]
    fn row_class_appends_projection() {
        let base = "aa-intel-pilot-participation-item aa-intel-character-id-7";
        assert_eq!(row_class(base, VisualState::default()), base);
        assert_eq!(
            row_class(
                base,
                VisualState {
                    highlighted: true,
                    sticky: true
                }
            ),
            "aa-intel-pilot-participation-item aa-intel-character-id-7 aa-intel-highlight aa-intel-highlight-sticky"
        );
    }
}
