use leptos::prelude::*;

use aa_intel_shared::correlation::{CHAT_SCAN, DSCAN, FLEET_COMPOSITION};
use aa_intel_shared::{CorrelationGraph, HighlightEngine, IntelSettings, ScanType};

use crate::chatscan::ChatScan;
use crate::clipboard;
use crate::dscan::DScan;
use crate::fleetcomp::FleetComposition;
use crate::highlight::Highlights;
use crate::settings;

/// Page settings, read once at start-up.
#[derive(Clone, Copy)]
pub(crate) struct SettingsStore(pub StoredValue<IntelSettings>);

fn graph_for(scan_type: ScanType) -> &'static CorrelationGraph {
    match scan_type {
        ScanType::Chatscan => &CHAT_SCAN,
        ScanType::Dscan => &DSCAN,
        ScanType::Fleetcomp => &FLEET_COMPOSITION,
    }
}

#[component]
pub fn App() -> impl IntoView {
    let settings = settings::load();
    let scan_type = settings.scan_type;
    let graph = graph_for(scan_type);

    web_sys::console::info_1(&format!("AA Intel Tool: rendering {} scan", graph.name).into());

    clipboard::bind_permalink_button(settings.translation.copy_to_clipboard.permalink.text.clone());

    provide_context(Highlights(RwSignal::new(HighlightEngine::new(graph))));
    provide_context(SettingsStore(StoredValue::new(settings)));

    match scan_type {
        ScanType::Chatscan => view! { <ChatScan /> }.into_any(),
        ScanType::Dscan => view! { <DScan /> }.into_any(),
        ScanType::Fleetcomp => view! { <FleetComposition /> }.into_any(),
    }
}

#[cfg(test)]
mod tests {
    use super::graph_for;
    use aa_intel_shared::ScanType;

    #[test]
    fn each_scan_type_has_its_graph() {
        assert_eq!(graph_for(ScanType::Chatscan).name, "chatscan");
        assert_eq!(graph_for(ScanType::Dscan).name, "dscan");
        assert_eq!(graph_for(ScanType::Fleetcomp).name, "fleetcomposition");
    }
}
