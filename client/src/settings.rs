use aa_intel_shared::IntelSettings;

const SETTINGS_ELEMENT_ID: &str = "aa-intel-tool-settings";
const SETTINGS_OVERRIDE_ELEMENT_ID: &str = "aa-intel-tool-settings-override";

fn script_text(document: &web_sys::Document, id: &str) -> Option<String> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.text_content())
        .filter(|text| !text.trim().is_empty())
}

/// Read the settings blocks the host page embeds. Falls back to the built-in
/// defaults when the page has none or they fail to parse.
pub fn load() -> IntelSettings {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return IntelSettings::default();
    };

    let Some(defaults) = script_text(&document, SETTINGS_ELEMENT_ID) else {
        web_sys::console::warn_1(
            &format!("No #{SETTINGS_ELEMENT_ID} block on the page, using built-in settings").into(),
        );
        return IntelSettings::default();
    };
    let overrides = script_text(&document, SETTINGS_OVERRIDE_ELEMENT_ID);

    match IntelSettings::from_layers(&defaults, overrides.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            web_sys::console::error_1(&format!("AA Intel Tool: {e}").into());
            IntelSettings::default()
        }
    }
}
