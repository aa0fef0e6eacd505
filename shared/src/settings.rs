//! Page-provided configuration.
//!
//! The host page ships a JSON block with defaults and may add a second block
//! that overrides parts of it. Both layers are merged before deserializing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_FETCH_TIMEOUT_MS: u32 = 30_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanType {
    #[default]
    Chatscan,
    Dscan,
    Fleetcomp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IntelSettings {
    pub scan_type: ScanType,
    pub language: LanguageSettings,
    pub url: SectionUrls,
    pub fetch_timeout_ms: u32,
    pub translation: Translation,
}

impl Default for IntelSettings {
    fn default() -> Self {
        Self {
            scan_type: ScanType::default(),
            language: LanguageSettings::default(),
            url: SectionUrls::default(),
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            translation: Translation::default(),
        }
    }
}

impl IntelSettings {
    /// Build settings from the page's default block and an optional override block.
    pub fn from_layers(defaults: &str, overrides: Option<&str>) -> Result<Self, String> {
        let mut merged: Value =
            serde_json::from_str(defaults).map_err(|e| format!("invalid settings: {e}"))?;
        if let Some(overrides) = overrides {
            let layer: Value = serde_json::from_str(overrides)
                .map_err(|e| format!("invalid settings override: {e}"))?;
            merge_layers(&mut merged, layer);
        }

        serde_json::from_value(merged).map_err(|e| format!("settings do not match schema: {e}"))
    }
}

/// Deep-merge `layer` into `base`: objects merge key by key, everything else
/// in `layer` replaces what is in `base`.
pub fn merge_layers(base: &mut Value, layer: Value) {
    match (base, layer) {
        (Value::Object(base_map), Value::Object(layer_map)) => {
            for (key, value) in layer_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_layers(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, layer) => *base = layer,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageSettings {
    /// Active Django language code, used for number formatting.
    pub django: String,
    #[serde(rename = "dataTables")]
    pub data_tables: DataTablesText,
}

impl Default for LanguageSettings {
    fn default() -> Self {
        Self {
            django: "en".to_string(),
            data_tables: DataTablesText::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SectionUrls {
    pub get_alliance_list: Option<String>,
    pub get_corporation_list: Option<String>,
    pub get_pilot_list: Option<String>,
    pub get_ship_classes_all: Option<String>,
    pub get_ship_classes_ongrid: Option<String>,
    pub get_ship_classes_offgrid: Option<String>,
    pub get_ship_types: Option<String>,
    pub get_structures_on_grid: Option<String>,
    pub get_deployables_on_grid: Option<String>,
    pub get_starbases_on_grid: Option<String>,
    pub get_ship_classes: Option<String>,
    pub get_fleet_composition: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Translation {
    pub scan_data: ScanDataText,
    pub copy_to_clipboard: CopyToClipboardText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScanDataText {
    pub npc_corp: String,
    pub unaffiliated: String,
    pub no_alliance: String,
}

impl Default for ScanDataText {
    fn default() -> Self {
        Self {
            npc_corp: "NPC Corp".to_string(),
            unaffiliated: "Unaffiliated".to_string(),
            no_alliance: "No Alliance".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyToClipboardText {
    pub permalink: PermalinkText,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PermalinkText {
    pub text: OutcomeText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutcomeText {
    pub success: String,
    pub error: String,
}

impl Default for OutcomeText {
    fn default() -> Self {
        Self {
            success: "Permalink copied to your clipboard.".to_string(),
            error: "Something went wrong. Nothing copied. Maybe your browser doesn't support this function.".to_string(),
        }
    }
}

/// Table widget strings, using the `_START_`, `_END_`, `_TOTAL_` and `_MAX_`
/// placeholders, as DataTables writes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DataTablesText {
    pub search: String,
    pub info: String,
    pub info_empty: String,
    pub info_filtered: String,
    pub zero_records: String,
    pub empty_table: String,
    #[serde(alias = "loadingRecords")]
    pub loading: String,
}

impl Default for DataTablesText {
    fn default() -> Self {
        Self {
            search: "Search:".to_string(),
            info: "Showing _START_ to _END_ of _TOTAL_ entries".to_string(),
            info_empty: "Showing 0 to 0 of 0 entries".to_string(),
            info_filtered: "(filtered from _MAX_ total entries)".to_string(),
            zero_records: "No matching records found".to_string(),
            empty_table: "No data available in table".to_string(),
            loading: "Loading …".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_replaces_leaves_and_keeps_siblings() {
        let mut base = json!({
            "language": { "django": "en" },
            "url": { "getPilotList": "/a", "getAllianceList": "/b" },
            "list": [1, 2, 3]
        });
        merge_layers(
            &mut base,
            json!({
                "url": { "getPilotList": "/override" },
                "list": [9],
                "extra": true
            }),
        );

        assert_eq!(
            base,
            json!({
                "language": { "django": "en" },
                "url": { "getPilotList": "/override", "getAllianceList": "/b" },
                "list": [9],
                "extra": true
            })
        );
    }

    #[test]
    fn layers_deserialize_into_settings() {
        let defaults = json!({
            "scanType": "dscan",
            "language": { "django": "de" },
            "url": {
                "getShipClassesAll": "/intel/-/ajax/get-scan-data/abc/shiplist/",
                "getShipTypes": "/intel/-/ajax/get-scan-data/abc/shiptypes/"
            },
            "translation": { "scanData": { "npcCorp": "NPC-Corp" } }
        })
        .to_string();
        let overrides = json!({ "fetchTimeoutMs": 5000 }).to_string();

        let settings = IntelSettings::from_layers(&defaults, Some(&overrides)).unwrap();

        assert_eq!(settings.scan_type, ScanType::Dscan);
        assert_eq!(settings.language.django, "de");
        assert_eq!(settings.fetch_timeout_ms, 5000);
        assert_eq!(
            settings.url.get_ship_types.as_deref(),
            Some("/intel/-/ajax/get-scan-data/abc/shiptypes/")
        );
        assert_eq!(settings.url.get_pilot_list, None);
        assert_eq!(settings.translation.scan_data.npc_corp, "NPC-Corp");
        assert_eq!(settings.translation.scan_data.unaffiliated, "Unaffiliated");
    }

    #[test]
    fn table_strings_come_from_language_block() {
        let defaults = json!({
            "language": {
                "django": "de",
                "dataTables": {
                    "search": "Suche:",
                    "zeroRecords": "Keine passenden Einträge gefunden",
                    "loadingRecords": "Wird geladen …"
                }
            }
        })
        .to_string();

        let settings = IntelSettings::from_layers(&defaults, None).unwrap();
        let text = &settings.language.data_tables;

        assert_eq!(text.search, "Suche:");
        assert_eq!(text.zero_records, "Keine passenden Einträge gefunden");
        assert_eq!(text.loading, "Wird geladen …");
        assert_eq!(text.info, DataTablesText::default().info);
    }

    #[test]
    fn empty_object_yields_defaults() {
        let settings = IntelSettings::from_layers("{}", None).unwrap();
        assert_eq!(settings, IntelSettings::default());
        assert_eq!(settings.fetch_timeout_ms, DEFAULT_FETCH_TIMEOUT_MS);
    }

    #[test]
    fn malformed_layers_are_reported() {
        let err = IntelSettings::from_layers("{", None).unwrap_err();
        assert!(err.starts_with("invalid settings:"));

        let err = IntelSettings::from_layers("{}", Some("nope")).unwrap_err();
        assert!(err.starts_with("invalid settings override:"));

        let err = IntelSettings::from_layers(r#"{"scanType": "radar"}"#, None).unwrap_err();
        assert!(err.starts_with("settings do not match schema:"));
    }
}
