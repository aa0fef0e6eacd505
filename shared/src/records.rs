use serde::{Deserialize, Deserializer, Serialize};

/// Alliance id the backend assigns to pilots without an alliance.
pub const UNAFFILIATED_ALLIANCE_ID: u64 = 1;

/// NPC corporations occupy this id range.
pub const NPC_CORPORATION_IDS: std::ops::RangeInclusive<u64> = 1_000_000..=2_000_000;

/// Mass arrives as `type mass * count`, an integer or a float depending on the
/// backend. Rounded to whole kilograms; `null` and negatives read as zero.
fn mass_kg<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let mass = Option::<f64>::deserialize(deserializer)?.unwrap_or_default();
    Ok(if mass.is_finite() && mass > 0.0 {
        mass.round() as u64
    } else {
        0
    })
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AllianceInfo {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dotlan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zkillboard: Option<String>,
    /// Only present on alliance list entries.
    #[serde(default)]
    pub count: u64,
}

impl AllianceInfo {
    pub fn is_unaffiliated(&self) -> bool {
        self.id <= UNAFFILIATED_ALLIANCE_ID
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CorporationInfo {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dotlan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zkillboard: Option<String>,
    #[serde(default)]
    pub alliance: AllianceInfo,
    #[serde(default)]
    pub count: u64,
}

impl CorporationInfo {
    pub fn is_npc(&self) -> bool {
        NPC_CORPORATION_IDS.contains(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PilotInfo {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub portrait: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evewho: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zkillboard: Option<String>,
    #[serde(default)]
    pub corporation: CorporationInfo,
    #[serde(default)]
    pub alliance: AllianceInfo,
}

/// One concrete hull (or structure/deployable/starbase type) seen on a scan.
/// `type_id` names the hull group the entry belongs to.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShipClassEntry {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default, deserialize_with = "mass_kg")]
    pub mass: u64,
    #[serde(default)]
    pub type_id: u64,
    #[serde(default)]
    pub type_name: String,
}

/// Hull group breakdown (Frigate, Cruiser, ...).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShipTypeEntry {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default, deserialize_with = "mass_kg")]
    pub mass: u64,
}

/// A fleet member and the ship they are flying.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FleetPilotEntry {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub portrait: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evewho: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zkillboard: Option<String>,
    #[serde(default)]
    pub ship: String,
    #[serde(default)]
    pub ship_id: u64,
    #[serde(default)]
    pub ship_type_id: u64,
    #[serde(default)]
    pub solarsystem: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pilot_decodes_nested_affiliation() {
        let payload = json!({
            "id": 2112625428,
            "name": "Rounon Dax",
            "portrait": "https://images.evetech.net/characters/2112625428/portrait?size=32",
            "evewho": "https://evewho.com/character/2112625428",
            "zkillboard": "https://zkillboard.com/character/2112625428/",
            "corporation": {
                "id": 98557227,
                "name": "Rabbits Rising",
                "ticker": "RBTS",
                "logo": "https://images.evetech.net/corporations/98557227/logo?size=32",
                "dotlan": "https://evemaps.dotlan.net/corp/Rabbits_Rising",
                "zkillboard": "https://zkillboard.com/corporation/98557227/"
            },
            "alliance": {
                "id": 1,
                "name": "",
                "ticker": "",
                "logo": "https://images.evetech.net/alliances/1/logo?size=32"
            }
        });

        let pilot: PilotInfo = serde_json::from_value(payload).unwrap();
        assert_eq!(pilot.corporation.id, 98557227);
        assert_eq!(pilot.corporation.ticker, "RBTS");
        assert!(pilot.alliance.is_unaffiliated());
        assert_eq!(pilot.alliance.dotlan, None);
    }

    #[test]
    fn missing_optional_fields_default() {
        let entry: ShipClassEntry = serde_json::from_value(json!({ "id": 587 })).unwrap();
        assert_eq!(entry.count, 0);
        assert_eq!(entry.type_id, 0);
        assert!(entry.name.is_empty());
    }

    #[test]
    fn mass_accepts_integers_and_floats() {
        let entries: Vec<ShipClassEntry> = serde_json::from_value(json!([
            { "id": 587, "name": "Rifter", "count": 2, "mass": 2134000.0 },
            { "id": 603, "name": "Merlin", "count": 1, "mass": 997000 },
            { "id": 24690, "name": "Hurricane", "count": 1, "mass": 12_800_000.6 },
            { "id": 670, "name": "Capsule", "count": 1, "mass": null }
        ]))
        .unwrap();
        let masses: Vec<u64> = entries.iter().map(|e| e.mass).collect();
        assert_eq!(masses, vec![2_134_000, 997_000, 12_800_001, 0]);

        let group: ShipTypeEntry =
            serde_json::from_value(json!({ "id": 25, "name": "Frigate", "mass": 3131000.0 }))
                .unwrap();
        assert_eq!(group.mass, 3_131_000);
    }

    #[test]
    fn npc_corporation_range_is_inclusive() {
        let corp = |id| CorporationInfo {
            id,
            ..CorporationInfo::default()
        };
        assert!(corp(1_000_000).is_npc());
        assert!(corp(1_000_125).is_npc());
        assert!(corp(2_000_000).is_npc());
        assert!(!corp(999_999).is_npc());
        assert!(!corp(98_557_227).is_npc());
    }
}
