//! Markup fragments for table cells. Same record in, same markup out.

use crate::highlight::INFORMATION_LINK_CLASS;
use crate::records::{AllianceInfo, CorporationInfo, FleetPilotEntry, PilotInfo, ShipClassEntry};
use crate::settings::ScanDataText;

pub const DEFAULT_IMAGE_SIZE: u32 = 32;

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn eve_image_html(eve_id: u64, eve_name: &str, image_source: &str, image_size: u32) -> String {
    let name = html_escape(eve_name);
    let src = html_escape(image_source);
    format!(
        r#"<img class="eve-image rounded" data-eveid="{eve_id}" src="{src}" alt="{name}" title="{name}" data-bs-tooltip="aa-intel-tool" loading="lazy" width="{image_size}" height="{image_size}">"#
    )
}

fn external_link_html(href: &str, service_name: &str) -> String {
    format!(
        r#"<a class="{INFORMATION_LINK_CLASS}" href="{}" target="_blank" rel="noopener noreferrer">{service_name}</a>"#,
        html_escape(href)
    )
}

pub fn evewho_link_html(href: &str) -> String {
    external_link_html(href, "evewho")
}

pub fn zkillboard_link_html(href: &str) -> String {
    external_link_html(href, "zkillboard")
}

pub fn dotlan_link_html(href: &str) -> String {
    external_link_html(href, "dotlan")
}

/// `a | b` over whichever links the record carries.
fn link_bar(links: &[Option<String>]) -> String {
    links.iter().flatten().cloned().collect::<Vec<_>>().join(" | ")
}

/// Wrap an image and a name into the info panel layout.
///
/// `image_html`, `name_html` and `additional_html` are inserted as-is and
/// must already be escaped.
pub fn info_panel(
    image_html: &str,
    name_html: &str,
    additional_html: &str,
    logo_only: bool,
) -> String {
    let image = format!(r#"<span class="aa-intel-eve-image-wrapper">{image_html}</span>"#);
    if logo_only {
        return image;
    }

    let mut info = format!(
        r#"<span class="aa-intel-eve-information-wrapper"><span class="aa-intel-eve-name-wrapper">{name_html}</span>"#
    );
    if !additional_html.is_empty() {
        info.push_str(&format!(
            r#"<span class="aa-intel-additional-information-wrapper"><small>{additional_html}</small></span>"#
        ));
    }
    info.push_str("</span>");

    image + &info
}

pub fn pilot_info_panel(pilot: &PilotInfo) -> String {
    character_panel(
        pilot.id,
        &pilot.name,
        &pilot.portrait,
        pilot.evewho.as_deref(),
        pilot.zkillboard.as_deref(),
    )
}

pub fn fleet_pilot_info_panel(pilot: &FleetPilotEntry) -> String {
    character_panel(
        pilot.id,
        &pilot.name,
        &pilot.portrait,
        pilot.evewho.as_deref(),
        pilot.zkillboard.as_deref(),
    )
}

fn character_panel(
    id: u64,
    name: &str,
    portrait: &str,
    evewho: Option<&str>,
    zkillboard: Option<&str>,
) -> String {
    let image = eve_image_html(id, name, portrait, DEFAULT_IMAGE_SIZE);
    let additional = link_bar(&[
        evewho.map(evewho_link_html),
        zkillboard.map(zkillboard_link_html),
    ]);
    info_panel(&image, &html_escape(name), &additional, false)
}

pub fn corporation_info_panel(
    corporation: &CorporationInfo,
    logo_only: bool,
    text: &ScanDataText,
) -> String {
    let image = eve_image_html(
        corporation.id,
        &corporation.name,
        &corporation.logo,
        DEFAULT_IMAGE_SIZE,
    );
    let additional = if corporation.is_npc() {
        format!("({})", html_escape(&text.npc_corp))
    } else {
        link_bar(&[
            corporation.dotlan.as_deref().map(dotlan_link_html),
            corporation.zkillboard.as_deref().map(zkillboard_link_html),
        ])
    };

    info_panel(
        &image,
        &html_escape(&corporation.name),
        &additional,
        logo_only,
    )
}

pub fn alliance_info_panel(alliance: &AllianceInfo, logo_only: bool, text: &ScanDataText) -> String {
    if logo_only && alliance.is_unaffiliated() {
        return String::new();
    }

    let name = if alliance.name.is_empty() {
        text.unaffiliated.as_str()
    } else {
        alliance.name.as_str()
    };
    let image = eve_image_html(alliance.id, name, &alliance.logo, DEFAULT_IMAGE_SIZE);
    let additional = if alliance.is_unaffiliated() {
        html_escape(&text.no_alliance)
    } else {
        link_bar(&[
            alliance.dotlan.as_deref().map(dotlan_link_html),
            alliance.zkillboard.as_deref().map(zkillboard_link_html),
        ])
    };

    info_panel(&image, &html_escape(name), &additional, logo_only)
}

pub fn ship_info_panel(ship: &ShipClassEntry) -> String {
    let image = eve_image_html(ship.id, &ship.name, &ship.image, DEFAULT_IMAGE_SIZE);
    info_panel(&image, &html_escape(&ship.name), "", false)
}
