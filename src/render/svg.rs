use crate::core::catalog::ZoneCatalog;
use crate::core::generator::Canvas;
use crate::domain::model::Placement;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::collections::HashSet;
use std::fmt::Write;

const DEFAULT_ZONE_FILL: &str = "rgba(128, 128, 128, 0.2)";
const MARKER_RADIUS: f64 = 5.0;
const LABEL_FONT_SIZE: u32 = 14;
const LABEL_OFFSET_X: f64 = 10.0;
const FIRST_NAME_OFFSET_Y: f64 = -20.0;
const LAST_NAME_OFFSET_Y: f64 = -5.0;
const MARKER_TRANSITION: &str = "transition: cx 2s ease-in-out, cy 2s ease-in-out";
const LABEL_TRANSITION: &str = "transition: x 2s ease-in-out, y 2s ease-in-out";

/// Draws the zones, then one marker and a two-line name label per placement.
///
/// Markers carry a CSS transition so a browser animates between successive
/// renders of the same element ids. Element ids are slugs of the zone name or
/// entity id, suffixed `-2`, `-3`, ... when two would collide.
pub fn render_svg(canvas: &Canvas, catalog: &ZoneCatalog, placements: &[Placement]) -> String {
    let mut svg = String::new();
    let mut ids = ElementIds::default();

    // writing into a String cannot fail
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="100%" height="auto" style="border: 1px solid black">"#,
        canvas.width(),
        canvas.height()
    );

    for zone in catalog.iter() {
        let center = zone.center();
        let _ = writeln!(
            svg,
            r#"  <circle id="{}" cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            ids.claim("zone", zone.name()),
            center.x,
            center.y,
            zone.outer_radius(),
            encode_double_quoted_attribute(zone.color().unwrap_or(DEFAULT_ZONE_FILL))
        );
    }

    for placement in placements {
        let (x, y) = (placement.point.x, placement.point.y);
        let label_x = x + LABEL_OFFSET_X;

        let _ = writeln!(
            svg,
            r#"  <g id="{}">"#,
            ids.claim("employee", &placement.id)
        );
        let _ = writeln!(
            svg,
            r#"    <circle cx="{:.2}" cy="{:.2}" r="{}" fill="black" style="{}"/>"#,
            x, y, MARKER_RADIUS, MARKER_TRANSITION
        );
        for (offset, text) in [
            (FIRST_NAME_OFFSET_Y, &placement.first_name),
            (LAST_NAME_OFFSET_Y, &placement.last_name),
        ] {
            let _ = writeln!(
                svg,
                r#"    <text x="{:.2}" y="{:.2}" font-size="{}" fill="black" style="{}">{}</text>"#,
                label_x,
                y + offset,
                LABEL_FONT_SIZE,
                LABEL_TRANSITION,
                encode_text(text)
            );
        }
        svg.push_str("  </g>\n");
    }

    svg.push_str("</svg>\n");
    svg
}

/// Hands out document-unique ids made only of `[a-z0-9-]`.
#[derive(Default)]
struct ElementIds {
    used: HashSet<String>,
}

impl ElementIds {
    fn claim(&mut self, prefix: &str, name: &str) -> String {
        let slug = slug(name);
        let base = if slug.is_empty() {
            prefix.to_string()
        } else if slug == prefix || slug.starts_with(&format!("{}-", prefix)) {
            slug
        } else {
            format!("{}-{}", prefix, slug)
        };

        let mut id = base.clone();
        let mut n = 1;
        while !self.used.insert(id.clone()) {
            n += 1;
            id = format!("{}-{}", base, n);
        }
        id
    }
}

/// Lowercase ASCII alphanumerics, every other run of characters becomes one `-`.
fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}
