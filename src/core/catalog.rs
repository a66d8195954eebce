use crate::domain::model::{AngularPolicy, Point, Zone};
use crate::utils::error::{LayoutError, Result};
use std::collections::HashMap;
use std::sync::OnceLock;

const PLAN_CENTER: Point = Point { x: 290.0, y: 340.0 };

static STANDARD: OnceLock<ZoneCatalog> = OnceLock::new();

/// Read-only table of zones, looked up by name.
#[derive(Debug, Clone)]
pub struct ZoneCatalog {
    zones: Vec<Zone>,
    index: HashMap<String, usize>,
}

impl ZoneCatalog {
    /// Builds a catalog from already validated zones. Names must be unique.
    pub fn from_zones(zones: Vec<Zone>) -> Result<Self> {
        let mut index = HashMap::with_capacity(zones.len());
        for (position, zone) in zones.iter().enumerate() {
            if index.insert(zone.name().to_string(), position).is_some() {
                return Err(LayoutError::DuplicateZoneError {
                    zone: zone.name().to_string(),
                });
            }
        }
        Ok(Self { zones, index })
    }

    /// The four zones of the office plan, built once per process.
    pub fn standard() -> &'static ZoneCatalog {
        STANDARD.get_or_init(|| {
            // literals below satisfy the zone invariant, so validation is bypassed
            let zones = vec![
                standard_zone(
                    "Zone 1",
                    100.0,
                    0.0,
                    AngularPolicy::lower_semicircle(),
                    "rgba(255, 0, 0, 0.2)",
                ),
                standard_zone(
                    "Zone 2",
                    250.0,
                    150.0,
                    AngularPolicy::FullCircle,
                    "rgba(0, 0, 255, 0.2)",
                ),
                standard_zone(
                    "Zone 3",
                    450.0,
                    280.0,
                    AngularPolicy::RightQuarterOnly,
                    "rgba(255, 255, 0, 0.2)",
                ),
                standard_zone(
                    "Zone 4",
                    1000.0,
                    800.0,
                    AngularPolicy::RightQuarterOnly,
                    "rgba(0, 255, 0, 0.2)",
                ),
            ];
            let index = zones
                .iter()
                .enumerate()
                .map(|(position, zone)| (zone.name().to_string(), position))
                .collect();
            ZoneCatalog { zones, index }
        })
    }

    pub fn get(&self, name: &str) -> Option<&Zone> {
        self.index.get(name).map(|&position| &self.zones[position])
    }

    /// Zones in definition order, which is also drawing order.
    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

fn standard_zone(
    name: &str,
    outer_radius: f64,
    inner_radius: f64,
    policy: AngularPolicy,
    color: &str,
) -> Zone {
    Zone::from_parts(name, PLAN_CENTER, outer_radius, inner_radius, policy).with_color(color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    #[test]
    fn test_standard_catalog_geometry() {
        let catalog = ZoneCatalog::standard();
        assert_eq!(catalog.len(), 4);

        let zone1 = catalog.get("Zone 1").unwrap();
        assert_eq!(zone1.center(), Point::new(290.0, 340.0));
        assert_eq!(zone1.outer_radius(), 100.0);
        assert_eq!(zone1.inner_radius(), 0.0);
        assert_eq!(zone1.policy().range(), (PI, TAU));

        let zone2 = catalog.get("Zone 2").unwrap();
        assert_eq!((zone2.inner_radius(), zone2.outer_radius()), (150.0, 250.0));
        assert_eq!(zone2.policy(), AngularPolicy::FullCircle);

        let zone3 = catalog.get("Zone 3").unwrap();
        assert_eq!((zone3.inner_radius(), zone3.outer_radius()), (280.0, 450.0));
        assert_eq!(zone3.policy().range(), (0.0, FRAC_PI_2));

        let zone4 = catalog.get("Zone 4").unwrap();
        assert_eq!((zone4.inner_radius(), zone4.outer_radius()), (800.0, 1000.0));
        assert_eq!(zone4.policy(), AngularPolicy::RightQuarterOnly);
    }

    #[test]
    fn test_standard_zones_pass_validation() {
        for zone in ZoneCatalog::standard().iter() {
            let rebuilt = Zone::new(
                zone.name(),
                zone.center(),
                zone.outer_radius(),
                Some(zone.inner_radius()),
                zone.policy(),
            );
            assert!(rebuilt.is_ok(), "{} should be valid", zone.name());
        }
    }

    #[test]
    fn test_standard_catalog_is_shared() {
        assert!(std::ptr::eq(ZoneCatalog::standard(), ZoneCatalog::standard()));
    }

    #[test]
    fn test_unknown_zone_is_missing() {
        assert!(ZoneCatalog::standard().get("Zone 5").is_none());
        assert!(ZoneCatalog::standard().get("zone 1").is_none());
    }

    #[test]
    fn test_iteration_keeps_definition_order() {
        let names: Vec<&str> = ZoneCatalog::standard().iter().map(Zone::name).collect();
        assert_eq!(names, ["Zone 1", "Zone 2", "Zone 3", "Zone 4"]);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let zone = Zone::new("A", PLAN_CENTER, 10.0, None, AngularPolicy::FullCircle).unwrap();
        let err = ZoneCatalog::from_zones(vec![zone.clone(), zone]).unwrap_err();
        assert!(matches!(err, LayoutError::DuplicateZoneError { zone } if zone == "A"));
    }
}
