use crate::core::catalog::ZoneCatalog;
use crate::core::generator::PositionGenerator;
use crate::domain::model::{Placement, Snapshot};
use crate::domain::ports::RandomSource;

/// Resolves every entity of a snapshot to a point on the plan.
#[derive(Debug, Clone)]
pub struct LayoutEngine<'a> {
    catalog: &'a ZoneCatalog,
    generator: PositionGenerator,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(catalog: &'a ZoneCatalog, generator: PositionGenerator) -> Self {
        Self { catalog, generator }
    }

    pub fn catalog(&self) -> &ZoneCatalog {
        self.catalog
    }

    pub fn generator(&self) -> &PositionGenerator {
        &self.generator
    }

    /// One render pass. Entities keep their snapshot order; those naming an
    /// unknown zone are left out. Every call samples new points.
    pub fn layout<R: RandomSource + ?Sized>(&self, snapshot: &Snapshot, rng: &mut R) -> Vec<Placement> {
        let mut placements = Vec::with_capacity(snapshot.len());
        let mut skipped = 0usize;

        for entity in snapshot.entities() {
            let Some(zone) = self.catalog.get(&entity.zone) else {
                tracing::debug!("Skipping {} ({}): unknown zone '{}'", entity.id, entity.first_name, entity.zone);
                skipped += 1;
                continue;
            };

            let point = self.generator.generate(zone, rng);
            placements.push(Placement {
                id: entity.id.clone(),
                first_name: entity.first_name.clone(),
                last_name: entity.last_name.clone(),
                zone: entity.zone.clone(),
                point,
            });
        }

        if skipped > 0 {
            tracing::debug!(
                "Placed {} of {} entities, {} without a known zone",
                placements.len(),
                snapshot.len(),
                skipped
            );
        }

        placements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::RngSource;
    use crate::domain::model::Entity;

    fn entity(id: &str, zone: &str) -> Entity {
        Entity {
            id: id.to_string(),
            first_name: format!("First{}", id),
            last_name: format!("Last{}", id),
            zone: zone.to_string(),
        }
    }

    fn engine() -> LayoutEngine<'static> {
        LayoutEngine::new(ZoneCatalog::standard(), PositionGenerator::default())
    }

    #[test]
    fn test_unknown_zones_are_skipped() {
        let snapshot = Snapshot::new(vec![
            entity("1", "Zone 1"),
            entity("2", "Basement"),
            entity("3", "Zone 4"),
            entity("4", ""),
        ]);
        let placements = engine().layout(&snapshot, &mut RngSource::seeded(1));

        assert_eq!(placements.len(), 2);
        let ids: Vec<&str> = placements.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[test]
    fn test_placements_carry_display_fields() {
        let snapshot = Snapshot::new(vec![entity("7", "Zone 2")]);
        let placements = engine().layout(&snapshot, &mut RngSource::seeded(1));

        let placement = &placements[0];
        assert_eq!(placement.first_name, "First7");
        assert_eq!(placement.last_name, "Last7");
        assert_eq!(placement.zone, "Zone 2");
        assert!(engine().generator().canvas().contains(placement.point));
    }

    #[test]
    fn test_each_pass_resamples() {
        let snapshot = Snapshot::new((0..20).map(|i| entity(&i.to_string(), "Zone 2")).collect());
        let mut rng = RngSource::seeded(5);
        let first = engine().layout(&snapshot, &mut rng);
        let second = engine().layout(&snapshot, &mut rng);
        assert_eq!(first.len(), second.len());
        assert_ne!(first, second);
    }

    #[test]
    fn test_empty_snapshot() {
        let placements = engine().layout(&Snapshot::default(), &mut RngSource::seeded(1));
        assert!(placements.is_empty());
    }
}
