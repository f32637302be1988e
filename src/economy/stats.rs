//! Passive listener that folds every hooked fish into the lifetime
//! statistics tables. Record-keeping only; no gameplay decisions.

use bevy::prelude::*;

use crate::shared::*;

/// One stat entry per hook slot, overall and per species. If the species
/// index is somehow out of range the whole catch is skipped with a
/// warning; the tables are never left half-updated.
pub fn record_catch_stats(
    mut catch_events: EventReader<CatchLandedEvent>,
    mut lifetime: ResMut<LifetimeStats>,
) {
    for ev in catch_events.read() {
        let species = ev.result.species_id;

        if species.index() >= lifetime.per_species.species_count() {
            warn!(
                "[Economy] Species {:?} out of range for stats tables; catch not recorded.",
                species
            );
            continue;
        }

        for slot in &ev.slots {
            lifetime.record(species, slot.weight, slot.length);
        }
    }
}
