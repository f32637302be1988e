//! Data layer — populates the species catalog at game startup.
//!
//! This plugin runs in OnEnter(GameState::Loading), fills the
//! SpeciesCatalog from the hard-coded game-design data in `species.rs`,
//! sizes the lifetime stat tables to the catalog, then transitions the
//! game into GameState::MainMenu.
//!
//! All domain plugins can safely read the catalog once GameState has
//! advanced past Loading.

mod species;

use bevy::prelude::*;
use crate::shared::*;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), load_all_data);
    }
}

/// Populates the catalog, sizes the per-species stat arrays exactly to the
/// catalog count, and transitions to MainMenu.
fn load_all_data(
    mut catalog: ResMut<SpeciesCatalog>,
    mut lifetime: ResMut<LifetimeStats>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    info!("[Data] Populating species catalog…");

    species::populate_species(&mut catalog);
    info!("[Data]   Species loaded: {}", catalog.len());

    // A loaded save may already have filled tables; only grow, never clobber.
    if lifetime.per_species.species_count() == 0 {
        lifetime.per_species = SpeciesStatsTable::sized_to(catalog.len());
    } else {
        lifetime.per_species.ensure_capacity(catalog.len());
    }

    info!("[Data] Catalog populated. Transitioning to MainMenu.");
    next_state.set(GameState::MainMenu);
}
