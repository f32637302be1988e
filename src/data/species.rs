use crate::shared::*;

/// Populate the SpeciesCatalog with all 12 fish species.
///
/// Base weight (lb) and length (in) are the pre-roll values; every hook
/// slot rolls U(0.8, 1.2) against them, so a perfect-reel anchovy still
/// pays less than a sluggish marlin. Twelve species, one per trophy slot.
pub fn populate_species(catalog: &mut SpeciesCatalog) {
    let defs: &[(&str, f32, f32)] = &[
        // ── Shallow-water staples ─────────────────────────────────────
        ("Anchovy", 0.4, 5.0),
        ("Sardine", 0.8, 7.0),
        ("Herring", 1.2, 10.0),
        ("Mackerel", 2.5, 14.0),
        // ── Mid-water earners ─────────────────────────────────────────
        ("Sea Bass", 6.0, 20.0),
        ("Red Snapper", 8.0, 24.0),
        ("Flounder", 10.0, 22.0),
        ("Bonito", 12.0, 28.0),
        // ── Deep-water payouts ────────────────────────────────────────
        ("Yellowtail", 18.0, 36.0),
        ("Mahi-Mahi", 25.0, 45.0),
        ("Tuna", 60.0, 60.0),
        ("Marlin", 120.0, 90.0),
    ];

    catalog.species = defs
        .iter()
        .enumerate()
        .map(|(i, &(name, base_weight, base_length))| FishSpecies {
            id: SpeciesId(i),
            name: name.to_string(),
            base_weight,
            base_length,
        })
        .collect();
}
