use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use lc_core::Watch;

/// Print table summaries of the loaded content.
pub fn run(dir: &Path) -> Result<(), String> {
    let data = super::load(dir)?;
    let c = &data.compendium;

    let mut zones = Table::new();
    zones.set_content_arrangement(ContentArrangement::Dynamic);
    zones.set_header(vec!["Zone", "Kinds", "Encounter chance"]);
    for zone in c.zones() {
        let kinds: Vec<String> = zone.kinds.iter().map(|k| format!("{k:?}")).collect();
        zones.add_row(vec![&zone.name, &kinds.join(", "), &zone.encounter_chance]);
    }
    println!("{zones}");
    println!();

    let mut encounters = Table::new();
    encounters.set_content_arrangement(ContentArrangement::Dynamic);
    encounters.set_header(vec!["Encounter", "Habitat", "Sparks", "Active watches"]);
    for def in c.encounters() {
        let active: Vec<&str> = Watch::ALL
            .iter()
            .filter(|w| def.watch_fraction(**w) > 0.0)
            .map(|w| w.label())
            .collect();
        encounters.add_row(vec![
            def.name.clone(),
            def.habitat.clone(),
            def.sparks.len().to_string(),
            if active.is_empty() { "—".to_string() } else { active.join(", ") },
        ]);
    }
    println!("{encounters}");
    println!();

    let mut weathers = Table::new();
    weathers.set_content_arrangement(ContentArrangement::Dynamic);
    weathers.set_header(vec!["Weather", "Effects"]);
    for def in c.weathers() {
        let effects = if def.effects.is_empty() {
            "—".to_string()
        } else {
            def.effects.join(", ")
        };
        weathers.add_row(vec![&def.name, &effects]);
    }
    println!("{weathers}");
    println!();

    println!("  Seasons: {}", c.seasons().join(", "));

    Ok(())
}
