use std::path::Path;

use colored::Colorize;

/// Load the content directory and report validation warnings.
pub fn run(dir: &Path) -> Result<(), String> {
    let data = super::load(dir)?;
    let c = &data.compendium;

    println!(
        "  Loaded '{}': {} zones, {} encounters, {} weathers, {} seasons",
        dir.display(),
        c.zones().len(),
        c.encounters().len(),
        c.weathers().len(),
        c.seasons().len(),
    );
    match &data.calendar {
        Some(cal) => println!(
            "  Calendar: {} months, {} holidays{}",
            cal.months.len(),
            cal.holidays.len(),
            if cal.lunar_cycle_length.is_some() { ", lunar tracking" } else { "" },
        ),
        None => println!("  Calendar: none"),
    }

    if data.warnings.is_empty() {
        println!("  {}", "All cross-references check out.".green());
    } else {
        for warning in &data.warnings {
            println!("  {} {warning}", "warning:".yellow());
        }
        println!(
            "  {} warning{}",
            data.warnings.len(),
            if data.warnings.len() == 1 { "" } else { "s" },
        );
    }

    Ok(())
}
