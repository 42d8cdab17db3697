//! # Spill Report
//!
//! This example evaluates the mass balance of a hydrocarbon spill and prints
//! the partition as a table, followed by a stacked decomposition and any
//! warnings raised for capped categories.
//!
//! The scenario is read from a TOML file when a path is given; otherwise a
//! built-in scenario with skimmers and absorbents deployed is used.
//!
//! ## Running the Example
//!
//! ```sh
//! cargo run --example spill_report
//! cargo run --example spill_report -- path/to/scenario.toml
//! ```

use std::{env, error::Error, fs};

use marea_components::{hydrocarbon::Catalog, mass_balance::MassBalance, scenario::ScenarioConfig};
use marea_core::Component;
use uom::si::{mass::kilogram, mass_density::kilogram_per_cubic_meter, volume::liter};

const BUILT_IN_SCENARIO: &str = r#"
hydrocarbon = "Medium Crude"
simulation_days = 14

[spill]
discharge_rate_l_per_min = 50.0
duration_min = 60.0

[environment]
wind_speed_m_per_s = 5.0
wave_height_m = 1.5
water_temperature_c = 14.0

[recovery]
containment = true

[recovery.skimmers]
recovered_volume_l = 400.0

[recovery.absorbents]
dry_mass_kg = 25.0
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let document = match env::args().nth(1) {
        Some(path) => fs::read_to_string(path)?,
        None => BUILT_IN_SCENARIO.to_owned(),
    };

    let catalog = Catalog::bundled()?;
    let scenario = ScenarioConfig::from_toml_str(&document)?;
    let engine = MassBalance::new(scenario.models)?;
    let input = scenario.resolve(&catalog)?;
    let report = engine.call(input.clone())?;

    let hydrocarbon = &input.hydrocarbon;
    let total = report.result.total;
    println!(
        "{} ({}, API {:.1}, {:.0} kg/m³), {:.0} L spilled ({:.0} kg)",
        hydrocarbon.name(),
        hydrocarbon.kind(),
        hydrocarbon.api_gravity(),
        hydrocarbon.density().get::<kilogram_per_cubic_meter>(),
        total.get::<liter>(),
        hydrocarbon.mass_of(total).get::<kilogram>(),
    );

    let methods: Vec<_> = input.recovery.methods().iter().map(ToString::to_string).collect();
    if methods.is_empty() {
        println!("Response: none");
    } else {
        println!("Response: {}", methods.join(", "));
    }

    println!();
    println!("{}", report.result);

    println!();
    println!("Stacked (L):");
    for segment in report.result.stacked() {
        println!(
            "  {:<24}{:>10.1} .. {:>10.1}",
            segment.category,
            segment.bottom.get::<liter>(),
            segment.top.get::<liter>(),
        );
    }

    for warning in &report.warnings {
        println!("warning: {warning}");
    }

    Ok(())
}
