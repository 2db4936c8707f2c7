use anyhow::Result;
use std::env;

use curve_analyzer::config::ConfigFile;
use curve_analyzer::report::{CheatSheetEntry, CHEAT_SHEET};
use curve_analyzer::{compute_discriminant, Tolerances};

fn print_entry(number: usize, entry: &CheatSheetEntry, tolerances: &Tolerances) {
    let delta = compute_discriminant(entry.a, entry.b);
    let classification = entry.classify(tolerances);

    println!("═══════════════════════════════════════════════════════════");
    println!("  Step {}: {} ({})", number, entry.title, entry.color_name());
    println!("═══════════════════════════════════════════════════════════\n");

    println!("Curve:  y² = x³ + ({:.1})x + ({:.1})", entry.a, entry.b);
    println!(
        "Δ:      -16(4·({:.1})³ + 27·({:.1})²) = {:.1}",
        entry.a, entry.b, delta
    );
    println!("Status: {}", classification.status.label());
    println!("Type:   {}\n", classification.singularity.label());
    if !entry.is_expected(&classification) {
        println!("Note:   the configured tolerances change this entry's classification\n");
    }
    println!("{}\n", classification.description);
    println!("Try it:");
    println!(
        "  cargo run --bin curve-analyzer -- analyze -a {:.1} -b {:.1}",
        entry.a, entry.b
    );
    println!("  or type 'preset {}' in the interactive session\n", number);
}

fn main() -> Result<()> {
    println!("╔═══════════════════════════════════════════════════════════╗");
    println!("║     Singular vs. Smooth Curves - Demo Walk-through        ║");
    println!("╚═══════════════════════════════════════════════════════════╝\n");

    // Same config as the analyzer, so tuned tolerances show up here too
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    let config = ConfigFile::load_or_default(&config_path)?;
    config.validate()?;
    let tolerances = config.analyzer.tolerances();
    println!(
        "Tolerances: |Δ| < {}, cusp when |a|, |b| < {} (from {})\n",
        tolerances.singular_delta,
        tolerances.cusp_coefficient,
        if std::path::Path::new(&config_path).exists() {
            config_path.as_str()
        } else {
            "built-in defaults"
        }
    );

    // Optional single step from args
    let args: Vec<String> = env::args().collect();
    if args.len() >= 2 {
        let step: usize = args[1]
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid step number: {}", args[1]))?;
        let entry = CHEAT_SHEET
            .get(step.wrapping_sub(1))
            .ok_or_else(|| anyhow::anyhow!("Step must be between 1 and {}", CHEAT_SHEET.len()))?;
        print_entry(step, entry, &tolerances);
        return Ok(());
    }

    for (i, entry) in CHEAT_SHEET.iter().enumerate() {
        print_entry(i + 1, entry, &tolerances);
    }

    println!("═══════════════════════════════════════════════════════════");
    println!("  Why singular curves are rejected");
    println!("═══════════════════════════════════════════════════════════\n");

    println!("A curve with Δ = 0 has a repeated root in x³ + ax + b.");
    println!("Its non-singular points still form a group, but that group");
    println!("maps onto a much simpler one:");
    println!("  - Cusp: the additive group, discrete log is a division");
    println!("  - Node: the multiplicative group, subexponential attacks apply\n");
    println!("The tolerance on |Δ| and on |a|, |b| can be tuned in config.toml");
    println!("(or the file CONFIG_PATH points at):");
    println!("  [analyzer]");
    println!("  singular_tolerance = 1.0");
    println!("  cusp_tolerance = 0.1\n");

    println!("Usage:");
    println!("  cargo run --bin curve-cheatsheet       # all steps");
    println!("  cargo run --bin curve-cheatsheet 2     # only the cusp");

    Ok(())
}
