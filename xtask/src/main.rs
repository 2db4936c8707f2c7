use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::process::{Command, Stdio};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Curve analyzer task runner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the workspace in release mode
    Build,

    /// Run tests
    Test {
        /// Only run tests whose name contains this filter
        filter: Option<String>,
    },

    /// Run clippy linter
    Clippy,

    /// Check formatting
    Fmt {
        /// Rewrite files instead of checking
        #[arg(long)]
        fix: bool,
    },

    /// Run the three cheat sheet curves through the analyzer
    Demo {
        /// Print JSON instead of the report
        #[arg(long)]
        json: bool,
    },

    /// Write a config file with the given tolerances
    GenConfig {
        /// Output path
        #[arg(short, long, default_value = "config.toml")]
        output: String,

        /// |Δ| below which a curve is singular
        #[arg(long, default_value = "1.0")]
        singular_tolerance: f64,

        /// |a|, |b| below which a singular curve is a cusp
        #[arg(long, default_value = "0.1")]
        cusp_tolerance: f64,

        /// Input step size
        #[arg(long, default_value = "0.1")]
        step: f64,

        /// Reject out-of-range input instead of clamping it
        #[arg(long)]
        reject: bool,
    },

    /// Remove build artifacts
    Clean,
}

/// Cheat sheet curves: (name, a, b)
const DEMO_CURVES: [(&str, &str, &str); 3] = [
    ("Singular Node", "-3.0", "2.0"),
    ("Singular Cusp", "0.0", "0.0"),
    ("Secure Curve", "-1.0", "4.0"),
];

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build => build(),
        Commands::Test { filter } => test(filter),
        Commands::Clippy => clippy(),
        Commands::Fmt { fix } => fmt(fix),
        Commands::Demo { json } => demo(json),
        Commands::GenConfig {
            output,
            singular_tolerance,
            cusp_tolerance,
            step,
            reject,
        } => gen_config(&output, singular_tolerance, cusp_tolerance, step, reject),
        Commands::Clean => clean(),
    }
}

fn build() -> Result<()> {
    println!("🔨 Building workspace (release)...");
    run_cmd("cargo", &["build", "--workspace", "--release"])?;
    Ok(())
}

fn test(filter: Option<String>) -> Result<()> {
    println!("🧪 Running all tests...");
    let mut args = vec!["test", "--workspace"];
    if let Some(ref f) = filter {
        args.push(f.as_str());
    }
    run_cmd("cargo", &args)?;
    Ok(())
}

fn clippy() -> Result<()> {
    println!("🔍 Running clippy on workspace (warnings as errors)...");
    run_cmd(
        "cargo",
        &[
            "clippy",
            "--workspace",
            "--all-targets",
            "--",
            "-D",
            "warnings",
        ],
    )?;
    Ok(())
}

fn fmt(fix: bool) -> Result<()> {
    if fix {
        println!("🧹 Formatting workspace...");
        run_cmd("cargo", &["fmt", "--all"])?;
    } else {
        println!("🔍 Checking formatting...");
        run_cmd("cargo", &["fmt", "--all", "--", "--check"])?;
    }
    Ok(())
}

fn demo(json: bool) -> Result<()> {
    for (i, &(name, a, b)) in DEMO_CURVES.iter().enumerate() {
        println!("\n▶ {}/{}: {} (a = {}, b = {})", i + 1, DEMO_CURVES.len(), name, a, b);

        let mut args = vec![
            "run",
            "--quiet",
            "--bin",
            "curve-analyzer",
            "--",
            "--no-banner",
            "analyze",
            "-a",
            a,
            "-b",
            b,
        ];
        if json {
            args.push("--json");
        }
        run_cmd("cargo", &args)?;
    }

    println!("\n✅ Demo complete!");
    Ok(())
}

fn gen_config(
    output: &str,
    singular_tolerance: f64,
    cusp_tolerance: f64,
    step: f64,
    reject: bool,
) -> Result<()> {
    use std::fs;

    if !(singular_tolerance > 0.0 && cusp_tolerance > 0.0 && step > 0.0) {
        anyhow::bail!("Tolerances and step must be positive");
    }

    println!(
        "🔧 Generating {} (|Δ| < {}, |a|,|b| < {}, step {})",
        output, singular_tolerance, cusp_tolerance, step
    );

    let config_content = format!(
        r#"# Curve analyzer configuration
#
# Auto-generated by: cargo xtask gen-config

[analyzer]
# |Δ| below this counts as singular
singular_tolerance = {singular:?}
# Singular curves with |a| and |b| below this are the cusp y² = x³
cusp_tolerance = {cusp:?}

[input]
min = -5.0
max = 5.0
step = {step:?}
policy = "{policy}"

[display]
banner = true
plot = true
plot_width = 61
plot_height = 25
grid_range = 5.0
"#,
        singular = singular_tolerance,
        cusp = cusp_tolerance,
        step = step,
        policy = if reject { "reject" } else { "clamp" },
    );

    fs::write(output, config_content).with_context(|| format!("Failed to write {}", output))?;

    println!("  ✅ Created {}", output);
    println!();
    println!("Next steps:");
    println!("  CONFIG_PATH={} cargo run --bin curve-analyzer", output);

    Ok(())
}

fn clean() -> Result<()> {
    println!("🧹 Removing build artifacts...");
    run_cmd("cargo", &["clean"])?;
    Ok(())
}

// Helper functions
fn run_cmd(program: &str, args: &[&str]) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("Failed to run: {} {}", program, args.join(" ")))?;

    if !status.success() {
        anyhow::bail!("Command failed: {} {}", program, args.join(" "));
    }

    Ok(())
}
