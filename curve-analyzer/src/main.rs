use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, IsTerminal, Write};

use curve_analyzer::config::ConfigFile;
use curve_analyzer::plot::{self, PlotSpec};
use curve_analyzer::report::CHEAT_SHEET;
use curve_analyzer::session::{Command, Session, HELP};
use curve_analyzer::{Analysis, Analyzer};

#[derive(Parser)]
#[command(name = "curve-analyzer")]
#[command(about = "Elliptic curve discriminant analyzer and key generation simulator", long_about = None)]
struct Cli {
    /// Path to the TOML config (defaults are used if it does not exist)
    #[arg(long, env = "CONFIG_PATH", default_value = "config.toml")]
    config: String,

    /// Skip the startup banner
    #[arg(long)]
    no_banner: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one curve y² = x³ + ax + b
    Analyze {
        /// Coefficient a
        #[arg(short, allow_negative_numbers = true)]
        a: f64,

        /// Coefficient b
        #[arg(short, allow_negative_numbers = true)]
        b: f64,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,

        /// Do not draw the curve
        #[arg(long)]
        no_plot: bool,
    },

    /// Read coefficient changes from stdin and redraw after each one
    Interactive,

    /// Show the demo curves and how each one classifies
    CheatSheet,
}

struct Frontend {
    config: ConfigFile,
    color: bool,
}

impl Frontend {
    fn plot_spec(&self) -> PlotSpec {
        self.config.display.plot_spec()
    }

    fn show(&self, analysis: &Analysis, draw_plot: bool) -> Result<()> {
        let mut stdout = io::stdout().lock();
        if draw_plot {
            writeln!(stdout, "{}", plot::render(analysis.params, &self.plot_spec()))?;
        }
        if self.color {
            writeln!(stdout, "{}{}\x1b[0m", analysis.color.ansi(), analysis.report)?;
        } else {
            writeln!(stdout, "{}", analysis.report)?;
        }
        Ok(())
    }
}

const BANNER: &str = "Launching ECC Visualization Module...\n\
                      Use the controls to match the Cheat Sheet values.\n";

/// Banner goes to stdout, so machine-readable output never gets one
fn show_banner(cli: &Cli, configured: bool) -> bool {
    let json = matches!(cli.command, Some(Commands::Analyze { json: true, .. }));
    configured && !cli.no_banner && !json
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = ConfigFile::load_or_default(&cli.config)?;
    config.validate()?;

    if show_banner(&cli, config.display.banner) {
        println!("{}", BANNER);
    }

    let frontend = Frontend {
        color: io::stdout().is_terminal(),
        config,
    };
    let analyzer = Analyzer::new(frontend.config.analyzer.tolerances());

    match cli.command {
        Some(Commands::Analyze {
            a,
            b,
            json,
            no_plot,
        }) => analyze(&frontend, analyzer, a, b, json, no_plot),
        Some(Commands::Interactive) | None => interactive(&frontend, analyzer),
        Some(Commands::CheatSheet) => cheat_sheet(analyzer),
    }
}

fn analyze(
    frontend: &Frontend,
    analyzer: Analyzer,
    a: f64,
    b: f64,
    json: bool,
    no_plot: bool,
) -> Result<()> {
    let input = &frontend.config.input;
    let params = input.bounds().admit_params(a, b, input.policy)?;
    let analysis = analyzer.analyze_os(params);

    if json {
        let rendered =
            serde_json::to_string_pretty(&analysis).context("Failed to serialize analysis")?;
        println!("{}", rendered);
        return Ok(());
    }

    frontend.show(&analysis, frontend.config.display.plot && !no_plot)
}

fn interactive(frontend: &Frontend, analyzer: Analyzer) -> Result<()> {
    let input = &frontend.config.input;
    let mut session = Session::new(input.bounds(), input.policy, analyzer);
    let draw_plot = frontend.config.display.plot;

    tracing::info!(
        "Interactive session: a, b in [{}, {}], step {}, policy {:?}",
        input.min,
        input.max,
        input.step,
        input.policy
    );

    frontend.show(&session.evaluate(&mut rand::rngs::OsRng), draw_plot)?;
    println!("{}\n", HELP);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read input")?;

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{:#}", e);
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{}", HELP),
            Command::CheatSheet => println!("{}", curve_analyzer::report::format_cheat_sheet()),
            _ => match session.apply(command) {
                Ok(true) => {
                    frontend.show(&session.evaluate(&mut rand::rngs::OsRng), draw_plot)?;
                }
                Ok(false) => {}
                Err(e) => eprintln!("{:#}", e),
            },
        }
    }

    tracing::info!("Session closed at a={} b={}", session.params().a, session.params().b);
    Ok(())
}

fn cheat_sheet(analyzer: Analyzer) -> Result<()> {
    println!("DEMO CHEAT SHEET");
    println!("================");
    for (i, entry) in CHEAT_SHEET.iter().enumerate() {
        let analysis = analyzer.analyze_os(entry.params());
        let classification = &analysis.classification;
        println!(
            "{}. {:<14} a = {:>4.1}, b = {:>4.1}  Δ = {:>8.1}  {} / {}",
            i + 1,
            entry.title,
            entry.a,
            entry.b,
            analysis.discriminant,
            classification.status.label(),
            classification.singularity.label()
        );
        if !entry.is_expected(classification) {
            tracing::warn!(
                "Entry {} no longer classifies as expected with the configured tolerances",
                i + 1
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("curve-analyzer").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_json_output_never_gets_banner() {
        let json = cli(&["analyze", "-a", "-1", "-b", "4", "--json"]);
        assert!(!show_banner(&json, true));
        assert!(!show_banner(&json, false));
    }

    #[test]
    fn test_banner_for_text_modes() {
        assert!(show_banner(&cli(&["analyze", "-a", "-1", "-b", "4"]), true));
        assert!(show_banner(&cli(&[]), true));
        assert!(show_banner(&cli(&["interactive"]), true));
        assert!(!show_banner(&cli(&["--no-banner", "interactive"]), true));
        assert!(!show_banner(&cli(&["cheat-sheet"]), false));
    }
}
