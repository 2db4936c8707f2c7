//! Controller state for the interactive front end
//!
//! A `Session` owns the single current `CurveParams`. Every accepted input
//! replaces it wholesale and the analysis is recomputed from scratch.

use anyhow::Result;
use rand::{CryptoRng, RngCore};

use crate::analyzer::{Analysis, Analyzer};
use crate::params::{parse_value, Coefficient, CurveParams, InputBounds, InputPolicy};
use crate::report::CHEAT_SHEET;

/// Initial coefficients: the singular node of the cheat sheet
pub const INITIAL_PARAMS: CurveParams = CurveParams { a: -3.0, b: 2.0 };

/// One line of interactive input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SetBoth(f64, f64),
    Set(Coefficient, f64),
    Nudge(Coefficient, i32),
    Preset(usize),
    CheatSheet,
    Help,
    Quit,
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let command = match words.as_slice() {
            [] => Command::Empty,
            ["quit"] | ["exit"] | ["q"] => Command::Quit,
            ["help"] | ["?"] => Command::Help,
            ["sheet"] | ["cheat-sheet"] => Command::CheatSheet,
            ["preset", n] => {
                let index: usize = n
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid preset number: {}", n))?;
                if index == 0 || index > CHEAT_SHEET.len() {
                    anyhow::bail!("Preset must be between 1 and {}", CHEAT_SHEET.len());
                }
                Command::Preset(index)
            }
            ["up", name] => Command::Nudge(name.parse()?, 1),
            ["down", name] => Command::Nudge(name.parse()?, -1),
            [name @ ("a" | "b" | "A" | "B"), value] => {
                Command::Set(name.parse()?, parse_value(value)?)
            }
            [a, b] => Command::SetBoth(parse_value(a)?, parse_value(b)?),
            _ => anyhow::bail!("Unrecognized input: '{}' (type 'help')", line.trim()),
        };
        Ok(command)
    }
}

pub const HELP: &str = "Commands:\n  \
                        <a> <b>        set both coefficients\n  \
                        a <v> | b <v>  set one coefficient\n  \
                        up a | down b  move a coefficient by one step\n  \
                        preset <n>     load cheat sheet entry n\n  \
                        sheet          show the cheat sheet\n  \
                        help           show this help\n  \
                        quit           leave";

pub struct Session {
    params: CurveParams,
    bounds: InputBounds,
    policy: InputPolicy,
    analyzer: Analyzer,
}

impl Session {
    /// Start at `INITIAL_PARAMS`, pulled into `bounds` when the configured
    /// range does not contain them
    pub fn new(bounds: InputBounds, policy: InputPolicy, analyzer: Analyzer) -> Self {
        let params = CurveParams::new(
            bounds.clamp(INITIAL_PARAMS.a),
            bounds.clamp(INITIAL_PARAMS.b),
        );
        if params != INITIAL_PARAMS {
            tracing::info!(
                "Initial curve moved into range: a={} b={}",
                params.a,
                params.b
            );
        }
        Self {
            params,
            bounds,
            policy,
            analyzer,
        }
    }

    pub fn params(&self) -> CurveParams {
        self.params
    }

    /// Replace both coefficients
    ///
    /// On rejection the current params are kept.
    pub fn set(&mut self, a: f64, b: f64) -> Result<CurveParams> {
        self.params = self.bounds.admit_params(a, b, self.policy)?;
        Ok(self.params)
    }

    pub fn set_coefficient(&mut self, coefficient: Coefficient, value: f64) -> Result<CurveParams> {
        let value = self.bounds.admit(coefficient.as_str(), value, self.policy)?;
        self.params = match coefficient {
            Coefficient::A => self.params.with_a(value),
            Coefficient::B => self.params.with_b(value),
        };
        Ok(self.params)
    }

    /// Move one coefficient by whole steps, stopping at the range ends
    pub fn nudge(&mut self, coefficient: Coefficient, steps: i32) -> CurveParams {
        let current = match coefficient {
            Coefficient::A => self.params.a,
            Coefficient::B => self.params.b,
        };
        let target = self.bounds.clamp(current + steps as f64 * self.bounds.step);
        self.params = match coefficient {
            Coefficient::A => self.params.with_a(target),
            Coefficient::B => self.params.with_b(target),
        };
        self.params
    }

    pub fn load_preset(&mut self, number: usize) -> Result<CurveParams> {
        let entry = CHEAT_SHEET
            .get(number.wrapping_sub(1))
            .ok_or_else(|| anyhow::anyhow!("No cheat sheet entry {}", number))?;
        tracing::info!("Loading preset {}: {}", number, entry.title);
        self.set(entry.a, entry.b)
    }

    /// Apply a parameter-changing command
    ///
    /// Returns `Ok(false)` for commands that do not touch the params.
    pub fn apply(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::SetBoth(a, b) => self.set(a, b).map(|_| true),
            Command::Set(coefficient, value) => {
                self.set_coefficient(coefficient, value).map(|_| true)
            }
            Command::Nudge(coefficient, steps) => {
                self.nudge(coefficient, steps);
                Ok(true)
            }
            Command::Preset(number) => self.load_preset(number).map(|_| true),
            Command::CheatSheet | Command::Help | Command::Quit | Command::Empty => Ok(false),
        }
    }

    pub fn evaluate<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Analysis {
        self.analyzer.analyze(self.params, rng)
    }
}
