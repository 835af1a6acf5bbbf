//! Command line surface for the `breaks` binary.
use super::*;
use anyhow::Context;
use clap::Parser;
use clap::Subcommand;
use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;

/// Environment override for the log level.
const LOG_VAR: &str = "JENKS_LOG";

#[derive(Parser, Debug)]
#[command(author, version, about = "Jenks natural breaks classification", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub mode: Mode,
    /// File of numbers separated by whitespace or commas (stdin when omitted)
    #[arg(short, long, global = true)]
    pub input: Option<PathBuf>,
    /// Also report boundaries rounded without changing class membership
    #[arg(short, long, global = true)]
    pub round: bool,
    /// Print JSON instead of plain text
    #[arg(long, global = true)]
    pub json: bool,
    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Mode {
    #[command(about = "Classify into a fixed number of classes", alias = "k")]
    Classes {
        #[arg(required = true)]
        k: usize,
    },
    #[command(about = "Classify into every class count from 2 up to a maximum")]
    All {
        #[arg(default_value_t = DEFAULT_MAX_CLASSES)]
        max: usize,
    },
    #[command(about = "Find the fewest classes reaching a goodness of variance fit")]
    Best {
        #[arg(long, default_value_t = DEFAULT_MAX_CLASSES)]
        max: usize,
        #[arg(long, default_value_t = DEFAULT_MIN_GVF)]
        gvf: Fitness,
    },
}

impl Args {
    /// `JENKS_LOG` wins over `-v` flags; warnings only by default.
    pub fn level(&self) -> log::LevelFilter {
        std::env::var(LOG_VAR)
            .ok()
            .and_then(|level| log::LevelFilter::from_str(&level).ok())
            .unwrap_or(match self.verbose {
                0 => log::LevelFilter::Warn,
                1 => log::LevelFilter::Info,
                2 => log::LevelFilter::Debug,
                _ => log::LevelFilter::Trace,
            })
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let data = self.read()?;
        log::info!("read {} observations", data.len());
        let summaries = self.classify(&data)?;
        let output = match (self.json, &self.mode) {
            (true, Mode::All { .. }) => serde_json::to_string_pretty(&summaries)?,
            (true, _) => serde_json::to_string_pretty(&summaries[0])?,
            (false, _) => summaries
                .iter()
                .map(Summary::to_string)
                .collect::<Vec<String>>()
                .join("\n"),
        };
        println!("{}", output);
        Ok(())
    }

    /// Validates the request, classifies, and summarizes each classing.
    pub fn classify(&self, data: &[Value]) -> anyhow::Result<Vec<Summary>> {
        anyhow::ensure!(!data.is_empty(), "no observations to classify");
        let classings = match self.mode {
            Mode::Classes { k } => {
                anyhow::ensure!(k >= 1, "at least one class is required");
                vec![natural_breaks(data, k)]
            }
            Mode::All { max } => {
                anyhow::ensure!(max >= 2, "class counts start at 2");
                all_natural_breaks(data, max)
            }
            Mode::Best { max, gvf } => {
                anyhow::ensure!(max >= 2, "class counts start at 2");
                anyhow::ensure!(gvf > 0. && gvf <= 1., "gvf threshold must lie in (0, 1]");
                vec![best_natural_breaks(data, max, gvf)?]
            }
        };
        anyhow::ensure!(!classings.is_empty(), "fewer than 2 distinct observations");
        classings
            .into_iter()
            .map(|breaks| Summary::try_from((data, breaks)))
            .map(|summary| match self.round {
                true => summary.map(|s| s.with_rounding(data)),
                false => summary,
            })
            .collect()
    }

    fn read(&self) -> anyhow::Result<Vec<Value>> {
        let text = match self.input {
            Some(ref path) => std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?,
            None => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("reading stdin")?;
                text
            }
        };
        parse(&text)
    }
}

/// Numbers separated by any mix of whitespace and commas.
pub fn parse(text: &str) -> anyhow::Result<Vec<Value>> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<Value>()
                .with_context(|| format!("invalid number {:?}", token))
                .and_then(|x| match x.is_finite() {
                    true => Ok(x),
                    false => Err(anyhow::anyhow!("non-finite number {:?}", token)),
                })
        })
        .collect()
}
