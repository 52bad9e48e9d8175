use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use jury_selection::{draw_panel, JurySelector, Ladder, SelectorConfig, Tier, Weighting};
use logging::{init_logging, LogOutput};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::Level;

mod logging;

const EXAMPLE_STAKE: [f64; 7] = [100.0, 345.0, 321.0, 678.0, 245.0, 400.0, 11.0];
const EXAMPLE_HONESTY: [f64; 7] = [1.0, 2.0, 0.0, 4.0, 1.0, -5.0, 3.0];

#[derive(Parser, Debug)]
#[clap(args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// TOML file with an optional `[selector]` table (panel size, tiers) and an optional `[pool]` table (stake, honesty).
    config_path: Option<PathBuf>,

    /// Tokens staked by each candidate, comma separated. Overrides the pool in the config file.
    #[clap(long, value_delimiter = ',', allow_hyphen_values = true, env)]
    stake: Vec<f64>,

    /// Honesty score of each candidate, comma separated. Negative scores are ignored.
    #[clap(long, value_delimiter = ',', allow_hyphen_values = true, env)]
    honesty: Vec<f64>,

    /// Seed for a reproducible draw. If not provided the OS-seeded thread generator is used.
    #[clap(long, env)]
    seed: Option<u64>,

    /// Print each candidate's rung and chance of being picked by a single draw.
    #[clap(long)]
    show_odds: bool,

    #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    #[clap(long, value_enum, default_value_t = LogOutput::Console, env)]
    logs: LogOutput,

    #[clap(long, default_value_t = Level::WARN, env)]
    log_level: Level,
}

#[derive(Parser, Debug)]
enum Commands {
    // Prints the help, optionally as markdown. Used for docs generation.
    #[clap(hide = true)]
    PrintAllHelp {
        #[arg(long, required = true)]
        markdown: bool,
    },
}

#[derive(Clone, Debug, Copy, ValueEnum, PartialEq)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Deserialize, Default, Debug)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    selector: SelectorConfig,
    pool: Option<Pool>,
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
struct Pool {
    stake: Vec<f64>,
    honesty: Vec<f64>,
}

impl Pool {
    fn example() -> Self {
        Self {
            stake: EXAMPLE_STAKE.to_vec(),
            honesty: EXAMPLE_HONESTY.to_vec(),
        }
    }
}

#[derive(Serialize, Debug)]
struct Report {
    pool_size: usize,
    tier: Tier,
    weighting: Weighting,
    ladder: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    odds: Option<Vec<f64>>,
    jurors: Vec<usize>,
}

fn read_config(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {path:?}"))?;
    toml::from_str(&contents).with_context(|| format!("failed to parse config file {path:?}"))
}

fn resolve_pool(stake: Vec<f64>, honesty: Vec<f64>, from_config: Option<Pool>) -> Result<Pool> {
    match (stake.is_empty(), honesty.is_empty()) {
        (false, false) => Ok(Pool { stake, honesty }),
        (true, true) => Ok(from_config.unwrap_or_else(Pool::example)),
        _ => bail!("--stake and --honesty must be given together"),
    }
}

fn run(args: Args) -> Result<Report> {
    let config = match &args.config_path {
        Some(path) => read_config(path)?,
        None => ConfigFile::default(),
    };
    let selector =
        JurySelector::from_config(config.selector).context("invalid selector config")?;
    let pool = resolve_pool(args.stake, args.honesty, config.pool)?;

    let ladder = selector.compute_ladder(&pool.stake, &pool.honesty)?;

    let mut rng: Box<dyn RngCore> = match args.seed {
        Some(seed) => Box::new(ChaCha8Rng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    };
    let jurors = draw_panel(&ladder, selector.panel_size(), &mut *rng)?;

    tracing::info!(
        pool_size = ladder.len(),
        weighting = %ladder.weighting(),
        seed = args.seed,
        ?jurors,
        "Selected jury"
    );

    Ok(report(&ladder, jurors, args.show_odds))
}

fn report(ladder: &Ladder, jurors: Vec<usize>, show_odds: bool) -> Report {
    Report {
        pool_size: ladder.len(),
        tier: *ladder.tier(),
        weighting: ladder.weighting(),
        ladder: ladder.values(),
        odds: show_odds.then(|| ladder.odds()),
        jurors,
    }
}

fn print_text(report: &Report) {
    println!("Pool of {} candidates, {}", report.pool_size, report.tier);
    println!("{}", report.weighting);
    if let Some(odds) = &report.odds {
        for (index, (rung, odds)) in report.ladder.iter().zip(odds).enumerate() {
            println!("  #{index:<5} rung {rung:>12.2}  odds {:>7.3}%", odds * 100.0);
        }
    }
    println!("Selected jurors: {:?}", report.jurors);
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(Commands::PrintAllHelp { markdown }) = args.command {
        // This is a required argument for the time being.
        assert!(markdown);

        let () = clap_markdown::print_help_markdown::<Args>();

        return Ok(());
    }

    init_logging(args.logs, args.log_level)?;
    let output = args.output;

    let report = run(args)?;
    match output {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Args {
        Args::parse_from(std::iter::once("select-jury").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_pool_flags() {
        let args = parse(&["--stake", "1,2,3", "--honesty", "1,-5,0", "--seed", "7"]);
        assert_eq!(args.stake, vec![1.0, 2.0, 3.0]);
        assert_eq!(args.honesty, vec![1.0, -5.0, 0.0]);
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.output, OutputFormat::Text);
    }

    #[test]
    fn test_defaults_to_example_pool() {
        let pool = resolve_pool(vec![], vec![], None).unwrap();
        assert_eq!(pool, Pool::example());
    }

    #[test]
    fn test_flags_override_config_pool() {
        let from_config = Pool {
            stake: vec![1.0],
            honesty: vec![1.0],
        };
        let pool = resolve_pool(vec![2.0, 3.0], vec![0.0, 1.0], Some(from_config)).unwrap();
        assert_eq!(pool.stake, vec![2.0, 3.0]);
    }

    #[test]
    fn test_half_a_pool_is_rejected() {
        assert!(resolve_pool(vec![1.0], vec![], None).is_err());
    }

    #[test]
    fn test_config_file() {
        let config: ConfigFile = toml::from_str(
            r#"
            [selector]
            panel_size = 4

            [pool]
            stake = [10, 20.5]
            honesty = [-1, 3]
            "#,
        )
        .unwrap();
        assert_eq!(config.selector.panel_size, 4);
        assert_eq!(
            config.pool,
            Some(Pool {
                stake: vec![10.0, 20.5],
                honesty: vec![-1.0, 3.0],
            })
        );
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let path: PathBuf = [env!("CARGO_MANIFEST_DIR"), "config", "example.toml"]
            .iter()
            .collect();
        let config = read_config(&path).unwrap();
        assert_eq!(config.selector, SelectorConfig::default());
        assert_eq!(config.pool, Some(Pool::example()));
    }

    #[test]
    fn test_seeded_run_is_reproducible() {
        let first = run(parse(&["--seed", "42", "--show-odds"])).unwrap();
        let second = run(parse(&["--seed", "42"])).unwrap();
        assert_eq!(first.jurors, second.jurors);
        assert_eq!(first.jurors.len(), 3);
        assert_eq!(first.odds.map(|o| o.len()), Some(7));
        assert_eq!(second.odds, None);
        assert_eq!(first.ladder.last(), Some(&10000.0));
    }
}
