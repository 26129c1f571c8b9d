use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command, builder::EnumValueParser, value_parser};
use env_logger::{Builder, Env};
use serde::Deserialize;
use std::io::Write;

use crate::common::errors::BayesError;
use crate::inference::{CountGranularity, InferenceMethod, SamplingConfig};

/// These options define the inputs from the user.
#[derive(Deserialize, Clone, Debug)]
pub struct CommandLineOptions {
    pub scenario_name: String,
    pub network_file: Option<String>,
    /// `None` runs every method.
    pub method: Option<InferenceMethod>,
    pub query: Option<String>,
    pub evidence: Vec<(String, bool)>,
    pub samples: Option<usize>,
    pub prior_samples: usize,
    pub report_file: Option<String>,
    pub sampling: SamplingConfig,
}

/// Installs the `LEVEL [file:line] message` logger, `info` unless
/// `RUST_LOG` says otherwise. Later calls are no-ops.
pub fn init_logging() {
    let _ = Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let file = record.file().unwrap_or("unknown");
            let line = record.line().unwrap_or(0);
            writeln!(
                buf,
                "{} [{}:{}] {}",
                record.level(),
                file,
                line,
                record.args()
            )
        })
        .try_init();
}

/// Parses `Name=true,Other=false` into observed values.
pub fn parse_evidence(text: &str) -> std::result::Result<Vec<(String, bool)>, BayesError> {
    text.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (name, value) = pair.split_once('=').ok_or_else(|| {
                BayesError::InvalidConfig(format!("evidence '{}' is not Name=value", pair))
            })?;
            let value = match value.trim().to_ascii_lowercase().as_str() {
                "true" | "t" | "1" => true,
                "false" | "f" | "0" => false,
                other => {
                    return Err(BayesError::InvalidConfig(format!(
                        "evidence value '{}' for '{}' is not a boolean",
                        other,
                        name.trim()
                    )));
                }
            };
            Ok((name.trim().to_string(), value))
        })
        .collect()
}

pub fn build_command() -> Command {
    Command::new("BAYESNET")
        .version("0.1")
        .about("Approximate inference in discrete Bayesian networks by sampling.")
        .arg(
            Arg::new("scenario_name")
                .long("scenario")
                .value_name("STRING")
                .help("Built-in network to query: 'wet_grass' or 'rain_grass'")
                .default_value("wet_grass"),
        )
        .arg(
            Arg::new("network_file")
                .long("network")
                .value_name("FILE")
                .help("JSON network definition; overrides --scenario"),
        )
        .arg(
            Arg::new("config_file")
                .long("config")
                .value_name("FILE")
                .help("JSON sampling configuration; flags below override it"),
        )
        .arg(
            Arg::new("method")
                .long("method")
                .value_parser(EnumValueParser::<InferenceMethod>::new())
                .help("Inference method; every method runs when omitted"),
        )
        .arg(
            Arg::new("query")
                .long("query")
                .value_name("NODE")
                .help("Query node name; the built-in demo queries run when omitted"),
        )
        .arg(
            Arg::new("evidence")
                .long("evidence")
                .value_name("NAME=BOOL,...")
                .help("Observed values, e.g. WetGrass=true,PlayOutside=false")
                .requires("query"),
        )
        .arg(
            Arg::new("samples")
                .long("samples")
                .value_name("NUMBER")
                .value_parser(value_parser!(usize))
                .help("Number of samples (sweeps for MCMC) per query"),
        )
        .arg(
            Arg::new("prior_samples")
                .long("prior_samples")
                .value_name("NUMBER")
                .value_parser(value_parser!(usize))
                .help("Prior samples to print before the queries")
                .default_value("5"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("NUMBER")
                .value_parser(value_parser!(u64))
                .help("Seed for reproducible estimates"),
        )
        .arg(
            Arg::new("burn_in")
                .long("burn_in")
                .value_name("NUMBER")
                .value_parser(value_parser!(usize))
                .help("MCMC sweeps discarded before counting"),
        )
        .arg(
            Arg::new("granularity")
                .long("granularity")
                .value_parser(EnumValueParser::<CountGranularity>::new())
                .help("MCMC counting: once per 'sweep' or after every 'variable' update"),
        )
        .arg(
            Arg::new("parallel")
                .long("parallel")
                .help("Run independent trials on all cores")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("chunk_size")
                .long("chunk_size")
                .value_name("NUMBER")
                .value_parser(value_parser!(usize))
                .help("Trials per parallel job"),
        )
        .arg(
            Arg::new("timeout_ms")
                .long("timeout_ms")
                .value_name("MILLIS")
                .value_parser(value_parser!(u64))
                .help("Abort a query after this many milliseconds"),
        )
        .arg(
            Arg::new("report_file")
                .long("report")
                .value_name("FILE")
                .help("Write a JSON report of every estimate to this file"),
        )
}

pub fn options_from_matches(matches: &ArgMatches) -> Result<CommandLineOptions> {
    let mut sampling = match matches.get_one::<String>("config_file") {
        Some(path) => SamplingConfig::from_json_file(path)
            .with_context(|| format!("Failed to load sampling config from {}", path))?,
        None => SamplingConfig::default(),
    };
    if let Some(seed) = matches.get_one::<u64>("seed") {
        sampling.seed = Some(*seed);
    }
    if let Some(burn_in) = matches.get_one::<usize>("burn_in") {
        sampling.burn_in = *burn_in;
    }
    if let Some(granularity) = matches.get_one::<CountGranularity>("granularity") {
        sampling.granularity = *granularity;
    }
    if matches.get_flag("parallel") {
        sampling.parallel = true;
    }
    if let Some(chunk_size) = matches.get_one::<usize>("chunk_size") {
        sampling.chunk_size = *chunk_size;
    }
    if let Some(timeout_ms) = matches.get_one::<u64>("timeout_ms") {
        sampling.timeout_ms = Some(*timeout_ms);
    }
    sampling.validate()?;

    let evidence = match matches.get_one::<String>("evidence") {
        Some(text) => parse_evidence(text)?,
        None => Vec::new(),
    };

    Ok(CommandLineOptions {
        scenario_name: matches
            .get_one::<String>("scenario_name")
            .cloned()
            .unwrap_or_else(|| "wet_grass".to_string()),
        network_file: matches.get_one::<String>("network_file").cloned(),
        method: matches.get_one::<InferenceMethod>("method").copied(),
        query: matches.get_one::<String>("query").cloned(),
        evidence,
        samples: matches.get_one::<usize>("samples").copied(),
        prior_samples: matches.get_one::<usize>("prior_samples").copied().unwrap_or(5),
        report_file: matches.get_one::<String>("report_file").cloned(),
        sampling,
    })
}

pub fn parse_configuration_options() -> Result<CommandLineOptions> {
    init_logging();
    let matches = build_command().get_matches();
    options_from_matches(&matches)
}
