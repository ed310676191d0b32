use clap::{builder::EnumValueParser, value_parser, Arg, ArgMatches, Command, ValueEnum};
use env_logger::{Builder, Env};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::{io::Write, path::{Path, PathBuf}};

use crate::bayesnet::common::error::{NetworkError, Result};
use crate::bayesnet::generator::factory::{MorphologyParams, MORPHOLOGIES};

/// Settings for one synthetic network. Field defaults match the command line defaults.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub num_vars: usize,
    pub arity: usize,
    pub morphology: String,
    #[serde(flatten)]
    pub params: MorphologyParams,
    /// Fixed seed for reproducible output; drawn from entropy when absent.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            num_vars: 5,
            arity: 2,
            morphology: "chain".to_string(),
            params: MorphologyParams::default(),
            seed: None,
        }
    }
}

impl GeneratorConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| NetworkError::Io {
            context: format!("reading config {}", path.display()),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Output of the BIF converter.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize, ValueEnum)]
pub enum OutputFormat {
    /// The tabular exchange format
    #[serde(rename = "tabular")]
    Tabular,

    /// JSON view of the parsed network
    #[serde(rename = "json")]
    Json,
}

#[derive(Clone, Debug)]
pub struct ConverterOptions {
    pub input: PathBuf,
    pub strict: bool,
    pub format: OutputFormat,
}

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

pub fn generator_command() -> Command {
    Command::new("generate_network")
        .version("0.1")
        .about("Generate random Bayesian networks in the tabular exchange format.")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("JSON file with generator settings; flags given here override it"),
        )
        .arg(
            Arg::new("morphology")
                .long("morphology")
                .value_name("STRING")
                .help(format!("Morphology: {}", MORPHOLOGIES.join(", ")))
                .required_unless_present("config"),
        )
        .arg(
            Arg::new("num_vars")
                .long("num_vars")
                .value_name("NUMBER")
                .value_parser(value_parser!(usize))
                .help("Number of variables in the network (default: 5)"),
        )
        .arg(
            Arg::new("arity")
                .long("arity")
                .value_name("NUMBER")
                .value_parser(value_parser!(usize))
                .help("Domain size of each variable (default: 2)"),
        )
        .arg(
            Arg::new("levels")
                .long("levels")
                .value_name("NUMBER")
                .value_parser(value_parser!(usize))
                .help("Maximum levels for full_tree or inverse_tree (default: 3)"),
        )
        .arg(
            Arg::new("branching")
                .long("branching")
                .value_name("NUMBER")
                .value_parser(value_parser!(usize))
                .help("Maximum children per node for full_tree or inverse_tree (default: 2)"),
        )
        .arg(
            Arg::new("fullness")
                .long("fullness")
                .value_name("FLOAT")
                .value_parser(value_parser!(f64))
                .help("Between 0 (chain) and 1 (full tree) for tree morphologies (default: 1.0)"),
        )
        .arg(
            Arg::new("extra_edge_prob")
                .long("extra_edge_prob")
                .value_name("FLOAT")
                .value_parser(value_parser!(f64))
                .help("Probability of each extra random_dag edge (default: 0.3)"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("NUMBER")
                .value_parser(value_parser!(u64))
                .help("Seed for reproducible output"),
        )
}

pub fn generator_config_from_matches(matches: &ArgMatches) -> Result<GeneratorConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => GeneratorConfig::from_json_file(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(morphology) = matches.get_one::<String>("morphology") {
        config.morphology = morphology.clone();
    }
    if let Some(&num_vars) = matches.get_one::<usize>("num_vars") {
        config.num_vars = num_vars;
    }
    if let Some(&arity) = matches.get_one::<usize>("arity") {
        config.arity = arity;
    }
    if let Some(&levels) = matches.get_one::<usize>("levels") {
        config.params.levels = levels;
    }
    if let Some(&branching) = matches.get_one::<usize>("branching") {
        config.params.branching = branching;
    }
    if let Some(&fullness) = matches.get_one::<f64>("fullness") {
        config.params.fullness = fullness;
    }
    if let Some(&extra_edge_prob) = matches.get_one::<f64>("extra_edge_prob") {
        config.params.extra_edge_prob = extra_edge_prob;
    }
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        config.seed = Some(seed);
    }
    Ok(config)
}

pub fn parse_generator_options() -> Result<GeneratorConfig> {
    init_logging();
    generator_config_from_matches(&generator_command().get_matches())
}

pub fn converter_command() -> Command {
    Command::new("bif_convert")
        .version("0.1")
        .about("Convert a BIF network description to the tabular exchange format.")
        .arg(
            Arg::new("input")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("BIF file to convert")
                .required(true),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Fail on malformed headers and rows instead of skipping them")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_parser(EnumValueParser::<OutputFormat>::new())
                .help("Output format: 'tabular' or 'json'")
                .default_value("tabular"),
        )
}

pub fn converter_options_from_matches(matches: &ArgMatches) -> ConverterOptions {
    ConverterOptions {
        input: matches
            .get_one::<PathBuf>("input")
            .cloned()
            .unwrap_or_default(),
        strict: matches.get_flag("strict"),
        format: matches
            .get_one::<OutputFormat>("format")
            .copied()
            .unwrap_or(OutputFormat::Tabular),
    }
}

pub fn parse_converter_options() -> ConverterOptions {
    init_logging();
    converter_options_from_matches(&converter_command().get_matches())
}

pub fn summary_command() -> Command {
    Command::new("bayesgen")
        .version("0.1")
        .about("Summarize a network stored in the tabular exchange format.")
        .arg(
            Arg::new("input")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Exchange-format file to read")
                .required(true),
        )
}

pub fn parse_summary_input() -> PathBuf {
    init_logging();
    summary_command()
        .get_matches()
        .get_one::<PathBuf>("input")
        .cloned()
        .unwrap_or_default()
}
