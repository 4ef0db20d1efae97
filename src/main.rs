use std::{path::PathBuf, process::ExitCode, time::Instant};

use clap::{Parser, Subcommand};
use hmmtag::{
    tools::{dictionary, nonstandard, stats::DatasetStats},
    Corpus, DecoderConfig, EstimatorConfig, HmmModel, HmmTagger, Smoothing, Tagger,
};

/// Train and run a hidden Markov model part-of-speech tagger
#[derive(Debug, Parser)]
#[command(version)]
#[command(propagate_version = true)]
struct Argv {
    /// raise the log level (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// estimate a model from a word/tag corpus
    Train(EstimatorConfig),
    /// tag one sentence given as separate tokens
    Tag(DecoderConfig),
    /// report the performance of the model on tagged corpora
    Eval {
        /// read a model from a file (MODEL)
        #[arg(short, long, value_name = "MODEL")]
        model: PathBuf,
        /// compare parent tags (NOUN, VERB, ADJ, ADV) instead of full tags
        #[arg(long)]
        coarse: bool,
        #[command(flatten)]
        smoothing: Smoothing,
        #[arg(required = true, value_name = "CORPUS")]
        datasets: Vec<PathBuf>,
    },
    /// print line, word and tag counts of a corpus
    Stats {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// merge two JSON dictionaries, preferring the primary one on conflicts
    Merge {
        #[arg(long)]
        primary: PathBuf,
        #[arg(long)]
        secondary: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// replace {"DEFAULT": ...} entries of a JSON dictionary by their default
    Normalize {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// list words of a corpus that need dedicated tokenizer rules
    Nonstandard {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn run(command: Command) -> hmmtag::Result<()> {
    match command {
        Command::Train(config) => {
            let report = hmmtag::train(&config)?;
            println!("{report}");
        }
        Command::Tag(config) => {
            let prediction = hmmtag::decode(&config)?;
            for (word, tag) in config.tokens.iter().zip(&prediction.tags) {
                println!("{word}\t{tag}");
            }
            log::info!("log probability: {}", prediction.log_prob);
        }
        Command::Eval {
            model,
            coarse,
            smoothing,
            datasets,
        } => {
            let model = HmmModel::from_path(&model)?;
            let tagger = HmmTagger::new(&model, smoothing)?;
            for fpath in datasets {
                let begin = Instant::now();
                let corpus = Corpus::read_file(&fpath)?;
                let evaluation = hmmtag::evaluate_corpus(&tagger, &corpus, coarse)?;
                println!("{}:\n{evaluation}", fpath.display());
                let sec = begin.elapsed().as_secs_f64();
                println!(
                    "Elapsed time: {sec:.6} [sec] ({:.1} [instance/sec])",
                    corpus.len() as f64 / sec.max(f64::EPSILON)
                );
            }
            log::debug!("tagger labels: {:?}", tagger.labels());
        }
        Command::Stats { input } => {
            println!("{}", DatasetStats::from_path(&input)?);
        }
        Command::Merge {
            primary,
            secondary,
            output,
        } => {
            let (merged, report) =
                dictionary::merge(&dictionary::load(&primary)?, &dictionary::load(&secondary)?);
            dictionary::save(&merged, &output)?;
            println!("{report}");
            println!("Saved merged dictionary to: {}", output.display());
        }
        Command::Normalize { input, output } => {
            let (dict, report) = dictionary::normalize(dictionary::load(&input)?);
            dictionary::save(&dict, &output)?;
            println!("{report}");
            println!("Saved cleaned dictionary to: {}", output.display());
        }
        Command::Nonstandard { input, output } => {
            let n = nonstandard::extract(&input, &output)?;
            println!("Saved {n} non-standard tokens to: {}", output.display());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let argv = Argv::parse();
    let level = match argv.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    log::debug!("argv: {:?}", argv);

    match run(argv.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
