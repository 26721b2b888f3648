use anyhow::{anyhow, bail, Context, Result};
use catalog_core::persist::{save_info_index, save_metadata, OutputPaths};
use catalog_core::stats::{aggregate_terms, avg_sentence_length, stock_distribution, Summary};
use catalog_core::tokenizer::{
    english_stopwords, init_global, load_stopwords, Algorithm, IdentityStemmer, SnowballStemmer, Stem,
};
use catalog_core::{
    extract, load_corpus, normalize, Corpus, ErrorPolicy, ExtractOptions, NormalizerConfig, TextField,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "catalog-prep")]
#[command(about = "Normalize product catalog text and split documents into metadata and index records", long_about = None)]
struct Cli {
    /// Catalog file: JSON array, single JSON object, or JSONL
    #[arg(long, global = true, env = "DATA_FILE_PATH")]
    input: Option<PathBuf>,
    #[command(flatten)]
    normalizer: NormalizerArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct NormalizerArgs {
    /// Stemming language
    #[arg(long, global = true, value_enum, default_value_t = Language::English)]
    language: Language,
    /// Stopword list, one word per line (defaults to the built-in English list)
    #[arg(long, global = true)]
    stopwords: Option<PathBuf>,
    /// Keep words unstemmed
    #[arg(long, global = true, default_value_t = false)]
    no_stem: bool,
    /// Apply NFKC compatibility folding before lowercasing
    #[arg(long, global = true, default_value_t = false)]
    nfkc: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write metadata_dict.json and info_index_dict.json
    Extract {
        /// Output directory
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
        /// Skip invalid documents instead of aborting on the first one
        #[arg(long, default_value_t = false)]
        collect_errors: bool,
        /// Validate documents in parallel
        #[arg(long, default_value_t = false)]
        parallel: bool,
    },
    /// Print the most frequent normalized terms across the catalog
    Terms {
        /// Number of terms to print
        #[arg(long, default_value_t = 20)]
        top: usize,
        /// Field to include (repeatable); defaults to all text fields
        #[arg(long = "field")]
        fields: Vec<TextField>,
    },
    /// Print word-count, sentence-length and stock summaries
    Stats,
}

#[derive(Clone, Copy, ValueEnum)]
enum Language {
    Arabic,
    Danish,
    Dutch,
    English,
    Finnish,
    French,
    German,
    Greek,
    Hungarian,
    Italian,
    Norwegian,
    Portuguese,
    Romanian,
    Russian,
    Spanish,
    Swedish,
    Tamil,
    Turkish,
}

impl Language {
    fn algorithm(self) -> Algorithm {
        match self {
            Language::Arabic => Algorithm::Arabic,
            Language::Danish => Algorithm::Danish,
            Language::Dutch => Algorithm::Dutch,
            Language::English => Algorithm::English,
            Language::Finnish => Algorithm::Finnish,
            Language::French => Algorithm::French,
            Language::German => Algorithm::German,
            Language::Greek => Algorithm::Greek,
            Language::Hungarian => Algorithm::Hungarian,
            Language::Italian => Algorithm::Italian,
            Language::Norwegian => Algorithm::Norwegian,
            Language::Portuguese => Algorithm::Portuguese,
            Language::Romanian => Algorithm::Romanian,
            Language::Russian => Algorithm::Russian,
            Language::Spanish => Algorithm::Spanish,
            Language::Swedish => Algorithm::Swedish,
            Language::Tamil => Algorithm::Tamil,
            Language::Turkish => Algorithm::Turkish,
        }
    }
}

impl NormalizerArgs {
    fn build(&self) -> Result<NormalizerConfig> {
        let stopwords: HashSet<String> = match &self.stopwords {
            Some(path) => load_stopwords(path)?,
            None if matches!(self.language, Language::English) => english_stopwords(),
            None => {
                tracing::warn!("no stopword list for this language; pass --stopwords to filter stopwords");
                HashSet::new()
            }
        };
        let stemmer: Box<dyn Stem> = if self.no_stem {
            Box::new(IdentityStemmer)
        } else {
            Box::new(SnowballStemmer::new(self.language.algorithm()))
        };
        let config = NormalizerConfig::new(stopwords, stemmer).with_nfkc(self.nfkc);
        tracing::info!(
            stopwords = config.stopwords().len(),
            stem = !self.no_stem,
            nfkc = config.unicode_nfkc(),
            "normalizer configured"
        );
        Ok(config)
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let input = cli
        .input
        .clone()
        .ok_or_else(|| anyhow!("no catalog given; pass --input or set DATA_FILE_PATH"))?;
    let corpus = load_corpus(&input)?;

    match cli.command {
        Commands::Extract { output_dir, collect_errors, parallel } => {
            run_extract(&corpus, &output_dir, collect_errors, parallel)
        }
        Commands::Terms { top, fields } => {
            let config = init_global(cli.normalizer.build()?);
            let fields = if fields.is_empty() { TextField::ALL.to_vec() } else { fields };
            let out = extract(&corpus, &ExtractOptions::default())?;
            let tf = aggregate_terms(out.info_index.values(), &fields, &config);
            tracing::info!(total = tf.total(), distinct = tf.distinct(), "counted terms");
            println!("rank\tterm\tcount");
            for (rank, (term, count)) in tf.most_common(top).into_iter().enumerate() {
                println!("{}\t{}\t{}", rank + 1, term, count);
            }
            Ok(())
        }
        Commands::Stats => {
            let config = init_global(cli.normalizer.build()?);
            let out = extract(&corpus, &ExtractOptions::default())?;
            let word_counts = |field: TextField| -> Vec<f64> {
                out.info_index
                    .values()
                    .map(|record| normalize(record.text(field), &config).len() as f64)
                    .collect()
            };
            let sentence_lengths: Vec<f64> =
                out.info_index.values().map(|record| avg_sentence_length(&record.description)).collect();

            print_summary("title terms", &Summary::from_values(&word_counts(TextField::Title)));
            print_summary("description terms", &Summary::from_values(&word_counts(TextField::Description)));
            print_summary("description sentence length", &Summary::from_values(&sentence_lengths));

            let stock = stock_distribution(out.metadata.values());
            println!(
                "stock: in_stock={} out_of_stock={} out_of_stock_share={:.2}",
                stock.in_stock,
                stock.out_of_stock,
                stock.out_of_stock_share()
            );
            Ok(())
        }
    }
}

fn run_extract(corpus: &Corpus, output_dir: &Path, collect_errors: bool, parallel: bool) -> Result<()> {
    let policy = if collect_errors { ErrorPolicy::CollectAndContinue } else { ErrorPolicy::AbortOnFirst };
    let out = extract(corpus, &ExtractOptions { policy, parallel })?;

    let paths = OutputPaths::new(output_dir);
    save_metadata(&paths, &out.metadata).context("writing metadata")?;
    save_info_index(&paths, &out.info_index).context("writing info index")?;
    tracing::info!(output = %output_dir.display(), documents = out.metadata.len(), "extraction complete");

    if !out.errors.is_empty() {
        for err in &out.errors {
            tracing::error!(pid = %err.pid(), field = err.field(), "{err}");
        }
        bail!("{} of {} documents failed validation", out.errors.len(), corpus.len());
    }
    Ok(())
}

fn print_summary(label: &str, s: &Summary) {
    println!(
        "{label}: count={} mean={:.2} std={:.2} min={:.2} max={:.2}",
        s.count, s.mean, s.std, s.min, s.max
    );
}
