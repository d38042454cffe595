use anyhow::Context;
use clap::Parser;
use ctxsim::{
    build_all, BestMatchMode, Document, FeatureConfig, FeatureExtractor, FeatureKind, ModelStore,
};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::{info, Dispatch};
use tracing_subscriber::EnvFilter;

/// Context-similarity features for entity disambiguation
#[derive(Parser, Debug)]
#[command(name = "ctxsim")]
#[command(about = "Score candidate entities against document context", long_about = None)]
struct Args {
    /// Directory holding context models (<tag>.bin or <tag>.json) and word vectors
    #[arg(short, long, default_value = "./models")]
    model_dir: PathBuf,

    /// Context model tag
    #[arg(short = 'c', long, required_unless_present = "config")]
    context_model: Option<String>,

    /// Feature to compute; repeat for several
    #[arg(short, long = "feature", default_value = "bow")]
    features: Vec<FeatureKind>,

    /// Word-vector model (word2vec text format), required by dense features
    #[arg(short, long)]
    wordvec_model: Option<PathBuf>,

    /// JSON file with a list of feature configs; replaces the feature options
    #[arg(long)]
    config: Option<PathBuf>,

    /// Terms kept per bag by llm_dbow
    #[arg(long, default_value_t = ctxsim_core::DEFAULT_TOP_K)]
    top_k: usize,

    /// Pair similarity used by llm_dbow: word_vectors or literal
    #[arg(long, default_value = "word_vectors")]
    best_match: BestMatchMode,

    /// Clusters of the smaller set paired by crp_dbow
    #[arg(long, default_value_t = ctxsim_core::DEFAULT_CLUSTER_LIMIT)]
    cluster_limit: usize,

    /// Seed for crp_dbow clustering
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Documents as JSON lines; stdin when absent
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Scores as JSON lines; stdout when absent
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log level or filter directive
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn feature_configs(&self) -> anyhow::Result<Vec<FeatureConfig>> {
        if let Some(path) = &self.config {
            return FeatureConfig::load_all(path)
                .with_context(|| format!("reading feature configs from {:?}", path));
        }

        let tag = self
            .context_model
            .clone()
            .context("--context-model is required without --config")?;
        let configs = self
            .features
            .iter()
            .map(|kind| {
                let mut config = FeatureConfig::new(*kind, tag.clone());
                config.wordvec_model_path = self.wordvec_model.clone();
                config.top_k = self.top_k;
                config.best_match = self.best_match;
                config.cluster_limit = self.cluster_limit;
                config.seed = self.seed;
                config
            })
            .collect();
        Ok(configs)
    }
}

fn read_documents(input: Option<&PathBuf>) -> anyhow::Result<Vec<Document>> {
    let reader: Box<dyn BufRead> = match input {
        Some(path) => Box::new(BufReader::new(
            std::fs::File::open(path).with_context(|| format!("opening {:?}", path))?,
        )),
        None => Box::new(BufReader::new(std::io::stdin())),
    };

    let mut docs = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: Document = serde_json::from_str(&line)
            .with_context(|| format!("parsing document on line {}", i + 1))?;
        docs.push(doc);
    }
    Ok(docs)
}

fn run(args: Args, dispatch: Dispatch) -> anyhow::Result<()> {
    info!("Starting ctxsim v{}", env!("CARGO_PKG_VERSION"));
    info!("Model directory: {:?}", args.model_dir);

    let configs = args.feature_configs()?;
    let store = ModelStore::new(&args.model_dir);
    let features = build_all(&configs, &store)?;
    let extractor = FeatureExtractor::new(features).with_dispatch(dispatch);

    let docs = read_documents(args.input.as_ref())?;
    info!("Scoring {} documents with {} features", docs.len(), configs.len());
    let scores = extractor.extract_batch(&docs)?;

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            std::fs::File::create(path).with_context(|| format!("creating {:?}", path))?,
        ),
        None => Box::new(std::io::stdout()),
    };
    let mut writer = BufWriter::new(writer);
    let mut count = 0usize;
    for score in scores.iter().flatten() {
        serde_json::to_writer(&mut writer, score)?;
        writer.write_all(b"\n")?;
        count += 1;
    }
    writer.flush()?;

    info!("Wrote {} scores", count);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    let main_dispatch = dispatch.clone();

    tracing::dispatcher::with_default(&main_dispatch, || run(args, dispatch))
}
