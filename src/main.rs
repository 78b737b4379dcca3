use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use perfgraph::pipeline::{CypherSink, GraphSink, JsonGraphSink, Pipeline, SliceSource, TurtleSink};
use perfgraph::{EntityKind, Vocabulary};
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Turtle triples
    Turtle,
    /// Property-graph JSON (nodes/rels documents)
    Json,
    /// Cypher write statements
    Cypher,
}

/// Convert archive entity records into an RDF graph and project it
#[derive(Parser, Debug)]
#[command(name = "perfgraph", version, about)]
struct Args {
    /// Entity type of the input records
    #[arg(value_parser = parse_entity_kind)]
    entity_type: EntityKind,

    /// Input file: a JSON array of records, or one JSON record per line
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "turtle")]
    format: OutputFormat,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Base URI for all minted identifiers
    #[arg(long, default_value = perfgraph::vocab::DEFAULT_BASE_URI)]
    base_uri: String,

    /// Records per conversion batch
    #[arg(long, default_value_t = perfgraph::pipeline::DEFAULT_BATCH_SIZE)]
    batch_size: usize,
}

fn parse_entity_kind(s: &str) -> std::result::Result<EntityKind, String> {
    EntityKind::from_name(s).ok_or_else(|| {
        format!(
            "unknown entity type '{}' (expected one of: {})",
            s,
            EntityKind::ALL.map(|k| k.name()).join(", ")
        )
    })
}

fn read_records(path: &PathBuf) -> Result<Vec<serde_json::Value>> {
    let mut text = String::new();
    File::open(path)
        .with_context(|| format!("cannot open {}", path.display()))?
        .read_to_string(&mut text)?;

    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        let records: Vec<serde_json::Value> =
            serde_json::from_str(trimmed).context("input is not a JSON array of records")?;
        Ok(records)
    } else {
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).context("input line is not a JSON record"))
            .collect()
    }
}

fn run(args: Args) -> Result<()> {
    let vocab = Vocabulary::new(&args.base_uri)
        .with_context(|| format!("invalid base URI '{}'", args.base_uri))?;
    let records = read_records(&args.input)?;
    if records.is_empty() {
        bail!("no records in {}", args.input.display());
    }

    let mut source = SliceSource::new(records, args.batch_size.max(1));
    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let mut sink: Box<dyn GraphSink> = match args.format {
        OutputFormat::Turtle => Box::new(TurtleSink::new(writer, &vocab)),
        OutputFormat::Json => Box::new(JsonGraphSink::new(writer, &vocab)),
        OutputFormat::Cypher => Box::new(CypherSink::new(writer, &vocab)),
    };

    let pipeline =
        Pipeline::new(vocab, args.entity_type).with_batch_size(args.batch_size);
    let stats = pipeline.run(&mut source, sink.as_mut())?;

    if stats.converted == 0 {
        bail!("all {} records were skipped", stats.skipped);
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    run(Args::parse())
}
