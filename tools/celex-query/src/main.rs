use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use celex_protocol::{LemmaId, Lexicon, RecordKind, WordformId};
use celex_store::{Celex, CelexConfig};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Queries a CELEX lexical database directory")]
struct Cli {
    /// Directory holding the `<tag>/<tag>.cd` files.
    #[arg(short, long, env = "CELEX_ROOT", value_name = "DIR")]
    root: PathBuf,

    /// Sub-databases to merge, in order: s(yntax) m(orphology) f(requency) p(honology).
    #[arg(short, long, default_value = "smfp")]
    dbs: String,

    /// Log progress to stderr (`RUST_LOG` takes precedence).
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Lemmas with this head
    Lemma { head: String },
    /// Lemma by id
    LemmaId { id: u32 },
    /// Wordforms spelled this way
    Wordform { word: String },
    /// Wordform by id
    WordformId { id: u32 },
    /// Wordforms of a lemma, in table order
    WordformsOf { lemma_id: u32 },
    /// Table sizes
    Stats,
    /// Documentation of a column, e.g. `doc lemma CobLog`
    Doc { kind: String, field: String },
    /// Loads and links every table, then writes an rkyv snapshot
    Export {
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
}

#[derive(Serialize)]
struct FieldDoc<'a> {
    kind: &'static str,
    field: &'a str,
    doc: &'static str,
}

#[derive(Serialize)]
struct Stats {
    databases: String,
    lemmas: usize,
    distinct_heads: usize,
    wordforms: usize,
    distinct_words: usize,
    links: usize,
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "info" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

fn database_codes(config: &CelexConfig) -> String {
    config.databases.iter().map(|db| db.code()).collect()
}

fn field_doc<'a>(kind: &str, field: &'a str) -> anyhow::Result<FieldDoc<'a>> {
    let Some(kind) = RecordKind::from_name(kind) else {
        bail!("unknown record kind {kind:?}, expected lemma, wordform, parse or pronunciation");
    };
    let doc = kind
        .field_doc(field)
        .ok_or_else(|| anyhow!("{kind} records have no column {field:?}"))?;
    Ok(FieldDoc { kind: kind.name(), field, doc })
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Command::Doc { kind, field } = &cli.command {
        return print_json(&field_doc(kind, field)?);
    }

    let config = CelexConfig::new(&cli.root).with_databases(&cli.dbs)?;
    let celex = Celex::open(config)?;

    match cli.command {
        Command::Lemma { head } => print_json(&celex.lemma_lookup(&head)?),
        Command::LemmaId { id } => print_json(celex.lemma_by_id(LemmaId(id))?),
        Command::Wordform { word } => print_json(&celex.wordform_lookup(&word)?),
        Command::WordformId { id } => print_json(celex.wordform_by_id(WordformId(id))?),
        Command::WordformsOf { lemma_id } => {
            let lemma = celex.lemma_by_id(LemmaId(lemma_id))?;
            print_json(&celex.lemma_to_wordforms(lemma)?)
        }
        Command::Stats => {
            let lemmas = celex.ensure_lemmas_loaded()?;
            let wordforms = celex.ensure_wordforms_loaded()?;
            let links = celex.ensure_linked()?;
            print_json(&Stats {
                databases: database_codes(celex.config()),
                lemmas: lemmas.len(),
                distinct_heads: lemmas.distinct_forms(),
                wordforms: wordforms.len(),
                distinct_words: wordforms.distinct_forms(),
                links: links.edge_count(),
            })
        }
        Command::Doc { .. } => Ok(()),
        Command::Export { output } => {
            celex.ensure_linked()?;
            let lexicon = Lexicon {
                version: Lexicon::VERSION,
                databases: database_codes(celex.config()),
                lemmas: celex.lemmas()?.to_vec(),
                wordforms: celex.wordforms()?.to_vec(),
            };
            let bytes = rkyv::to_bytes::<_, 4096>(&lexicon)
                .map_err(|err| anyhow!("failed to serialize snapshot: {err:?}"))?;
            fs::write(&output, &bytes)
                .with_context(|| format!("failed to write {}", output.display()))?;
            info!(path = %output.display(), bytes = bytes.len(), "wrote snapshot");
            Ok(())
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}
