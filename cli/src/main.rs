use anyhow::{Context, Result};
use clap::Parser;
use search_core::{
    DocId, IndexBuilder, ScoredDocument, SearchConfig, StopWords, MAX_RESULT_DOCUMENT_COUNT,
};
use tracing_subscriber::{fmt, EnvFilter};

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "search-cli")]
#[command(about = "Rank one-line documents against a query with TF-IDF", long_about = None)]
struct Cli {
    /// Read the corpus from this file instead of stdin
    #[arg(long)]
    corpus: Option<PathBuf>,
    /// Query text; when absent the line after the documents is used
    #[arg(long)]
    query: Option<String>,
    /// Maximum number of results to print
    #[arg(long, default_value_t = MAX_RESULT_DOCUMENT_COUNT)]
    max_results: usize,
    /// Print results as a JSON array
    #[arg(long, default_value_t = false)]
    json: bool,
}

/// Stop-word line, declared document count, the documents, then an optional query line.
#[derive(Debug, Default, PartialEq)]
struct Corpus {
    stop_words: String,
    declared_docs: usize,
    documents: Vec<String>,
    query: Option<String>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    let corpus = match &cli.corpus {
        Some(path) => {
            let f = File::open(path)
                .with_context(|| format!("opening corpus {}", path.display()))?;
            read_corpus(BufReader::new(f))?
        }
        None => read_corpus(io::stdin().lock())?,
    };

    let config = SearchConfig::new(StopWords::from_text(&corpus.stop_words))
        .with_max_results(cli.max_results);
    let mut builder = IndexBuilder::new(config);
    // read_corpus pads missing lines, so this only fails if that ever changes
    builder.expect_document_count(corpus.declared_docs);
    for (doc_id, text) in corpus.documents.iter().enumerate() {
        builder.add_document_with_id(DocId::try_from(doc_id)?, text)?;
    }
    let index = builder.build().context("building index")?;

    let query = cli.query.or(corpus.query).unwrap_or_default();
    let results = index
        .find_top_documents(&query)
        .with_context(|| format!("searching for {query:?}"))?;
    tracing::info!(hits = results.len(), "search complete");

    let mut out = io::stdout().lock();
    if cli.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&results)?)?;
    } else {
        for doc in &results {
            writeln!(out, "{}", format_result(doc))?;
        }
    }
    Ok(())
}

fn read_corpus<R: BufRead>(reader: R) -> Result<Corpus> {
    let mut lines = reader.lines();
    let stop_words = lines.next().transpose()?.unwrap_or_default();
    let count_line = lines.next().transpose()?.unwrap_or_default();
    let declared_docs = parse_document_count(&count_line)
        .with_context(|| format!("invalid document count {count_line:?}"))?;

    let mut documents = Vec::with_capacity(declared_docs.min(1024));
    for doc_id in 0..declared_docs {
        // a corpus that ends early is padded with empty documents
        let line = match lines.next().transpose()? {
            Some(line) => line,
            None => {
                tracing::warn!(doc_id, declared_docs, "corpus ended early, document left empty");
                String::new()
            }
        };
        documents.push(line);
    }
    let query = lines.next().transpose()?;
    Ok(Corpus { stop_words, declared_docs, documents, query })
}

/// Leading integer of the line, like `cin >> n`; anything after the digits is ignored.
fn parse_document_count(line: &str) -> Result<usize> {
    let line = line.trim_start();
    let end = line.find(|c: char| !c.is_ascii_digit()).unwrap_or(line.len());
    if end == 0 {
        anyhow::bail!("no leading digits");
    }
    Ok(line[..end].parse()?)
}

fn format_result(doc: &ScoredDocument) -> String {
    format!("{{ document_id = {}, relevance = {} }}", doc.id, format_relevance(doc.relevance))
}

/// Six significant digits, trailing zeros trimmed, switching to exponent
/// notation for very small or large values (printf `%g`).
fn format_relevance(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return value.to_string();
    }
    let sci = format!("{value:.5e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    if !(-4..6).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{}e{sign}{:02}", trim_zeros(mantissa), exp.abs());
    }
    let decimals = (5 - exp) as usize;
    trim_zeros(&format!("{value:.decimals$}")).to_string()
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') { s.trim_end_matches('0').trim_end_matches('.') } else { s }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_corpus_with_query() {
        let input = "a in\n2\nthe cat\nthe dog\ncat -dog\n";
        let corpus = read_corpus(input.as_bytes()).unwrap();
        assert_eq!(corpus.stop_words, "a in");
        assert_eq!(corpus.declared_docs, 2);
        assert_eq!(corpus.documents, vec!["the cat", "the dog"]);
        assert_eq!(corpus.query.as_deref(), Some("cat -dog"));
    }

    #[test]
    fn short_corpus_is_padded() {
        let corpus = read_corpus("\n3\nonly one\n".as_bytes()).unwrap();
        assert_eq!(corpus.documents, vec!["only one", "", ""]);
        assert_eq!(corpus.query, None);
    }

    #[test]
    fn rejects_bad_count() {
        assert!(read_corpus("a\nmany\n".as_bytes()).is_err());
        assert!(read_corpus("a\n\n".as_bytes()).is_err());
    }

    #[test]
    fn count_uses_leading_integer() {
        let corpus = read_corpus("a\n 2 docs\nx\ny\nq\n".as_bytes()).unwrap();
        assert_eq!(corpus.declared_docs, 2);
        assert_eq!(corpus.documents, vec!["x", "y"]);
        assert_eq!(corpus.query.as_deref(), Some("q"));
        assert_eq!(parse_document_count("3\t").unwrap(), 3);
    }

    #[test]
    fn formats_like_printf_g() {
        assert_eq!(format_relevance(2f64.ln() / 5.0), "0.138629");
        assert_eq!(format_relevance(0.5), "0.5");
        assert_eq!(format_relevance(0.0), "0");
        assert_eq!(format_relevance(1.0), "1");
        assert_eq!(format_relevance(0.0000123456), "1.23456e-05");
        assert_eq!(format_relevance(1234567.0), "1.23457e+06");
    }

    #[test]
    fn formats_result_line() {
        let doc = ScoredDocument { id: 3, relevance: 0.25 };
        assert_eq!(format_result(&doc), "{ document_id = 3, relevance = 0.25 }");
    }
}
