//! Conversion pipeline
//!
//! A synchronous pull loop from a [`RecordSource`] through the entity
//! converters into a [`GraphSink`]. Each record gets a fresh statement set,
//! so memory stays bounded by the largest single entity rather than the
//! whole dump. Invalid records are logged and skipped; transient sink
//! failures are retried a bounded number of times; a shared cancellation
//! flag stops the run between records.

use crate::convert::EntityKind;
use crate::project::{self, ProjectedGraph};
use crate::rdf::{turtle, NamedNode, NamespaceManager, StatementSet};
use crate::vocab::Vocabulary;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_BATCH_SIZE: usize = 10;
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Record source failures
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed source document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Sink write failures
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Turtle serialization failed: {0}")]
    Turtle(#[from] turtle::SerializeError),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Write rejected by the backing store; `transient` marks failures
    /// worth retrying (timeouts, broken connections)
    #[error("sink write failed: {message}")]
    Write { message: String, transient: bool },
}

impl SinkError {
    pub fn is_transient(&self) -> bool {
        matches!(self, SinkError::Write { transient: true, .. })
    }
}

/// Pipeline run failures. Per-record conversion problems are not errors;
/// they are logged, counted and skipped.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("sink failed after {attempts} attempt(s): {source}")]
    Sink { attempts: usize, source: SinkError },
}

/// Paged supplier of raw entity documents. Stands in for the document
/// store's scroll API; `Ok(None)` means the source is exhausted.
pub trait RecordSource {
    fn next_page(&mut self) -> Result<Option<Vec<serde_json::Value>>, SourceError>;
}

/// In-memory source over a preloaded record list
pub struct SliceSource {
    records: std::vec::IntoIter<serde_json::Value>,
    page_size: usize,
}

impl SliceSource {
    pub fn new(records: Vec<serde_json::Value>, page_size: usize) -> Self {
        Self {
            records: records.into_iter(),
            page_size: page_size.max(1),
        }
    }
}

impl RecordSource for SliceSource {
    fn next_page(&mut self) -> Result<Option<Vec<serde_json::Value>>, SourceError> {
        let page: Vec<_> = self.records.by_ref().take(self.page_size).collect();
        if page.is_empty() {
            Ok(None)
        } else {
            Ok(Some(page))
        }
    }
}

/// Consumer of converted entities. Implementations must write an entity's
/// node data before its relationship data so a cancelled run never leaves
/// dangling relationship references.
pub trait GraphSink {
    fn write_entity(&mut self, subject: &NamedNode, store: &StatementSet) -> Result<(), SinkError>;

    /// Flush any buffered output; called once after the last entity
    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Output A: Turtle text, prefix header once, then each entity's triples
pub struct TurtleSink<W: Write> {
    writer: W,
    namespaces: NamespaceManager,
    header_written: bool,
}

impl<W: Write> TurtleSink<W> {
    pub fn new(writer: W, vocab: &Vocabulary) -> Self {
        Self {
            writer,
            namespaces: vocab.namespaces(),
            header_written: false,
        }
    }
}

impl<W: Write> GraphSink for TurtleSink<W> {
    fn write_entity(&mut self, _subject: &NamedNode, store: &StatementSet) -> Result<(), SinkError> {
        if !self.header_written {
            for (prefix, iri) in self.namespaces.prefixes() {
                writeln!(self.writer, "@prefix {}: <{}> .", prefix, iri)?;
            }
            writeln!(self.writer)?;
            self.header_written = true;
        }
        let body = turtle::serialize_triples(store.iter())?;
        self.writer.write_all(body.as_bytes())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Output B: accumulated property-graph JSON, written on `finish`
pub struct JsonGraphSink<W: Write> {
    writer: W,
    vocab: Vocabulary,
    prefixes: NamespaceManager,
    graph: ProjectedGraph,
}

impl<W: Write> JsonGraphSink<W> {
    pub fn new(writer: W, vocab: &Vocabulary) -> Self {
        Self {
            writer,
            vocab: vocab.clone(),
            prefixes: vocab.namespaces(),
            graph: ProjectedGraph::default(),
        }
    }
}

impl<W: Write> GraphSink for JsonGraphSink<W> {
    fn write_entity(&mut self, subject: &NamedNode, store: &StatementSet) -> Result<(), SinkError> {
        match project::project_typed_node(subject, &self.vocab, &self.prefixes, store) {
            Some(projected) => self.graph.merge(projected),
            None => warn!(subject = subject.as_str(), "no class found for subject, not projected"),
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        serde_json::to_writer_pretty(&mut self.writer, &self.graph)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Output C: one Cypher statement block per entity
pub struct CypherSink<W: Write> {
    writer: W,
    vocab: Vocabulary,
    prefixes: NamespaceManager,
    entity_index: usize,
}

impl<W: Write> CypherSink<W> {
    pub fn new(writer: W, vocab: &Vocabulary) -> Self {
        Self {
            writer,
            vocab: vocab.clone(),
            prefixes: vocab.namespaces(),
            entity_index: 0,
        }
    }
}

impl<W: Write> GraphSink for CypherSink<W> {
    fn write_entity(&mut self, subject: &NamedNode, store: &StatementSet) -> Result<(), SinkError> {
        let var = format!("n{}", self.entity_index);
        match project::subject_to_cypher(&var, subject, &self.vocab, &self.prefixes, store) {
            Some(statements) => {
                self.entity_index += 1;
                writeln!(self.writer, "{};", statements.join("\n"))?;
                writeln!(self.writer)?;
            }
            None => warn!(subject = subject.as_str(), "no class found for subject, no Cypher emitted"),
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Counters for one pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Records converted and written
    pub converted: u64,
    /// Records skipped as invalid or unconvertible
    pub skipped: u64,
    /// Total triples produced across all converted records
    pub triples: u64,
}

/// The conversion pipeline for one entity type
pub struct Pipeline {
    vocab: Vocabulary,
    kind: EntityKind,
    batch_size: usize,
    max_retries: usize,
    cancel: Arc<AtomicBool>,
}

impl Pipeline {
    pub fn new(vocab: Vocabulary, kind: EntityKind) -> Self {
        Self {
            vocab,
            kind,
            batch_size: DEFAULT_BATCH_SIZE,
            max_retries: DEFAULT_MAX_RETRIES,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Shared flag; setting it stops the run between records
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Pull every record from the source, convert, and push to the sink.
    /// Returns the run counters; a raised cancel flag ends the run early
    /// with the counters accumulated so far.
    pub fn run(
        &self,
        source: &mut dyn RecordSource,
        sink: &mut dyn GraphSink,
    ) -> Result<RunStats, PipelineError> {
        let mut stats = RunStats::default();
        let mut batch: Vec<serde_json::Value> = Vec::with_capacity(self.batch_size);

        'pull: while let Some(page) = source.next_page()? {
            for record in page {
                batch.push(record);
                if batch.len() >= self.batch_size {
                    if !self.drain_batch(&mut batch, sink, &mut stats)? {
                        break 'pull;
                    }
                }
            }
        }
        self.drain_batch(&mut batch, sink, &mut stats)?;

        sink.finish()
            .map_err(|source| PipelineError::Sink { attempts: 1, source })?;
        info!(
            entity_type = %self.kind,
            converted = stats.converted,
            skipped = stats.skipped,
            triples = stats.triples,
            "pipeline run finished"
        );
        Ok(stats)
    }

    /// Convert and write the buffered records. Returns `Ok(false)` when the
    /// cancel flag ended the batch early.
    fn drain_batch(
        &self,
        batch: &mut Vec<serde_json::Value>,
        sink: &mut dyn GraphSink,
        stats: &mut RunStats,
    ) -> Result<bool, PipelineError> {
        for record in batch.drain(..) {
            if self.cancel.load(Ordering::Relaxed) {
                info!(entity_type = %self.kind, "cancellation requested, stopping run");
                return Ok(false);
            }

            let mut store = StatementSet::new();
            let subject = match self.kind.convert(&record, &self.vocab, &mut store) {
                Ok(subject) => subject,
                Err(e) => {
                    let uid = record.get("uid").cloned().unwrap_or_default();
                    warn!(entity_type = %self.kind, %uid, error = %e, "skipping record");
                    stats.skipped += 1;
                    continue;
                }
            };

            self.write_with_retry(sink, &subject, &store)?;
            stats.converted += 1;
            stats.triples += store.len() as u64;
            debug!(subject = subject.as_str(), triples = store.len(), "entity written");
        }
        Ok(true)
    }

    fn write_with_retry(
        &self,
        sink: &mut dyn GraphSink,
        subject: &NamedNode,
        store: &StatementSet,
    ) -> Result<(), PipelineError> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match sink.write_entity(subject, store) {
                Ok(()) => return Ok(()),
                Err(e) if e.is_transient() && attempts < self.max_retries => {
                    warn!(
                        subject = subject.as_str(),
                        attempt = attempts,
                        error = %e,
                        "transient sink failure, retrying"
                    );
                }
                Err(source) => return Err(PipelineError::Sink { attempts, source }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(uid: i64, name: &str) -> serde_json::Value {
        serde_json::json!({
            "uid": uid,
            "names": [{"name": name, "order": 1}]
        })
    }

    #[test]
    fn test_run_skips_invalid_records() {
        let vocab = Vocabulary::default();
        let mut source = SliceSource::new(
            vec![
                location(1, "Colston Hall"),
                serde_json::json!({"names": "not even a list"}),
                location(2, "Gewandhaus"),
            ],
            2,
        );
        let mut out = Vec::new();
        let mut sink = TurtleSink::new(&mut out, &vocab);

        let pipeline = Pipeline::new(vocab, EntityKind::Location);
        let stats = pipeline.run(&mut source, &mut sink).unwrap();

        assert_eq!(stats.converted, 2);
        assert_eq!(stats.skipped, 1);
        assert!(stats.triples > 0);

        drop(sink);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("@prefix rdf:"));
        assert!(text.contains("location_1"));
        assert!(text.contains("location_2"));
    }

    struct FlakySink {
        failures_left: usize,
        written: usize,
    }

    impl GraphSink for FlakySink {
        fn write_entity(&mut self, _: &NamedNode, _: &StatementSet) -> Result<(), SinkError> {
            if self.failures_left > 0 {
                self.failures_left -= 1;
                return Err(SinkError::Write {
                    message: "connection reset".to_string(),
                    transient: true,
                });
            }
            self.written += 1;
            Ok(())
        }
    }

    #[test]
    fn test_transient_sink_failures_are_retried() {
        let vocab = Vocabulary::default();
        let mut source = SliceSource::new(vec![location(1, "Colston Hall")], 10);
        let mut sink = FlakySink {
            failures_left: 2,
            written: 0,
        };

        let pipeline = Pipeline::new(vocab, EntityKind::Location);
        let stats = pipeline.run(&mut source, &mut sink).unwrap();
        assert_eq!(stats.converted, 1);
        assert_eq!(sink.written, 1);
    }

    #[test]
    fn test_retries_are_bounded() {
        let vocab = Vocabulary::default();
        let mut source = SliceSource::new(vec![location(1, "Colston Hall")], 10);
        let mut sink = FlakySink {
            failures_left: 99,
            written: 0,
        };

        let pipeline = Pipeline::new(vocab, EntityKind::Location);
        let err = pipeline.run(&mut source, &mut sink).unwrap_err();
        match err {
            PipelineError::Sink { attempts, .. } => assert_eq!(attempts, DEFAULT_MAX_RETRIES),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_cancellation_stops_between_records() {
        let vocab = Vocabulary::default();
        let records: Vec<_> = (1..=50).map(|n| location(n, "Hall")).collect();
        let mut source = SliceSource::new(records, 10);
        let mut out = Vec::new();
        let mut sink = TurtleSink::new(&mut out, &vocab);

        let pipeline = Pipeline::new(vocab, EntityKind::Location).with_batch_size(5);
        pipeline.cancel_flag().store(true, Ordering::Relaxed);
        let stats = pipeline.run(&mut source, &mut sink).unwrap();
        assert_eq!(stats.converted, 0);
    }

    #[test]
    fn test_json_sink_emits_graph_document() {
        let vocab = Vocabulary::default();
        let mut source = SliceSource::new(vec![location(1332, "Colston Hall (Bristol)")], 10);
        let mut out = Vec::new();
        let mut sink = JsonGraphSink::new(&mut out, &vocab);

        let pipeline = Pipeline::new(vocab, EntityKind::Location);
        pipeline.run(&mut source, &mut sink).unwrap();

        drop(sink);
        let doc: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(doc["nodes"][0]["labels"], serde_json::json!(["Location"]));
        assert_eq!(doc["nodes"][0]["properties"]["uid"], serde_json::json!(1332));
    }

    #[test]
    fn test_cypher_sink_emits_merge_blocks() {
        let vocab = Vocabulary::default();
        let mut source = SliceSource::new(
            vec![location(1, "Colston Hall"), location(2, "Gewandhaus")],
            10,
        );
        let mut out = Vec::new();
        let mut sink = CypherSink::new(&mut out, &vocab);

        let pipeline = Pipeline::new(vocab, EntityKind::Location);
        pipeline.run(&mut source, &mut sink).unwrap();

        drop(sink);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("MERGE (n0:Location {id: "));
        assert!(text.contains("MERGE (n1:Location {id: "));
    }
}
