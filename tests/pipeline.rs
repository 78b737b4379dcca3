//! End-to-end pipeline tests: records in, serialized graph out

use perfgraph::convert::EntityKind;
use perfgraph::pipeline::{JsonGraphSink, Pipeline, SliceSource, TurtleSink};
use perfgraph::rdf::{turtle, StatementSet};
use perfgraph::Vocabulary;
use std::fs;
use std::io::Write;

fn colston_hall() -> serde_json::Value {
    serde_json::json!({
        "uid": 1332,
        "title": "Colston Hall (Bristol)",
        "slug": "colston-hall-bristol",
        "score": 7,
        "names": [
            {"name": "Colston Hall (Bristol)", "order": 1},
            {"name": "Colston Hall", "order": 2}
        ],
        "events": [{"event": 1}],
        "parents": [{"location": 1331}],
        "geometries": [{"geo": [51.4545919, -2.5998353], "label": 1}]
    })
}

#[test]
fn test_turtle_output_parses_back() {
    let vocab = Vocabulary::default();
    let mut source = SliceSource::new(vec![colston_hall()], 10);
    let mut out = Vec::new();
    let mut sink = TurtleSink::new(&mut out, &vocab);

    let pipeline = Pipeline::new(vocab.clone(), EntityKind::Location);
    let stats = pipeline.run(&mut source, &mut sink).unwrap();
    drop(sink);

    assert_eq!(stats.converted, 1);
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> ."));

    let mut store = StatementSet::new();
    store.extend(turtle::parse_turtle(&text).unwrap());
    assert_eq!(stats.triples, store.len() as u64);

    // the reified name statements came through
    let statement_pred = vocab
        .statement_predicate(&vocab.property_predicate("name").unwrap())
        .unwrap();
    assert_eq!(store.with_predicate(&statement_pred).count(), 2);
}

#[test]
fn test_json_file_output() {
    let vocab = Vocabulary::default();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.json");

    {
        let file = fs::File::create(&path).unwrap();
        let mut writer = std::io::BufWriter::new(file);
        let mut source = SliceSource::new(vec![colston_hall()], 10);
        let mut sink = JsonGraphSink::new(&mut writer, &vocab);
        Pipeline::new(vocab.clone(), EntityKind::Location)
            .run(&mut source, &mut sink)
            .unwrap();
        drop(sink);
        writer.flush().unwrap();
    }

    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let node = &doc["nodes"][0];
    assert_eq!(node["labels"], serde_json::json!(["Location"]));
    assert_eq!(node["properties"]["uid"], serde_json::json!(1332));
    assert_eq!(node["properties"]["score"], serde_json::json!(7));
    // order 2 name wins the colliding key
    assert_eq!(
        node["properties"]["name"],
        serde_json::json!("Colston Hall")
    );

    let labels: Vec<&str> = doc["rels"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r["label"].as_str())
        .collect();
    assert!(labels.contains(&"type"));
    assert!(labels.contains(&"event"));
    assert!(labels.contains(&"hasGeometry"));
    assert!(labels.contains(&"parent"));
}

#[test]
fn test_reconversion_is_idempotent() {
    let vocab = Vocabulary::default();
    let record: perfgraph::convert::records::LocationRecord =
        serde_json::from_value(colston_hall()).unwrap();

    let mut store = StatementSet::new();
    perfgraph::convert::location::location_to_rdf(&record, &vocab, &mut store).unwrap();
    let count = store.len();
    perfgraph::convert::location::location_to_rdf(&record, &vocab, &mut store).unwrap();
    assert_eq!(store.len(), count);
}
