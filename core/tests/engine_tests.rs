use feedrank_core::{Document, EngineHandle, FieldSelector, SearchEngine};
use serde_json::json;

fn doc(fields: serde_json::Value) -> Document {
    match fields {
        serde_json::Value::Object(map) => map,
        other => panic!("test rows must be objects, got {other}"),
    }
}

fn corpus() -> Vec<Document> {
    vec![
        doc(json!({"title": "A", "description": "the cat sat"})),
        doc(json!({"title": "B", "description": "the dog ran"})),
        doc(json!({"title": "C", "description": "cat and dog played"})),
    ]
}

#[test]
fn search_rejoins_original_metadata() {
    let engine = SearchEngine::new(corpus(), FieldSelector::field("description"));
    let hits = engine.search("cat", 10);
    assert_eq!(hits.len(), 2);
    let titles: Vec<&str> = hits
        .iter()
        .map(|hit| hit.document["title"].as_str().unwrap())
        .collect();
    assert!(titles.contains(&"A"));
    assert!(titles.contains(&"C"));
    assert!(hits.iter().all(|hit| hit.score > 0.0));
}

#[test]
fn top_hit_gets_full_relevance() {
    let engine = SearchEngine::new(corpus(), FieldSelector::field("description"));
    let hits = engine.search("cat sat", 10);
    assert!(!hits.is_empty());
    assert!((hits[0].pct_relevance - 100.0).abs() < 1e-9);
    assert!(hits.iter().all(|hit| hit.pct_relevance <= 100.0 + 1e-9));
}

#[test]
fn identical_documents_share_full_relevance() {
    let rows = vec![
        doc(json!({"description": "rust search engine"})),
        doc(json!({"description": "rust search engine"})),
        doc(json!({"description": "rust search engine"})),
    ];
    let engine = SearchEngine::new(rows, FieldSelector::field("description"));
    let hits = engine.search("rust engine", 10);
    assert_eq!(hits.len(), 3);
    assert!((hits[0].score - hits[2].score).abs() < 1e-12);
    assert!(hits.iter().all(|hit| (hit.pct_relevance - 100.0).abs() < 1e-9));
}

#[test]
fn empty_collection_searches_cleanly() {
    let engine = SearchEngine::new(Vec::new(), FieldSelector::field("description"));
    assert_eq!(engine.index().doc_count, 0);
    assert!(engine.is_empty());
    assert!(engine.search("cat", 5).is_empty());
}

#[test]
fn selector_falls_through_candidate_fields() {
    let rows = vec![
        doc(json!({"summary": "cat video"})),
        doc(json!({"description": "dog essay", "summary": "not indexed"})),
        doc(json!({"title": "no text fields at all"})),
    ];
    let engine = SearchEngine::new(rows, FieldSelector::new(["description", "summary"]));

    let hits = engine.search("cat", 5);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].document["summary"], "cat video");

    // the second row resolved to "description", so its summary is invisible
    assert!(engine.search("indexed", 5).is_empty());
}

#[test]
fn missing_text_field_is_treated_as_empty() {
    let rows = vec![doc(json!({"title": "bare"}))];
    let engine = SearchEngine::new(rows, FieldSelector::field("description"));
    assert_eq!(engine.index().doc_length(0), 0);
    assert!(engine.search("bare", 5).is_empty());
}

#[test]
fn hits_serialize_flat() {
    let engine = SearchEngine::new(corpus(), FieldSelector::field("description"));
    let hits = engine.search("cat", 1);
    let value = serde_json::to_value(&hits).unwrap();
    let row = &value[0];
    assert!(row["title"].is_string());
    assert!(row["description"].is_string());
    assert!(row["score"].is_number());
    assert!(row["pct_relevance"].is_number());
}

#[test]
fn custom_parameters_flow_through() {
    use feedrank_core::Bm25Ranker;
    let engine = SearchEngine::with_ranker(
        corpus(),
        FieldSelector::field("description"),
        Bm25Ranker::new(1.2, 0.0),
    );
    assert_eq!(engine.search("cat", 10).len(), 2);
}

#[test]
fn handle_swaps_whole_snapshots() {
    let handle =
        EngineHandle::new(SearchEngine::new(corpus(), FieldSelector::field("description")));
    let before = handle.snapshot();

    let rebuilt = vec![doc(json!({"description": "fresh zebra facts"}))];
    handle.swap(SearchEngine::new(rebuilt, FieldSelector::field("description")));

    // the pre-swap snapshot still answers against the old corpus
    assert_eq!(before.search("cat", 5).len(), 2);
    assert!(before.search("zebra", 5).is_empty());

    let after = handle.snapshot();
    assert_eq!(after.search("zebra", 5).len(), 1);
    assert!(after.search("cat", 5).is_empty());
}

#[test]
fn handle_is_shareable_across_threads() {
    let handle =
        EngineHandle::new(SearchEngine::new(corpus(), FieldSelector::field("description")));
    let reader = {
        let handle = handle.clone();
        std::thread::spawn(move || handle.snapshot().search("dog", 5).len())
    };
    assert_eq!(reader.join().unwrap(), 2);
}
