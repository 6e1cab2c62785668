use retrieval_core::evaluation::{evaluate, f1, precision, recall, Judgments};
use retrieval_core::{Corpus, SharedCorpus};
use std::collections::{BTreeSet, HashSet};
use std::thread;

fn sample_corpus() -> Corpus {
    let mut corpus = Corpus::new();
    corpus.ingest("ai", "artificial intelligence and machine learning");
    corpus.ingest("food", "French cuisine recipes");
    corpus.ingest("dl", "deep learning neural networks");
    corpus
}

#[test]
fn machine_learning_scenario() {
    let corpus = sample_corpus();
    assert_eq!(corpus.document_count(), 3);

    let results = corpus.search("machine learning");
    let ids: Vec<u32> = results.iter().map(|r| r.doc_id).collect();
    assert_eq!(ids, vec![0, 2]);
    assert_eq!(results[0].matched_terms, vec!["machine", "learning"]);
    assert_eq!(results[1].matched_terms, vec!["learning"]);
    assert_eq!(results[0].title, "ai");

    let ln3 = 3f64.ln();
    let ln15 = 1.5f64.ln();
    let doc_norm = (3.0 * ln3 * ln3 + ln15 * ln15).sqrt();
    let expected0 = (ln3 + ln15) / (doc_norm * 2f64.sqrt());
    let expected2 = ln15 / doc_norm;
    assert!((results[0].rank - expected0).abs() < 1e-9);
    assert!((results[1].rank - expected2).abs() < 1e-9);
}

#[test]
fn identifiers_are_strictly_increasing() {
    let mut corpus = Corpus::new();
    let ids: Vec<u32> = (0..50).map(|i| corpus.ingest(format!("d{i}"), "same body")).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), ids.len());
}

#[test]
fn document_frequency_tracks_postings() {
    let mut corpus = Corpus::new();
    let texts = ["alpha beta beta", "beta gamma", "alpha alpha alpha", "delta"];
    for (i, t) in texts.iter().enumerate() {
        corpus.ingest(format!("d{i}"), *t);
        for term in ["alpha", "beta", "gamma", "delta", "omega"] {
            let postings = corpus.index().postings(term).map(|p| p.len()).unwrap_or(0);
            assert_eq!(corpus.document_frequency(term) as usize, postings);
        }
    }
    assert_eq!(corpus.document_frequency("alpha"), 2);
    assert_eq!(corpus.document_frequency("omega"), 0);
}

#[test]
fn idf_floor_properties() {
    let mut corpus = Corpus::new();
    corpus.ingest("a", "common rare");
    corpus.ingest("b", "common");
    assert_eq!(corpus.idf("unseen"), 0.0);
    assert_eq!(corpus.idf("common"), 0.0);
    assert!(corpus.idf("rare") > 0.0);
}

#[test]
fn idf_follows_the_live_document_count() {
    let mut corpus = Corpus::new();
    corpus.ingest("a", "rust");
    assert_eq!(corpus.idf("rust"), 0.0);
    corpus.ingest("b", "go");
    assert!((corpus.idf("rust") - 2f64.ln()).abs() < 1e-12);
}

#[test]
fn single_document_is_still_returned() {
    let mut corpus = Corpus::new();
    corpus.ingest("only", "hello world");
    let results = corpus.search("hello");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].doc_id, 0);
    assert_eq!(results[0].rank, 0.0);
    assert_eq!(results[0].matched_terms, vec!["hello"]);
}

#[test]
fn zero_norm_documents_are_skipped_in_larger_corpora() {
    let mut corpus = Corpus::new();
    corpus.ingest("d0", "x");
    corpus.ingest("d1", "x y");
    // "x" is in every document, so d0's vector is all zeros and cannot be ranked.
    let results = corpus.search("x");
    let ids: Vec<u32> = results.iter().map(|r| r.doc_id).collect();
    assert_eq!(ids, vec![1]);
    assert_eq!(results[0].rank, 0.0);
    assert_eq!(results[0].matched_terms, vec!["x"]);
}

#[test]
fn zero_norm_documents_do_not_count_as_retrieved() {
    let mut corpus = Corpus::new();
    corpus.ingest("d0", "x");
    corpus.ingest("d1", "x y");
    let mut judgments = Judgments::new();
    judgments.insert("x".into(), BTreeSet::from([1]));
    let metrics = evaluate(&corpus, &judgments);
    assert_eq!(metrics[0].retrieved, BTreeSet::from([1]));
    assert_eq!(metrics[0].precision, 1.0);
}

#[test]
fn self_match() {
    let mut corpus = sample_corpus();
    let id = corpus.ingest("new", "quantum computing");
    let results = corpus.search("quantum");
    assert!(results.iter().any(|r| r.doc_id == id));
}

#[test]
fn scores_are_bounded_and_sorted() {
    let mut corpus = Corpus::new();
    let texts = [
        "rust systems programming language",
        "rust rust rust memory safety",
        "python scripting language",
        "systems design interviews",
        "memory allocators in rust and c",
    ];
    for (i, t) in texts.iter().enumerate() {
        corpus.ingest(format!("d{i}"), *t);
    }
    for query in ["rust", "systems language", "memory rust safety", "python rust systems"] {
        let results = corpus.search(query);
        assert!(!results.is_empty(), "query {query}");
        for r in &results {
            assert!(r.rank >= 0.0 && r.rank <= 1.0 + 1e-9, "rank {} out of bounds", r.rank);
        }
        assert!(results.windows(2).all(|w| w[0].rank >= w[1].rank));
    }
}

#[test]
fn equal_scores_keep_insertion_order() {
    let mut corpus = Corpus::new();
    corpus.ingest("x", "filler");
    corpus.ingest("a", "twin words");
    corpus.ingest("b", "twin words");
    let ids: Vec<u32> = corpus.search("twin").iter().map(|r| r.doc_id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn queries_are_idempotent() {
    let corpus = sample_corpus();
    assert_eq!(corpus.search("deep machine learning"), corpus.search("deep machine learning"));
}

#[test]
fn no_overlap_means_no_results() {
    let corpus = sample_corpus();
    assert!(corpus.search("astronomy").is_empty());
    assert!(corpus.search("").is_empty());
}

#[test]
fn snippet_is_the_leading_text() {
    let mut corpus = Corpus::new();
    let body = format!("needle {}", "x ".repeat(400));
    corpus.ingest("long", body.clone());
    corpus.ingest("other", "haystack");
    let hit = &corpus.search("needle")[0];
    assert_eq!(hit.snippet.chars().count(), 300);
    assert!(body.starts_with(&hit.snippet));
}

#[test]
fn evaluation_boundaries() {
    assert_eq!(precision([1, 2, 3], []), 0.0);
    assert_eq!(recall([], [1, 2, 3]), 0.0);
    assert_eq!(f1(0.0, 0.0), 0.0);

    let corpus = sample_corpus();
    let retrieved: Vec<u32> = corpus.search("machine learning").iter().map(|r| r.doc_id).collect();
    let p = precision([0], retrieved.iter().copied());
    let r = recall([0], retrieved.iter().copied());
    assert_eq!(p, 0.5);
    assert_eq!(r, 1.0);
    assert!((f1(p, r) - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn shared_corpus_concurrent_readers_and_writer() {
    let shared = SharedCorpus::new(sample_corpus());
    let writer = {
        let shared = shared.clone();
        thread::spawn(move || {
            for i in 0..20 {
                shared.ingest(format!("extra{i}"), "machine learning extra");
            }
        })
    };
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..20 {
                    let guard = shared.read();
                    for r in guard.search("machine learning") {
                        assert!(guard.document(r.doc_id).is_some());
                    }
                    for term in ["machine", "learning", "extra"] {
                        let postings = guard.index().postings(term).map(|p| p.len()).unwrap_or(0);
                        assert_eq!(guard.document_frequency(term) as usize, postings);
                    }
                }
            })
        })
        .collect();
    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }
    assert_eq!(shared.document_count(), 23);
    assert_eq!(shared.document_frequency("extra"), 20);
}
