//! Tests for corpus loading and the hot-swap handle.

use magpie_core::{Corpus, CorpusHandle};
use magpie_error::MagpieErrorKind;
use std::io::Write;

#[test]
fn load_trims_lines_and_drops_blanks() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        "first entry\n\n  second entry  \n\t\n   \nthird entry\n"
    )
    .expect("write corpus");

    let corpus = Corpus::load(file.path()).expect("load corpus");
    assert_eq!(
        corpus.entries(),
        &[
            "first entry".to_string(),
            "second entry".to_string(),
            "third entry".to_string(),
        ]
    );
    assert_eq!(corpus.len(), 3);
    assert!(!corpus.is_empty());
}

#[test]
fn load_fails_on_missing_file() {
    let err = Corpus::load("/nonexistent/corpus.txt").expect_err("missing file");
    assert!(matches!(
        err.kind(),
        MagpieErrorKind::CorpusLoad { path, .. } if path.ends_with("corpus.txt")
    ));
    assert!(err.is_recoverable());
}

#[test]
fn blank_only_source_yields_an_empty_corpus() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "\n   \n\t\n").expect("write corpus");

    let corpus = Corpus::load(file.path()).expect("load corpus");
    assert!(corpus.is_empty());
    assert_eq!(corpus.get(0), None);
}

#[tokio::test]
async fn replace_swaps_the_snapshot() {
    let handle = CorpusHandle::new(Corpus::new(vec!["old".to_string()]));
    assert_eq!(handle.snapshot().await.len(), 1);

    handle
        .replace(Corpus::new(vec![
            "new one".to_string(),
            "new two".to_string(),
        ]))
        .await;

    let snapshot = handle.snapshot().await;
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.get(0), Some("new one"));
}

#[tokio::test]
async fn snapshots_survive_a_replace() {
    // A reader holding a snapshot keeps seeing the corpus it started with.
    let handle = CorpusHandle::new(Corpus::new(vec!["old".to_string()]));
    let held = handle.snapshot().await;

    handle.replace(Corpus::new(vec!["a".into(), "b".into()])).await;

    assert_eq!(held.len(), 1);
    assert_eq!(held.get(0), Some("old"));
    assert_eq!(handle.snapshot().await.len(), 2);
}

#[tokio::test]
async fn concurrent_readers_only_observe_full_corpora() {
    // Every observed snapshot must have the length of some corpus that was
    // actually installed, never a partially-swapped state.
    let handle = CorpusHandle::new(Corpus::new((0..3).map(|i| format!("entry {i}"))));

    let reader = {
        let handle = handle.clone();
        tokio::spawn(async move {
            let mut observed = Vec::new();
            for _ in 0..500 {
                observed.push(handle.snapshot().await.len());
            }
            observed
        })
    };

    let writer = {
        let handle = handle.clone();
        tokio::spawn(async move {
            for round in 0..50 {
                let size = if round % 2 == 0 { 5 } else { 3 };
                handle
                    .replace(Corpus::new((0..size).map(|i| format!("entry {i}"))))
                    .await;
                tokio::task::yield_now().await;
            }
        })
    };

    let observed = reader.await.expect("reader task");
    writer.await.expect("writer task");

    for len in observed {
        assert!(len == 3 || len == 5, "observed partial corpus of {len}");
    }
}
