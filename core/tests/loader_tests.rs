use search_core::loader::{load_corpus_dir, load_document, CorpusPaths, DEFAULT_QUERIES_FILE};
use search_core::QueryProcessor;
use std::fs;
use tempfile::tempdir;

fn write_corpus(dir: &std::path::Path) {
    fs::write(dir.join("doc1-arraylist.txt"), "ArrayList: a resizable array. An array (fixed) is not.").unwrap();
    fs::write(dir.join("doc2-linkedlist.txt"), "LinkedList is a list of linked nodes.").unwrap();
    fs::write(dir.join("doc3-hashmap.txt"), "HashMap maps keys; an array of buckets.").unwrap();
    fs::write(dir.join(DEFAULT_QUERIES_FILE), "array\n\nlist nodes\n").unwrap();
    fs::create_dir(dir.join("nested")).unwrap();
    fs::write(dir.join("nested/ignored.txt"), "array array array array").unwrap();
}

#[test]
fn loads_documents_and_queries_from_directory() {
    let dir = tempdir().unwrap();
    write_corpus(dir.path());
    let corpus = load_corpus_dir(&CorpusPaths::new(dir.path(), DEFAULT_QUERIES_FILE)).unwrap();
    let ids: Vec<&str> = corpus.documents.iter().map(|d| d.id()).collect();
    assert_eq!(ids, vec!["doc1-arraylist.txt", "doc2-linkedlist.txt", "doc3-hashmap.txt"]);
    assert_eq!(corpus.queries, vec!["array", "list nodes"]);
}

#[test]
fn ranks_loaded_corpus() {
    let dir = tempdir().unwrap();
    write_corpus(dir.path());
    let corpus = load_corpus_dir(&CorpusPaths::new(dir.path(), DEFAULT_QUERIES_FILE)).unwrap();
    let results = QueryProcessor::from(corpus).process(Some(1));
    assert_eq!(results[0].doc_ids, vec!["doc1-arraylist.txt"]);
    assert_eq!(results[0].scores, vec![2]);
    assert_eq!(results[1].doc_ids, vec!["doc2-linkedlist.txt"]);
}

#[test]
fn missing_document_is_an_error() {
    let dir = tempdir().unwrap();
    let err = load_document(&dir.path().join("absent.txt")).unwrap_err();
    assert!(err.to_string().contains("absent.txt"));
}

#[test]
fn missing_queries_file_yields_no_queries() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("only.txt"), "words").unwrap();
    let corpus = load_corpus_dir(&CorpusPaths::new(dir.path(), "queries.txt")).unwrap();
    assert_eq!(corpus.documents.len(), 1);
    assert!(corpus.queries.is_empty());
    assert!(QueryProcessor::from(corpus).process(None).is_empty());
}
