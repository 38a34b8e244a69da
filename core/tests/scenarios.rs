use search_core::{DocumentIndex, OrderedMap, QueryProcessor, RankingQueue};

fn avl_height_bound(n: usize) -> i32 {
    (1.44 * ((n + 2) as f64).log2()).ceil() as i32
}

#[test]
fn insertion_sequence_keeps_latest_value_and_bounded_height() {
    let inserts = [
        (15, "bob"),
        (20, "anna"),
        (24, "tom"),
        (10, "david"),
        (13, "david"),
        (7, "ben"),
        (30, "karen"),
        (36, "erin"),
        (25, "david"),
        (13, "nancy"),
    ];
    let mut map = OrderedMap::new();
    for (key, value) in inserts {
        map.put(key, value);
        map.check_invariants().unwrap();
        assert!(map.height() <= avl_height_bound(map.len()), "height {} with {} keys", map.height(), map.len());
    }
    assert_eq!(map.len(), 9);
    assert_eq!(map.get(&13), Some(&"nancy"));
    assert_eq!(map.get(&36), Some(&"erin"));
    assert_eq!(map.get(&7), Some(&"ben"));
    assert_eq!(map.get(&99), None);
    let preorder: Vec<i32> = map.preorder_keys().into_iter().copied().collect();
    assert_eq!(preorder, vec![13, 10, 7, 24, 20, 15, 30, 25, 36]);
}

#[test]
fn count_sums_occurrences_of_present_terms() {
    let tokens = ["a", "collection", "is", "array", "type", "with", "fixed", "size", "unlike", "array"];
    let doc = DocumentIndex::from_tokens("doc1-arraylist.txt", tokens);
    assert_eq!(doc.positions("array"), Some(&[3, 9][..]));
    assert_eq!(doc.positions("collection"), Some(&[1][..]));
    assert_eq!(doc.get_count("collection array in an"), 3);
    doc.set_score("collection array in an");
    assert_eq!(doc.score(), 3);
}

fn repeated(id: &str, word: &str, n: usize) -> DocumentIndex {
    DocumentIndex::from_tokens(id, std::iter::repeat(word).take(n))
}

#[test]
fn top_two_of_three_documents() {
    let processor = QueryProcessor::new(
        vec![repeated("five", "q", 5), repeated("two", "q", 2), repeated("eight", "q", 8)],
        vec!["q".to_string()],
    );
    let results = processor.process(Some(2));
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].doc_ids, vec!["eight", "five"]);
    assert_eq!(results[0].scores, vec![8, 5]);
}

#[test]
fn rebuild_rescores_after_drain() {
    let docs = vec![
        DocumentIndex::from_text("a", "red red red blue"),
        DocumentIndex::from_text("b", "red blue blue"),
        DocumentIndex::from_text("c", "blue blue blue blue red red"),
    ];
    let mut queue = RankingQueue::new(&docs, "red");
    let first: Vec<&str> = queue.drain_top(3).iter().map(|d| d.id()).collect();
    assert_eq!(first, vec!["a", "c", "b"]);
    assert!(queue.poll().is_none());

    queue.reheap("blue");
    assert!(queue.is_valid_heap());
    let second: Vec<&str> = queue.drain_top(3).iter().map(|d| d.id()).collect();
    assert_eq!(second, vec!["c", "b", "a"]);
}
