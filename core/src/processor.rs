use crate::document::{DocumentIndex, Score};
use crate::loader::Corpus;
use crate::queue::RankingQueue;
use serde::Serialize;

/// Ranked answer to one query, most relevant document first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    pub query: String,
    pub doc_ids: Vec<String>,
    pub scores: Vec<Score>,
}

/// Runs a list of queries against a fixed corpus.
pub struct QueryProcessor {
    documents: Vec<DocumentIndex>,
    queries: Vec<String>,
}

impl QueryProcessor {
    pub fn new(documents: Vec<DocumentIndex>, queries: Vec<String>) -> Self {
        Self { documents, queries }
    }

    pub fn documents(&self) -> &[DocumentIndex] {
        &self.documents
    }

    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    /// Ranks the corpus for every query in order, returning at most `limit`
    /// documents per query (all of them when `limit` is `None`).
    ///
    /// One queue is reused for the whole batch and rebuilt before each query.
    pub fn process(&self, limit: Option<usize>) -> Vec<QueryResult> {
        let first = match self.queries.first() {
            Some(q) => q,
            None => return Vec::new(),
        };
        let mut queue = RankingQueue::new(&self.documents, first);
        let mut results = Vec::with_capacity(self.queries.len());
        for query in &self.queries {
            queue.reheap(query);
            let k = limit.unwrap_or(self.documents.len()).min(queue.len());
            let top = queue.drain_top(k);
            results.push(QueryResult {
                query: query.trim().to_string(),
                doc_ids: top.iter().map(|d| d.id().to_string()).collect(),
                scores: top.iter().map(|d| d.score()).collect(),
            });
        }
        tracing::info!(queries = results.len(), documents = self.documents.len(), "processed queries");
        results
    }
}

impl From<Corpus> for QueryProcessor {
    fn from(corpus: Corpus) -> Self {
        Self::new(corpus.documents, corpus.queries)
    }
}
