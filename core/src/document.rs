use crate::avl::OrderedMap;
use crate::tokenizer::tokenize;
use std::cell::Cell;
use std::fmt;

pub type Position = usize;
pub type Score = u64;

/// Word-position index of a single document plus its relevance cache.
///
/// `score` only reflects the query most recently passed to
/// [`DocumentIndex::set_score`]; it is stale as soon as another query is
/// evaluated elsewhere. It lives in a `Cell` so a ranking queue can rescore
/// documents through shared references.
pub struct DocumentIndex {
    id: String,
    words: OrderedMap<String, Vec<Position>>,
    score: Cell<Score>,
}

impl DocumentIndex {
    /// Builds the index from an already normalized token stream, recording the
    /// zero-based position of every occurrence.
    pub fn from_tokens<I, S>(id: impl Into<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words: OrderedMap<String, Vec<Position>> = OrderedMap::new();
        for (pos, token) in tokens.into_iter().enumerate() {
            let token = token.into();
            match words.get_mut(token.as_str()) {
                Some(positions) => positions.push(pos),
                None => {
                    words.put(token, vec![pos]);
                }
            }
        }
        DocumentIndex { id: id.into(), words, score: Cell::new(0) }
    }

    /// Normalizes raw text with [`tokenize`] and indexes the result.
    pub fn from_text(id: impl Into<String>, text: &str) -> Self {
        Self::from_tokens(id, tokenize(text).into_iter().map(|(word, _)| word))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn words(&self) -> &OrderedMap<String, Vec<Position>> {
        &self.words
    }

    /// Positions of `word`, or `None` if the document never contains it.
    pub fn positions(&self, word: &str) -> Option<&[Position]> {
        self.words.get(word).map(Vec::as_slice)
    }

    /// Total occurrences of the whitespace-separated `query` terms in this document.
    pub fn get_count(&self, query: &str) -> Score {
        query
            .split_whitespace()
            .map(|term| self.words.get(term).map_or(0, |positions| positions.len() as Score))
            .sum()
    }

    /// Rescores the document against `query` and caches the result.
    pub fn set_score(&self, query: &str) {
        self.score.set(self.get_count(query));
    }

    pub fn score(&self) -> Score {
        self.score.get()
    }
}

impl fmt::Debug for DocumentIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentIndex")
            .field("id", &self.id)
            .field("words", &self.words.len())
            .field("score", &self.score.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_accumulate_in_encounter_order() {
        let doc = DocumentIndex::from_tokens("d", ["a", "b", "a", "c", "a"]);
        assert_eq!(doc.positions("a"), Some(&[0, 2, 4][..]));
        assert_eq!(doc.positions("b"), Some(&[1][..]));
        assert_eq!(doc.positions("z"), None);
        assert_eq!(doc.words().len(), 3);
    }

    #[test]
    fn count_sums_terms_and_ignores_missing() {
        let doc = DocumentIndex::from_text("d", "Rust, rust (and) RUST: cargo.");
        assert_eq!(doc.get_count("rust"), 3);
        assert_eq!(doc.get_count("rust cargo missing"), 4);
        assert_eq!(doc.get_count(""), 0);
    }

    #[test]
    fn query_terms_are_not_normalized() {
        let doc = DocumentIndex::from_text("d", "Rust rust");
        assert_eq!(doc.get_count("Rust"), 0);
        assert_eq!(doc.get_count("rust"), 2);
    }

    #[test]
    fn score_tracks_latest_query_only() {
        let doc = DocumentIndex::from_tokens("d", ["x", "y", "y"]);
        assert_eq!(doc.score(), 0);
        doc.set_score("y");
        assert_eq!(doc.score(), 2);
        doc.set_score("x");
        assert_eq!(doc.score(), 1);
    }
}
