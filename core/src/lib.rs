//! Small document-search engine: per-document word-position indexes stored in
//! an AVL-backed [`OrderedMap`], ranked per query with a binary max-heap.

pub mod avl;
pub mod document;
pub mod loader;
pub mod processor;
pub mod queue;
pub mod tokenizer;

pub use avl::{Comparator, NaturalOrder, OrderedMap};
pub use document::{DocumentIndex, Position, Score};
pub use loader::{load_corpus_dir, load_document, Corpus, CorpusPaths};
pub use processor::{QueryProcessor, QueryResult};
pub use queue::RankingQueue;
