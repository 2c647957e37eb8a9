//! Search infrastructure for hover documentation.
//!
//! Two local strategies (a forward-tokenized exact index and a fuzzy matcher) plus a
//! remote delegate, all normalized behind [`SearchBackend`].

// Module declarations
pub mod backend;
pub mod fuzzy;
pub mod index;
pub mod remote;
pub mod tokenize;

pub use backend::{
    Backend, ExactBackend, FuzzyBackend, ProjectScope, RemoteBackend, ScoreOrder, SearchBackend,
};
pub use fuzzy::{FuzzyMatch, FuzzyMatcher, FuzzyOptions};
pub use index::{DocId, ExactIndex, IndexedDocument};
pub use remote::{RemoteHit, RemoteSearchClient, RemoteSearchResponse};
pub use tokenize::{Encoder, WhitespaceEncoder};
