//! Text normalization and field partitioning for product catalogs.
//!
//! [`tokenizer`] turns raw text into stemmed terms; [`extract()`] splits each
//! catalog document into a metadata record and an info-index record.

pub mod document;
pub mod error;
pub mod extract;
pub mod load;
pub mod persist;
pub mod stats;
pub mod tokenizer;

pub use document::{
    Corpus, Document, IndexInfoMap, IndexInfoRecord, MetadataMap, MetadataRecord, Pid, RawDocument,
    TextField,
};
pub use error::{ExtractError, LoadError, NormalizeError, UnknownField};
pub use extract::{extract, ErrorPolicy, ExtractOptions, Extraction};
pub use load::load_corpus;
pub use tokenizer::{normalize, normalize_joined, NormalizerConfig};
