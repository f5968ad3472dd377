// Adapters layer: concrete implementations of the domain ports (lexicon, content sources, storage, sink).

pub mod conceptnet;
pub mod lexicon;
pub mod sink;
pub mod sources;
pub mod storage;
pub mod text;

pub use conceptnet::ConceptNet;
pub use lexicon::StaticLexicon;
pub use sink::JsonSink;
pub use storage::LocalStorage;
