pub mod engine;
pub mod generator;
pub mod schema;
pub mod seeds;
pub mod weighted;

pub use crate::domain::model::{Presentation, Provenance, Slide, SlideContent};
pub use crate::domain::ports::{
    ConfigProvider, ContentSource, LexicalRelations, LocationLookup, PresentationSink, Storage,
};
pub use crate::utils::error::Result;
