pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{JsonSink, LocalStorage};
pub use config::TalkConfig;
pub use crate::core::{engine::TalkEngine, generator::SlideGenerator, schema::PresentationSchema};
pub use domain::model::{Presentation, Slide, SlideContent};
pub use utils::error::{Result, TalkError};
