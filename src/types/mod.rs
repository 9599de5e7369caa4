//! Core data types shared by the analyzers, the HTTP layer and the CLI.

mod core;
mod dom;

pub use self::core::{AnalysisKind, AnalysisResult, TypographyStyle};
pub use self::dom::{PageSample, RawElement};
