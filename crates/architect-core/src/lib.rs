pub mod config;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod logging;
pub mod metrics;
pub mod types;

pub use config::LayoutConstants;
pub use error::{AnalyzerError, Result};
pub use geometry::Rect;
pub use ids::{ArtifactId, EdgeId};
pub use logging::init_tracing;
pub use metrics::Metrics;
pub use types::{
    CodeFile, CodeFolder, CodeSymbolData, Position, ProjectLocation, Reference, SourceRange,
    SymbolKind,
};
