//! Typed dependency edges between classes, and the extractor that discovers them.

mod edge;
mod extractor;

pub use edge::{DependencyEdge, DependencyKind, InjectionEdge, InjectionSite};
pub use extractor::{extract, ExtractedEdges};
