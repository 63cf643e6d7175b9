//! Program-level state: component discovery, the import graph and the
//! layered schema store.

pub mod analyzer_context;
pub mod cancellation;
pub mod dependency_graph;
pub mod discovery;

pub use analyzer_context::{AnalyzerContext, UpdateOutcome};
pub use cancellation::CancellationToken;
pub use dependency_graph::FileDependencyGraph;
pub use discovery::{ComponentDefinition, ComponentDiscovery, DiscoveryResult, MemberLocation};
