pub mod context;
pub mod features;
pub mod io;
pub mod links;
pub mod model;
pub mod render;
pub mod store;
pub mod transclude;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use context::RenderContext;
pub use features::{
    BagUrlBuilder, HostInterlinker, Interlinker, RecipeTargetResolver, ResolveError,
    TargetResolver, TranscludeUrlBuilder, WikiFeatures,
};
pub use io::{IoError, load_store};
pub use model::{Container, Document, DocumentId, Principal};
pub use render::{RenderOptions, SafeMode, markdown_to_html, render};
pub use store::{MemoryStore, Policy, Store, StoreError};
