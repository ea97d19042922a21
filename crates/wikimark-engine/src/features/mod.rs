//! Wiki features and the capabilities injected into them.
//!
//! `WikiFeatures` being present on a [`RenderContext`] is what turns on link
//! rewriting and transclusion. Cross-namespace behaviour is delegated to the
//! three single-method traits below.

mod defaults;

pub use defaults::{BagUrlBuilder, HostInterlinker, RecipeTargetResolver};

use std::fmt;

use crate::context::RenderContext;
use crate::model::{Document, DocumentId};
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("No store configured")]
    NoStore,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Maps a namespace name to the base URI that its pages live under.
pub trait Interlinker {
    fn base_uri(&self, ctx: &RenderContext<'_>, target: &str) -> String;
}

/// Binds a target-qualified reference to a concrete container.
pub trait TargetResolver {
    /// Returns `id` with its container set for `target`.
    fn resolve(
        &self,
        ctx: &RenderContext<'_>,
        target: &str,
        id: DocumentId,
    ) -> Result<DocumentId, ResolveError>;
}

/// Builds the URI a transcluded document can be viewed at.
pub trait TranscludeUrlBuilder {
    fn source_uri(&self, ctx: &RenderContext<'_>, document: &Document) -> String;
}

/// Everything that wiki link and transclusion rendering is configured with.
pub struct WikiFeatures {
    /// Prefix for local page links. May be empty.
    pub link_base: String,
    pub interlinker: Option<Box<dyn Interlinker>>,
    pub target_resolver: Option<Box<dyn TargetResolver>>,
    pub transclude_url: Option<Box<dyn TranscludeUrlBuilder>>,
}

impl WikiFeatures {
    pub fn new(link_base: impl Into<String>) -> Self {
        Self {
            link_base: link_base.into(),
            interlinker: None,
            target_resolver: None,
            transclude_url: None,
        }
    }

    pub fn with_interlinker(mut self, interlinker: impl Interlinker + 'static) -> Self {
        self.interlinker = Some(Box::new(interlinker));
        self
    }

    pub fn with_target_resolver(mut self, resolver: impl TargetResolver + 'static) -> Self {
        self.target_resolver = Some(Box::new(resolver));
        self
    }

    pub fn with_transclude_url(mut self, builder: impl TranscludeUrlBuilder + 'static) -> Self {
        self.transclude_url = Some(Box::new(builder));
        self
    }
}

impl fmt::Debug for WikiFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WikiFeatures")
            .field("link_base", &self.link_base)
            .field("interlinker", &self.interlinker.is_some())
            .field("target_resolver", &self.target_resolver.is_some())
            .field("transclude_url", &self.transclude_url.is_some())
            .finish()
    }
}
