use std::cell::RefCell;

use crate::features::WikiFeatures;
use crate::model::Principal;
use crate::render::RenderOptions;
use crate::store::Store;
use crate::transclude::{InclusionGuard, InclusionStack};

/// State for one top-level render and every transclusion beneath it.
///
/// The inclusion stack sits in a `RefCell`, so a context is `!Sync` and can
/// never be shared between concurrent renders.
pub struct RenderContext<'s> {
    pub principal: Principal,
    pub store: Option<&'s dyn Store>,
    pub options: RenderOptions,
    /// `None` disables link rewriting and transclusion entirely.
    pub wiki: Option<WikiFeatures>,
    inclusion: RefCell<InclusionStack>,
}

impl<'s> RenderContext<'s> {
    pub fn new(principal: Principal) -> Self {
        Self {
            principal,
            store: None,
            options: RenderOptions::default(),
            wiki: None,
            inclusion: RefCell::new(InclusionStack::default()),
        }
    }

    pub fn with_store(mut self, store: &'s dyn Store) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_wiki(mut self, wiki: WikiFeatures) -> Self {
        self.wiki = Some(wiki);
        self
    }

    /// Starts a top-level render of `title`.
    ///
    /// Returns `None` for a nested render, which shares the stack its root
    /// set up.
    pub(crate) fn begin_root(&self, title: &str) -> Option<InclusionGuard<'_>> {
        if !self.inclusion.borrow().is_empty() {
            return None;
        }
        InclusionGuard::enter(&self.inclusion, title)
    }

    /// Marks `title` as being expanded. `None` if it already is.
    pub(crate) fn enter(&self, title: &str) -> Option<InclusionGuard<'_>> {
        InclusionGuard::enter(&self.inclusion, title)
    }

    pub fn is_expanding(&self, title: &str) -> bool {
        self.inclusion.borrow().contains(title)
    }

    /// Title of the document the current top-level render started from.
    pub fn root_title(&self) -> Option<String> {
        self.inclusion.borrow().root().map(str::to_string)
    }

    /// Titles currently being expanded, root first.
    pub fn inclusion_path(&self) -> Vec<String> {
        self.inclusion.borrow().titles().to_vec()
    }
}
