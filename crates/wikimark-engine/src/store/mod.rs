//! # Content Store
//!
//! The renderer reads documents through the [`Store`] trait. Read policy is
//! enforced inside the store: a rejected read surfaces as an error from the
//! same lookup, never as a separate check.
//!
//! [`MemoryStore`] is an in-process implementation with bags, recipes and
//! read policies. The directory loader in [`crate::io`] builds one from disk.

mod memory;
mod policy;

pub use memory::MemoryStore;
pub use policy::Policy;

use crate::model::{Document, DocumentId, Principal};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Document not found: {title}")]
    NotFound { title: String },
    #[error("Bag not found: {0}")]
    BagNotFound(String),
    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),
    #[error("No bag in recipe {recipe} holds {title}")]
    NoBagForTitle { recipe: String, title: String },
    #[error("{principal} may not read {container}")]
    PermissionDenied { principal: String, container: String },
    #[error("Document {0} has no container")]
    NoContainer(String),
}

pub trait Store {
    /// Fetches a document, checking read policy on every container involved.
    ///
    /// A recipe identity is resolved to the bag holding the title; the
    /// returned document always carries a concrete bag.
    fn get(&self, principal: &Principal, id: &DocumentId) -> Result<Document, StoreError>;

    /// Finds the bag in `recipe` that holds `title`, checking the recipe's
    /// read policy and then the bag's.
    fn bag_for_title(
        &self,
        principal: &Principal,
        recipe: &str,
        title: &str,
    ) -> Result<String, StoreError>;
}
