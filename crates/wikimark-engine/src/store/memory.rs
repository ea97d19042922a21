use std::collections::{BTreeMap, HashMap};

use super::{Policy, Store, StoreError};
use crate::model::{Container, Document, DocumentId, Principal};

#[derive(Debug, Default)]
struct Bag {
    policy: Policy,
    documents: BTreeMap<String, Document>,
}

#[derive(Debug, Default)]
struct Recipe {
    policy: Policy,
    bags: Vec<String>,
}

/// An in-memory store of bags and recipes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    bags: HashMap<String, Bag>,
    recipes: HashMap<String, Recipe>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the bag if needed and sets its read policy.
    pub fn put_bag(&mut self, name: impl Into<String>, policy: Policy) {
        self.bags.entry(name.into()).or_default().policy = policy;
    }

    /// Defines a recipe. Later bags in `bags` win when resolving a title.
    pub fn put_recipe<I, S>(&mut self, name: impl Into<String>, bags: I, policy: Policy)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recipes.insert(
            name.into(),
            Recipe {
                policy,
                bags: bags.into_iter().map(Into::into).collect(),
            },
        );
    }

    /// Stores a document in `bag`, creating the bag with an open policy if
    /// it does not exist. The document's container is set to the bag.
    pub fn put(&mut self, bag: &str, document: Document) {
        let document = document.with_bag(bag);
        self.bags
            .entry(bag.to_string())
            .or_default()
            .documents
            .insert(document.title.clone(), document);
    }

    pub fn bag_names(&self) -> impl Iterator<Item = &str> {
        self.bags.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bags.values().map(|bag| bag.documents.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn readable_bag(&self, principal: &Principal, name: &str) -> Result<&Bag, StoreError> {
        let bag = self
            .bags
            .get(name)
            .ok_or_else(|| StoreError::BagNotFound(name.to_string()))?;
        if !bag.policy.allows_read(principal) {
            return Err(StoreError::PermissionDenied {
                principal: principal.name.clone(),
                container: Container::Bag(name.to_string()).to_string(),
            });
        }
        Ok(bag)
    }
}

impl Store for MemoryStore {
    fn get(&self, principal: &Principal, id: &DocumentId) -> Result<Document, StoreError> {
        let bag_name = match &id.container {
            Some(Container::Bag(name)) => name.clone(),
            Some(Container::Recipe(recipe)) => self.bag_for_title(principal, recipe, &id.title)?,
            None => return Err(StoreError::NoContainer(id.title.clone())),
        };
        let bag = self.readable_bag(principal, &bag_name)?;
        bag.documents
            .get(&id.title)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                title: id.title.clone(),
            })
    }

    fn bag_for_title(
        &self,
        principal: &Principal,
        recipe: &str,
        title: &str,
    ) -> Result<String, StoreError> {
        let found = self
            .recipes
            .get(recipe)
            .ok_or_else(|| StoreError::RecipeNotFound(recipe.to_string()))?;
        if !found.policy.allows_read(principal) {
            return Err(StoreError::PermissionDenied {
                principal: principal.name.clone(),
                container: Container::Recipe(recipe.to_string()).to_string(),
            });
        }

        let holder = found
            .bags
            .iter()
            .rev()
            .find(|name| {
                self.bags
                    .get(name.as_str())
                    .is_some_and(|bag| bag.documents.contains_key(title))
            })
            .ok_or_else(|| StoreError::NoBagForTitle {
                recipe: recipe.to_string(),
                title: title.to_string(),
            })?;

        self.readable_bag(principal, holder)?;
        Ok(holder.clone())
    }
}
