//! Documents, their identities, and the principal that reads them.

use std::fmt;

/// Where a document lives: a concrete bag, or a recipe that resolves to one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Container {
    Bag(String),
    Recipe(String),
}

impl Container {
    pub fn name(&self) -> &str {
        match self {
            Container::Bag(name) | Container::Recipe(name) => name,
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Container::Bag(name) => write!(f, "bag:{name}"),
            Container::Recipe(name) => write!(f, "recipe:{name}"),
        }
    }
}

/// The identity a store lookup is made with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentId {
    pub title: String,
    pub container: Option<Container>,
}

impl DocumentId {
    /// An identity with no container bound yet.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            container: None,
        }
    }

    pub fn in_bag(title: impl Into<String>, bag: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            container: Some(Container::Bag(bag.into())),
        }
    }

    pub fn in_recipe(title: impl Into<String>, recipe: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            container: Some(Container::Recipe(recipe.into())),
        }
    }
}

/// A stored document. Owned by the store; the renderer only reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    pub container: Option<Container>,
    pub text: String,
    /// Render-kind discriminator (a MIME type). `None` means default wikitext.
    pub doc_type: Option<String>,
}

impl Document {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            container: None,
            text: text.into(),
            doc_type: None,
        }
    }

    pub fn with_bag(mut self, bag: impl Into<String>) -> Self {
        self.container = Some(Container::Bag(bag.into()));
        self
    }

    pub fn with_recipe(mut self, recipe: impl Into<String>) -> Self {
        self.container = Some(Container::Recipe(recipe.into()));
        self
    }

    pub fn with_type(mut self, doc_type: impl Into<String>) -> Self {
        self.doc_type = Some(doc_type.into());
        self
    }

    pub fn id(&self) -> DocumentId {
        DocumentId {
            title: self.title.clone(),
            container: self.container.clone(),
        }
    }

    /// Name of the concrete bag holding this document, if known.
    pub fn bag(&self) -> Option<&str> {
        match &self.container {
            Some(Container::Bag(name)) => Some(name),
            _ => None,
        }
    }
}

/// The acting identity whose permissions gate store reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub name: String,
    pub roles: Vec<String>,
}

impl Principal {
    pub const GUEST: &'static str = "GUEST";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roles: Vec::new(),
        }
    }

    pub fn guest() -> Self {
        Self::new(Self::GUEST)
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    pub fn is_guest(&self) -> bool {
        self.name == Self::GUEST
    }
}

impl Default for Principal {
    fn default() -> Self {
        Self::guest()
    }
}
