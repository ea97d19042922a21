//! Loading a [`MemoryStore`] from a directory tree.
//!
//! ```text
//! store/
//!   store.toml          optional policies and recipes
//!   system/             a bag
//!     Site%20Title.md   document "Site Title", type text/x-markdown
//!   cdent_public/
//!     Notes.md
//! ```

use relative_path::RelativePath;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::links::decode_title;
use crate::model::Document;
use crate::render::RenderOptions;
use crate::store::{MemoryStore, Policy};

pub const MANIFEST_FILE: &str = "store.toml";

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid store directory: {0}")]
    InvalidStoreDir(String),
    #[error("Invalid store manifest: {0}")]
    Manifest(#[from] toml::de::Error),
}

/// Policies and recipes declared in `store.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub bags: BTreeMap<String, Policy>,
    #[serde(default)]
    pub recipes: BTreeMap<String, RecipeEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecipeEntry {
    pub bags: Vec<String>,
    #[serde(default)]
    pub read: Vec<String>,
}

/// Read a document file and return its content
pub fn read_file(relative_path: &RelativePath, store_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(store_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

pub fn validate_store_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidStoreDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}

/// Read `store.toml` from the store root, or an empty manifest if absent
pub fn read_manifest(store_root: &Path) -> Result<Manifest, IoError> {
    let path = RelativePath::new(MANIFEST_FILE);
    match read_file(path, store_root) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(IoError::NotFound(_)) => Ok(Manifest::default()),
        Err(e) => Err(e),
    }
}

/// List the bag directories under the store root, sorted by name
pub fn scan_bags(store_root: &Path) -> Result<Vec<String>, IoError> {
    validate_store_dir(store_root)?;

    let mut bags = Vec::new();
    for entry in fs::read_dir(store_root)? {
        let entry = entry?;
        if entry.path().is_dir()
            && let Some(name) = entry.file_name().to_str()
            && !name.starts_with('.')
        {
            bags.push(name.to_string());
        }
    }
    bags.sort();
    Ok(bags)
}

/// Build a store from every bag directory under `store_root`.
///
/// Unreadable or non-UTF-8 files are skipped with a warning. Nested
/// directories inside a bag are ignored.
pub fn load_store(store_root: &Path) -> Result<MemoryStore, IoError> {
    let manifest = read_manifest(store_root)?;
    let mut store = MemoryStore::new();

    for bag in scan_bags(store_root)? {
        let policy = manifest.bags.get(&bag).cloned().unwrap_or_default();
        store.put_bag(bag.as_str(), policy);

        for document in load_bag(store_root, &bag)? {
            store.put(&bag, document);
        }
    }

    for bag in manifest.bags.keys() {
        if !store.bag_names().any(|known| known == bag.as_str()) {
            log::warn!("store manifest names bag {bag} with no directory");
        }
    }
    for (name, recipe) in manifest.recipes {
        store.put_recipe(name, recipe.bags, Policy { read: recipe.read });
    }

    log::debug!(
        "loaded {} documents from {}",
        store.len(),
        store_root.display()
    );
    Ok(store)
}

fn load_bag(store_root: &Path, bag: &str) -> Result<Vec<Document>, IoError> {
    let bag_dir = RelativePath::new(bag).to_path(store_root);
    let mut files: Vec<PathBuf> = fs::read_dir(&bag_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    let mut documents = Vec::with_capacity(files.len());
    for path in files {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            log::warn!("skipping {}: file name is not UTF-8", path.display());
            continue;
        };
        if stem.starts_with('.') {
            continue;
        }
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("skipping {}: {e}", path.display());
                continue;
            }
        };

        let mut document = Document::new(decode_title(stem), text);
        if let Some(ext) = path.extension()
            && ext == "md"
        {
            document = document.with_type(RenderOptions::MARKDOWN_TYPE);
        }
        documents.push(document);
    }

    Ok(documents)
}
