use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary store directory
pub fn create_test_store_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a document file inside a bag directory, creating the bag if needed
pub fn create_test_file(store_dir: &TempDir, bag: &str, filename: &str, content: &str) -> PathBuf {
    let bag_dir = store_dir.path().join(bag);
    fs::create_dir_all(&bag_dir).unwrap();
    let file_path = bag_dir.join(filename);
    fs::write(&file_path, content).unwrap();
    file_path
}
