use std::{fs, io};
use std::path::{Path, PathBuf};

use crate::archive::Category;

/// Directory name skipped when listing blogs.
const INDEX_DIR: &str = "Index";

pub struct BlogList {
    pub root_dir: PathBuf,
}

impl BlogList {
    /// Names of the sub-directories holding at least one category file, sorted.
    pub fn retrieve_blogs(&self) -> io::Result<Vec<String>> {
        let dirs = Self::list_dirs(self.root_dir.as_path())?;
        let mut blogs = Self::filter_dirs(dirs);
        blogs.sort();
        Ok(blogs)
    }

    fn list_dirs(blogs_dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut dirs: Vec<PathBuf> = vec![];
        let entries = fs::read_dir(blogs_dir)?;
        for entry in entries.flatten() {
            if let Ok(file_type) = entry.file_type() {
                if file_type.is_dir() {
                    dirs.push(entry.path());
                }
            }
        }
        Ok(dirs)
    }

    fn filter_dirs(dirs: Vec<PathBuf>) -> Vec<String> {
        let mut blogs = vec![];
        for dir in dirs {
            let Some(name) = dir.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if name == INDEX_DIR {
                continue;
            }
            if Self::contains_archive(&dir) {
                blogs.push(name.to_string());
            }
        }
        blogs
    }

    fn contains_archive(dir: &Path) -> bool {
        Category::ALL.iter()
            .any(|category| dir.join(category.file_name()).is_file())
    }
}
