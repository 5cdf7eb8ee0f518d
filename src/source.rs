use std::io;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::blog_list::BlogList;
use crate::error::ViewerError;

/// Result of fetching one archive file. A missing file is not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    Content(String),
    Absent,
}

/// Byte retrieval for archive files: `fetch(blog, file)`.
#[allow(async_fn_in_trait)]
pub trait ArchiveSource {
    async fn fetch(&self, blog: &str, file_name: &str) -> Result<Fetched, ViewerError>;
}

/// Archives laid out on disk as `{root}/{blog}/{file}`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    pub root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: PathBuf) -> Self {
        DirectorySource { root }
    }

    pub fn list_blogs(&self) -> io::Result<Vec<String>> {
        BlogList { root_dir: self.root.clone() }.retrieve_blogs()
    }

    /// Fails with `InvalidBlog` unless `blog` names a directory under the root.
    pub fn check_blog(&self, blog: &str) -> Result<(), ViewerError> {
        check_name(blog)?;
        if !self.root.join(blog).is_dir() {
            return Err(ViewerError::InvalidBlog(blog.to_string()));
        }
        Ok(())
    }

    /// Path of a file inside a blog directory. Rejects names escaping the blogs root.
    pub fn media_path(&self, blog: &str, file_name: &str) -> Result<PathBuf, ViewerError> {
        check_name(blog)?;
        check_name(file_name)?;
        Ok(self.root.join(blog).join(file_name))
    }
}

fn check_name(name: &str) -> Result<(), ViewerError> {
    if name.is_empty() || name == "." || name.contains("..") || name.contains('/') || name.contains('\\') {
        return Err(ViewerError::InvalidBlog(name.to_string()));
    }
    Ok(())
}

impl ArchiveSource for DirectorySource {
    async fn fetch(&self, blog: &str, file_name: &str) -> Result<Fetched, ViewerError> {
        let path = self.media_path(blog, file_name)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Fetched::Content(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Fetched::Absent),
            Err(e) => Err(ViewerError::Transport {
                path: format!("/blogs/{}/{}", blog, file_name),
                reason: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[tokio::test]
    async fn test_fetch() -> io::Result<()> {
        let root = tempfile::tempdir()?;
        fs::create_dir(root.path().join("cats"))?;
        fs::write(root.path().join("cats").join("texts.txt"), "Post id: 1")?;
        fs::create_dir(root.path().join("cats").join("videos.txt"))?;

        let source = DirectorySource::new(root.path().to_path_buf());
        assert_eq!(source.fetch("cats", "texts.txt").await.unwrap(), Fetched::Content("Post id: 1".to_string()));
        assert_eq!(source.fetch("cats", "images.txt").await.unwrap(), Fetched::Absent);
        assert_eq!(source.fetch("dogs", "images.txt").await.unwrap(), Fetched::Absent);
        assert!(matches!(source.fetch("cats", "videos.txt").await, Err(ViewerError::Transport { .. })));
        Ok(())
    }

    #[test]
    fn test_check_blog() -> io::Result<()> {
        let root = tempfile::tempdir()?;
        fs::create_dir(root.path().join("cats"))?;
        fs::write(root.path().join("notes.txt"), "")?;

        let source = DirectorySource::new(root.path().to_path_buf());
        assert!(source.check_blog("cats").is_ok());
        assert!(matches!(source.check_blog("dogs"), Err(ViewerError::InvalidBlog(_))));
        assert!(matches!(source.check_blog("notes.txt"), Err(ViewerError::InvalidBlog(_))));
        assert!(matches!(source.check_blog(".."), Err(ViewerError::InvalidBlog(_))));
        Ok(())
    }

    #[test]
    fn test_media_path() {
        let source = DirectorySource::new(PathBuf::from("/srv/blogs"));
        assert_eq!(source.media_path("cats", "a.jpg").unwrap(), PathBuf::from("/srv/blogs/cats/a.jpg"));
        assert!(matches!(source.media_path("..", "a.jpg"), Err(ViewerError::InvalidBlog(_))));
        assert!(matches!(source.media_path("cats", "../../etc/passwd"), Err(ViewerError::InvalidBlog(_))));
        assert!(matches!(source.media_path("", "a.jpg"), Err(ViewerError::InvalidBlog(_))));
    }
}
