use std::fmt;
use std::fmt::{Display, Formatter};

use spdlog::{debug, warn};

use crate::error::{EntryFault, ViewerError};
use crate::post::{Post, PostType};

pub mod json_parser;
pub mod legacy_parser;
pub mod media_url;
pub mod parsing_utils;

/// One of the four per-blog export files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Images,
    Videos,
    Texts,
    Answers,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::Images, Category::Videos, Category::Texts, Category::Answers];

    pub fn file_name(self) -> &'static str {
        match self {
            Category::Images => "images.txt",
            Category::Videos => "videos.txt",
            Category::Texts => "texts.txt",
            Category::Answers => "answers.txt",
        }
    }

    pub fn post_type(self) -> PostType {
        match self {
            Category::Images => PostType::Image,
            Category::Videos => PostType::Video,
            Category::Texts => PostType::Text,
            Category::Answers => PostType::Answer,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Empty,
    /// Line oriented, one `Post id: ` marker per post
    Legacy,
    /// JSON array of post objects
    Json,
}

impl ArchiveFormat {
    pub fn detect(content: &str) -> ArchiveFormat {
        let trimmed = content.trim();
        match trimmed {
            "" => ArchiveFormat::Empty,
            x if x.starts_with('[') => ArchiveFormat::Json,
            _ => ArchiveFormat::Legacy,
        }
    }
}

/// Posts recovered from one category file, plus the entries that had to be dropped.
#[derive(Debug, Default)]
pub struct ParsedArchive {
    pub posts: Vec<Post>,
    pub faults: Vec<EntryFault>,
}

impl ParsedArchive {
    fn push(&mut self, category: Category, entry: usize, post_id: Option<String>, res: Result<Post, ViewerError>) {
        match res {
            Ok(post) => self.posts.push(post),
            Err(e) => {
                let fault = EntryFault {
                    category,
                    entry: Some(entry),
                    post_id,
                    reason: e.to_string(),
                };
                warn!("Skipping {}", fault);
                self.faults.push(fault);
            }
        }
    }
}

/// Parses the content of one category file for `blog`.
/// A bad entry is dropped and reported in `faults`; it never fails the file.
pub fn parse_archive(category: Category, blog: &str, content: &str) -> ParsedArchive {
    let mut parsed = ParsedArchive::default();

    match ArchiveFormat::detect(content) {
        ArchiveFormat::Empty => {}
        ArchiveFormat::Legacy => {
            let entries = parsing_utils::split_entries(content);
            for (idx, lines) in entries.iter().enumerate() {
                let res = legacy_parser::parse_entry(category, blog, lines);
                parsed.push(category, idx + 1, legacy_parser::entry_id(lines), res);
            }
        }
        ArchiveFormat::Json => {
            let values = match serde_json::from_str::<Vec<serde_json::Value>>(content) {
                Ok(values) => values,
                Err(e) => {
                    let fault = EntryFault {
                        category,
                        entry: None,
                        post_id: None,
                        reason: format!("invalid JSON array: {}", e),
                    };
                    warn!("Skipping {}/{}", blog, fault);
                    parsed.faults.push(fault);
                    return parsed;
                }
            };
            for (idx, json) in values.into_iter().enumerate() {
                let post_id = json_parser::entry_id(&json);
                let res = json_parser::parse_entry(category, blog, json);
                parsed.push(category, idx + 1, post_id, res);
            }
        }
    }

    debug!("{}/{}: {} posts, {} skipped", blog, category, parsed.posts.len(), parsed.faults.len());
    parsed
}

#[cfg(test)]
mod tests {
    use crate::post::PostKind;
    use crate::test_data::{JSON_TEXTS, LEGACY_IMAGES, LEGACY_TEXTS, LEGACY_TEXTS_MISSING_ID};

    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(ArchiveFormat::detect(""), ArchiveFormat::Empty);
        assert_eq!(ArchiveFormat::detect(" \n\t"), ArchiveFormat::Empty);
        assert_eq!(ArchiveFormat::detect("\n  [{\"id\": 1}]"), ArchiveFormat::Json);
        assert_eq!(ArchiveFormat::detect("Post id: 1"), ArchiveFormat::Legacy);
    }

    #[test]
    fn test_empty_content() {
        let parsed = parse_archive(Category::Texts, "cats", "");
        assert!(parsed.posts.is_empty());
        assert!(parsed.faults.is_empty());
    }

    #[test]
    fn test_legacy_texts() {
        let parsed = parse_archive(Category::Texts, "cats", LEGACY_TEXTS);
        assert!(parsed.faults.is_empty());
        let ids: Vec<u64> = parsed.posts.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![101, 102, 103, 104, 105]);
    }

    #[test]
    fn test_bad_entry_is_isolated() {
        let parsed = parse_archive(Category::Texts, "cats", LEGACY_TEXTS_MISSING_ID);
        assert_eq!(parsed.posts.len(), 4);
        assert_eq!(parsed.faults.len(), 1);
        assert_eq!(parsed.faults[0].entry, Some(3));
        assert_eq!(parsed.faults[0].category, Category::Texts);
        assert!(parsed.faults[0].reason.contains("Post id"));

        let ids: Vec<u64> = parsed.posts.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![101, 102, 104, 105]);
    }

    #[test]
    fn test_legacy_images() {
        let parsed = parse_archive(Category::Images, "cats", LEGACY_IMAGES);
        assert_eq!(parsed.posts.len(), 2);
        assert!(parsed.faults.is_empty());
    }

    #[test]
    fn test_json_and_legacy_texts_have_same_fields() {
        let legacy = parse_archive(Category::Texts, "cats", LEGACY_TEXTS);
        let json = parse_archive(Category::Texts, "cats", JSON_TEXTS);
        assert!(json.faults.is_empty());
        assert_eq!(json.posts.len(), 2);

        for post in legacy.posts.iter().take(1).chain(json.posts.iter().take(1)) {
            let PostKind::Text(ref text) = post.kind else { panic!("expected a text") };
            assert_eq!(text.title.as_deref(), Some("First"));
            assert!(text.body.contains("<p>Hello there</p>"));
            assert_eq!(post.common.tags, vec!["intro", "hello"]);
        }
    }

    #[test]
    fn test_json_bad_element_is_isolated() {
        let content = r#"[
            {"id": "1", "date": "a", "tags": [], "body": "one"},
            {"id": "oops", "date": "b", "tags": [], "body": "two"},
            {"id": 3, "date": "c", "tags": [], "body": "three"}
        ]"#;
        let parsed = parse_archive(Category::Answers, "cats", content);
        assert_eq!(parsed.posts.len(), 2);
        assert_eq!(parsed.faults.len(), 1);
        assert_eq!(parsed.faults[0].entry, Some(2));
        assert_eq!(parsed.faults[0].post_id.as_deref(), Some("oops"));
    }

    #[test]
    fn test_broken_json_file() {
        let parsed = parse_archive(Category::Answers, "cats", "[{\"id\": 1,");
        assert!(parsed.posts.is_empty());
        assert_eq!(parsed.faults.len(), 1);
        assert_eq!(parsed.faults[0].entry, None);
    }
}
