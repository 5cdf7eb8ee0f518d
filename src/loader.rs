use spdlog::{debug, error, info};

use crate::archive::{parse_archive, Category, ParsedArchive};
use crate::error::{EntryFault, ViewerError};
use crate::post::Post;
use crate::source::{ArchiveSource, Fetched};

/// Every post of one blog, merged across the four category files.
#[derive(Debug)]
pub struct BlogArchive {
    pub blog: String,
    pub posts: Vec<Post>,
    pub faults: Vec<EntryFault>,
}

async fn load_category<S: ArchiveSource>(source: &S, blog: &str, category: Category) -> Result<ParsedArchive, ViewerError> {
    match source.fetch(blog, category.file_name()).await? {
        Fetched::Absent => {
            debug!("{}/{} not found, skipping", blog, category);
            Ok(ParsedArchive::default())
        }
        Fetched::Content(content) => Ok(parse_archive(category, blog, &content)),
    }
}

/// Fetches the four category files of `blog` concurrently and parses them.
/// Waits for all of them; a transport fault on any file fails the whole load.
pub async fn load_blog<S: ArchiveSource>(source: &S, blog: &str) -> Result<BlogArchive, ViewerError> {
    let (images, videos, texts, answers) = tokio::join!(
        load_category(source, blog, Category::Images),
        load_category(source, blog, Category::Videos),
        load_category(source, blog, Category::Texts),
        load_category(source, blog, Category::Answers),
    );

    let mut archive = BlogArchive {
        blog: blog.to_string(),
        posts: vec![],
        faults: vec![],
    };

    for (category, res) in Category::ALL.into_iter().zip([images, videos, texts, answers]) {
        let parsed = match res {
            Ok(parsed) => parsed,
            Err(e) => {
                error!("Error loading blog {}: {}", blog, e);
                return Err(e);
            }
        };
        info!("{}/{}: {} posts loaded, {} skipped", blog, category, parsed.posts.len(), parsed.faults.len());
        archive.posts.extend(parsed.posts);
        archive.faults.extend(parsed.faults);
    }

    Ok(archive)
}
