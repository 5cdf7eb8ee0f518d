use crate::archive::Category;
use crate::archive::media_url::{nested_src, rewrite_body_images, rewrite_media_url, rewrite_video_url};
use crate::archive::parsing_utils::{contents_between, line_starting_with, POST_ID_MARKER};
use crate::error::ViewerError;
use crate::post::{Answer, Image, Post, PostCommon, PostKind, Text, Video};

const DATE: &str = "Date: ";
const POST_URL: &str = "Post url: ";
const TAGS: &str = "Tags: ";
const REBLOG_NAME: &str = "Reblog name: ";
const TITLE: &str = "Title: ";
const PHOTO_URL: &str = "Photo url: ";
const PHOTO_SET_URLS: &str = "Photo set urls: ";
const PHOTO_CAPTION: &str = "Photo caption: ";
const VIDEO_CAPTION: &str = "Video caption: ";
const VIDEO_PLAYER: &str = "Video player: ";

/// Builds a post from the lines of one line-format entry.
pub fn parse_entry(category: Category, blog: &str, lines: &[&str]) -> Result<Post, ViewerError> {
    let common = parse_common(lines)?;
    let entry = common.id.to_string();

    let kind = match category {
        Category::Images => PostKind::Image(parse_image(&entry, blog, lines)?),
        Category::Videos => PostKind::Video(parse_video(&entry, blog, lines)?),
        Category::Texts => PostKind::Text(parse_text(blog, lines)),
        Category::Answers => PostKind::Answer(Answer {
            body: contents_between(lines, REBLOG_NAME, Some(TAGS)),
        }),
    };

    Ok(Post { common, kind })
}

/// Raw `Post id` value of an entry, used to name it in diagnostics.
pub fn entry_id(lines: &[&str]) -> Option<String> {
    line_starting_with(lines, POST_ID_MARKER)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| id.to_string())
}

fn parse_common(lines: &[&str]) -> Result<PostCommon, ViewerError> {
    let raw_id = entry_id(lines)
        .ok_or_else(|| ViewerError::malformed("<no id>", "missing 'Post id' field"))?;
    let id = raw_id.parse::<u64>()
        .map_err(|e| ViewerError::malformed(raw_id.as_str(), format!("invalid post id: {}", e)))?;

    Ok(PostCommon {
        id,
        date: line_starting_with(lines, DATE).unwrap_or_default().to_string(),
        tags: extract_tags(line_starting_with(lines, TAGS).unwrap_or_default()),
        post_url: line_starting_with(lines, POST_URL)
            .filter(|url| !url.is_empty())
            .map(|url| url.to_string()),
    })
}

fn extract_tags(tags_str: &str) -> Vec<String> {
    tags_str.split(", ")
        .filter(|tag| !tag.is_empty())
        .map(|tag| tag.to_string())
        .collect()
}

fn parse_image(entry: &str, blog: &str, lines: &[&str]) -> Result<Image, ViewerError> {
    let mut urls: Vec<&str> = line_starting_with(lines, PHOTO_SET_URLS)
        .unwrap_or_default()
        .split_whitespace()
        .collect();
    if urls.is_empty() {
        if let Some(url) = line_starting_with(lines, PHOTO_URL).map(str::trim).filter(|u| !u.is_empty()) {
            urls.push(url);
        }
    }
    if urls.is_empty() {
        return Err(ViewerError::malformed(entry, "missing 'Photo url' field"));
    }

    Ok(Image {
        photo_urls: urls.into_iter().map(|url| rewrite_media_url(url, blog)).collect(),
        caption: field_until_tags(lines, PHOTO_CAPTION),
    })
}

/// Value of a field that may span several lines, ending before the `Tags: ` line.
fn field_until_tags(lines: &[&str], prefix: &str) -> Option<String> {
    let block = contents_between(lines, prefix, Some(TAGS));
    block.strip_prefix(prefix).map(|value| value.to_string())
}

fn parse_video(entry: &str, blog: &str, lines: &[&str]) -> Result<Video, ViewerError> {
    let player = contents_between(lines, VIDEO_PLAYER, None);
    if player.is_empty() {
        return Err(ViewerError::malformed(entry, "missing 'Video player' field"));
    }
    let src = nested_src(&player)
        .ok_or_else(|| ViewerError::malformed(entry, "video player has no nested element with a 'src' attribute"))?;

    Ok(Video {
        url: rewrite_video_url(&src, blog),
        caption: line_starting_with(lines, VIDEO_CAPTION).map(|c| c.to_string()),
    })
}

fn parse_text(blog: &str, lines: &[&str]) -> Text {
    let body = contents_between(lines, TITLE, Some(TAGS));
    Text {
        title: line_starting_with(lines, TITLE).map(|t| t.to_string()),
        body: rewrite_body_images(&body, blog),
        media_urls: vec![],
    }
}
