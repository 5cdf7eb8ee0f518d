use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ViewerError;
use crate::post_render::{render_footer, render_header, render_image, render_text_media, render_video, MediaKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostType {
    Image,
    Video,
    Text,
    Answer,
}

impl PostType {
    pub const ALL: [PostType; 4] = [PostType::Image, PostType::Video, PostType::Text, PostType::Answer];

    pub fn name(self) -> &'static str {
        match self {
            PostType::Image => "Image",
            PostType::Video => "Video",
            PostType::Text => "Text",
            PostType::Answer => "Answer",
        }
    }
}

impl Display for PostType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PostType {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PostType::ALL.into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| ViewerError::UnknownVariant(s.to_string()))
    }
}

/// Fields shared by every post variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostCommon {
    pub id: u64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub photo_urls: Vec<String>,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub url: String,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub title: Option<String>,
    pub body: String,
    #[serde(default)]
    pub media_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PostKind {
    Image(Image),
    Video(Video),
    Text(Text),
    Answer(Answer),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(flatten)]
    pub common: PostCommon,
    #[serde(flatten)]
    pub kind: PostKind,
}

impl Post {
    pub fn id(&self) -> u64 {
        self.common.id
    }

    pub fn post_type(&self) -> PostType {
        match self.kind {
            PostKind::Image(_) => PostType::Image,
            PostKind::Video(_) => PostType::Video,
            PostKind::Text(_) => PostType::Text,
            PostKind::Answer(_) => PostType::Answer,
        }
    }

    /// Types this post is listed under. Text posts carrying downloaded media
    /// also show up under the media's type.
    pub fn types(&self) -> Vec<PostType> {
        let mut out = vec![self.post_type()];
        if let PostKind::Text(ref text) = self.kind {
            let kinds: Vec<MediaKind> = text.media_urls.iter().map(|u| MediaKind::of(u)).collect();
            if kinds.contains(&MediaKind::Video) {
                out.push(PostType::Video);
            } else if kinds.contains(&MediaKind::Image) {
                out.push(PostType::Image);
            }
        }
        out
    }

    pub fn tags_line(&self) -> String {
        self.common.tags.join(", ")
    }

    /// Markup for this post: header, variant body, footer.
    pub fn render(&self) -> String {
        let header = render_header(&self.common);
        let footer = render_footer(&self.common);
        let parts = match self.kind {
            PostKind::Image(ref image) => {
                let images = image.photo_urls.iter()
                    .map(|url| render_image(url))
                    .collect::<Vec<_>>()
                    .join("\n");
                vec![header, image.caption.clone().unwrap_or_default(), images, footer]
            }
            PostKind::Video(ref video) => {
                let caption = format!("<div>{}</div>", video.caption.as_deref().unwrap_or_default());
                vec![header, caption, render_video(&video.url), footer]
            }
            PostKind::Text(ref text) => {
                let title = match text.title {
                    Some(ref title) if !title.is_empty() => format!("<h4>{}</h4>", title),
                    _ => String::new(),
                };
                let media = text.media_urls.iter()
                    .map(|url| render_text_media(url))
                    .collect::<Vec<_>>()
                    .join("\n");
                vec![header, title, text.body.clone(), media, footer]
            }
            PostKind::Answer(ref answer) => vec![header, answer.body.clone(), footer],
        };
        parts.join("\n")
    }

    /// Case-sensitive substring match over the tags line and the variant's text fields.
    pub fn matches_search(&self, query: &str) -> bool {
        if self.tags_line().contains(query) {
            return true;
        }
        let contains = |field: &Option<String>| field.as_deref().unwrap_or_default().contains(query);
        match self.kind {
            PostKind::Image(ref image) => contains(&image.caption),
            PostKind::Video(ref video) => contains(&video.caption),
            PostKind::Text(ref text) => contains(&text.title) || text.body.contains(query),
            PostKind::Answer(ref answer) => answer.body.contains(query),
        }
    }

    /// Rebuilds a post from its serialized form, dispatching on the `type` tag.
    pub fn from_json(json: serde_json::Value) -> Result<Post, ViewerError> {
        let tag = json.get("type")
            .and_then(|t| t.as_str())
            .ok_or_else(|| ViewerError::UnknownVariant("<missing>".to_string()))?;
        let post_type: PostType = tag.parse()?;
        serde_json::from_value(json).map_err(|e| ViewerError::malformed(post_type.name(), e.to_string()))
    }
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} id={}, date={}, tags=[{}]",
               self.post_type(),
               self.common.id,
               self.common.date,
               self.tags_line()
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn common(id: u64, tags: &[&str]) -> PostCommon {
        PostCommon {
            id,
            date: "2019-03-02 10:00:00 GMT".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            post_url: None,
        }
    }

    fn image(id: u64, tags: &[&str], caption: Option<&str>) -> Post {
        Post {
            common: common(id, tags),
            kind: PostKind::Image(Image {
                photo_urls: vec!["/blogs/cats/a.jpg".to_string(), "/blogs/cats/b.jpg".to_string()],
                caption: caption.map(|c| c.to_string()),
            }),
        }
    }

    #[test]
    fn test_search_matches_tag_substring() {
        let post = image(1, &["cats", "dogs"], None);
        assert!(post.matches_search("dog"));
        assert!(!post.matches_search("bird"));
    }

    #[test]
    fn test_search_is_case_sensitive() {
        let post = image(1, &["Cats"], Some("A sleepy one"));
        assert!(post.matches_search("sleepy"));
        assert!(!post.matches_search("cats"));
    }

    #[test]
    fn test_search_missing_fields() {
        let video = Post {
            common: common(2, &[]),
            kind: PostKind::Video(Video { url: "/blogs/cats/v.mp4".to_string(), caption: None }),
        };
        assert!(!video.matches_search("x"));
        assert!(video.matches_search(""));

        let text = Post {
            common: common(3, &[]),
            kind: PostKind::Text(Text { title: None, body: "hello world".to_string(), media_urls: vec![] }),
        };
        assert!(text.matches_search("world"));
        assert!(!text.matches_search("title"));
    }

    #[test]
    fn test_render_image() {
        let post = image(1, &["cats", "dogs"], Some("caption"));
        assert_eq!(post.render(), r#"<p>2019-03-02 10:00:00 GMT</p>
caption
<img src="/blogs/cats/a.jpg" alt="[image]">
<img src="/blogs/cats/b.jpg" alt="[image]">
<p>Tags: cats, dogs</p>"#);
    }

    #[test]
    fn test_render_is_pure() {
        let post = image(1, &[], None);
        assert_eq!(post.render(), post.render());
    }

    #[test]
    fn test_render_text_and_answer() {
        let mut text_common = common(5, &[]);
        text_common.post_url = Some("https://cats.tumblr.com/post/5".to_string());
        let text = Post {
            common: text_common,
            kind: PostKind::Text(Text {
                title: Some("Hi".to_string()),
                body: "<p>body</p>".to_string(),
                media_urls: vec!["/blogs/cats/clip.mp4".to_string()],
            }),
        };
        assert_eq!(text.render(), r#"<p><a href="https://cats.tumblr.com/post/5">2019-03-02 10:00:00 GMT</a></p>
<h4>Hi</h4>
<p>body</p>
<video controls><source src="/blogs/cats/clip.mp4"></video>
"#);
        assert_eq!(text.types(), vec![PostType::Text, PostType::Video]);

        let answer = Post {
            common: common(6, &["q"]),
            kind: PostKind::Answer(Answer { body: "yes".to_string() }),
        };
        assert_eq!(answer.render(), "<p>2019-03-02 10:00:00 GMT</p>\nyes\n<p>Tags: q</p>");
    }

    #[test]
    fn test_post_type_from_str() {
        assert_eq!("Video".parse::<PostType>().unwrap(), PostType::Video);
        assert!(matches!("Chat".parse::<PostType>(), Err(ViewerError::UnknownVariant(t)) if t == "Chat"));
    }

    #[test]
    fn test_from_json_dispatch() {
        let post = Post::from_json(json!({
            "type": "Answer",
            "id": 7,
            "date": "today",
            "tags": ["a"],
            "body": "an answer",
        })).unwrap();
        assert_eq!(post.post_type(), PostType::Answer);
        assert_eq!(post.id(), 7);

        let serialized = serde_json::to_value(&post).unwrap();
        assert_eq!(serialized["type"], "Answer");
        assert_eq!(Post::from_json(serialized).unwrap(), post);

        let unknown = Post::from_json(json!({"type": "Chat", "id": 1}));
        assert!(matches!(unknown, Err(ViewerError::UnknownVariant(t)) if t == "Chat"));
    }
}
