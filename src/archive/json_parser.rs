use std::collections::HashSet;

use serde::Deserialize;

use crate::archive::Category;
use crate::archive::media_url::{find_media_sources, rewrite_media_url, rewrite_video_url, strip_body_media};
use crate::error::ViewerError;
use crate::post::{Answer, Image, Post, PostCommon, PostKind, Text, Video};

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonId {
    Number(u64),
    Text(String),
}

#[derive(Deserialize)]
struct JsonCommon {
    id: JsonId,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    post_url: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    #[serde(alias = "downloaded-media-files")]
    downloaded_media_files: Vec<String>,
}

impl JsonCommon {
    fn to_model(&self) -> Result<PostCommon, ViewerError> {
        let id = match self.id {
            JsonId::Number(id) => id,
            JsonId::Text(ref raw) => raw.trim().parse()
                .map_err(|e| ViewerError::malformed(raw.as_str(), format!("invalid post id: {}", e)))?,
        };
        Ok(PostCommon {
            id,
            date: self.date.clone().unwrap_or_default(),
            tags: self.tags.clone(),
            post_url: self.post_url.clone().or_else(|| self.url.clone()),
        })
    }

    fn local_media(&self, blog: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.downloaded_media_files.iter()
            .filter(|file| seen.insert(file.as_str()))
            .map(|file| rewrite_media_url(file, blog))
            .collect()
    }
}

#[derive(Deserialize)]
struct JsonImage {
    #[serde(flatten)]
    common: JsonCommon,
    #[serde(default)]
    #[serde(alias = "photo-caption")]
    caption: Option<String>,
    #[serde(default)]
    body: Option<String>,
}

impl JsonImage {
    fn into_post(self, blog: &str) -> Result<Post, ViewerError> {
        let common = self.common.to_model()?;
        let html = [self.caption.as_deref(), self.body.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("\n");
        let mut photo_urls: Vec<String> = find_media_sources(&html).iter()
            .map(|url| rewrite_media_url(url, blog))
            .collect();
        if photo_urls.is_empty() {
            photo_urls = self.common.local_media(blog);
        }
        if photo_urls.is_empty() {
            return Err(ViewerError::malformed(common.id.to_string(), "no photo urls"));
        }

        Ok(Post {
            common,
            kind: PostKind::Image(Image {
                photo_urls,
                caption: self.caption,
            }),
        })
    }
}

#[derive(Deserialize)]
struct JsonVideo {
    #[serde(flatten)]
    common: JsonCommon,
    #[serde(default)]
    #[serde(alias = "video-url")]
    video_url: Option<String>,
    #[serde(default)]
    #[serde(alias = "video-caption")]
    caption: Option<String>,
}

impl JsonVideo {
    fn into_post(self, blog: &str) -> Result<Post, ViewerError> {
        let common = self.common.to_model()?;
        let url = match self.video_url.as_deref().filter(|u| !u.is_empty()) {
            Some(remote) => rewrite_video_url(remote, blog),
            None => self.common.local_media(blog)
                .into_iter()
                .next()
                .ok_or_else(|| ViewerError::malformed(common.id.to_string(), "missing 'video_url' field"))?,
        };

        Ok(Post {
            common,
            kind: PostKind::Video(Video {
                url,
                caption: self.caption,
            }),
        })
    }
}

#[derive(Deserialize)]
struct JsonText {
    #[serde(flatten)]
    common: JsonCommon,
    #[serde(default)]
    #[serde(alias = "regular-title")]
    title: Option<String>,
    #[serde(default)]
    #[serde(alias = "regular-body")]
    body: String,
}

impl JsonText {
    fn into_post(self, blog: &str) -> Result<Post, ViewerError> {
        Ok(Post {
            common: self.common.to_model()?,
            kind: PostKind::Text(Text {
                title: self.title,
                body: strip_body_media(&self.body),
                media_urls: self.common.local_media(blog),
            }),
        })
    }
}

#[derive(Deserialize)]
struct JsonAnswer {
    #[serde(flatten)]
    common: JsonCommon,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    answer: Option<String>,
}

impl JsonAnswer {
    fn into_post(self) -> Result<Post, ViewerError> {
        let body = match (self.body, self.question, self.answer) {
            (Some(body), _, _) => body,
            (None, Some(question), answer) => format!("<em>{}</em><br>{}", question, answer.unwrap_or_default()),
            (None, None, answer) => answer.unwrap_or_default(),
        };
        Ok(Post {
            common: self.common.to_model()?,
            kind: PostKind::Answer(Answer { body }),
        })
    }
}

/// Builds a post from one element of a JSON export array.
pub fn parse_entry(category: Category, blog: &str, json: serde_json::Value) -> Result<Post, ViewerError> {
    let entry = entry_id(&json).unwrap_or_else(|| "<no id>".to_string());
    let malformed = |e: serde_json::Error| ViewerError::malformed(entry.as_str(), e.to_string());
    match category {
        Category::Images => serde_json::from_value::<JsonImage>(json).map_err(malformed)?.into_post(blog),
        Category::Videos => serde_json::from_value::<JsonVideo>(json).map_err(malformed)?.into_post(blog),
        Category::Texts => serde_json::from_value::<JsonText>(json).map_err(malformed)?.into_post(blog),
        Category::Answers => serde_json::from_value::<JsonAnswer>(json).map_err(malformed)?.into_post(),
    }
}

/// `id` of a JSON entry as text, used to name it in diagnostics.
pub fn entry_id(json: &serde_json::Value) -> Option<String> {
    match json.get("id")? {
        serde_json::Value::String(id) => Some(id.clone()),
        serde_json::Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}
