use crate::post::PostCommon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn of(url: &str) -> MediaKind {
        if url.ends_with(".mp4") {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}

pub fn render_header(common: &PostCommon) -> String {
    match common.post_url {
        Some(ref url) => format!(r#"<p><a href="{}">{}</a></p>"#, url, common.date),
        None => format!("<p>{}</p>", common.date),
    }
}

pub fn render_footer(common: &PostCommon) -> String {
    if common.tags.is_empty() {
        return String::new();
    }
    format!("<p>Tags: {}</p>", common.tags.join(", "))
}

pub fn render_image(url: &str) -> String {
    format!(r#"<img src="{}" alt="[image]">"#, url)
}

pub fn render_video(url: &str) -> String {
    format!(r#"<video controls><source src="{}"></video>"#, url)
}

pub fn render_text_media(url: &str) -> String {
    match MediaKind::of(url) {
        MediaKind::Video => render_video(url),
        MediaKind::Image => render_image(url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_hidden_without_tags() {
        let mut common = PostCommon {
            id: 1,
            date: "d".to_string(),
            tags: vec![],
            post_url: None,
        };
        assert_eq!(render_footer(&common), "");
        common.tags = vec!["a".to_string(), "b c".to_string()];
        assert_eq!(render_footer(&common), "<p>Tags: a, b c</p>");
    }

    #[test]
    fn test_text_media_by_extension() {
        assert_eq!(render_text_media("/blogs/x/a.mp4"), r#"<video controls><source src="/blogs/x/a.mp4"></video>"#);
        assert_eq!(render_text_media("/blogs/x/a.gif"), r#"<img src="/blogs/x/a.gif" alt="[image]">"#);
    }
}
