use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Local path of a media file for `blog`: `/blogs/{blog}/{last path segment}`.
pub fn rewrite_media_url(url: &str, blog: &str) -> String {
    let file_name = match url.rfind('/') {
        Some(idx) => &url[idx + 1..],
        None => url,
    };
    format!("/blogs/{}/{}", blog, file_name)
}

/// Like [`rewrite_media_url`], also dropping the `_<size>` suffix videos carry
/// in their remote name (`abc_1280.mp4` is stored as `abc.mp4`).
pub fn rewrite_video_url(url: &str, blog: &str) -> String {
    let local = rewrite_media_url(url, blog);
    let (dir, file_name) = local.split_at(local.rfind('/').map_or(0, |idx| idx + 1));
    format!("{}{}", dir, strip_size_suffix(file_name))
}

fn strip_size_suffix(file_name: &str) -> String {
    let (Some(underscore), Some(dot)) = (file_name.rfind('_'), file_name.rfind('.')) else {
        return file_name.to_string();
    };
    if underscore > dot {
        return file_name.to_string();
    }

    let stem = &file_name[..underscore];
    // `tumblr_xyz.mp4`: the underscore is part of the name
    if stem.ends_with("tumblr") {
        return file_name.to_string();
    }
    format!("{}{}", stem, &file_name[dot..])
}

/// Remote media URLs referenced by `src` attributes in an HTML fragment.
pub fn find_media_sources(html: &str) -> Vec<String> {
    lazy_static! {
        static ref MEDIA_SRC_REGEX: Regex = Regex::new(r#"src="(https://[^"/]*media\.[^"/]+/[^"]*)""#).unwrap();
    }

    MEDIA_SRC_REGEX.captures_iter(html)
        .map(|cap| cap[1].to_string())
        .collect()
}

/// `src` of the first element nested inside the outer tag of `html`,
/// e.g. the `<source>` inside `<video>`.
pub fn nested_src(html: &str) -> Option<String> {
    lazy_static! {
        static ref TAG_REGEX: Regex = Regex::new(r"<([A-Za-z][A-Za-z0-9-]*)([^>]*)>").unwrap();
        static ref SRC_REGEX: Regex = Regex::new(r#"\bsrc\s*=\s*["']([^"']*)["']"#).unwrap();
    }

    let nested = TAG_REGEX.captures_iter(html).nth(1)?;
    let attributes = nested.get(2)?.as_str();
    SRC_REGEX.captures(attributes)
        .map(|cap| cap[1].to_string())
        .filter(|src| !src.is_empty())
}

/// Points every `<img src>` in `html` at the local copy of the image.
pub fn rewrite_body_images(html: &str, blog: &str) -> String {
    lazy_static! {
        static ref IMG_REGEX: Regex = Regex::new(r#"<img[^>]*\ssrc="([^"]*)"[^>]*>"#).unwrap();
    }

    IMG_REGEX.replace_all(html, |captures: &Captures| {
        let tag = &captures[0];
        let (Some(whole), Some(src)) = (captures.get(0), captures.get(1)) else {
            return tag.to_string();
        };
        if src.as_str().is_empty() {
            return tag.to_string();
        }

        let start = src.start() - whole.start();
        let end = src.end() - whole.start();
        format!("{}{}{}", &tag[..start], rewrite_media_url(src.as_str(), blog), &tag[end..])
    }).to_string()
}

/// Drops `<img>`, `<figure>` and `<video>` elements from `html`.
/// Their files are rendered from the downloaded media instead.
pub fn strip_body_media(html: &str) -> String {
    lazy_static! {
        static ref MEDIA_ELEMENT_REGEX: Regex = Regex::new(r"(?is)<figure\b.*?</figure>|<video\b.*?</video>|<img\b[^>]*>").unwrap();
    }

    MEDIA_ELEMENT_REGEX.replace_all(html, "").to_string()
}
