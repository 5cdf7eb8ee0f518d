#[cfg(test)]
pub const LEGACY_TEXTS: &str = "Post id: 101
Date: 2017-09-10 10:42:32 GMT
Post url: https://cats.tumblr.com/post/101
Title: First
<p>Hello there</p>
Tags: intro, hello
Post id: 102
Date: 2017-09-11 10:42:32 GMT
Title: Second
<p>More words</p>
<p>over two lines</p>
Tags: 
Post id: 103
Date: 2017-09-12 10:42:32 GMT
Title: Third
<p>cats</p>
Tags: cats
Post id: 104
Date: 2017-09-13 10:42:32 GMT
Title: Fourth
<p>dogs</p>
Tags: dogs
Post id: 105
Date: 2017-09-14 10:42:32 GMT
Title: Fifth
<p>birds</p>
Tags: birds
";

#[cfg(test)]
pub const LEGACY_TEXTS_MISSING_ID: &str = "Post id: 101
Date: 2017-09-10 10:42:32 GMT
Title: First
<p>Hello there</p>
Tags: intro, hello
Post id: 102
Date: 2017-09-11 10:42:32 GMT
Title: Second
<p>More words</p>
Tags: 
Post id: 
Date: 2017-09-12 10:42:32 GMT
Title: Third
<p>cats</p>
Tags: cats
Post id: 104
Date: 2017-09-13 10:42:32 GMT
Title: Fourth
<p>dogs</p>
Tags: dogs
Post id: 105
Date: 2017-09-14 10:42:32 GMT
Title: Fifth
<p>birds</p>
Tags: birds
";

#[cfg(test)]
pub const LEGACY_IMAGES: &str = "Post id: 180000000001
Date: 2018-11-04 18:30:12 GMT
Post url: https://cats.tumblr.com/post/180000000001
Photo url: https://64.media.tumblr.com/a0/tumblr_cover_1280.jpg
Photo set urls: https://64.media.tumblr.com/a1/tumblr_one_1280.jpg https://64.media.tumblr.com/a2/tumblr_two_1280.jpg
Photo caption: <p>Two friends</p>
Tags: cats, dogs
Post id: 180000000002
Date: 2018-11-05 18:30:12 GMT
Photo url: https://64.media.tumblr.com/b0/tumblr_solo_500.png
Photo set urls: 
Photo caption: 
Tags: 
";

#[cfg(test)]
pub const LEGACY_VIDEOS: &str = r#"Post id: 190000000001
Date: 2019-01-01 08:00:00 GMT
Video caption: <p>zoomies</p>
Video player: <video controls poster="https://64.media.tumblr.com/p.jpg">
<source src="https://vt.tumblr.com/tumblr_pgx1_480.mp4" type="video/mp4">
</video>
Tags: cats
Post id: 190000000002
Date: 2019-01-02 08:00:00 GMT
Video caption: <p>embedded</p>
Video player: <iframe width="400" height="225"></iframe>
Tags: 
"#;

#[cfg(test)]
pub const LEGACY_ANSWERS: &str = "Post id: 200000000001
Date: 2019-02-01 08:00:00 GMT
Reblog name: 
<p>Do you like cats?</p>
<p>Yes.</p>
Tags: ask
";

#[cfg(test)]
pub const JSON_TEXTS: &str = r#"[
  {
    "id": "101",
    "date": "2017-09-10 10:42:32 GMT",
    "tags": ["intro", "hello"],
    "url": "https://cats.tumblr.com/post/101",
    "regular-title": "First",
    "regular-body": "<p>Hello there</p>"
  },
  {
    "id": 106,
    "date": "2017-09-15 10:42:32 GMT",
    "tags": [],
    "title": "Sixth",
    "body": "<p>with a clip</p>",
    "downloaded-media-files": ["tumblr_clip.mp4"]
  }
]"#;
