use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

#[derive(ramhorns::Content)]
struct IndexPage<'a> {
    blogs: Vec<ViewBlog<'a>>,
    blog_count: u64,
}

#[derive(ramhorns::Content)]
struct ViewBlog<'a> {
    name: &'a str,
}

pub struct IndexRenderer<'a> {
    pub template: Template<'a>,
}

impl IndexRenderer<'_> {
    pub fn new(index_tpl_src: &str) -> io::Result<IndexRenderer> {
        match Template::new(index_tpl_src) {
            Ok(template) => Ok(IndexRenderer { template }),
            Err(e) => Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing index template: {}", e))),
        }
    }

    pub fn render(&self, blogs: &[String]) -> String {
        self.template.render(&IndexPage {
            blogs: blogs.iter().map(|b| ViewBlog { name: b.as_str() }).collect(),
            blog_count: blogs.len() as u64,
        })
    }
}
