use std::io;
use std::io::ErrorKind;

use ramhorns::Template;

use crate::post::{Post, PostType};
use crate::viewer::{ListQuery, PageView, SortOrder};

#[derive(ramhorns::Content)]
struct BlogPage<'a> {
    blog: &'a str,
    blogs: Vec<ViewOption<'a>>,
    type_options: Vec<ViewOption<'a>>,
    sort_options: Vec<ViewOption<'a>>,
    search: &'a str,
    total: u64,
    filtered: u64,
    showing: u64,
    skipped: u64,
    show_skipped: bool,
    post_list: Vec<PostItem>,
    page_list: Vec<ViewPagination>,
    show_pagination: bool,
}

#[derive(ramhorns::Content)]
struct PostItem {
    html: String,
}

#[derive(ramhorns::Content)]
struct ViewOption<'a> {
    value: &'a str,
    selected: bool,
}

#[derive(ramhorns::Content)]
struct ViewPagination {
    current: bool,
    number: u32,
    link: String,
}

/// Wraps a rendered post in its addressable container.
pub fn render_container(post: &Post) -> String {
    format!(r#"<div class='post {}' id="{}">{}</div>"#, post.post_type(), post.id(), post.render())
}

fn page_link(query: &ListQuery, page: u32) -> String {
    let params = [
        ("type", query.post_type.name().to_string()),
        ("search", query.search.clone()),
        ("sort", query.sort.name().to_string()),
        ("page", page.to_string()),
    ];
    let encoded = serde_urlencoded::to_string(&params[..]).unwrap_or_default();
    format!("?{}", encoded)
}

pub struct ListRenderer<'a> {
    pub template: Template<'a>,
}

impl ListRenderer<'_> {
    pub fn new(list_tpl_src: &str) -> io::Result<ListRenderer> {
        let template = match Template::new(list_tpl_src) {
            Ok(x) => x,
            Err(e) => {
                return Err(io::Error::new(ErrorKind::InvalidInput, format!("Error parsing blog template: {}", e)));
            }
        };

        Ok(ListRenderer {
            template,
        })
    }

    pub fn render(&self, view: &PageView, query: &ListQuery, blogs: &[String], skipped: usize) -> String {
        let post_list = view.posts.iter()
            .map(|post| PostItem { html: render_container(post) })
            .collect();

        let mut page_list: Vec<ViewPagination> = Vec::with_capacity(view.page_count as usize);
        for i in 1..=view.page_count {
            page_list.push(ViewPagination {
                current: i == view.page,
                number: i,
                link: page_link(query, i),
            })
        }

        let blogs = blogs.iter()
            .map(|b| ViewOption { value: b.as_str(), selected: b == view.blog })
            .collect();
        let mut type_options = vec![ViewOption { value: "All", selected: query.post_type.name() == "All" }];
        type_options.extend(PostType::ALL.iter().map(|t| ViewOption {
            value: t.name(),
            selected: query.post_type.name() == t.name(),
        }));
        let sort_options = [SortOrder::Newest, SortOrder::Oldest].iter()
            .map(|s| ViewOption { value: s.name(), selected: *s == query.sort })
            .collect();

        self.template.render(&BlogPage {
            blog: view.blog,
            blogs,
            type_options,
            sort_options,
            search: &query.search,
            total: view.total as u64,
            filtered: view.filtered as u64,
            showing: view.posts.len() as u64,
            skipped: skipped as u64,
            show_skipped: skipped > 0,
            post_list,
            show_pagination: page_list.len() > 1,
            page_list,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::post::{Answer, PostCommon, PostKind};
    use crate::viewer::TypeFilter;

    use super::*;

    const TEMPLATE: &str = "{{blog}} {{showing}}/{{filtered}}/{{total}} \
{{#type_options}}{{value}}{{#selected}}*{{/selected}} {{/type_options}}\
{{#post_list}}|{{{html}}}{{/post_list}}\
{{#show_pagination}}|{{#page_list}}{{number}}{{#current}}*{{/current}} {{/page_list}}{{/show_pagination}}";

    fn answer(id: u64) -> Post {
        Post {
            common: PostCommon { id, date: "d".to_string(), tags: vec![], post_url: None },
            kind: PostKind::Answer(Answer { body: "<b>yes</b>".to_string() }),
        }
    }

    #[test]
    fn test_render_container() {
        assert_eq!(render_container(&answer(42)), "<div class='post Answer' id=\"42\"><p>d</p>\n<b>yes</b>\n</div>");
    }

    #[test]
    fn test_render_page() {
        let posts = [answer(2), answer(1)];
        let view = PageView {
            blog: "cats",
            total: 5,
            filtered: 2,
            page: 2,
            page_count: 2,
            posts: posts.iter().collect(),
        };
        let query = ListQuery { post_type: TypeFilter::Only(PostType::Answer), page: 2, ..Default::default() };
        let renderer = ListRenderer::new(TEMPLATE).unwrap();
        let rendered = renderer.render(&view, &query, &["cats".to_string()], 0);
        assert_eq!(rendered, "cats 2/2/5 All Image Video Text Answer* \
|<div class='post Answer' id=\"2\"><p>d</p>\n<b>yes</b>\n</div>\
|<div class='post Answer' id=\"1\"><p>d</p>\n<b>yes</b>\n</div>\
|1 2* ");
    }

    #[test]
    fn test_page_link() {
        let query = ListQuery { search: "cute cats".to_string(), sort: SortOrder::Oldest, ..Default::default() };
        assert_eq!(page_link(&query, 3), "?type=All&search=cute+cats&sort=Oldest&page=3");
    }
}
