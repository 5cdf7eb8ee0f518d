use std::str::FromStr;

use spdlog::info;

use crate::error::{EntryFault, ViewerError};
use crate::loader::BlogArchive;
use crate::paginator::{Paginator, DEFAULT_PAGE_SIZE};
use crate::post::{Post, PostType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(PostType),
}

impl TypeFilter {
    pub fn name(&self) -> &'static str {
        match self {
            TypeFilter::All => "All",
            TypeFilter::Only(post_type) => post_type.name(),
        }
    }

    pub fn accepts(&self, post: &Post) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(post_type) => post.types().contains(post_type),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "All" => Ok(TypeFilter::All),
            x => Ok(TypeFilter::Only(x.parse()?)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    pub fn name(&self) -> &'static str {
        match self {
            SortOrder::Newest => "Newest",
            SortOrder::Oldest => "Oldest",
        }
    }
}

/// What the listing page asks for.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub post_type: TypeFilter,
    pub search: String,
    pub sort: SortOrder,
    pub page: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        ListQuery {
            post_type: TypeFilter::All,
            search: String::new(),
            sort: SortOrder::Newest,
            page: 1,
        }
    }
}

/// Applies the type filter and search, then orders by id.
pub fn filter_posts<'a>(posts: &'a [Post], query: &ListQuery) -> Vec<&'a Post> {
    let mut filtered: Vec<&Post> = posts.iter()
        .filter(|p| query.post_type.accepts(p))
        .filter(|p| query.search.is_empty() || p.matches_search(&query.search))
        .collect();

    match query.sort {
        SortOrder::Oldest => filtered.sort_by_key(|p| p.id()),
        SortOrder::Newest => filtered.sort_by(|a, b| b.id().cmp(&a.id())),
    }
    filtered
}

/// One page of the filtered working set.
#[derive(Debug)]
pub struct PageView<'a> {
    pub blog: &'a str,
    pub total: usize,
    pub filtered: usize,
    pub page: u32,
    pub page_count: u32,
    pub posts: Vec<&'a Post>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub blog: String,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied { posts: usize, faults: usize },
    /// The blog was already the current one; nothing was read.
    AlreadyLoaded,
    /// A newer selection was made while this load was in flight.
    Stale,
}

/// Owns the posts of the selected blog and replaces them wholesale on every successful load.
pub struct Viewer {
    generation: u64,
    current: Option<BlogArchive>,
    page_size: u32,
}

impl Default for Viewer {
    fn default() -> Self {
        Viewer::new(DEFAULT_PAGE_SIZE)
    }
}

impl Viewer {
    pub fn new(page_size: u32) -> Self {
        Viewer {
            generation: 0,
            current: None,
            page_size,
        }
    }

    pub fn current_blog(&self) -> Option<&str> {
        self.current.as_ref().map(|archive| archive.blog.as_str())
    }

    pub fn faults(&self) -> &[EntryFault] {
        match self.current {
            Some(ref archive) => &archive.faults,
            None => &[],
        }
    }

    /// Records a new blog selection. Loads started before this one become stale.
    pub fn begin_load(&mut self, blog: &str) -> LoadTicket {
        self.generation += 1;
        LoadTicket {
            blog: blog.to_string(),
            generation: self.generation,
        }
    }

    /// Installs the result of a load. Stale results are dropped; on error the
    /// previously loaded blog stays in place.
    pub fn finish_load(&mut self, ticket: LoadTicket, res: Result<BlogArchive, ViewerError>) -> Result<LoadOutcome, ViewerError> {
        if ticket.generation != self.generation {
            info!("Discarding stale load of blog {}", ticket.blog);
            return Ok(LoadOutcome::Stale);
        }

        let archive = res?;
        let outcome = LoadOutcome::Applied {
            posts: archive.posts.len(),
            faults: archive.faults.len(),
        };
        info!("Blog {} loaded: {} posts", archive.blog, archive.posts.len());
        self.current = Some(archive);
        Ok(outcome)
    }

    /// Page of `blog` for `query`. `None` unless `blog` is the loaded one.
    pub fn page(&self, blog: &str, query: &ListQuery) -> Option<PageView<'_>> {
        let archive = self.current.as_ref().filter(|archive| archive.blog == blog)?;
        let filtered = filter_posts(&archive.posts, query);
        let paginator = Paginator::from(&filtered, self.page_size);
        let page = paginator.clamp_page(query.page);
        let posts = paginator.get_page(page).map(|p| p.to_vec()).unwrap_or_default();

        Some(PageView {
            blog: &archive.blog,
            total: archive.posts.len(),
            filtered: filtered.len(),
            page,
            page_count: paginator.page_count(),
            posts,
        })
    }
}
