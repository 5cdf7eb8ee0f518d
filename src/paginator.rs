pub const DEFAULT_PAGE_SIZE: u32 = 100;

pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: u32,
    page_count: u32,
}

impl<'a, T> Paginator<'a, T> {
    pub fn from(items: &'a [T], page_size: u32) -> Self {
        let page_size = page_size.max(1);
        if items.is_empty() {
            return Paginator {
                items,
                page_size,
                page_count: 0,
            };
        }
        let item_count = items.len() as u32;
        let upper_bound = item_count - 1;
        let page_count = (upper_bound / page_size) + 1;

        Paginator {
            items,
            page_size,
            page_count,
        }
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Pages are numbered from 1. Anything outside `1..=page_count` falls back to page 1.
    pub fn clamp_page(&self, page: u32) -> u32 {
        match page {
            0 => 1,
            x if x > self.page_count => 1,
            x => x,
        }
    }

    pub fn get_page(&self, page: u32) -> Result<&'a [T], String> {
        match page {
            0 => return Err("Page has to be greater than 0".to_string()),
            x if x > self.page_count => return Err(format!("Page has to be less than page_count ({})", self.page_count)),
            _ => {}
        };

        let index = ((page - 1) * self.page_size) as usize;
        let end = (index + self.page_size as usize).min(self.items.len());
        Ok(&self.items[index..end])
    }
}
