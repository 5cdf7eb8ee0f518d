use std::collections::HashMap;

use crate::error::ViewerError;
use crate::viewer::{ListQuery, SortOrder, TypeFilter};

#[derive(PartialEq, Debug)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    pub fn from(buf: &str) -> Self {
        let vs: Vec<(String, String)> = serde_urlencoded::from_str(buf).unwrap_or_else(|_| vec![]);
        let items: HashMap<String, String> = vs.into_iter().collect();

        QueryString {
            items,
        }
    }

    pub fn get_page(&self) -> u32 {
        let val = self.items.get("page").and_then(|v| v.parse().ok()).unwrap_or(1);
        if val == 0 { return 1; }
        val
    }

    pub fn get_search(&self) -> String {
        self.items.get("search").cloned().unwrap_or_default()
    }

    pub fn get_sort(&self) -> SortOrder {
        match self.items.get("sort").map(String::as_str) {
            Some("Oldest") => SortOrder::Oldest,
            _ => SortOrder::Newest,
        }
    }

    pub fn get_type(&self) -> Result<TypeFilter, ViewerError> {
        match self.items.get("type").map(String::as_str) {
            None | Some("") => Ok(TypeFilter::All),
            Some(value) => value.parse(),
        }
    }

    pub fn to_list_query(&self) -> Result<ListQuery, ViewerError> {
        Ok(ListQuery {
            post_type: self.get_type()?,
            search: self.get_search(),
            sort: self.get_sort(),
            page: self.get_page(),
        })
    }
}
