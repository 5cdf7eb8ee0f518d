pub mod archive;
pub mod config;
pub mod error;
pub mod loader;
pub mod logger;
pub mod post;
pub mod post_render;
pub mod server;
pub mod source;
pub mod viewer;
mod blog_list;
mod paginator;
mod query_string;
mod test_data;
mod view;
