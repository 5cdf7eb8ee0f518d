pub mod index_renderer;
pub mod list_renderer;
