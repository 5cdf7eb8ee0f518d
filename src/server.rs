use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use ntex::web;
use ntex::web::HttpRequest;
use ntex_files::NamedFile;
use serde::Serialize;
use spdlog::{error, info, warn};

use crate::config::Config;
use crate::error::ViewerError;
use crate::loader::load_blog;
use crate::post::Post;
use crate::query_string::QueryString;
use crate::source::DirectorySource;
use crate::view::index_renderer::IndexRenderer;
use crate::view::list_renderer::ListRenderer;
use crate::viewer::{ListQuery, LoadOutcome, Viewer};

struct AppState {
    viewer: Viewer,
    source: DirectorySource,
    config: Config,
}

type SharedState = Arc<Mutex<AppState>>;

#[derive(Serialize)]
struct ApiPage<'a> {
    blog: &'a str,
    total: usize,
    filtered: usize,
    page: u32,
    page_count: u32,
    posts: Vec<&'a Post>,
}

fn error_response(e: &ViewerError) -> web::HttpResponse {
    let mut builder = match e {
        ViewerError::Transport { .. } => web::HttpResponse::InternalServerError(),
        ViewerError::UnknownVariant(_) | ViewerError::InvalidBlog(_) | ViewerError::MalformedEntry { .. } => web::HttpResponse::BadRequest(),
    };
    builder.body(format!("Error loading blog: {}", e))
}

fn stale_response(blog: &str) -> web::HttpResponse {
    web::HttpResponse::Conflict()
        .body(format!("Blog selection changed while loading {}", blog))
}

fn json_response<T: Serialize>(value: &T) -> web::HttpResponse {
    match serde_json::to_string(value) {
        Ok(body) => web::HttpResponse::Ok()
            .content_type("application/json")
            .body(body),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error serializing response: {}", e)),
    }
}

fn read_template(tpl_dir: &Path, file_name: &str) -> io::Result<String> {
    std::fs::read_to_string(tpl_dir.join(file_name))
}

fn list_query(req: &HttpRequest) -> Result<ListQuery, ViewerError> {
    QueryString::from(req.uri().query().unwrap_or_default()).to_list_query()
}

/// Makes `blog` the selected blog, loading it unless it already is.
/// The lock is released while the files are read, so callers must check
/// the loaded blog again before rendering.
async fn select_blog(state: &SharedState, blog: &str) -> Result<LoadOutcome, ViewerError> {
    let (ticket, source) = {
        let mut state = state.lock().unwrap();
        if state.viewer.current_blog() == Some(blog) {
            return Ok(LoadOutcome::AlreadyLoaded);
        }
        state.source.check_blog(blog)?;
        (state.viewer.begin_load(blog), state.source.clone())
    };

    let res = load_blog(&source, blog).await;

    let mut state = state.lock().unwrap();
    state.viewer.finish_load(ticket, res)
}

// Begin: Redirect region --------
#[web::get("/blogs/{blog}")]
async fn blog_wo_slash(path: web::types::Path<String>) -> web::HttpResponse {
    web::HttpResponse::TemporaryRedirect()
        .header("Location", path.into_inner() + "/")
        .content_type("text/html; charset=utf-8")
        .finish()
}
// End: Redirect region --------

#[web::get("/")]
async fn index(state: web::types::State<SharedState>) -> web::HttpResponse {
    let state = state.lock().unwrap();

    let blogs = match state.source.list_blogs() {
        Ok(blogs) => blogs,
        Err(e) => return web::HttpResponse::InternalServerError()
            .body(format!("Unable to read blog directory: {}", e)),
    };

    let rendered = read_template(&state.config.paths.template_dir, "index.tpl")
        .and_then(|src| IndexRenderer::new(&src).map(|renderer| renderer.render(&blogs)));

    match rendered {
        Ok(rendered) => web::HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(rendered),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error rendering index: {}", e)),
    }
}

#[web::get("/blogs")]
async fn blog_names(state: web::types::State<SharedState>) -> web::HttpResponse {
    let state = state.lock().unwrap();
    match state.source.list_blogs() {
        Ok(blogs) => json_response(&blogs),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Unable to read blog directory: {}", e)),
    }
}

#[web::get("/blogs/{blog}/")]
async fn blog_page(req: HttpRequest, path: web::types::Path<String>, state: web::types::State<SharedState>) -> web::HttpResponse {
    let blog = path.into_inner();
    let query = match list_query(&req) {
        Ok(query) => query,
        Err(e) => return error_response(&e),
    };

    match select_blog(&state, &blog).await {
        Ok(LoadOutcome::Applied { .. } | LoadOutcome::AlreadyLoaded) => {}
        Ok(LoadOutcome::Stale) => return stale_response(&blog),
        Err(e) => return error_response(&e),
    }

    let state = state.lock().unwrap();
    let Some(view) = state.viewer.page(&blog, &query) else {
        return stale_response(&blog);
    };
    let blogs = state.source.list_blogs().unwrap_or_else(|e| {
        warn!("Unable to list blogs: {}", e);
        vec![]
    });

    let rendered = read_template(&state.config.paths.template_dir, "blog.tpl")
        .and_then(|src| ListRenderer::new(&src).map(|renderer| {
            renderer.render(&view, &query, &blogs, state.viewer.faults().len())
        }));

    match rendered {
        Ok(rendered) => web::HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(rendered),
        Err(e) => {
            error!("Error rendering blog {}: {}", blog, e);
            web::HttpResponse::InternalServerError()
                .body(format!("Error rendering blog {}: {}", blog, e))
        }
    }
}

#[web::get("/api/blogs/{blog}")]
async fn blog_api(req: HttpRequest, path: web::types::Path<String>, state: web::types::State<SharedState>) -> web::HttpResponse {
    let blog = path.into_inner();
    let query = match list_query(&req) {
        Ok(query) => query,
        Err(e) => return error_response(&e),
    };

    match select_blog(&state, &blog).await {
        Ok(LoadOutcome::Applied { .. } | LoadOutcome::AlreadyLoaded) => {}
        Ok(LoadOutcome::Stale) => return stale_response(&blog),
        Err(e) => return error_response(&e),
    }

    let state = state.lock().unwrap();
    match state.viewer.page(&blog, &query) {
        Some(view) => json_response(&ApiPage {
            blog: view.blog,
            total: view.total,
            filtered: view.filtered,
            page: view.page,
            page_count: view.page_count,
            posts: view.posts,
        }),
        None => stale_response(&blog),
    }
}

#[web::get("/blogs/{blog}/{file}")]
async fn media_files(path: web::types::Path<(String, String)>, state: web::types::State<SharedState>) -> Result<NamedFile, web::Error> {
    let (blog, file) = path.into_inner();
    let state = state.lock().unwrap();
    let file_path = match state.source.media_path(&blog, &file) {
        Ok(file_path) => file_path,
        Err(e) => return Err(web::error::ErrorBadRequest(e.to_string()).into()),
    };

    Ok(NamedFile::open(file_path)?)
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let source = DirectorySource::new(config.paths.blogs_dir.clone());
    let blogs = match source.list_blogs() {
        Ok(blogs) => blogs,
        Err(e) => return Err(io::Error::new(
            e.kind(),
            format!("Unable to read blog directory {}: {}", config.paths.blogs_dir.display(), e))),
    };
    for blog in blogs.iter() {
        info!("Blog: {}", blog);
    }

    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let app_state = Arc::new(Mutex::new(AppState {
        viewer: Viewer::new(config.defaults.page_size),
        source,
        config,
    }));

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .service(index)
            .service(blog_names)
            .service(blog_wo_slash)
            .service(blog_page)
            .service(blog_api)
            .service(media_files)
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use ntex::http::StatusCode;

    use crate::config::parse_config;
    use crate::test_data::LEGACY_TEXTS;

    use super::*;

    fn shared_state(blogs_dir: PathBuf) -> SharedState {
        let config = parse_config(r#"
[paths]
blogs_dir = "blogs"
template_dir = "template"

[server]
address = "127.0.0.1"
port = 8002
"#).unwrap();
        Arc::new(Mutex::new(AppState {
            viewer: Viewer::new(config.defaults.page_size),
            source: DirectorySource::new(blogs_dir),
            config,
        }))
    }

    #[tokio::test]
    async fn test_select_blog() -> io::Result<()> {
        let root = tempfile::tempdir()?;
        fs::create_dir(root.path().join("cats"))?;
        fs::write(root.path().join("cats").join("texts.txt"), LEGACY_TEXTS)?;
        let state = shared_state(root.path().to_path_buf());

        let outcome = select_blog(&state, "cats").await.unwrap();
        assert_eq!(outcome, LoadOutcome::Applied { posts: 5, faults: 0 });
        assert_eq!(select_blog(&state, "cats").await.unwrap(), LoadOutcome::AlreadyLoaded);

        let res = select_blog(&state, "dogs").await;
        assert!(matches!(res, Err(ViewerError::InvalidBlog(blog)) if blog == "dogs"));

        let state = state.lock().unwrap();
        assert_eq!(state.viewer.current_blog(), Some("cats"));
        assert!(state.viewer.page("dogs", &ListQuery::default()).is_none());
        assert_eq!(state.viewer.page("cats", &ListQuery::default()).unwrap().total, 5);
        Ok(())
    }

    #[test]
    fn test_error_status() {
        let transport = ViewerError::Transport { path: "/blogs/a/texts.txt".to_string(), reason: "denied".to_string() };
        assert_eq!(error_response(&transport).status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_response(&ViewerError::UnknownVariant("Chat".to_string())).status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_response(&ViewerError::InvalidBlog("..".to_string())).status(), StatusCode::BAD_REQUEST);
        assert_eq!(stale_response("cats").status(), StatusCode::CONFLICT);
    }
}
