//! File manager page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

#[derive(Template, WebTemplate)]
#[template(path = "files.html")]
pub struct FilesTemplate {}

/// # Endpoint
///
/// `GET /admin/files`
pub async fn files_page_handler() -> impl IntoResponse {
    FilesTemplate {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_page_has_upload_progress() {
        let html = FilesTemplate {}.render().unwrap();

        assert!(html.contains(r#"id="upload""#));
        assert!(html.contains(r#"<progress id="upload-progress""#));
    }
}
