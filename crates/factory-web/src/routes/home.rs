//! Landing page.

use askama::Template;

/// Landing page template.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub title: &'static str,
}

/// Render the landing page.
pub async fn home_page() -> IndexTemplate {
    IndexTemplate {
        title: "Rick & Morty Plumbus Factory",
    }
}
