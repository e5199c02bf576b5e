//! Server-rendered landing page.

use anyhow::Result;

/// One row of the endpoint listing.
pub struct Endpoint {
    pub example: &'static str,
    pub purpose: &'static str,
}

pub const ENDPOINTS: &[Endpoint] = &[
    Endpoint {
        example: "/analyze?text=...",
        purpose: "sentiment",
    },
    Endpoint {
        example: "/classify?text=...&labels=...",
        purpose: "custom classification",
    },
    Endpoint {
        example: "/extract?text=...",
        purpose: "entity extraction",
    },
];

#[cfg(feature = "askama")]
#[derive(askama::Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    endpoints: &'a [Endpoint],
    backend: &'a str,
}

/// Render the welcome page.
#[cfg(feature = "askama")]
pub fn render_home(backend: &str) -> Result<String> {
    use askama::Template;

    let page = IndexTemplate {
        endpoints: ENDPOINTS,
        backend,
    };
    Ok(page.render()?)
}

/// Plain fallback when templates are compiled out.
#[cfg(not(feature = "askama"))]
pub fn render_home(backend: &str) -> Result<String> {
    let mut page = String::from("Welcome! Your Advanced AI API is running.");
    for endpoint in ENDPOINTS {
        page.push_str(&format!(
            "<br>\nUse <b>{}</b> for {}.",
            endpoint.example, endpoint.purpose
        ));
    }
    page.push_str(&format!("<br>\nBackend: {backend}"));
    Ok(page)
}
