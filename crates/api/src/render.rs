//! Server-rendered pages.
//!
//! Handlers describe *what* to show as a [`Page`]; a [`PageRenderer`] turns
//! it into HTML. [`HtmlRenderer`] is a small built-in renderer so the
//! service works without an external template engine.

use axum::response::Redirect;
use quill_core::article::MAX_TOPIC_LEN;
use quill_core::types::{Timestamp, DISPLAY_TIME_FORMAT};
use quill_db::models::article::{Article, ArticleSummary};

// ---------------------------------------------------------------------------
// Notices
// ---------------------------------------------------------------------------

/// Path every page-level failure redirects to.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Transient message shown on the dashboard after a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    NotFound,
    LoadFailed,
}

impl Notice {
    /// Query-string form, e.g. `not_found`.
    pub fn code(self) -> &'static str {
        match self {
            Notice::NotFound => "not_found",
            Notice::LoadFailed => "load_failed",
        }
    }

    /// Parse a query-string code. Unknown codes are ignored.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "not_found" => Some(Notice::NotFound),
            "load_failed" => Some(Notice::LoadFailed),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Notice::NotFound => "Blog not found",
            Notice::LoadFailed => "Error loading blogs. Please try again.",
        }
    }

    /// 303 redirect to the dashboard carrying this notice.
    pub fn redirect(self) -> Redirect {
        Redirect::to(&format!("{DASHBOARD_PATH}?notice={}", self.code()))
    }
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// A page and the data it needs.
#[derive(Debug)]
pub enum Page<'a> {
    Home,
    Dashboard {
        articles: &'a [ArticleSummary],
        notice: Option<Notice>,
    },
    Article {
        article: &'a Article,
    },
    Edit {
        article: &'a Article,
    },
}

impl Page<'_> {
    /// Template name an external engine would load for this page.
    pub fn template_name(&self) -> &'static str {
        match self {
            Page::Home => "index.html",
            Page::Dashboard { .. } => "dashboard.html",
            Page::Article { .. } => "blog_view.html",
            Page::Edit { .. } => "edit_blog.html",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Failed to render {template}: {reason}")]
pub struct RenderError {
    pub template: &'static str,
    pub reason: String,
}

/// Turns a [`Page`] into an HTML document.
pub trait PageRenderer: Send + Sync {
    fn render(&self, page: &Page<'_>) -> Result<String, RenderError>;
}

// ---------------------------------------------------------------------------
// Built-in renderer
// ---------------------------------------------------------------------------

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn display_time(ts: &Timestamp) -> String {
    ts.format(DISPLAY_TIME_FORMAT).to_string()
}

/// Minimal renderer producing self-contained HTML documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    fn layout(title: &str, body: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{title} | AI Blog Generator</title>\n</head>\n<body>\n\
             <nav><a href=\"/\">Generate</a> | <a href=\"{DASHBOARD_PATH}\">Dashboard</a></nav>\n\
             <main>\n{body}\n</main>\n</body>\n</html>\n",
            title = escape_html(title),
        )
    }

    fn home() -> String {
        let body = format!(
            "<h1>Generate a blog post</h1>\n\
             <form id=\"blogForm\">\n\
             <input id=\"topic\" name=\"topic\" maxlength=\"{MAX_TOPIC_LEN}\" required>\n\
             <button type=\"submit\">Generate</button>\n\
             </form>\n\
             <section id=\"result\" hidden>\n\
             <pre id=\"content\" style=\"white-space: pre-wrap\"></pre>\n\
             <button id=\"saveBlogBtn\" type=\"button\">Save</button>\n\
             </section>\n\
             <p id=\"status\"></p>\n\
             <script>\n\
             const s = document.getElementById('status');\n\
             let draft = null;\n\
             document.getElementById('blogForm').addEventListener('submit', async (e) => {{\n\
               e.preventDefault();\n\
               s.textContent = 'Generating...';\n\
               const r = await fetch('/generate', {{method: 'POST', headers: {{'Content-Type': 'application/json'}},\n\
                 body: JSON.stringify({{topic: document.getElementById('topic').value}})}});\n\
               const j = await r.json();\n\
               if (!r.ok) {{ s.textContent = j.error; return; }}\n\
               draft = {{topic: j.topic, content: j.content}};\n\
               document.getElementById('content').textContent = j.content;\n\
               document.getElementById('result').hidden = false;\n\
               s.textContent = '';\n\
             }});\n\
             document.getElementById('saveBlogBtn').addEventListener('click', async () => {{\n\
               const r = await fetch('/save', {{method: 'POST', headers: {{'Content-Type': 'application/json'}},\n\
                 body: JSON.stringify(draft)}});\n\
               const j = await r.json();\n\
               if (r.ok) {{ window.location = '/blog/' + j.blog_id; }} else {{ s.textContent = j.error; }}\n\
             }});\n\
             </script>"
        );
        Self::layout("Home", &body)
    }

    fn dashboard(articles: &[ArticleSummary], notice: Option<Notice>) -> String {
        let mut body = String::from("<h1>Dashboard</h1>\n");
        if let Some(notice) = notice {
            body.push_str(&format!(
                "<p class=\"notice\" role=\"alert\">{}</p>\n",
                escape_html(notice.message())
            ));
        }
        if articles.is_empty() {
            body.push_str("<p>No blogs yet. <a href=\"/\">Generate one</a>.</p>");
        } else {
            body.push_str("<ul class=\"blogs\">\n");
            for summary in articles {
                let article = &summary.article;
                body.push_str(&format!(
                    "<li><h2><a href=\"/blog/{id}\">{topic}</a></h2>\
                     <p>{preview}</p><small>{created}</small> \
                     <a href=\"/edit/{id}\">Edit</a></li>\n",
                    id = article.id,
                    topic = escape_html(&article.topic),
                    preview = escape_html(&summary.preview),
                    created = display_time(&article.created_at),
                ));
            }
            body.push_str("</ul>");
        }
        Self::layout("Dashboard", &body)
    }

    fn article(article: &Article) -> String {
        let body = format!(
            "<article>\n<h1>{topic}</h1>\n\
             <p><small>Created {created} &middot; Updated {updated}</small></p>\n\
             <pre style=\"white-space: pre-wrap\">{content}</pre>\n</article>\n\
             <a href=\"/edit/{id}\">Edit</a>\n\
             <button id=\"deleteBtn\" type=\"button\">Delete</button>\n\
             <script>\n\
             document.getElementById('deleteBtn').addEventListener('click', async () => {{\n\
               if (!confirm('Delete this blog?')) return;\n\
               const r = await fetch('/delete/{id}', {{method: 'DELETE'}});\n\
               if (r.ok) {{ window.location = '{DASHBOARD_PATH}'; }} else {{ alert((await r.json()).error); }}\n\
             }});\n\
             </script>",
            id = article.id,
            topic = escape_html(&article.topic),
            content = escape_html(&article.content),
            created = display_time(&article.created_at),
            updated = display_time(&article.updated_at),
        );
        Self::layout(&article.topic, &body)
    }

    fn edit(article: &Article) -> String {
        let body = format!(
            "<h1>Edit blog</h1>\n\
             <form id=\"editForm\">\n\
             <input id=\"topic\" name=\"topic\" maxlength=\"{MAX_TOPIC_LEN}\" value=\"{topic}\" required>\n\
             <textarea id=\"content\" name=\"content\" rows=\"30\" required>{content}</textarea>\n\
             <button type=\"submit\">Save changes</button>\n\
             </form>\n\
             <p id=\"status\"></p>\n\
             <script>\n\
             document.getElementById('editForm').addEventListener('submit', async (e) => {{\n\
               e.preventDefault();\n\
               const r = await fetch('/edit/{id}', {{method: 'POST', headers: {{'Content-Type': 'application/json'}},\n\
                 body: JSON.stringify({{topic: document.getElementById('topic').value,\n\
                   content: document.getElementById('content').value}})}});\n\
               const j = await r.json();\n\
               document.getElementById('status').textContent = r.ok ? j.message : j.error;\n\
             }});\n\
             </script>",
            id = article.id,
            topic = escape_html(&article.topic),
            content = escape_html(&article.content),
        );
        Self::layout(&format!("Edit: {}", article.topic), &body)
    }
}

impl PageRenderer for HtmlRenderer {
    fn render(&self, page: &Page<'_>) -> Result<String, RenderError> {
        Ok(match page {
            Page::Home => Self::home(),
            Page::Dashboard { articles, notice } => Self::dashboard(articles, *notice),
            Page::Article { article } => Self::article(article),
            Page::Edit { article } => Self::edit(article),
        })
    }
}
