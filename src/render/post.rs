//! Post view: header, body slices, and the comment thread

use super::slices::{render_slices, Fragment};
use super::RenderContext;
use crate::comments::CommentThreadConfig;
use crate::content::{Document, RichText};
use crate::helpers::{full_url, html_escape, link_to};

/// Heading used for posts without a title
pub const UNTITLED: &str = "Untitled";

/// Display title of a post
pub fn resolve_title(title: &RichText) -> String {
    if title.is_empty() {
        UNTITLED.to_string()
    } else {
        title.as_text()
    }
}

/// One post, at one address, ready to render
#[derive(Debug, Clone, Copy)]
pub struct PostView<'a> {
    pub document: &'a Document,
    pub site_url: &'a str,
    pub pathname: &'a str,
}

/// Output of [`PostView::render`]
#[derive(Debug, Clone)]
pub struct RenderedPost {
    pub title: String,
    pub comments: CommentThreadConfig,
    pub fragments: Vec<Fragment>,
    /// Composed markup of the whole view
    pub html: String,
}

impl<'a> PostView<'a> {
    pub fn new(document: &'a Document, site_url: &'a str, pathname: &'a str) -> Self {
        Self {
            document,
            site_url,
            pathname,
        }
    }

    pub fn title(&self) -> String {
        resolve_title(&self.document.title)
    }

    pub fn comment_config(&self) -> CommentThreadConfig {
        CommentThreadConfig {
            url: full_url(self.site_url, self.pathname),
            identifier: self.document.meta.id.clone(),
            title: self.title(),
        }
    }

    pub fn render(&self, ctx: &RenderContext) -> RenderedPost {
        let title = self.title();
        let comments = self.comment_config();
        let fragments = render_slices(&self.document.body, &ctx.resolver);

        let mut html = String::new();
        html.push_str(r#"<div><div class="container post-header"><div class="back">"#);
        html.push_str(&link_to(&ctx.resolver.root_path(), "back to list"));
        html.push_str("</div>");
        html.push_str(&format!(
            r#"<h1 data-wio-id="{}">{}</h1>"#,
            html_escape(&self.document.meta.id),
            html_escape(&title)
        ));
        html.push_str("</div>");
        for fragment in &fragments {
            html.push_str(&fragment.html);
        }
        html.push_str(r#"<div class="container">"#);
        html.push_str(&ctx.disqus.embed(&comments));
        html.push_str("</div></div>");

        RenderedPost {
            title,
            comments,
            fragments,
            html,
        }
    }
}
