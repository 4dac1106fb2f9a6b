//! Built-in site layout using the Tera template engine
//!
//! The templates are embedded in the binary; the post body itself is
//! composed by [`crate::render`] and inserted as-is.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;

/// Template renderer with the embedded layout
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("theme/layout.html")),
            ("index.html", include_str!("theme/index.html")),
        ])?;

        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Wrap composed page markup in the site layout
    pub fn render_layout(
        &self,
        base: &BaseContext,
        page_title: Option<&str>,
        content: &str,
    ) -> Result<String> {
        let mut context = base.to_context();
        context.insert("page_title", &page_title);
        context.insert("content", content);
        context.insert("scripts", "");
        self.render("layout.html", &context)
    }

    /// Render the post listing
    pub fn render_index(
        &self,
        base: &BaseContext,
        posts: &[PostSummary],
        scripts: &str,
    ) -> Result<String> {
        let mut context = base.to_context();
        context.insert("page_title", &None::<String>);
        context.insert("posts", posts);
        context.insert("scripts", scripts);
        self.render("index.html", &context)
    }
}

/// Tera filter: format a `YYYY-MM-DD` date
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "YYYY-MM-DD".to_string(),
    };

    // "LL" is the long form, e.g. "May 30, 2023"
    if format == "LL" {
        if let Ok(date) = chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
            return Ok(tera::Value::String(date.format("%B %d, %Y").to_string()));
        }
    }

    Ok(tera::Value::String(s))
}

/// Values every page template can read
#[derive(Debug, Clone, Serialize)]
pub struct BaseContext {
    pub config: ConfigData,
    pub prismic_repository: Option<String>,
    pub version: &'static str,
}

impl BaseContext {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            config: ConfigData {
                title: config.title.clone(),
                description: config.description.clone(),
                author: config.author.clone(),
                language: config.language.clone(),
                root: config.root.clone(),
            },
            prismic_repository: config
                .prismic
                .repository
                .clone()
                .filter(|repo| !repo.is_empty()),
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    fn to_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("config", &self.config);
        context.insert("prismic_repository", &self.prismic_repository);
        context.insert("version", self.version);
        context
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub root: String,
}

/// One entry of the post listing
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub title: String,
    pub path: String,
    pub date: Option<String>,
    /// Comment count placeholder markup
    pub comment_count: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> BaseContext {
        let mut config = SiteConfig::default();
        config.title = "My <Blog>".to_string();
        BaseContext::new(&config)
    }

    #[test]
    fn test_layout_wraps_content() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer
            .render_layout(&base(), Some("Hello"), "<h1>Hello</h1>")
            .unwrap();
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("<title>Hello | My &lt;Blog&gt;</title>"));
        assert!(!html.contains("prismic.js"));
    }

    #[test]
    fn test_layout_toolbar_script() {
        let mut config = SiteConfig::default();
        config.prismic.repository = Some("my-repo".to_string());
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer
            .render_layout(&BaseContext::new(&config), None, "")
            .unwrap();
        assert!(html.contains("prismic.js?new=true&repo=my-repo"));
    }

    #[test]
    fn test_index_lists_posts() {
        let renderer = TemplateRenderer::new().unwrap();
        let posts = vec![PostSummary {
            title: "First".to_string(),
            path: "/blog/first/".to_string(),
            date: Some("2023-05-30".to_string()),
            comment_count: r#"<span class="disqus-comment-count">Comments</span>"#.to_string(),
        }];
        let html = renderer
            .render_index(&base(), &posts, "<script id=\"dsq-count-scr\"></script>")
            .unwrap();
        assert!(html.contains(">First</a>"));
        assert!(html.contains("May 30, 2023"));
        assert!(html.contains(r#"<span class="disqus-comment-count">Comments</span>"#));
        assert!(html.contains("dsq-count-scr"));
    }

    #[test]
    fn test_index_without_posts() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer.render_index(&base(), &[], "").unwrap();
        assert!(html.contains("No posts published so far."));
    }
}
