//! Generator module - writes one HTML page per post plus the post listing

use anyhow::Result;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::content::query::{run_query, ContentSource, PostQuery};
use crate::content::Document;
use crate::render::{post_page, Location, PageProps, RenderContext, RenderedPost};
use crate::templates::{BaseContext, PostSummary, TemplateRenderer};
use crate::Slicepress;

/// Static site generator
pub struct Generator {
    site: Slicepress,
    renderer: TemplateRenderer,
    context: RenderContext,
    base: BaseContext,
}

/// Counters reported after a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateStats {
    pub posts: usize,
    pub skipped: usize,
    pub assets: usize,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Slicepress) -> Result<Self> {
        Ok(Self {
            site: site.clone(),
            renderer: TemplateRenderer::new()?,
            context: RenderContext::new(&site.config),
            base: BaseContext::new(&site.config),
        })
    }

    /// Generate the entire site
    pub fn generate(&self, documents: &[Document]) -> Result<GenerateStats> {
        fs::create_dir_all(&self.site.public_dir)?;

        let mut stats = GenerateStats {
            assets: self.copy_source_assets()?,
            ..Default::default()
        };

        let mut summaries = Vec::new();
        let mut seen_uids = HashSet::new();
        for document in documents {
            let Some(uid) = document.uid() else {
                tracing::warn!("Document {} has no uid, skipping", document.meta.id);
                stats.skipped += 1;
                continue;
            };

            // The query by uid would render the first match again
            if !seen_uids.insert(uid) {
                tracing::warn!(
                    "Duplicate document uid {:?} on {}, skipping",
                    uid,
                    document.meta.id
                );
                stats.skipped += 1;
                continue;
            }

            match self.generate_post_page(documents, uid)? {
                Some(rendered) => {
                    stats.posts += 1;
                    summaries.push((document.date, self.summarize(document, uid, &rendered)));
                }
                None => stats.skipped += 1,
            }
        }

        // Newest first, undated posts last
        summaries.sort_by(|a, b| b.0.cmp(&a.0));
        let summaries: Vec<_> = summaries.into_iter().map(|(_, s)| s).collect();
        self.generate_index_page(&summaries)?;

        Ok(stats)
    }

    /// Render the page for one post uid, or `None` when the query finds nothing
    pub fn render_post<S>(&self, source: &S, uid: &str) -> Result<Option<(RenderedPost, String)>>
    where
        S: ContentSource + ?Sized,
    {
        let data = run_query(source, &self.site.config.url, &PostQuery::by_uid(uid))?;
        let location = Location::new(&self.context.resolver.post_path(uid));
        let props = PageProps {
            data: &data,
            location: &location,
        };

        let Some(view) = post_page(&props) else {
            return Ok(None);
        };

        let rendered = view.render(&self.context);
        let html = self
            .renderer
            .render_layout(&self.base, Some(&rendered.title), &rendered.html)?;
        Ok(Some((rendered, html)))
    }

    /// Generate one post page
    fn generate_post_page(&self, documents: &[Document], uid: &str) -> Result<Option<RenderedPost>> {
        let Some((rendered, html)) = self.render_post(documents, uid)? else {
            tracing::debug!("No post found for uid {}", uid);
            return Ok(None);
        };

        let path = self.context.resolver.post_path(uid);
        let output_path = self
            .site
            .public_dir
            .join(self.context.resolver.output_file(&path));
        write_file(&output_path, &html)?;
        tracing::debug!("Generated post: {:?}", output_path);

        Ok(Some(rendered))
    }

    fn summarize(&self, document: &Document, uid: &str, rendered: &RenderedPost) -> PostSummary {
        PostSummary {
            title: rendered.title.clone(),
            path: self.context.resolver.post_path(uid),
            date: document.date.map(|d| d.format("%Y-%m-%d").to_string()),
            comment_count: self.context.disqus.comment_count(&rendered.comments),
        }
    }

    /// Generate the post listing
    fn generate_index_page(&self, summaries: &[PostSummary]) -> Result<()> {
        let scripts = if summaries.is_empty() {
            String::new()
        } else {
            self.context.disqus.count_script()
        };
        let html = self.renderer.render_index(&self.base, summaries, &scripts)?;

        let root = self.context.resolver.root_path();
        let output_path = self
            .site
            .public_dir
            .join(self.context.resolver.output_file(&root));
        write_file(&output_path, &html)?;
        tracing::debug!("Generated index: {:?}", output_path);

        Ok(())
    }

    /// Copy source assets (images, stylesheets) to the public directory
    fn copy_source_assets(&self) -> Result<usize> {
        let source_dir = &self.site.source_dir;
        if !source_dir.exists() {
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(source_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(source_dir)?;

            // Documents are rendered, not copied
            if relative
                .components()
                .any(|c| c.as_os_str() == "_posts" || c.as_os_str().to_string_lossy().starts_with('.'))
            {
                continue;
            }

            let dest = self.site.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
            copied += 1;
        }

        Ok(copied)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", parent, e))?;
    }
    fs::write(path, content).map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{BlockKind, RichText, RichTextBlock};
    use chrono::NaiveDate;
    use serde_json::json;
    use tempfile::TempDir;

    fn site(dir: &TempDir) -> Slicepress {
        fs::write(
            dir.path().join("_config.yml"),
            "title: Test Blog\nurl: https://example.com\ndisqus:\n  shortname: test-blog\n",
        )
        .unwrap();
        Slicepress::new(dir.path()).unwrap()
    }

    fn post(id: &str, uid: &str, title: &str, date: Option<(i32, u32, u32)>) -> Document {
        let mut doc = Document::new(id, uid);
        if !title.is_empty() {
            doc.title = RichText(vec![RichTextBlock::new(BlockKind::Heading1, title)]);
        }
        doc.date = date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
        doc.body = serde_json::from_value(json!([
            { "type": "text", "primary": { "text": [{ "type": "paragraph", "text": "Hello", "spans": [] }] } },
            { "type": "carousel", "primary": {} },
            { "type": "quote", "primary": { "quote": [{ "type": "paragraph", "text": "Carpe diem", "spans": [] }] } }
        ]))
        .unwrap();
        doc
    }

    #[test]
    fn test_generate_site() {
        let dir = TempDir::new().unwrap();
        let site = site(&dir);
        let docs = vec![
            post("old-id", "old", "Old post", Some((2019, 1, 1))),
            post("abc123", "abc", "", Some((2020, 6, 1))),
        ];

        let stats = Generator::new(&site).unwrap().generate(&docs).unwrap();
        assert_eq!(stats.posts, 2);
        assert_eq!(stats.skipped, 0);

        let page = fs::read_to_string(site.public_dir.join("blog/abc/index.html")).unwrap();
        assert!(page.contains(r#"<h1 data-wio-id="abc123">Untitled</h1>"#));
        assert!(page.contains(r#"this.page.url = "https://example.com/blog/abc/";"#));
        assert!(page.contains("https://test-blog.disqus.com/embed.js"));
        assert!(page.find("<p>Hello</p>").unwrap() < page.find("Carpe diem").unwrap());

        let index = fs::read_to_string(site.public_dir.join("index.html")).unwrap();
        let newest = index.find("Untitled").unwrap();
        let oldest = index.find("Old post").unwrap();
        assert!(newest < oldest);
        assert!(index.contains("https://test-blog.disqus.com/count.js"));
        assert!(index.contains(r#"data-disqus-identifier="abc123""#));
    }

    #[test]
    fn test_documents_without_uid_skipped() {
        let dir = TempDir::new().unwrap();
        let site = site(&dir);
        let mut doc = post("no-uid", "", "Lost", None);
        doc.meta.uid = None;

        let stats = Generator::new(&site).unwrap().generate(&[doc]).unwrap();
        assert_eq!(stats.posts, 0);
        assert_eq!(stats.skipped, 1);
        assert!(site.public_dir.join("index.html").exists());
    }

    #[test]
    fn test_duplicate_uids_generate_once() {
        let dir = TempDir::new().unwrap();
        let site = site(&dir);
        let docs = vec![
            post("first-id", "same", "First", Some((2020, 1, 1))),
            post("second-id", "same", "Second", Some((2021, 1, 1))),
        ];

        let stats = Generator::new(&site).unwrap().generate(&docs).unwrap();
        assert_eq!(stats.posts, 1);
        assert_eq!(stats.skipped, 1);

        let page = fs::read_to_string(site.public_dir.join("blog/same/index.html")).unwrap();
        assert!(page.contains(r#"data-wio-id="first-id""#));

        let index = fs::read_to_string(site.public_dir.join("index.html")).unwrap();
        assert_eq!(index.matches(r#"class="post-summary""#).count(), 1);
        assert!(!index.contains("Second"));
    }

    #[test]
    fn test_render_missing_post() {
        let dir = TempDir::new().unwrap();
        let site = site(&dir);
        let docs: Vec<Document> = Vec::new();
        let generator = Generator::new(&site).unwrap();
        assert!(generator.render_post(docs.as_slice(), "missing").unwrap().is_none());
    }

    #[test]
    fn test_copy_assets() {
        let dir = TempDir::new().unwrap();
        let site = site(&dir);
        fs::create_dir_all(site.source_dir.join("css")).unwrap();
        fs::create_dir_all(site.posts_dir()).unwrap();
        fs::write(site.source_dir.join("css/main.css"), "body {}").unwrap();
        fs::write(site.posts_dir().join("a.json"), "{}").unwrap();

        let stats = Generator::new(&site).unwrap().generate(&[]).unwrap();
        assert_eq!(stats.assets, 1);
        assert!(site.public_dir.join("css/main.css").exists());
        assert!(!site.public_dir.join("_posts").exists());
    }
}
