//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::content::{
    BlockKind, Document, QuotePrimary, QuoteSlice, RichText, RichTextBlock, Slice, TextPrimary,
    TextSlice,
};

const DEFAULT_CONFIG: &str = r#"# Site
title: My Blog
description: ''
author: John Doe
language: en

# URL
## url is the absolute address comment threads are keyed on
url: http://example.com
root: /
permalink: blog/:uid/

# Directory
source_dir: source
public_dir: public

# Comments
disqus:
  shortname: ''

# Content repository (enables the in-context editing toolbar)
prismic:
  repository:
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("Site already initialized: {:?}", config_path);
    }

    fs::create_dir_all(target_dir.join("source/_posts"))?;
    fs::write(&config_path, DEFAULT_CONFIG)?;

    let sample = sample_post();
    fs::write(
        target_dir.join("source/_posts/hello-world.json"),
        serde_json::to_string_pretty(&sample)?,
    )?;

    Ok(())
}

fn sample_post() -> Document {
    let mut doc = Document::new("hello-world", "hello-world");
    doc.title = RichText(vec![RichTextBlock::new(BlockKind::Heading1, "Hello World")]);
    doc.date = Some(chrono::Local::now().date_naive());
    doc.body = vec![
        Slice::Text(TextSlice {
            label: None,
            primary: TextPrimary {
                text: RichText(vec![RichTextBlock::paragraph(
                    "Welcome! This is your very first post. Edit source/_posts/hello-world.json, then run `slicepress generate`.",
                )]),
            },
        }),
        Slice::Quote(QuoteSlice {
            label: None,
            primary: QuotePrimary {
                quote: RichText(vec![RichTextBlock::paragraph("Carpe diem")]),
            },
        }),
    ];
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::loader::ContentLoader;
    use crate::Slicepress;

    #[test]
    fn test_init_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        let site = Slicepress::new(dir.path()).unwrap();
        assert_eq!(site.config.title, "My Blog");
        assert_eq!(site.config.permalink, "blog/:uid/");

        let docs = ContentLoader::new(&site).load_documents().unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].uid(), Some("hello-world"));
        assert_eq!(docs[0].body.len(), 2);
    }

    #[test]
    fn test_init_twice_fails() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
