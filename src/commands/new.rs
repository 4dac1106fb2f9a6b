//! Create a new post document

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::{BlockKind, Document, RichText, RichTextBlock, Slice, TextPrimary, TextSlice};
use crate::Slicepress;

/// Create a new post skeleton in source/_posts
///
/// The uid defaults to the slugified title.
pub fn create_post(site: &Slicepress, title: &str, uid: Option<&str>) -> Result<PathBuf> {
    let now = chrono::Local::now();
    let uid = slug::slugify(uid.unwrap_or(title));
    if uid.is_empty() {
        anyhow::bail!("Cannot derive a uid from title {:?}", title);
    }

    let target_dir = site.posts_dir();
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}.json", uid));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let mut doc = Document::new(&format!("{}-{}", uid, now.timestamp()), &uid);
    doc.title = RichText(vec![RichTextBlock::new(BlockKind::Heading1, title)]);
    doc.date = Some(now.date_naive());
    doc.body = vec![Slice::Text(TextSlice {
        label: None,
        primary: TextPrimary {
            text: RichText(vec![RichTextBlock::paragraph("")]),
        },
    })];

    fs::write(&file_path, serde_json::to_string_pretty(&doc)?)?;
    tracing::info!("Created post {} ({})", uid, doc.meta.id);

    Ok(file_path)
}
