//! List site content

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::content::query::{ContentSource, PostQuery};
use crate::helpers::LinkResolver;
use crate::render::resolve_title;
use crate::Slicepress;

/// Print every post with its date and path
pub fn run(site: &Slicepress) -> Result<()> {
    let loader = ContentLoader::new(site);
    let resolver = LinkResolver::from_config(&site.config);
    let posts = loader.all_posts(&PostQuery::default())?;

    println!("Posts ({}):", posts.edges.len());
    for edge in &posts.edges {
        let post = &edge.node;
        let date = post
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "----------".to_string());
        let path = post
            .uid()
            .map(|uid| resolver.post_path(uid))
            .unwrap_or_else(|| "(no uid)".to_string());
        println!(
            "  {} - {} [{}] {}",
            date,
            resolve_title(&post.title),
            post.meta.id,
            path
        );
    }

    Ok(())
}
