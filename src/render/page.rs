//! Page entry point for post pages

use super::post::PostView;
use crate::content::query::QueryData;

/// Address of the page being rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub pathname: String,
}

impl Location {
    pub fn new(pathname: &str) -> Self {
        Self {
            pathname: pathname.to_string(),
        }
    }
}

/// Inputs of a post page: the query response and the current location
#[derive(Debug, Clone, Copy)]
pub struct PageProps<'a> {
    pub data: &'a QueryData,
    pub location: &'a Location,
}

/// Select the post to show
///
/// Only the first returned post is used. An empty response renders nothing.
pub fn post_page<'a>(props: &PageProps<'a>) -> Option<PostView<'a>> {
    let data: &'a QueryData = props.data;
    let location: &'a Location = props.location;
    let edge = data.prismic.all_posts.edges.first()?;

    Some(PostView::new(
        &edge.node,
        &data.site.site_metadata.site_url,
        &location.pathname,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::query::{run_query, PostQuery};
    use crate::content::Document;
    use crate::render::RenderContext;

    #[test]
    fn test_empty_result_renders_nothing() {
        let docs: Vec<Document> = Vec::new();
        let data = run_query(docs.as_slice(), "https://example.com", &PostQuery::by_uid("abc")).unwrap();
        let location = Location::new("/posts/abc");
        let props = PageProps {
            data: &data,
            location: &location,
        };
        assert!(post_page(&props).is_none());
    }

    #[test]
    fn test_first_post_selected() {
        let docs = vec![Document::new("first-id", "a"), Document::new("second-id", "b")];
        let data = run_query(docs.as_slice(), "https://example.com", &PostQuery::default()).unwrap();
        let location = Location::new("/posts/abc");
        let props = PageProps {
            data: &data,
            location: &location,
        };

        let view = post_page(&props).unwrap();
        assert_eq!(view.document.meta.id, "first-id");
        assert_eq!(view.site_url, "https://example.com");
        assert_eq!(view.pathname, "/posts/abc");

        let rendered = view.render(&RenderContext::new(&SiteConfig::default()));
        assert_eq!(rendered.comments.url, "https://example.com/posts/abc");
        assert_eq!(rendered.comments.identifier, "first-id");
    }
}
