//! The blog post query and its response shape
//!
//! The response mirrors the GraphQL result the page templates are written
//! against: `data.site.siteMetadata.siteUrl` plus
//! `data.prismic.allPosts.edges[].node`.

use serde::{Deserialize, Serialize};

use super::{ContentError, Document};

/// Query for the blog posts, optionally narrowed to one uid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostQuery {
    pub uid: Option<String>,
}

impl PostQuery {
    pub fn by_uid(uid: &str) -> Self {
        Self {
            uid: Some(uid.to_string()),
        }
    }
}

/// Full query response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    pub data: QueryData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryData {
    pub site: SiteNode,
    pub prismic: PrismicNode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteNode {
    #[serde(rename = "siteMetadata")]
    pub site_metadata: SiteMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteMetadata {
    #[serde(rename = "siteUrl")]
    pub site_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrismicNode {
    #[serde(rename = "allPosts")]
    pub all_posts: PostConnection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostConnection {
    #[serde(default)]
    pub edges: Vec<PostEdge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostEdge {
    pub node: Document,
}

impl PostConnection {
    pub fn from_documents<I>(documents: I) -> Self
    where
        I: IntoIterator<Item = Document>,
    {
        Self {
            edges: documents
                .into_iter()
                .map(|node| PostEdge { node })
                .collect(),
        }
    }
}

/// A content repository that can answer post queries
pub trait ContentSource {
    /// All posts matching the query, in repository order
    fn all_posts(&self, query: &PostQuery) -> Result<PostConnection, ContentError>;
}

impl ContentSource for [Document] {
    fn all_posts(&self, query: &PostQuery) -> Result<PostConnection, ContentError> {
        Ok(PostConnection::from_documents(
            self.iter()
                .filter(|doc| doc.meta.document_type == "post")
                .filter(|doc| match &query.uid {
                    Some(uid) => doc.uid() == Some(uid.as_str()),
                    None => true,
                })
                .cloned(),
        ))
    }
}

/// Run a post query and attach the site metadata
pub fn run_query<S>(source: &S, site_url: &str, query: &PostQuery) -> Result<QueryData, ContentError>
where
    S: ContentSource + ?Sized,
{
    let all_posts = source.all_posts(query)?;
    tracing::debug!(
        "Query uid={:?} returned {} post(s)",
        query.uid,
        all_posts.edges.len()
    );

    Ok(QueryData {
        site: SiteNode {
            site_metadata: SiteMetadata {
                site_url: site_url.to_string(),
            },
        },
        prismic: PrismicNode { all_posts },
    })
}
