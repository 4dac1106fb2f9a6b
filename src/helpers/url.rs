//! URL helper functions

use crate::config::SiteConfig;

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for("/blog/", "/css/style.css") // -> "/blog/css/style.css"
/// ```
pub fn url_for(root: &str, path: &str) -> String {
    let root = root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Absolute address of a page: the site URL followed by the page path
///
/// # Examples
/// ```ignore
/// full_url("https://example.com", "/posts/abc") // -> "https://example.com/posts/abc"
/// ```
pub fn full_url(site_url: &str, pathname: &str) -> String {
    format!("{}{}", site_url, pathname)
}

/// Maps repository documents to site paths
#[derive(Debug, Clone)]
pub struct LinkResolver {
    root: String,
    permalink: String,
}

impl LinkResolver {
    pub fn new(root: &str, permalink: &str) -> Self {
        Self {
            root: root.to_string(),
            permalink: permalink.to_string(),
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(&config.root, &config.permalink)
    }

    /// Path of a document given its type and uid
    ///
    /// Posts follow the permalink pattern; any other document links to the
    /// site root.
    pub fn resolve(&self, document_type: &str, uid: &str) -> String {
        if document_type == "post" && !uid.is_empty() {
            self.post_path(uid)
        } else {
            self.root_path()
        }
    }

    /// Path of a post page
    pub fn post_path(&self, uid: &str) -> String {
        url_for(&self.root, &self.permalink.replace(":uid", uid))
    }

    /// Path of the post listing
    pub fn root_path(&self) -> String {
        url_for(&self.root, "")
    }

    /// Output file for a path, relative to the public directory
    pub fn output_file(&self, path: &str) -> String {
        let relative = path
            .strip_prefix(self.root.trim_end_matches('/'))
            .unwrap_or(path)
            .trim_matches('/');

        if relative.is_empty() {
            "index.html".to_string()
        } else if relative.ends_with(".html") {
            relative.to_string()
        } else {
            format!("{}/index.html", relative)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for() {
        assert_eq!(url_for("/blog/", "/css/style.css"), "/blog/css/style.css");
        assert_eq!(url_for("/blog/", "about/"), "/blog/about/");
        assert_eq!(url_for("/", ""), "/");
    }

    #[test]
    fn test_full_url() {
        assert_eq!(
            full_url("https://example.com", "/posts/abc"),
            "https://example.com/posts/abc"
        );
        // No slash normalization at the join
        assert_eq!(
            full_url("https://example.com/", "/posts/abc"),
            "https://example.com//posts/abc"
        );
        assert_eq!(full_url("", "/posts/abc"), "/posts/abc");
    }

    #[test]
    fn test_resolve() {
        let resolver = LinkResolver::new("/", "blog/:uid/");
        assert_eq!(resolver.resolve("post", "hello"), "/blog/hello/");
        assert_eq!(resolver.resolve("page", "about"), "/");
        assert_eq!(resolver.resolve("post", ""), "/");
    }

    #[test]
    fn test_resolve_with_root() {
        let resolver = LinkResolver::new("/site/", "posts/:uid");
        assert_eq!(resolver.post_path("abc"), "/site/posts/abc");
        assert_eq!(resolver.root_path(), "/site/");
    }

    #[test]
    fn test_output_file() {
        let resolver = LinkResolver::new("/site/", "blog/:uid/");
        assert_eq!(resolver.output_file("/site/blog/abc/"), "blog/abc/index.html");
        assert_eq!(resolver.output_file("/site/"), "index.html");
        assert_eq!(resolver.output_file("/site/feed.html"), "feed.html");
    }
}
