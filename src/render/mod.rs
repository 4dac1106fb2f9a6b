//! Rendering of post pages: slice dispatch, post composition, and the
//! page entry point

pub mod page;
pub mod post;
pub mod slices;

pub use page::{post_page, Location, PageProps};
pub use post::{resolve_title, PostView, RenderedPost, UNTITLED};
pub use slices::{render_slices, Fragment};

use crate::comments::Disqus;
use crate::config::SiteConfig;
use crate::helpers::LinkResolver;

/// Site-wide collaborators shared by every rendered post
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub resolver: LinkResolver,
    pub disqus: Disqus,
}

impl RenderContext {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            resolver: LinkResolver::from_config(config),
            disqus: Disqus::new(&config.disqus),
        }
    }
}
