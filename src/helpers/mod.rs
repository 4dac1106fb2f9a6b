//! Helper functions for building markup
//!
//! URL generation, link resolution and HTML escaping shared by the
//! renderers and the generator.

mod html;
mod url;

pub use html::*;
pub use url::*;
