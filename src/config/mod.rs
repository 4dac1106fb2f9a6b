//! Configuration module

mod site;

pub use site::DisqusConfig;
pub use site::PrismicConfig;
pub use site::SiteConfig;
