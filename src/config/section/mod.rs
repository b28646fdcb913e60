//! Configuration section definitions.

mod publish;
mod site;

pub use publish::PublishConfig;
pub use site::SiteConfig;
