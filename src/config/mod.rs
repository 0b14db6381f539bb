//! Blog configuration, read from `_config.yml` in the site directory

mod site;

pub use site::SiteConfig;
