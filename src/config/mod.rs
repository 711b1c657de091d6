//! Configuration module

mod site;

pub use site::CommentConfig;
pub use site::ConfigError;
pub use site::ListConfig;
pub use site::ShareConfig;
pub use site::SiteConfig;
pub use site::SocialConfig;
pub use site::SponsorConfig;
