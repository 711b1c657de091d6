//! Site configuration (_config.yml / _config.toml)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::components::DEFAULT_PAGE_SIZE;

/// Errors raised while loading the site configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub introduction: String,
    pub language: String,
    pub site_url: String,
    pub root: String,
    pub icon: String,
    pub keywords: Vec<String>,

    // Integrations
    pub social: SocialConfig,
    pub comment: CommentConfig,
    pub configs: ListConfig,
    pub sponsor: SponsorConfig,
    pub share: ShareConfig,
    pub ga: String,
    pub ad: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    // Writing
    pub default_category: String,
    pub date_format: String,
    pub timezone: String,

    // Post cards column
    pub page_size: usize,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Bee".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            introduction: String::new(),
            language: "en".to_string(),
            site_url: "http://example.com".to_string(),
            root: "/".to_string(),
            icon: String::new(),
            keywords: Vec::new(),

            social: SocialConfig::default(),
            comment: CommentConfig::default(),
            configs: ListConfig::default(),
            sponsor: SponsorConfig::default(),
            share: ShareConfig::default(),
            ga: String::new(),
            ad: String::new(),

            content_dir: "content/blog".to_string(),
            public_dir: "public".to_string(),

            default_category: "uncategorized".to_string(),
            date_format: "MMMM DD, YYYY".to_string(),
            timezone: String::new(),

            page_size: DEFAULT_PAGE_SIZE,

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file, picking the format by extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&content)?,
            _ => Self::from_yaml(&content)?,
        };

        tracing::debug!("Loaded site config from {:?}", path);
        Ok(config)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty file deserializes to unit, not a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SiteConfig = serde_yaml::from_str(content)?;
        config.validate()
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(content)?;
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid(
                "page_size must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }

    /// Whether a Google Analytics tracking id is configured
    pub fn analytics_enabled(&self) -> bool {
        !self.ga.is_empty() && self.ga != "0"
    }
}

/// Social account handles (empty means not shown)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialConfig {
    pub twitter: String,
    pub github: String,
    pub medium: String,
    pub facebook: String,
    pub linkedin: String,
    pub instagram: String,
}

impl SocialConfig {
    /// Configured accounts as (name, profile url), in display order
    pub fn links(&self) -> Vec<(&'static str, String)> {
        let accounts = [
            ("github", &self.github, "https://github.com/"),
            ("twitter", &self.twitter, "https://twitter.com/"),
            ("medium", &self.medium, "https://medium.com/"),
            ("facebook", &self.facebook, "https://www.facebook.com/"),
            ("linkedin", &self.linkedin, "https://www.linkedin.com/in/"),
            ("instagram", &self.instagram, "https://www.instagram.com/"),
        ];

        accounts
            .into_iter()
            .filter(|(_, handle, _)| !handle.trim().is_empty())
            .map(|(name, handle, base)| (name, format!("{}{}", base, handle.trim())))
            .collect()
    }
}

/// Comment widget configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentConfig {
    pub disqus_short_name: String,
    pub utterances: String,
}

/// Listing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    pub count_of_initial_post: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            count_of_initial_post: 10,
        }
    }
}

/// Sponsor configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SponsorConfig {
    pub buy_me_a_coffee_id: String,
}

/// Share configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    pub facebook_app_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Bee");
        assert_eq!(config.page_size, 4);
        assert_eq!(config.content_dir, "content/blog");
        assert!(!config.analytics_enabled());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: 장띵주 블로그
author: hangjoo
site_url: https://hangjoo.github.io
social:
  github: hangjoo
  linkedin: hjjang
comment:
  utterances: hangjoo/utterances-comment
configs:
  count_of_initial_post: 10
ga: '0'
"#;
        let config = SiteConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.title, "장띵주 블로그");
        assert_eq!(config.author, "hangjoo");
        assert_eq!(config.comment.utterances, "hangjoo/utterances-comment");
        assert_eq!(config.page_size, 4);
        assert!(!config.analytics_enabled());
    }

    #[test]
    fn test_parse_toml_config() {
        let toml = r#"
title = "My Blog"
page_size = 6
ga = "UA-1234"

[social]
twitter = "someone"
"#;
        let config = SiteConfig::from_toml(toml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.page_size, 6);
        assert_eq!(config.social.twitter, "someone");
        assert!(config.analytics_enabled());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = SiteConfig::from_yaml("page_size: 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = SiteConfig::from_yaml("  \n").unwrap();
        assert_eq!(config.title, "Bee");
    }

    #[test]
    fn test_social_links_skip_empty() {
        let social = SocialConfig {
            github: "hangjoo".to_string(),
            linkedin: "hjjang".to_string(),
            ..Default::default()
        };
        let links = social.links();
        assert_eq!(
            links,
            vec![
                ("github", "https://github.com/hangjoo".to_string()),
                ("linkedin", "https://www.linkedin.com/in/hjjang".to_string()),
            ]
        );
    }
}
