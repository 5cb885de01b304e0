use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::errors::{AppError, AppResult};

pub mod defaults;
pub mod duration_serde;

use defaults::*;

/// Upper bound Shopify accepts for `first:` on a connection
const MAX_PAGE_SIZE: u32 = 250;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub shop: ShopConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub images: ImageSitemapConfig,
    #[serde(default)]
    pub videos: VideoSitemapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Host serving the public storefront API
    #[serde(default = "default_storefront_domain")]
    pub storefront_domain: String,
    /// Host serving the private admin API
    #[serde(default = "default_admin_domain")]
    pub admin_domain: String,
    /// Public site root used to build page locators
    #[serde(default = "default_site_base_url")]
    pub site_base_url: String,
    #[serde(default = "default_storefront_api_version")]
    pub storefront_api_version: String,
    #[serde(default = "default_admin_api_version")]
    pub admin_api_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Deadline applied to every GraphQL request
    #[serde(default = "default_request_timeout", with = "duration_serde::duration")]
    pub request_timeout: Duration,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Environment variable holding the access token
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSitemapConfig {
    #[serde(default = "default_image_output")]
    pub output_path: PathBuf,
    #[serde(default = "default_blog_page_size")]
    pub blog_page_size: u32,
    #[serde(default = "default_article_page_size")]
    pub article_page_size: u32,
    #[serde(default = "default_release_metaobject_type")]
    pub release_metaobject_type: String,
    #[serde(default = "default_metaobject_page_size")]
    pub metaobject_page_size: u32,
    /// Page grouping every game-release image
    #[serde(default = "default_release_calendar_path")]
    pub release_calendar_path: String,
    #[serde(default = "default_release_image_title")]
    pub release_image_title: String,
    #[serde(default = "default_release_image_caption")]
    pub release_image_caption: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoSitemapConfig {
    #[serde(default = "default_video_output")]
    pub output_path: PathBuf,
    #[serde(default = "default_video_metaobject_type")]
    pub metaobject_type: String,
    #[serde(default = "default_metaobject_page_size")]
    pub page_size: u32,
    /// Blog whose index page hosts every video entry
    #[serde(default = "default_video_blog_handle")]
    pub blog_handle: String,
    #[serde(default = "default_video_changefreq")]
    pub changefreq: Option<String>,
    #[serde(default = "default_video_priority")]
    pub priority: Option<String>,
    /// Appended to `date_publication` to form a full timestamp
    #[serde(default = "default_publication_time_suffix")]
    pub publication_time_suffix: String,
    #[serde(default)]
    pub publication_date_fallback: PublicationDateFallback,
    #[serde(default = "default_video_title")]
    pub default_title: String,
    #[serde(default = "default_video_title_suffix")]
    pub title_suffix: String,
    /// Must contain `{title}`
    #[serde(default = "default_video_description_template")]
    pub description_template: String,
    #[serde(default = "default_video_tag")]
    pub default_tag: String,
    #[serde(default)]
    pub locators: VideoLocatorTemplates,
}

/// URL templates for derived video locators, `{id}` is substituted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoLocatorTemplates {
    #[serde(default = "default_thumbnail_template")]
    pub thumbnail: String,
    #[serde(default = "default_content_template")]
    pub content: String,
    #[serde(default = "default_player_template")]
    pub player: String,
}

/// What to emit as publication date when a video record has none
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PublicationDateFallback {
    /// Use the instant the run started
    #[default]
    RunTime,
    /// Leave `publication_date` out of the entry
    Omit,
}

// Shop defaults
fn default_storefront_domain() -> String {
    DEFAULT_STOREFRONT_DOMAIN.to_string()
}

fn default_admin_domain() -> String {
    DEFAULT_ADMIN_DOMAIN.to_string()
}

fn default_site_base_url() -> String {
    DEFAULT_SITE_BASE_URL.to_string()
}

fn default_storefront_api_version() -> String {
    DEFAULT_STOREFRONT_API_VERSION.to_string()
}

fn default_admin_api_version() -> String {
    DEFAULT_ADMIN_API_VERSION.to_string()
}

// API defaults
fn default_request_timeout() -> Duration {
    humantime::parse_duration(DEFAULT_REQUEST_TIMEOUT).unwrap_or(Duration::from_secs(30))
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_token_env() -> String {
    DEFAULT_TOKEN_ENV.to_string()
}

// Image sitemap defaults
fn default_image_output() -> PathBuf {
    PathBuf::from(DEFAULT_IMAGE_OUTPUT)
}

fn default_blog_page_size() -> u32 {
    DEFAULT_BLOG_PAGE_SIZE
}

fn default_article_page_size() -> u32 {
    DEFAULT_ARTICLE_PAGE_SIZE
}

fn default_release_metaobject_type() -> String {
    DEFAULT_RELEASE_METAOBJECT_TYPE.to_string()
}

fn default_metaobject_page_size() -> u32 {
    DEFAULT_METAOBJECT_PAGE_SIZE
}

fn default_release_calendar_path() -> String {
    DEFAULT_RELEASE_CALENDAR_PATH.to_string()
}

fn default_release_image_title() -> String {
    DEFAULT_RELEASE_IMAGE_TITLE.to_string()
}

fn default_release_image_caption() -> String {
    DEFAULT_RELEASE_IMAGE_CAPTION.to_string()
}

// Video sitemap defaults
fn default_video_output() -> PathBuf {
    PathBuf::from(DEFAULT_VIDEO_OUTPUT)
}

fn default_video_metaobject_type() -> String {
    DEFAULT_VIDEO_METAOBJECT_TYPE.to_string()
}

fn default_video_blog_handle() -> String {
    DEFAULT_VIDEO_BLOG_HANDLE.to_string()
}

fn default_video_changefreq() -> Option<String> {
    Some(DEFAULT_VIDEO_CHANGEFREQ.to_string())
}

fn default_video_priority() -> Option<String> {
    Some(DEFAULT_VIDEO_PRIORITY.to_string())
}

fn default_publication_time_suffix() -> String {
    DEFAULT_PUBLICATION_TIME_SUFFIX.to_string()
}

fn default_video_title() -> String {
    DEFAULT_VIDEO_TITLE.to_string()
}

fn default_video_title_suffix() -> String {
    DEFAULT_VIDEO_TITLE_SUFFIX.to_string()
}

fn default_video_description_template() -> String {
    DEFAULT_VIDEO_DESCRIPTION_TEMPLATE.to_string()
}

fn default_video_tag() -> String {
    DEFAULT_VIDEO_TAG.to_string()
}

fn default_thumbnail_template() -> String {
    DEFAULT_THUMBNAIL_TEMPLATE.to_string()
}

fn default_content_template() -> String {
    DEFAULT_CONTENT_TEMPLATE.to_string()
}

fn default_player_template() -> String {
    DEFAULT_PLAYER_TEMPLATE.to_string()
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            storefront_domain: default_storefront_domain(),
            admin_domain: default_admin_domain(),
            site_base_url: default_site_base_url(),
            storefront_api_version: default_storefront_api_version(),
            admin_api_version: default_admin_api_version(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
            token_env: default_token_env(),
        }
    }
}

impl Default for ImageSitemapConfig {
    fn default() -> Self {
        Self {
            output_path: default_image_output(),
            blog_page_size: default_blog_page_size(),
            article_page_size: default_article_page_size(),
            release_metaobject_type: default_release_metaobject_type(),
            metaobject_page_size: default_metaobject_page_size(),
            release_calendar_path: default_release_calendar_path(),
            release_image_title: default_release_image_title(),
            release_image_caption: default_release_image_caption(),
        }
    }
}

impl Default for VideoSitemapConfig {
    fn default() -> Self {
        Self {
            output_path: default_video_output(),
            metaobject_type: default_video_metaobject_type(),
            page_size: default_metaobject_page_size(),
            blog_handle: default_video_blog_handle(),
            changefreq: default_video_changefreq(),
            priority: default_video_priority(),
            publication_time_suffix: default_publication_time_suffix(),
            publication_date_fallback: PublicationDateFallback::default(),
            default_title: default_video_title(),
            title_suffix: default_video_title_suffix(),
            description_template: default_video_description_template(),
            default_tag: default_video_tag(),
            locators: VideoLocatorTemplates::default(),
        }
    }
}

impl Default for VideoLocatorTemplates {
    fn default() -> Self {
        Self {
            thumbnail: default_thumbnail_template(),
            content: default_content_template(),
            player: default_player_template(),
        }
    }
}

impl ShopConfig {
    /// Absolute URL of a page on the public site
    pub fn page_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.site_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Public URL of one blog article
    pub fn article_url(&self, blog_handle: &str, article_handle: &str) -> String {
        self.page_url(&format!("blogs/{blog_handle}/{article_handle}"))
    }

    /// Public URL of a blog index page
    pub fn blog_url(&self, blog_handle: &str) -> String {
        self.page_url(&format!("blogs/{blog_handle}"))
    }
}

impl Config {
    /// Load configuration from a TOML file, falling back to defaults when it does not exist
    pub fn load_from_file(config_file: &Path) -> AppResult<Self> {
        let config = if config_file.exists() {
            let contents = std::fs::read_to_string(config_file).map_err(|e| {
                AppError::configuration(format!(
                    "cannot read {}: {e}",
                    config_file.display()
                ))
            })?;
            let config: Self = toml::from_str(&contents).map_err(|e| {
                AppError::configuration(format!(
                    "cannot parse {}: {e}",
                    config_file.display()
                ))
            })?;
            info!("Configuration loaded from: {}", config_file.display());
            config
        } else {
            info!(
                "No configuration file at {}, using built-in defaults",
                config_file.display()
            );
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would produce requests or documents that cannot work
    pub fn validate(&self) -> AppResult<()> {
        if self.shop.storefront_domain.trim().is_empty() {
            return Err(AppError::configuration("shop.storefront_domain is empty"));
        }
        if self.shop.admin_domain.trim().is_empty() {
            return Err(AppError::configuration("shop.admin_domain is empty"));
        }

        let base = url::Url::parse(&self.shop.site_base_url).map_err(|e| {
            AppError::configuration(format!(
                "shop.site_base_url '{}' is not a valid URL: {e}",
                self.shop.site_base_url
            ))
        })?;
        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(AppError::configuration(format!(
                "shop.site_base_url must use http or https, got '{}'",
                base.scheme()
            )));
        }

        if self.api.request_timeout.is_zero() {
            return Err(AppError::configuration("api.request_timeout must be greater than zero"));
        }

        for (name, size) in [
            ("images.blog_page_size", self.images.blog_page_size),
            ("images.article_page_size", self.images.article_page_size),
            ("images.metaobject_page_size", self.images.metaobject_page_size),
            ("videos.page_size", self.videos.page_size),
        ] {
            if size == 0 || size > MAX_PAGE_SIZE {
                return Err(AppError::configuration(format!(
                    "{name} must be between 1 and {MAX_PAGE_SIZE}, got {size}"
                )));
            }
        }

        if !self.videos.description_template.contains("{title}") {
            return Err(AppError::configuration(
                "videos.description_template must contain the {title} placeholder",
            ));
        }

        let locators = &self.videos.locators;
        for (name, template) in [
            ("videos.locators.thumbnail", &locators.thumbnail),
            ("videos.locators.content", &locators.content),
            ("videos.locators.player", &locators.player),
        ] {
            if !template.contains("{id}") {
                return Err(AppError::configuration(format!(
                    "{name} must contain the {{id}} placeholder"
                )));
            }
        }

        debug!("Configuration validated");
        Ok(())
    }
}

/// Access token for the commerce API, read once at start-up
#[derive(Clone)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    pub fn new<S: Into<String>>(token: S) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Read the token from the environment variable named in `api.token_env`
    pub fn from_env(api: &ApiConfig) -> AppResult<Self> {
        match std::env::var(&api.token_env) {
            Ok(token) if !token.trim().is_empty() => Ok(Self::new(token.trim())),
            Ok(_) => Err(AppError::configuration(format!(
                "environment variable {} is empty",
                api.token_env
            ))),
            Err(_) => Err(AppError::configuration(format!(
                "environment variable {} is not set",
                api.token_env
            ))),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials").field("token", &"***").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.images.blog_page_size, 10);
        assert_eq!(config.images.article_page_size, 250);
        assert_eq!(config.videos.page_size, 250);
        assert_eq!(config.api.request_timeout, Duration::from_secs(30));
        assert_eq!(
            config.videos.publication_date_fallback,
            PublicationDateFallback::RunTime
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [shop]
            site_base_url = "https://shop.example"

            [api]
            request_timeout = "5s"

            [videos]
            publication_date_fallback = "omit"
            "#,
        )
        .unwrap();

        assert_eq!(config.shop.site_base_url, "https://shop.example");
        assert_eq!(config.shop.storefront_domain, DEFAULT_STOREFRONT_DOMAIN);
        assert_eq!(config.api.request_timeout, Duration::from_secs(5));
        assert_eq!(config.videos.publication_date_fallback, PublicationDateFallback::Omit);
        assert_eq!(config.videos.blog_handle, DEFAULT_VIDEO_BLOG_HANDLE);
        assert_eq!(config.images.output_path, PathBuf::from(DEFAULT_IMAGE_OUTPUT));
    }

    #[test]
    fn test_example_file_matches_defaults() {
        let config: Config = toml::from_str(include_str!("../../sitemaps.example.toml")).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.videos.changefreq.as_deref(), Some(DEFAULT_VIDEO_CHANGEFREQ));
        assert_eq!(config.videos.locators.thumbnail, DEFAULT_THUMBNAIL_TEMPLATE);
        assert_eq!(config.images.release_image_caption, DEFAULT_RELEASE_IMAGE_CAPTION);
    }

    #[test]
    fn test_page_urls() {
        let shop = ShopConfig {
            site_base_url: "https://gaming-hub.fr/".to_string(),
            ..ShopConfig::default()
        };
        assert_eq!(
            shop.article_url("news", "zelda-review"),
            "https://gaming-hub.fr/blogs/news/zelda-review"
        );
        assert_eq!(shop.blog_url("trailers"), "https://gaming-hub.fr/blogs/trailers");
        assert_eq!(
            shop.page_url(DEFAULT_RELEASE_CALENDAR_PATH),
            "https://gaming-hub.fr/blogs/calendrier-des-sorties-de-jeux-video"
        );
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let mut config = Config::default();
        config.shop.site_base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.images.article_page_size = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.videos.page_size = 251;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.videos.description_template = "Une vidéo".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.videos.locators.player = "https://player.example/".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.shop.storefront_domain = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.shop.admin_domain, DEFAULT_ADMIN_DOMAIN);
        assert!(!dir.path().join("absent.toml").exists());
    }

    #[test]
    fn test_invalid_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitemaps.toml");
        std::fs::write(&path, "[images]\nblog_page_size = \"ten\"\n").unwrap();
        let err = Config::load_from_file(&path).unwrap_err();
        assert!(matches!(err, AppError::Configuration { .. }));
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let credentials = Credentials::new("shpat_secret");
        assert_eq!(credentials.token(), "shpat_secret");
        assert!(!format!("{credentials:?}").contains("shpat_secret"));
    }

    #[test]
    fn test_credentials_from_env() {
        let api = ApiConfig {
            token_env: "SHOP_SITEMAPS_TEST_TOKEN_UNSET".to_string(),
            ..ApiConfig::default()
        };
        let err = Credentials::from_env(&api).unwrap_err();
        assert!(err.to_string().contains("SHOP_SITEMAPS_TEST_TOKEN_UNSET"));
    }
}
