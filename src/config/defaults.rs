//! Built-in configuration values, used when `sitemaps.toml` omits a key

// Shop defaults
pub const DEFAULT_STOREFRONT_DOMAIN: &str = "gaming-hub.fr";
pub const DEFAULT_ADMIN_DOMAIN: &str = "gaming-hub.myshopify.com";
pub const DEFAULT_SITE_BASE_URL: &str = "https://gaming-hub.fr";
pub const DEFAULT_STOREFRONT_API_VERSION: &str = "2022-10";
pub const DEFAULT_ADMIN_API_VERSION: &str = "2024-01";

// API client defaults
pub const DEFAULT_REQUEST_TIMEOUT: &str = "30s";
pub const DEFAULT_USER_AGENT: &str = concat!("shop-sitemaps/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TOKEN_ENV: &str = "SHOPIFY_TOKEN";

// Image sitemap defaults
pub const DEFAULT_IMAGE_OUTPUT: &str = "sitemap-images.xml";
pub const DEFAULT_BLOG_PAGE_SIZE: u32 = 10;
pub const DEFAULT_ARTICLE_PAGE_SIZE: u32 = 250;
pub const DEFAULT_RELEASE_METAOBJECT_TYPE: &str = "nouveautes_jeux_videos";
pub const DEFAULT_METAOBJECT_PAGE_SIZE: u32 = 250;
pub const DEFAULT_RELEASE_CALENDAR_PATH: &str = "/blogs/calendrier-des-sorties-de-jeux-video";
pub const DEFAULT_RELEASE_IMAGE_TITLE: &str = "Jeu vidéo";
pub const DEFAULT_RELEASE_IMAGE_CAPTION: &str = "Nouveauté jeu vidéo";

// Video sitemap defaults
pub const DEFAULT_VIDEO_OUTPUT: &str = "sitemap-videos.xml";
pub const DEFAULT_VIDEO_METAOBJECT_TYPE: &str = "video_youtube";
pub const DEFAULT_VIDEO_BLOG_HANDLE: &str = "films-et-cinematiques-de-jeux-videos";
pub const DEFAULT_VIDEO_CHANGEFREQ: &str = "daily";
pub const DEFAULT_VIDEO_PRIORITY: &str = "0.8";
pub const DEFAULT_PUBLICATION_TIME_SUFFIX: &str = "T08:00:00+01:00";
pub const DEFAULT_VIDEO_TITLE: &str = "Vidéo Gaming Hub";
pub const DEFAULT_VIDEO_TITLE_SUFFIX: &str = "Toutes les cinématiques Film complet en français";
pub const DEFAULT_VIDEO_DESCRIPTION_TEMPLATE: &str = "Découvrez la vidéo complète du jeu {title} en 4K. Ce montage comprend toutes les cinématiques et séquences principales du jeu.";
pub const DEFAULT_VIDEO_TAG: &str = "Gaming";

// Derived video locators, `{id}` is the video identifier
pub const DEFAULT_THUMBNAIL_TEMPLATE: &str = "https://img.youtube.com/vi/{id}/maxresdefault.jpg";
pub const DEFAULT_CONTENT_TEMPLATE: &str = "https://www.youtube.com/watch?v={id}";
pub const DEFAULT_PLAYER_TEMPLATE: &str = "https://www.youtube.com/embed/{id}";

// Configuration file
pub const DEFAULT_CONFIG_FILE: &str = "sitemaps.toml";
