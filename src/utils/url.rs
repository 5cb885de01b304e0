//! URL utilities for consistent media locator handling

/// URL utilities for consistent URL handling
pub struct UrlUtils;

impl UrlUtils {
    /// Normalize a media URL into an absolute, scheme-qualified locator
    ///
    /// Surrounding whitespace is trimmed. Protocol-relative URLs (`//host/..`)
    /// get an `https:` prefix, and anything not starting with `http` is treated
    /// as a bare host and gets `https://`. Values already starting with `http`
    /// are returned as they are, so the operation is idempotent.
    ///
    /// Returns `None` for empty or whitespace-only input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shop_sitemaps::utils::url::UrlUtils;
    ///
    /// assert_eq!(
    ///     UrlUtils::normalize_media_url("//cdn.example.com/x.jpg").as_deref(),
    ///     Some("https://cdn.example.com/x.jpg")
    /// );
    /// assert_eq!(
    ///     UrlUtils::normalize_media_url("cdn.example.com/x.jpg").as_deref(),
    ///     Some("https://cdn.example.com/x.jpg")
    /// );
    /// assert_eq!(
    ///     UrlUtils::normalize_media_url("http://img.example/b.png").as_deref(),
    ///     Some("http://img.example/b.png")
    /// );
    /// assert_eq!(UrlUtils::normalize_media_url("   "), None);
    /// ```
    pub fn normalize_media_url(url: &str) -> Option<String> {
        let trimmed = url.trim();

        if trimmed.is_empty() {
            None
        } else if trimmed.starts_with("//") {
            Some(format!("https:{trimmed}"))
        } else if !trimmed.starts_with("http") {
            Some(format!("https://{trimmed}"))
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Substitute `{id}` in a locator template
    ///
    /// The identifier is inserted verbatim; escaping happens at render time.
    pub fn fill_id_template(template: &str, id: &str) -> String {
        template.replace("{id}", id)
    }
}
