//! Media descriptors and their sitemap extension elements

use std::fmt::Write;

use super::escape_xml;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

/// Media that can be rendered inside a `<url>` block
///
/// Each implementor owns exactly one extension namespace, which the
/// renderer declares on the `<urlset>` root.
pub trait SitemapMedia {
    const KIND: MediaKind;
    /// Namespace prefix, e.g. `image`
    const PREFIX: &'static str;
    const NAMESPACE: &'static str;

    /// Append the element for this item, indented by `indent` spaces
    fn write_element(&self, out: &mut String, indent: usize);
}

/// One `<image:image>` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    pub loc: String,
    pub title: String,
    pub caption: String,
}

/// One `<video:video>` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDescriptor {
    pub thumbnail_loc: String,
    pub title: String,
    pub description: String,
    pub content_loc: String,
    pub player_loc: String,
    /// Always positive when present
    pub duration_seconds: Option<u64>,
    pub publication_date: Option<String>,
    pub tag: String,
    pub family_friendly: bool,
    pub live: bool,
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn write_text(out: &mut String, indent: usize, name: &str, value: &str) {
    let _ = writeln!(
        out,
        "{:indent$}<{name}>{}</{name}>",
        "",
        escape_xml(value),
        indent = indent
    );
}

impl SitemapMedia for ImageDescriptor {
    const KIND: MediaKind = MediaKind::Image;
    const PREFIX: &'static str = "image";
    const NAMESPACE: &'static str = "http://www.google.com/schemas/sitemap-image/1.1";

    fn write_element(&self, out: &mut String, indent: usize) {
        let inner = indent + 2;
        let _ = writeln!(out, "{:indent$}<image:image>", "", indent = indent);
        write_text(out, inner, "image:loc", &self.loc);
        write_text(out, inner, "image:title", &self.title);
        write_text(out, inner, "image:caption", &self.caption);
        let _ = writeln!(out, "{:indent$}</image:image>", "", indent = indent);
    }
}

impl SitemapMedia for VideoDescriptor {
    const KIND: MediaKind = MediaKind::Video;
    const PREFIX: &'static str = "video";
    const NAMESPACE: &'static str = "http://www.google.com/schemas/sitemap-video/1.1";

    fn write_element(&self, out: &mut String, indent: usize) {
        let inner = indent + 2;
        let _ = writeln!(out, "{:indent$}<video:video>", "", indent = indent);
        write_text(out, inner, "video:thumbnail_loc", &self.thumbnail_loc);
        write_text(out, inner, "video:title", &self.title);
        write_text(out, inner, "video:description", &self.description);
        write_text(out, inner, "video:content_loc", &self.content_loc);
        write_text(out, inner, "video:player_loc", &self.player_loc);
        if let Some(seconds) = self.duration_seconds.filter(|s| *s > 0) {
            write_text(out, inner, "video:duration", &seconds.to_string());
        }
        if let Some(date) = &self.publication_date {
            write_text(out, inner, "video:publication_date", date);
        }
        write_text(out, inner, "video:tag", &self.tag);
        write_text(out, inner, "video:family_friendly", yes_no(self.family_friendly));
        write_text(out, inner, "video:live", yes_no(self.live));
        let _ = writeln!(out, "{:indent$}</video:video>", "", indent = indent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video() -> VideoDescriptor {
        VideoDescriptor {
            thumbnail_loc: "https://img.youtube.com/vi/abc/maxresdefault.jpg".to_string(),
            title: "Game X".to_string(),
            description: "About Game X".to_string(),
            content_loc: "https://www.youtube.com/watch?v=abc".to_string(),
            player_loc: "https://www.youtube.com/embed/abc".to_string(),
            duration_seconds: Some(5400),
            publication_date: Some("2024-03-01T08:00:00+01:00".to_string()),
            tag: "RPG".to_string(),
            family_friendly: false,
            live: false,
        }
    }

    #[test]
    fn test_image_element() {
        let image = ImageDescriptor {
            loc: "https://cdn.example/a.png?w=1&h=2".to_string(),
            title: "Robin & Sons <Ltd>".to_string(),
            caption: "Caption".to_string(),
        };
        let mut out = String::new();
        image.write_element(&mut out, 4);
        assert_eq!(
            out,
            "    <image:image>\n\
             \x20     <image:loc>https://cdn.example/a.png?w=1&amp;h=2</image:loc>\n\
             \x20     <image:title>Robin &amp; Sons &lt;Ltd&gt;</image:title>\n\
             \x20     <image:caption>Caption</image:caption>\n\
             \x20   </image:image>\n"
        );
    }

    #[test]
    fn test_video_element_order() {
        let mut out = String::new();
        video().write_element(&mut out, 0);
        let tags: Vec<&str> = out
            .lines()
            .filter_map(|line| line.trim().strip_prefix('<'))
            .filter(|line| !line.starts_with('/'))
            .map(|line| line.split('>').next().unwrap_or_default())
            .collect();
        assert_eq!(
            tags,
            [
                "video:video",
                "video:thumbnail_loc",
                "video:title",
                "video:description",
                "video:content_loc",
                "video:player_loc",
                "video:duration",
                "video:publication_date",
                "video:tag",
                "video:family_friendly",
                "video:live",
            ]
        );
        assert!(out.contains("<video:duration>5400</video:duration>"));
        assert!(out.contains("<video:family_friendly>no</video:family_friendly>"));
        assert!(out.contains("<video:live>no</video:live>"));
    }

    #[test]
    fn test_video_optional_elements_omitted() {
        let mut descriptor = video();
        descriptor.duration_seconds = None;
        descriptor.publication_date = None;
        let mut out = String::new();
        descriptor.write_element(&mut out, 0);
        assert!(!out.contains("video:duration"));
        assert!(!out.contains("video:publication_date"));

        descriptor.duration_seconds = Some(0);
        out.clear();
        descriptor.write_element(&mut out, 0);
        assert!(!out.contains("video:duration"));
    }
}
