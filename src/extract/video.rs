//! Video descriptors from video metaobject records

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

use crate::config::{PublicationDateFallback, VideoSitemapConfig};
use crate::normalizer::MetaobjectRecord;
use crate::sitemap::VideoDescriptor;
use crate::utils::UrlUtils;

/// Video entries of one run plus the number of records left out
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoExtraction {
    pub descriptors: Vec<VideoDescriptor>,
    /// Records without a video identifier
    pub skipped: usize,
}

/// Parse `hh:mm:ss` or `mm:ss` into seconds
///
/// Any other shape, a part that is not a non-negative integer, or a total
/// of zero reads as absent.
///
/// ```rust
/// use shop_sitemaps::extract::parse_duration_seconds;
///
/// assert_eq!(parse_duration_seconds("01:02:03"), Some(3723));
/// assert_eq!(parse_duration_seconds("05:30"), Some(330));
/// assert_eq!(parse_duration_seconds("00:00"), None);
/// ```
pub fn parse_duration_seconds(value: &str) -> Option<u64> {
    let parts = value
        .split(':')
        .map(|part| part.parse::<u64>().ok())
        .collect::<Option<Vec<_>>>()?;

    let seconds = match parts.as_slice() {
        [h, m, s] => h.checked_mul(3600)?.checked_add(m.checked_mul(60)?)?.checked_add(*s)?,
        [m, s] => m.checked_mul(60)?.checked_add(*s)?,
        _ => return None,
    };

    (seconds > 0).then_some(seconds)
}

/// Publication timestamp for a record's `date_publication`
pub fn publication_date(
    date: Option<&str>,
    config: &VideoSitemapConfig,
    run_started: DateTime<Utc>,
) -> Option<String> {
    match date {
        Some(date) => Some(format!("{date}{}", config.publication_time_suffix)),
        None => match config.publication_date_fallback {
            PublicationDateFallback::RunTime => {
                Some(run_started.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            PublicationDateFallback::Omit => None,
        },
    }
}

/// Entry for one video record, `None` when it has no `id_video`
pub fn extract_video(
    record: &MetaobjectRecord,
    config: &VideoSitemapConfig,
    run_started: DateTime<Utc>,
) -> Option<VideoDescriptor> {
    let id = record.non_empty("id_video")?;
    let name = record.non_empty("titre");

    let title_base = name.unwrap_or(&config.default_title);
    let title = if config.title_suffix.is_empty() {
        title_base.to_string()
    } else {
        format!("{title_base} {}", config.title_suffix)
    };

    Some(VideoDescriptor {
        thumbnail_loc: UrlUtils::fill_id_template(&config.locators.thumbnail, id),
        title,
        description: config
            .description_template
            .replace("{title}", name.unwrap_or_default()),
        content_loc: UrlUtils::fill_id_template(&config.locators.content, id),
        player_loc: UrlUtils::fill_id_template(&config.locators.player, id),
        duration_seconds: record.non_empty("duration").and_then(parse_duration_seconds),
        publication_date: publication_date(
            record.non_empty("date_publication"),
            config,
            run_started,
        ),
        tag: record
            .non_empty("tag")
            .unwrap_or(&config.default_tag)
            .to_string(),
        family_friendly: false,
        live: false,
    })
}

/// Entries for all records, in record order
pub fn extract_videos(
    records: &[MetaobjectRecord],
    config: &VideoSitemapConfig,
    run_started: DateTime<Utc>,
) -> VideoExtraction {
    let mut extraction = VideoExtraction::default();

    for record in records {
        match extract_video(record, config, run_started) {
            Some(descriptor) => extraction.descriptors.push(descriptor),
            None => {
                debug!(
                    "Skipping video record {} without id_video",
                    record.handle.as_deref().unwrap_or("<unnamed>")
                );
                extraction.skipped += 1;
            }
        }
    }

    extraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn run_started() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap()
    }

    fn record(fields: &[(&str, &str)]) -> MetaobjectRecord {
        fields.iter().copied().collect()
    }

    #[rstest]
    #[case("01:02:03", Some(3723))]
    #[case("05:30", Some(330))]
    #[case("01:30:00", Some(5400))]
    #[case("0:0:1", Some(1))]
    #[case("", None)]
    #[case("abc", None)]
    #[case("90", None)]
    #[case("1:2:3:4", None)]
    #[case("00:00", None)]
    #[case("00:00:00", None)]
    #[case("1:xx", None)]
    #[case("-1:30", None)]
    #[case("1::30", None)]
    fn test_parse_duration_seconds(#[case] input: &str, #[case] expected: Option<u64>) {
        assert_eq!(parse_duration_seconds(input), expected);
    }

    #[test]
    fn test_parse_duration_overflow_is_absent() {
        assert_eq!(parse_duration_seconds("18446744073709551615:00:00"), None);
    }

    #[test]
    fn test_full_record() {
        let config = VideoSitemapConfig::default();
        let video = extract_video(
            &record(&[
                ("id_video", "abc123"),
                ("titre", "Game X"),
                ("duration", "01:30:00"),
                ("date_publication", "2024-03-01"),
                ("tag", "RPG"),
            ]),
            &config,
            run_started(),
        )
        .unwrap();

        assert!(video.thumbnail_loc.ends_with("/vi/abc123/maxresdefault.jpg"));
        assert_eq!(video.content_loc, "https://www.youtube.com/watch?v=abc123");
        assert_eq!(video.player_loc, "https://www.youtube.com/embed/abc123");
        assert_eq!(video.duration_seconds, Some(5400));
        assert_eq!(video.publication_date.as_deref(), Some("2024-03-01T08:00:00+01:00"));
        assert_eq!(video.tag, "RPG");
        assert_eq!(
            video.title,
            "Game X Toutes les cinématiques Film complet en français"
        );
        assert!(video.description.contains("du jeu Game X en 4K"));
        assert!(!video.family_friendly);
        assert!(!video.live);
    }

    #[test]
    fn test_fallbacks() {
        let config = VideoSitemapConfig::default();
        let video = extract_video(&record(&[("id_video", "xyz"), ("tag", "")]), &config, run_started())
            .unwrap();

        assert_eq!(
            video.title,
            "Vidéo Gaming Hub Toutes les cinématiques Film complet en français"
        );
        assert!(video.description.starts_with("Découvrez la vidéo complète du jeu  en 4K."));
        assert_eq!(video.tag, "Gaming");
        assert_eq!(video.duration_seconds, None);
        assert_eq!(video.publication_date.as_deref(), Some("2024-05-06T07:08:09.000Z"));
    }

    #[test]
    fn test_omit_publication_date() {
        let config = VideoSitemapConfig {
            publication_date_fallback: PublicationDateFallback::Omit,
            ..Default::default()
        };
        let video = extract_video(&record(&[("id_video", "xyz")]), &config, run_started()).unwrap();
        assert_eq!(video.publication_date, None);

        let dated = extract_video(
            &record(&[("id_video", "xyz"), ("date_publication", "2024-01-02")]),
            &config,
            run_started(),
        )
        .unwrap();
        assert_eq!(dated.publication_date.as_deref(), Some("2024-01-02T08:00:00+01:00"));
    }

    #[test]
    fn test_records_without_id_are_counted() {
        let config = VideoSitemapConfig::default();
        let records = vec![
            record(&[("id_video", "a")]),
            record(&[("titre", "No id")]),
            record(&[("id_video", "")]),
            record(&[("id_video", "b")]),
        ];

        let extraction = extract_videos(&records, &config, run_started());
        assert_eq!(extraction.skipped, 2);
        let ids: Vec<&str> = extraction
            .descriptors
            .iter()
            .map(|video| video.player_loc.as_str())
            .collect();
        assert_eq!(
            ids,
            ["https://www.youtube.com/embed/a", "https://www.youtube.com/embed/b"]
        );
    }

    #[test]
    fn test_custom_locator_templates() {
        let mut config = VideoSitemapConfig::default();
        config.locators.player = "https://player.example/{id}?autoplay=0".to_string();
        config.title_suffix.clear();

        let video = extract_video(&record(&[("id_video", "q1"), ("titre", "T")]), &config, run_started())
            .unwrap();
        assert_eq!(video.player_loc, "https://player.example/q1?autoplay=0");
        assert_eq!(video.title, "T");
    }
}
