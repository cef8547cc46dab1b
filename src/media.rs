//! Media descriptors, quality selection, and response shaping

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Python-style truthiness over a JSON value.
///
/// Upstream payloads are inconsistent about the `is_video` flag (bool in
/// GraphQL responses, occasionally 0/1 in embedded page data), so the check
/// accepts anything non-falsy.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// One encoded variant of a post's video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoVersion {
    pub url: String,
    pub width: Option<u64>,
    pub height: Option<u64>,
}

/// Loosely structured record describing a post's media assets and metadata.
///
/// Every field is probed defensively out of whatever JSON the primary or
/// fallback path delivered; nothing here is a fixed upstream schema.
#[derive(Debug, Clone, Default)]
pub struct MediaDescriptor {
    pub is_video: bool,
    pub video_url: Option<String>,
    pub video_versions: Vec<VideoVersion>,
    pub display_url: Option<String>,
    pub caption: Option<String>,
    pub username: Option<String>,
    pub width: Option<u64>,
    pub height: Option<u64>,
    pub duration: Option<f64>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
}

impl MediaDescriptor {
    /// Probe a raw JSON value for the known descriptor fields.
    pub fn from_value(value: &Value) -> Self {
        let video_versions = value
            .get("video_versions")
            .and_then(Value::as_array)
            .map(|versions| {
                versions
                    .iter()
                    .filter_map(|entry| {
                        let url = entry.get("url")?.as_str()?.to_string();
                        Some(VideoVersion {
                            url,
                            width: entry.get("width").and_then(Value::as_u64),
                            height: entry.get("height").and_then(Value::as_u64),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            is_video: value.get("is_video").map(truthy).unwrap_or(false),
            video_url: value
                .get("video_url")
                .and_then(Value::as_str)
                .map(String::from),
            video_versions,
            display_url: value
                .get("display_url")
                .or_else(|| value.get("thumbnail_src"))
                .and_then(Value::as_str)
                .map(String::from),
            caption: value
                .pointer("/edge_media_to_caption/edges/0/node/text")
                .or_else(|| value.get("caption"))
                .and_then(Value::as_str)
                .map(String::from),
            username: value
                .pointer("/owner/username")
                .and_then(Value::as_str)
                .map(String::from),
            width: value.pointer("/dimensions/width").and_then(Value::as_u64),
            height: value.pointer("/dimensions/height").and_then(Value::as_u64),
            duration: value
                .get("video_duration")
                .or_else(|| value.get("duration"))
                .and_then(Value::as_f64),
            like_count: value
                .pointer("/edge_media_preview_like/count")
                .or_else(|| value.pointer("/edge_liked_by/count"))
                .or_else(|| value.get("like_count"))
                .and_then(Value::as_u64),
            comment_count: value
                .pointer("/edge_media_to_comment/count")
                .or_else(|| value.pointer("/edge_media_to_parent_comment/count"))
                .or_else(|| value.get("comment_count"))
                .and_then(Value::as_u64),
        }
    }

    /// Pick the downloadable URL for this descriptor.
    ///
    /// With `video_versions` present: stable sort by width descending and
    /// take index 0, so equal-width variants keep their original order and
    /// the first maximal one wins. Otherwise fall back to the plain
    /// `video_url`. `None` means the post has nothing downloadable.
    pub fn select_download(&self) -> Option<SelectedMedia> {
        if !self.video_versions.is_empty() {
            let mut ordered: Vec<&VideoVersion> = self.video_versions.iter().collect();
            ordered.sort_by(|a, b| b.width.unwrap_or(0).cmp(&a.width.unwrap_or(0)));
            let best = ordered[0];
            return Some(SelectedMedia {
                url: best.url.clone(),
                width: best.width,
                height: best.height,
            });
        }
        self.video_url.as_ref().map(|url| SelectedMedia {
            url: url.clone(),
            width: None,
            height: None,
        })
    }
}

/// The variant chosen by quality selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedMedia {
    pub url: String,
    pub width: Option<u64>,
    pub height: Option<u64>,
}

/// `video_info` block of the external response contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInfoBody {
    pub duration: f64,
    pub width: u64,
    pub height: u64,
    pub quality: String,
}

/// `metadata` block of the external response contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataBody {
    pub caption: String,
    pub username: String,
    pub shortcode: String,
    pub like_count: u64,
    pub comment_count: u64,
}

/// `data` payload of the external response contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadData {
    pub download_url: String,
    pub thumbnail_url: String,
    pub video_info: VideoInfoBody,
    pub metadata: MetadataBody,
}

impl DownloadData {
    /// Shape a descriptor plus its selected variant into the external
    /// contract. Pure renaming and defaulting: absent strings become empty,
    /// absent numbers become zero.
    pub fn from_descriptor(
        descriptor: &MediaDescriptor,
        selected: &SelectedMedia,
        shortcode: &str,
    ) -> Self {
        let width = selected.width.or(descriptor.width).unwrap_or(0);
        let height = selected.height.or(descriptor.height).unwrap_or(0);
        let quality = match selected.height.or(descriptor.height) {
            Some(h) => format!("{}p", h),
            None => "unknown".to_string(),
        };

        Self {
            download_url: selected.url.clone(),
            thumbnail_url: descriptor.display_url.clone().unwrap_or_default(),
            video_info: VideoInfoBody {
                duration: descriptor.duration.unwrap_or(0.0),
                width,
                height,
                quality,
            },
            metadata: MetadataBody {
                caption: descriptor.caption.clone().unwrap_or_default(),
                username: descriptor.username.clone().unwrap_or_default(),
                shortcode: shortcode.to_string(),
                like_count: descriptor.like_count.unwrap_or(0),
                comment_count: descriptor.comment_count.unwrap_or(0),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn version(url: &str, width: u64, height: u64) -> VideoVersion {
        VideoVersion {
            url: url.to_string(),
            width: Some(width),
            height: Some(height),
        }
    }

    #[test]
    fn test_select_max_width() {
        let descriptor = MediaDescriptor {
            is_video: true,
            video_versions: vec![
                version("https://x/low.mp4", 480, 854),
                version("https://x/high.mp4", 1080, 1920),
                version("https://x/mid.mp4", 720, 1280),
            ],
            ..Default::default()
        };
        let selected = descriptor.select_download().unwrap();
        assert_eq!(selected.url, "https://x/high.mp4");
        assert_eq!(selected.width, Some(1080));
    }

    #[test]
    fn test_select_tie_keeps_list_order() {
        let descriptor = MediaDescriptor {
            is_video: true,
            video_versions: vec![
                version("https://x/first.mp4", 1080, 1920),
                version("https://x/second.mp4", 1080, 1920),
                version("https://x/low.mp4", 480, 854),
            ],
            ..Default::default()
        };
        let selected = descriptor.select_download().unwrap();
        assert_eq!(selected.url, "https://x/first.mp4");
    }

    #[test]
    fn test_select_falls_back_to_video_url() {
        let descriptor = MediaDescriptor {
            is_video: true,
            video_url: Some("https://x/v.mp4".to_string()),
            ..Default::default()
        };
        let selected = descriptor.select_download().unwrap();
        assert_eq!(selected.url, "https://x/v.mp4");
        assert_eq!(selected.width, None);
    }

    #[test]
    fn test_select_nothing_downloadable() {
        let descriptor = MediaDescriptor {
            is_video: true,
            ..Default::default()
        };
        assert!(descriptor.select_download().is_none());
    }

    #[test]
    fn test_missing_width_sorts_last() {
        let descriptor = MediaDescriptor {
            is_video: true,
            video_versions: vec![
                VideoVersion {
                    url: "https://x/unknown.mp4".to_string(),
                    width: None,
                    height: None,
                },
                version("https://x/known.mp4", 640, 1136),
            ],
            ..Default::default()
        };
        let selected = descriptor.select_download().unwrap();
        assert_eq!(selected.url, "https://x/known.mp4");
    }

    #[test]
    fn test_from_value_graphql_shape() {
        let value = json!({
            "is_video": true,
            "video_url": "https://x/v.mp4",
            "display_url": "https://x/t.jpg",
            "video_duration": 12.5,
            "dimensions": {"width": 1080, "height": 1920},
            "owner": {"username": "someone"},
            "edge_media_to_caption": {"edges": [{"node": {"text": "hello"}}]},
            "edge_media_preview_like": {"count": 42},
            "edge_media_to_comment": {"count": 7}
        });
        let descriptor = MediaDescriptor::from_value(&value);
        assert!(descriptor.is_video);
        assert_eq!(descriptor.video_url.as_deref(), Some("https://x/v.mp4"));
        assert_eq!(descriptor.display_url.as_deref(), Some("https://x/t.jpg"));
        assert_eq!(descriptor.caption.as_deref(), Some("hello"));
        assert_eq!(descriptor.username.as_deref(), Some("someone"));
        assert_eq!(descriptor.width, Some(1080));
        assert_eq!(descriptor.duration, Some(12.5));
        assert_eq!(descriptor.like_count, Some(42));
        assert_eq!(descriptor.comment_count, Some(7));
    }

    #[test]
    fn test_from_value_empty_object() {
        let descriptor = MediaDescriptor::from_value(&json!({}));
        assert!(!descriptor.is_video);
        assert!(descriptor.video_url.is_none());
        assert!(descriptor.video_versions.is_empty());
        assert!(descriptor.select_download().is_none());
    }

    #[test]
    fn test_from_value_numeric_is_video() {
        let descriptor = MediaDescriptor::from_value(&json!({"is_video": 1}));
        assert!(descriptor.is_video);
        let descriptor = MediaDescriptor::from_value(&json!({"is_video": 0}));
        assert!(!descriptor.is_video);
    }

    #[test]
    fn test_shaper_round_trip() {
        let descriptor = MediaDescriptor {
            is_video: true,
            video_url: Some("https://x/v.mp4".to_string()),
            display_url: Some("https://x/t.jpg".to_string()),
            caption: Some("a caption".to_string()),
            username: Some("someone".to_string()),
            width: Some(1080),
            height: Some(1920),
            duration: Some(12.5),
            like_count: Some(42),
            comment_count: Some(7),
            ..Default::default()
        };
        let selected = descriptor.select_download().unwrap();
        let data = DownloadData::from_descriptor(&descriptor, &selected, "ABC123");

        let expected = json!({
            "download_url": "https://x/v.mp4",
            "thumbnail_url": "https://x/t.jpg",
            "video_info": {
                "duration": 12.5,
                "width": 1080,
                "height": 1920,
                "quality": "1920p"
            },
            "metadata": {
                "caption": "a caption",
                "username": "someone",
                "shortcode": "ABC123",
                "like_count": 42,
                "comment_count": 7
            }
        });
        assert_eq!(serde_json::to_value(&data).unwrap(), expected);
    }

    #[test]
    fn test_shaper_defaults() {
        let descriptor = MediaDescriptor {
            is_video: true,
            video_url: Some("https://x/v.mp4".to_string()),
            ..Default::default()
        };
        let selected = descriptor.select_download().unwrap();
        let data = DownloadData::from_descriptor(&descriptor, &selected, "ABC");
        assert_eq!(data.thumbnail_url, "");
        assert_eq!(data.video_info.duration, 0.0);
        assert_eq!(data.video_info.width, 0);
        assert_eq!(data.video_info.quality, "unknown");
        assert_eq!(data.metadata.caption, "");
        assert_eq!(data.metadata.like_count, 0);
    }
}
