/* This file is part of the tubelist project - https://github.com/mini-bomba/tubelist
*
*  Copyright (C) 2025 mini_bomba
*
*  This program is free software: you can redistribute it and/or modify
*  it under the terms of the GNU Affero General Public License as published by
*  the Free Software Foundation, either version 3 of the License, or
*  (at your option) any later version.
*
*  This program is distributed in the hope that it will be useful,
*  but WITHOUT ANY WARRANTY; without even the implied warranty of
*  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
*  GNU Affero General Public License for more details.
*
*  You should have received a copy of the GNU Affero General Public License
*  along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Thumbnail;

/// Turns one raw listing node into an item, or `None` to skip it (section
/// headers, continuation markers and other non-video rows). The walker never
/// looks inside the produced items.
pub trait ItemParser {
    type Item;

    fn parse_item(&self, raw: &Value) -> Option<Self::Item>;
}

/// One video row of a playlist, as parsed by [`VideoParser`].
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PlaylistVideo {
    pub id: String,
    /// Position in the playlist. Missing on delisted rows.
    pub index: Option<u64>,
    pub title: String,
    pub url: String,
    pub author: Option<VideoAuthor>,
    /// All known variants, widest first.
    pub thumbnails: Vec<Thumbnail>,
    /// Display duration ("12:34"). Missing for live and unavailable videos.
    pub duration: Option<String>,
    pub duration_seconds: Option<u64>,
    pub is_live: bool,
    pub is_playable: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct VideoAuthor {
    pub name: String,
    pub channel_id: Option<String>,
    pub url: Option<String>,
}

/// The default item collaborator: understands `playlistVideoRenderer` nodes
/// and skips everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct VideoParser;

impl ItemParser for VideoParser {
    type Item = PlaylistVideo;

    fn parse_item(&self, raw: &Value) -> Option<PlaylistVideo> {
        let node = raw.get("playlistVideoRenderer")?;
        let renderer: wire::PlaylistVideoRenderer = serde_json::from_value(node.clone()).ok()?;
        Some(renderer.into())
    }
}

impl From<wire::PlaylistVideoRenderer> for PlaylistVideo {
    fn from(raw: wire::PlaylistVideoRenderer) -> Self {
        let author = raw.short_byline_text
            .and_then(|byline| byline.runs.into_iter().next())
            .map(|run| {
                let endpoint = run.navigation_endpoint.and_then(|n| n.browse_endpoint);
                VideoAuthor {
                    name: run.text,
                    channel_id: endpoint.as_ref().and_then(|e| e.browse_id.clone()),
                    url: endpoint.and_then(|e| e.canonical_base_url).map(|path| format!("https://www.youtube.com{path}")),
                }
            });
        let is_live = raw.thumbnail_overlays.iter()
            .filter_map(|o| o.time_status.as_ref())
            .any(|s| s.style.as_deref() == Some("LIVE"));
        PlaylistVideo {
            url: format!("https://www.youtube.com/watch?v={}", raw.video_id),
            id: raw.video_id,
            index: raw.index.and_then(|i| i.flatten().parse().ok()),
            title: raw.title.flatten(),
            author,
            thumbnails: raw.thumbnail.sorted(),
            duration: raw.length_text.map(|t| t.flatten()),
            duration_seconds: raw.length_seconds.and_then(|s| s.parse().ok()),
            is_live,
            is_playable: raw.is_playable.unwrap_or(true),
        }
    }
}

mod wire {
    use serde::Deserialize;

    use crate::utils::{Text, ThumbnailSet};

    #[derive(Deserialize)]
    pub struct PlaylistVideoRenderer {
        #[serde(rename="videoId")]
        pub video_id: String,
        #[serde(default)]
        pub title: Text,
        pub index: Option<Text>,
        #[serde(rename="shortBylineText")]
        pub short_byline_text: Option<Byline>,
        #[serde(rename="lengthText")]
        pub length_text: Option<Text>,
        #[serde(rename="lengthSeconds")]
        pub length_seconds: Option<String>,
        #[serde(default)]
        pub thumbnail: ThumbnailSet,
        #[serde(rename="isPlayable")]
        pub is_playable: Option<bool>,
        #[serde(rename="thumbnailOverlays")]
        #[serde(default)]
        pub thumbnail_overlays: Vec<ThumbnailOverlay>,
    }

    #[derive(Deserialize)]
    pub struct Byline {
        #[serde(default)]
        pub runs: Vec<BylineRun>,
    }

    #[derive(Deserialize)]
    pub struct BylineRun {
        pub text: String,
        #[serde(rename="navigationEndpoint")]
        pub navigation_endpoint: Option<NavigationEndpoint>,
    }

    #[derive(Deserialize)]
    pub struct NavigationEndpoint {
        #[serde(rename="browseEndpoint")]
        pub browse_endpoint: Option<BrowseEndpoint>,
    }

    #[derive(Deserialize)]
    pub struct BrowseEndpoint {
        #[serde(rename="browseId")]
        pub browse_id: Option<String>,
        #[serde(rename="canonicalBaseUrl")]
        pub canonical_base_url: Option<String>,
    }

    #[derive(Deserialize)]
    pub struct ThumbnailOverlay {
        #[serde(rename="thumbnailOverlayTimeStatusRenderer")]
        pub time_status: Option<TimeStatus>,
    }

    #[derive(Deserialize)]
    pub struct TimeStatus {
        pub style: Option<String>,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn video_node() -> Value {
        json!({"playlistVideoRenderer": {
            "videoId": "xVd5UbNkYLM",
            "index": {"simpleText": "3"},
            "title": {"runs": [{"text": "Some video"}]},
            "shortBylineText": {"runs": [{
                "text": "Some channel",
                "navigationEndpoint": {"browseEndpoint": {
                    "browseId": "UC_aEa8K-EOJ3D6gOs7HcyNg",
                    "canonicalBaseUrl": "/@somechannel",
                }},
            }]},
            "lengthText": {"simpleText": "4:13"},
            "lengthSeconds": "253",
            "thumbnail": {"thumbnails": [
                {"url": "small", "width": 120, "height": 90},
                {"url": "large", "width": 336, "height": 188},
            ]},
            "isPlayable": true,
            "thumbnailOverlays": [
                {"thumbnailOverlayTimeStatusRenderer": {"style": "DEFAULT"}},
            ],
        }})
    }

    #[test]
    fn parses_a_full_video_row() {
        let video = VideoParser.parse_item(&video_node()).unwrap();
        assert_eq!(video.id, "xVd5UbNkYLM");
        assert_eq!(video.index, Some(3));
        assert_eq!(video.title, "Some video");
        assert_eq!(video.url, "https://www.youtube.com/watch?v=xVd5UbNkYLM");
        assert_eq!(video.duration.as_deref(), Some("4:13"));
        assert_eq!(video.duration_seconds, Some(253));
        assert!(!video.is_live);
        assert!(video.is_playable);

        let author = video.author.unwrap();
        assert_eq!(author.name, "Some channel");
        assert_eq!(author.channel_id.as_deref(), Some("UC_aEa8K-EOJ3D6gOs7HcyNg"));
        assert_eq!(author.url.as_deref(), Some("https://www.youtube.com/@somechannel"));

        // widest first
        assert_eq!(video.thumbnails[0].url, "large");
    }

    #[test]
    fn live_rows_are_flagged() {
        let node = json!({"playlistVideoRenderer": {
            "videoId": "liveid",
            "title": {"simpleText": "A stream"},
            "thumbnailOverlays": [
                {"thumbnailOverlayTimeStatusRenderer": {"style": "LIVE"}},
            ],
        }});
        let video = VideoParser.parse_item(&node).unwrap();
        assert!(video.is_live);
        assert_eq!(video.duration, None);
    }

    #[test]
    fn non_video_rows_are_skipped() {
        assert!(VideoParser.parse_item(&json!({"continuationItemRenderer": {}})).is_none());
        assert!(VideoParser.parse_item(&json!({"itemSectionHeaderRenderer": {}})).is_none());
    }
}
