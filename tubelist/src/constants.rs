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

use std::sync::LazyLock;

use regex::Regex;

pub static PLAYLIST_URL: LazyLock<reqwest::Url> = LazyLock::new(|| reqwest::Url::parse("https://www.youtube.com/playlist").expect("Should be able to parse the PLAYLIST_URL"));
pub static BROWSE_URL: LazyLock<reqwest::Url>   = LazyLock::new(|| reqwest::Url::parse("https://www.youtube.com/youtubei/v1/browse").expect("Should be able to parse the BROWSE_URL"));
pub static YT_BASE_URL: LazyLock<reqwest::Url>  = LazyLock::new(|| reqwest::Url::parse("https://www.youtube.com/").expect("Should be able to parse the YT_BASE_URL"));

/// Hostnames accepted when a full URL is given instead of a bare ID.
pub const KNOWN_HOSTS: [&str; 3] = ["www.youtube.com", "youtube.com", "music.youtube.com"];

pub static PLAYLIST_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(FL|PL|UU|LL|RD)[A-Za-z0-9_-]{16,41}$").expect("Should be able to parse the playlist ID regex"));
pub static ALBUM_ID_REGEX: LazyLock<Regex>    = LazyLock::new(|| Regex::new(r"^OLAK5uy_[A-Za-z0-9_-]{33}$").expect("Should be able to parse the album ID regex"));
// https://github.com/yt-dlp/yt-dlp/blob/a065086640e888e8d58c615d52ed2f4f4e4c9d18/yt_dlp/extractor/youtube.py#L518-L519
pub static CHANNEL_ID_REGEX: LazyLock<Regex>  = LazyLock::new(|| Regex::new(r"^UC[A-Za-z0-9_-]{22,32}$").expect("Should be able to parse the channel ID regex"));
// vanity pages embed the real channel ID in an RSS link
pub static CHANNEL_ONPAGE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"channel_id=(UC(?-u:[\w-]){22,32})""#).expect("Should be able to parse the on-page channel ID regex"));

/// Total number of times a resolution is attempted before giving up.
pub const RETRY_ATTEMPTS: u32 = 3;
