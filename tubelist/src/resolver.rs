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

use log::debug;
use reqwest::Url;

use crate::constants::{ALBUM_ID_REGEX, CHANNEL_ID_REGEX, CHANNEL_ONPAGE_REGEX, KNOWN_HOSTS, PLAYLIST_ID_REGEX, PLAYLIST_URL, YT_BASE_URL};
use crate::errors::Error;
use crate::options::FetchOptions;
use crate::transport::Transport;

/// A channel never resolves to itself - listing a channel means listing its
/// uploads playlist.
fn uploads_id(channel_id: &str) -> String {
    format!("UU{}", &channel_id[2..])
}

fn parse_reference(link_or_id: &str) -> Option<Url> {
    Url::options().base_url(Some(&PLAYLIST_URL)).parse(link_or_id).ok()
}

/// Trailing `{kind}/{id}` pair of a vanity-style path, or `None` if the path
/// is too short or has empty segments.
fn path_tail(url: &Url) -> Option<(&str, &str)> {
    let segments: Vec<&str> = url.path().trim_start_matches('/').split('/').collect();
    if segments.len() < 2 || segments.iter().any(|s| s.is_empty()) {
        return None;
    }
    Some((segments[segments.len() - 2], segments[segments.len() - 1]))
}

fn list_param(url: &Url) -> Option<String> {
    url.query_pairs().find(|(k, _)| k == "list").map(|(_, v)| v.into_owned())
}

/// Normalizes any accepted reference into a canonical playlist ID.
/// Only vanity `user`/`c` URLs touch the network (one page fetch to discover
/// the underlying channel ID).
pub async fn resolve_id<T: Transport>(transport: &T, link_or_id: &str) -> Result<String, Error> {
    if link_or_id.is_empty() {
        return Err(Error::InvalidInput);
    }
    if PLAYLIST_ID_REGEX.is_match(link_or_id) || ALBUM_ID_REGEX.is_match(link_or_id) {
        return Ok(link_or_id.to_owned());
    }
    if CHANNEL_ID_REGEX.is_match(link_or_id) {
        return Ok(uploads_id(link_or_id));
    }

    let Some(url) = parse_reference(link_or_id) else {
        return Err(Error::Unresolvable(link_or_id.to_owned()));
    };
    let host = url.host_str().unwrap_or_default();
    if !KNOWN_HOSTS.contains(&host) {
        return Err(Error::UnknownHost(host.to_owned()));
    }

    if let Some(list) = list_param(&url) {
        if PLAYLIST_ID_REGEX.is_match(&list) || ALBUM_ID_REGEX.is_match(&list) {
            return Ok(list);
        }
        // Resolving a mix would require loading a video page and following
        // the side-loaded playlist reference
        if list.starts_with("RD") {
            return Err(Error::UnsupportedMix);
        }
        return Err(Error::Unresolvable(link_or_id.to_owned()));
    }

    match path_tail(&url) {
        Some(("channel", id)) if CHANNEL_ID_REGEX.is_match(id) => Ok(uploads_id(id)),
        // vanity names carry no pattern to check against; the page fetch is
        // what decides whether they exist
        Some((kind @ ("user" | "c"), name)) => resolve_vanity(transport, kind, name).await,
        _ => Err(Error::Unresolvable(link_or_id.to_owned())),
    }
}

async fn resolve_vanity<T: Transport>(transport: &T, kind: &str, name: &str) -> Result<String, Error> {
    let mut url = YT_BASE_URL.clone();
    url.path_segments_mut().expect("YT_BASE_URL should be a base")
        .extend([kind, name]);
    debug!("resolving vanity page {url}");
    let body = transport.fetch_text(&url, &FetchOptions::default()).await.map_err(Error::Transport)?;
    let Some(captures) = CHANNEL_ONPAGE_REGEX.captures(&body) else {
        return Err(Error::Unresolvable(url.to_string()));
    };
    Ok(uploads_id(&captures[1]))
}

/// Syntactic validity check. Agrees with [`resolve_id`] everywhere except
/// vanity `user`/`c` paths, which are accepted optimistically - verifying
/// them takes a network round trip and this check stays synchronous.
pub fn validate_id(link_or_id: &str) -> bool {
    if link_or_id.is_empty() {
        return false;
    }
    if PLAYLIST_ID_REGEX.is_match(link_or_id)
        || ALBUM_ID_REGEX.is_match(link_or_id)
        || CHANNEL_ID_REGEX.is_match(link_or_id)
    {
        return true;
    }

    let Some(url) = parse_reference(link_or_id) else {
        return false;
    };
    let host = url.host_str().unwrap_or_default();
    if !KNOWN_HOSTS.contains(&host) {
        return false;
    }

    if let Some(list) = list_param(&url) {
        return PLAYLIST_ID_REGEX.is_match(&list) || ALBUM_ID_REGEX.is_match(&list);
    }

    match path_tail(&url) {
        Some(("channel", id)) => CHANNEL_ID_REGEX.is_match(id),
        Some(("user" | "c", _)) => true,
        _ => false,
    }
}
