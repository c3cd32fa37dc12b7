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

//! Resolves youtube playlist references (IDs, albums, channels, URLs) and
//! fetches the full listing by walking the continuation chain of the
//! undocumented browse API.

use log::warn;
use serde::{Deserialize, Serialize};

mod constants;
mod continuation;
mod errors;
mod innertube;
mod item;
mod loader;
mod options;
mod resolver;
mod transport;
mod utils;

pub use errors::Error;
pub use item::{ItemParser, PlaylistVideo, VideoAuthor, VideoParser};
pub use options::FetchOptions;
pub use resolver::{resolve_id, validate_id};
pub use transport::{HttpTransport, Transport};

use crate::constants::{PLAYLIST_URL, RETRY_ATTEMPTS};
use crate::options::LimitTracker;

/// One variant of a playlist or video thumbnail.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Thumbnail {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// The assembled result of one fetch: playlist metadata plus the ordered
/// item listing across all pages.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Playlist<I> {
    pub id: String,
    pub url: String,
    pub title: String,
    pub thumbnail: Option<Thumbnail>,
    /// Item count as reported by the sidebar, not the length of `items`.
    pub total_items: u64,
    pub views: u64,
    pub items: Vec<I>,
}

/// Resolves `link_or_id` and fetches the listing, parsing every row through
/// `parser`. Wire-shape surprises restart the whole sequence from scratch, up
/// to 3 attempts; validation failures and platform-reported errors do not.
pub async fn fetch_playlist<T, P>(
    transport: &T,
    parser: &P,
    link_or_id: &str,
    opts: &FetchOptions,
) -> Result<Playlist<P::Item>, Error>
where
    T: Transport,
    P: ItemParser,
{
    let mut last_error = None;
    for attempt in 1..=RETRY_ATTEMPTS {
        match fetch_once(transport, parser, link_or_id, opts).await {
            Ok(playlist) => return Ok(playlist),
            Err(err) if err.is_retryable() => {
                warn!("attempt {attempt}/{RETRY_ATTEMPTS} failed: {err}");
                last_error = Some(err);
            }
            Err(err) => return Err(err),
        }
    }
    Err(match last_error.expect("At least one attempt should have run") {
        Error::MissingInitialData => Error::UnsupportedPlaylist,
        err => err,
    })
}

/// [`fetch_playlist`] with the default video parser.
pub async fn fetch_playlist_videos<T: Transport>(
    transport: &T,
    link_or_id: &str,
    opts: &FetchOptions,
) -> Result<Playlist<PlaylistVideo>, Error> {
    fetch_playlist(transport, &VideoParser, link_or_id, opts).await
}

async fn fetch_once<T, P>(
    transport: &T,
    parser: &P,
    link_or_id: &str,
    opts: &FetchOptions,
) -> Result<Playlist<P::Item>, Error>
where
    T: Transport,
    P: ItemParser,
{
    let id = resolver::resolve_id(transport, link_or_id).await?;
    let mut limit = LimitTracker::new(opts.limit);

    let first = loader::load_first_page(transport, &id, parser, opts, &mut limit).await?;
    let mut items = first.items;

    if let Some(token) = first.continuation {
        if !limit.exhausted() {
            let api = first.api.as_ref()
                .ok_or_else(|| Error::Structure(cloneable_errors::anyhow!("Got a continuation token but no api key to use it with")))?;
            let more = continuation::walk(transport, api, token, parser, opts, &mut limit).await?;
            items.extend(more);
        }
    }

    Ok(Playlist {
        url: format!("{}?list={id}", PLAYLIST_URL.as_str()),
        id,
        title: first.title,
        thumbnail: first.thumbnail,
        total_items: first.total_items,
        views: first.views,
        items,
    })
}
