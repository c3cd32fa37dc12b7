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

use cloneable_errors::{ErrorContext, ResContext};
use log::{debug, warn};
use reqwest::Url;
use serde_json::Value;

use crate::constants::PLAYLIST_URL;
use crate::errors::Error;
use crate::innertube::{self, wire, ApiContext};
use crate::item::ItemParser;
use crate::options::{FetchOptions, LimitTracker};
use crate::transport::Transport;
use crate::utils::between;
use crate::Thumbnail;

/// Everything the landing page yields: playlist metadata, the first batch of
/// items, and (maybe) the handle needed to keep paging.
pub(crate) struct FirstPage<I> {
    pub title: String,
    pub thumbnail: Option<Thumbnail>,
    pub total_items: u64,
    pub views: u64,
    pub items: Vec<I>,
    pub continuation: Option<String>,
    pub api: Option<ApiContext>,
}

fn playlist_url(id: &str, opts: &FetchOptions) -> Url {
    let mut url = PLAYLIST_URL.clone();
    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &opts.query {
            pairs.append_pair(key, value);
        }
        if let Some(ref hl) = opts.hl {
            pairs.append_pair("hl", hl);
        }
        if let Some(ref gl) = opts.gl {
            pairs.append_pair("gl", gl);
        }
        pairs.append_pair("list", id);
    }
    url
}

const INITIAL_DATA_MARKERS: [(&str, &str); 2] = [
    ("var ytInitialData = ", ";</script>"),
    ("window[\"ytInitialData\"] = ", ";</script>"),
];

fn extract_initial_data(body: &str) -> Option<Value> {
    INITIAL_DATA_MARKERS.iter()
        .find_map(|(start, end)| between(body, start, end).and_then(|raw| serde_json::from_str(raw).ok()))
}

/// Both the key and the client version have to be present for the browse
/// fallback to stand a chance, so a partial scrape yields `None`.
fn scrape_api_context(body: &str, opts: &FetchOptions) -> Option<ApiContext> {
    let api_key = between(body, "\"INNERTUBE_API_KEY\":\"", "\"")
        .or_else(|| between(body, "\"innertubeApiKey\":\"", "\""))?;
    let client_version = between(body, "\"INNERTUBE_CONTEXT_CLIENT_VERSION\":\"", "\"")
        .or_else(|| between(body, "\"innertube_context_client_version\":\"", "\""))?;
    Some(ApiContext {
        api_key: api_key.to_owned(),
        context: wire::Context {
            client: wire::Client {
                client_name: "WEB".to_owned(),
                client_version: client_version.to_owned(),
                hl: opts.hl.clone(),
                gl: opts.gl.clone(),
                utc_offset_minutes: 0,
            },
        },
    })
}

/// The browse fallback for pages served without an embedded payload.
/// Failures here are not fatal by themselves - an absent payload is reported
/// upward and feeds the retry path.
async fn fetch_fallback<T: Transport>(transport: &T, body: &str, id: &str, api: Option<&ApiContext>, opts: &FetchOptions) -> Option<Value> {
    let Some(api) = api else {
        debug!("no api key or client version on the landing page, cannot use the browse fallback");
        return None;
    };
    let browse_id = between(body, "\"key\":\"browse_id\",\"value\":\"", "\"")
        .map_or_else(|| format!("VL{id}"), str::to_owned);
    debug!("no embedded payload, browsing {browse_id}");
    match innertube::browse_initial(transport, api, opts, &browse_id).await {
        Ok(json) => Some(json),
        Err(err) => {
            warn!("browse fallback failed: {err:?}");
            None
        }
    }
}

fn structure(err: ErrorContext) -> Error {
    Error::Structure(err)
}

pub(crate) async fn load_first_page<T, P>(
    transport: &T,
    id: &str,
    parser: &P,
    opts: &FetchOptions,
    limit: &mut LimitTracker,
) -> Result<FirstPage<P::Item>, Error>
where
    T: Transport,
    P: ItemParser,
{
    let url = playlist_url(id, opts);
    let body = transport.fetch_text(&url, opts).await.map_err(Error::Transport)?;

    let api = scrape_api_context(&body, opts);
    let payload = match extract_initial_data(&body) {
        Some(json) => Some(json),
        None => fetch_fallback(transport, &body, id, api.as_ref(), opts).await,
    };
    let Some(payload) = payload else {
        return Err(Error::MissingInitialData);
    };

    // Youtube sometimes serves its generic landing page with a 2xx instead
    // of playlist data; the missing sidebar is how that page looks to us.
    if payload.get("sidebar").is_none() {
        return Err(Error::UnknownPlaylist);
    }

    let data: wire::InitialData = serde_json::from_value(payload)
        .context("Failed to decode the initial data payload").map_err(structure)?;

    if let (Some(ref alerts), None) = (&data.alerts, &data.contents) {
        let error_alert = alerts.iter()
            .filter_map(|a| a.alert_renderer.as_ref())
            .find(|r| r.kind == "ERROR");
        if let Some(alert) = error_alert {
            return Err(Error::PlatformError(alert.text.flatten()));
        }
    }

    let sidebar = data.sidebar.context("Initial data lost its sidebar while decoding").map_err(structure)?;
    let wire::SidebarItem::Primary(info) = sidebar.playlist_sidebar_renderer.items.into_iter().next()
        .context("Sidebar without a primary info renderer").map_err(structure)?;

    let title = info.title.flatten();
    let total_items = crate::utils::parse_num(
        info.stats.first().context("Playlist stats were missing").map_err(structure)?,
    );
    // the view counter only exists on three-stat playlists; two stats means
    // youtube dropped it for this list
    let views = if info.stats.len() == 3 {
        crate::utils::parse_num(&info.stats[1])
    } else {
        0
    };
    let thumbnail = info.thumbnail_renderer.video
        .or(info.thumbnail_renderer.custom)
        .context("Playlist without a thumbnail renderer").map_err(structure)?
        .thumbnail.widest();

    let contents = data.contents.context("Initial data without contents").map_err(structure)?;
    let tab = contents.two_column_browse_results_renderer.tabs.into_iter().next()
        .context("Initial data without browse tabs").map_err(structure)?;
    let sections = tab.tab_renderer.content.section_list_renderer.contents;

    let Some(section) = sections.iter().find_map(|v| v.get("itemSectionRenderer")) else {
        return Err(Error::EmptyPlaylist);
    };
    let section: wire::ItemSection = serde_json::from_value(section.clone())
        .context("Failed to decode the item section").map_err(structure)?;
    let Some(list) = section.contents.iter().find_map(|v| v.get("playlistVideoListRenderer")) else {
        return Err(Error::EmptyPlaylist);
    };
    let list: wire::VideoList = serde_json::from_value(list.clone())
        .context("Failed to decode the video list").map_err(structure)?;

    let items = limit.cap(list.contents.iter().filter_map(|v| parser.parse_item(v)).collect());
    debug!("landing page of {id} yielded {} items", items.len());
    let continuation = innertube::initial_continuation(&list.contents).map_err(structure)?;

    Ok(FirstPage {
        title,
        thumbnail,
        total_items,
        views,
        items,
        continuation,
        api,
    })
}
