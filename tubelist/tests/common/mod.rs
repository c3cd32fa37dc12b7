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

// not every test binary uses every fixture
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use cloneable_errors::{anyhow, ErrorContext};
use reqwest::Url;
use serde_json::{json, Value};
use tubelist::{FetchOptions, Transport};

pub const API_KEY: &str = "AIzaTestKey123";
pub const CLIENT_VERSION: &str = "2.20250101.00.00";

/// One scripted reply of the fake transport.
pub enum Response {
    Text(String),
    Json(Value),
    Error(&'static str),
}

/// A request the code under test issued, as recorded by [`MockTransport`].
#[derive(Debug, Clone)]
pub struct Request {
    pub url: String,
    /// POST body; `None` for text fetches.
    pub body: Option<Value>,
}

/// Transport double that replays a fixed script of responses and records
/// every request it sees.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Response>>,
    requests: Mutex<Vec<Request>>,
}

impl MockTransport {
    pub fn new(responses: impl IntoIterator<Item = Response>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    fn next_response(&self, url: &Url) -> Response {
        self.responses.lock().unwrap().pop_front()
            .unwrap_or_else(|| panic!("unscripted request to {url}"))
    }
}

impl Transport for MockTransport {
    async fn fetch_text(&self, url: &Url, _opts: &FetchOptions) -> Result<String, ErrorContext> {
        self.requests.lock().unwrap().push(Request { url: url.to_string(), body: None });
        match self.next_response(url) {
            Response::Text(text) => Ok(text),
            Response::Json(_) => panic!("scripted a json response for a text request to {url}"),
            Response::Error(message) => Err(anyhow!(message)),
        }
    }

    async fn post_json(&self, url: &Url, _opts: &FetchOptions, body: &Value) -> Result<Value, ErrorContext> {
        self.requests.lock().unwrap().push(Request { url: url.to_string(), body: Some(body.clone()) });
        match self.next_response(url) {
            Response::Json(json) => Ok(json),
            Response::Text(_) => panic!("scripted a text response for a json request to {url}"),
            Response::Error(message) => Err(anyhow!(message)),
        }
    }
}

// ---- wire fixtures ----

pub fn video_node(id: &str, index: u64) -> Value {
    json!({"playlistVideoRenderer": {
        "videoId": id,
        "index": {"simpleText": index.to_string()},
        "title": {"runs": [{"text": format!("Video {id}")}]},
        "lengthText": {"simpleText": "4:13"},
        "lengthSeconds": "253",
        "thumbnail": {"thumbnails": [{"url": format!("https://i.ytimg.com/vi/{id}/hq720.jpg"), "width": 336, "height": 188}]},
        "isPlayable": true,
    }})
}

/// The landing-page flavour of a continuation marker: token buried in an
/// executor command list.
pub fn page_one_continuation(token: &str) -> Value {
    json!({"continuationItemRenderer": {"continuationEndpoint": {"commandExecutorCommand": {"commands": [
        {"signalServiceEndpoint": {"signal": "SERVICE"}},
        {"continuationCommand": {"token": token}},
    ]}}}})
}

/// The browse-response flavour: token directly on the endpoint.
pub fn next_page_continuation(token: &str) -> Value {
    json!({"continuationItemRenderer": {"continuationEndpoint": {"continuationCommand": {"token": token}}}})
}

pub fn sidebar(stats: &[&str]) -> Value {
    json!({"playlistSidebarRenderer": {"items": [
        {"playlistSidebarPrimaryInfoRenderer": {
            "title": {"runs": [{"text": "Test playlist"}]},
            "stats": stats.iter().map(|s| json!({"simpleText": s})).collect::<Vec<_>>(),
            "thumbnailRenderer": {"playlistVideoThumbnailRenderer": {"thumbnail": {"thumbnails": [
                {"url": "https://i.ytimg.com/small.jpg", "width": 168, "height": 94},
                {"url": "https://i.ytimg.com/large.jpg", "width": 336, "height": 188},
            ]}}},
        }},
        {"playlistSidebarSecondaryInfoRenderer": {"videoOwner": {}}},
    ]}})
}

pub fn initial_data(stats: &[&str], raw_items: Vec<Value>) -> Value {
    json!({
        "sidebar": sidebar(stats),
        "contents": {"twoColumnBrowseResultsRenderer": {"tabs": [{"tabRenderer": {"content":
            {"sectionListRenderer": {"contents": [{"itemSectionRenderer": {"contents":
                [{"playlistVideoListRenderer": {"contents": raw_items}}],
            }}]}},
        }}]}},
    })
}

/// A landing page with the payload embedded the normal way.
pub fn landing_page(payload: &Value) -> String {
    format!(
        r#"<html><script>ytcfg.set({{"INNERTUBE_API_KEY":"{API_KEY}","INNERTUBE_CONTEXT_CLIENT_VERSION":"{CLIENT_VERSION}"}});</script>
<script>var ytInitialData = {payload};</script></html>"#,
    )
}

/// A landing page without any embedded payload - forces the browse fallback.
pub fn bare_landing_page(browse_id: &str) -> String {
    format!(
        r#"<html><script>ytcfg.set({{"INNERTUBE_API_KEY":"{API_KEY}","INNERTUBE_CONTEXT_CLIENT_VERSION":"{CLIENT_VERSION}"}});</script>
<div data-params="{{"key":"browse_id","value":"{browse_id}"}}"></div></html>"#,
    )
}

/// A landing page that carries neither a payload nor the api key markers.
pub fn dead_landing_page() -> String {
    "<html><body>consent wall</body></html>".to_owned()
}

pub fn continuation_response(raw_items: Vec<Value>) -> Value {
    json!({"onResponseReceivedActions": [{"appendContinuationItemsAction": {"continuationItems": raw_items}}]})
}

/// The action-less shape youtube uses to signal end of pagination.
pub fn exhausted_continuation_response() -> Value {
    json!({"estimatedResults": "0"})
}
