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
use reqwest::{Client, Url};

use crate::options::FetchOptions;

/// The HTTP seam. The crate issues exactly two kinds of requests: a plain
/// GET for page text, and a POST with a JSON body against the browse API.
/// Connection handling, TLS, redirects and timeouts all live behind this
/// trait; tests substitute a scripted double.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn fetch_text(&self, url: &Url, opts: &FetchOptions) -> Result<String, ErrorContext>;

    async fn post_json(&self, url: &Url, opts: &FetchOptions, body: &serde_json::Value) -> Result<serde_json::Value, ErrorContext>;
}

/// Default transport backed by a [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a preconfigured client (proxy, timeout, cookie store, ...).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn fetch_text(&self, url: &Url, opts: &FetchOptions) -> Result<String, ErrorContext> {
        let resp = self.client.get(url.clone())
            .headers(opts.headers.clone())
            .send().await.context("Failed to send page request")?;
        let resp = resp.error_for_status().context("Page request failed")?;
        resp.text().await.context("Failed to receive the page body")
    }

    async fn post_json(&self, url: &Url, opts: &FetchOptions, body: &serde_json::Value) -> Result<serde_json::Value, ErrorContext> {
        let resp = self.client.post(url.clone())
            .headers(opts.headers.clone())
            .json(body)
            .send().await.context("Failed to send browse request")?;
        let resp = resp.error_for_status().context("Browse request failed")?;
        resp.json().await.context("Failed to deserialize the browse response")
    }
}
