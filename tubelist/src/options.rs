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

use reqwest::header::HeaderMap;

/// Per-call knobs. Everything here is optional; `FetchOptions::default()`
/// fetches the entire playlist with no extra request dressing.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Maximum number of items to return. `None` means unrestricted.
    pub limit: Option<u64>,
    /// Interface language, forwarded as the `hl` query param and into the
    /// scraped browse context.
    pub hl: Option<String>,
    /// Geolocation, forwarded as the `gl` query param and into the scraped
    /// browse context.
    pub gl: Option<String>,
    /// Extra query parameters merged into the playlist URL.
    pub query: Vec<(String, String)>,
    /// Headers handed to the transport opaquely (cookies, user-agent, ...).
    pub headers: HeaderMap,
}

/// The running item budget, threaded through the initial load and every
/// continuation step. Once it hits 0 no further pages are requested.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LimitTracker {
    remaining: Option<u64>,
}

impl LimitTracker {
    pub fn new(limit: Option<u64>) -> Self {
        Self { remaining: limit }
    }

    pub fn exhausted(&self) -> bool {
        self.remaining.is_some_and(|r| r == 0)
    }

    /// Truncates a freshly parsed batch to whatever room is left and debits
    /// the tracker by the number of items kept.
    pub fn cap<I>(&mut self, mut items: Vec<I>) -> Vec<I> {
        if let Some(remaining) = self.remaining {
            items.truncate(usize::try_from(remaining).unwrap_or(usize::MAX));
            self.remaining = Some(remaining - items.len() as u64);
        }
        items
    }
}
