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

use cloneable_errors::ResContext;
use log::debug;

use crate::errors::Error;
use crate::innertube::{self, wire, ApiContext};
use crate::item::ItemParser;
use crate::options::{FetchOptions, LimitTracker};
use crate::transport::Transport;

/// Follows the continuation chain until youtube runs out of pages or the
/// item budget does. Pagination depth is whatever the playlist length
/// dictates, so this is a loop with an accumulator rather than recursion.
pub(crate) async fn walk<T, P>(
    transport: &T,
    api: &ApiContext,
    first_token: String,
    parser: &P,
    opts: &FetchOptions,
    limit: &mut LimitTracker,
) -> Result<Vec<P::Item>, Error>
where
    T: Transport,
    P: ItemParser,
{
    let mut items = Vec::new();
    let mut token = Some(first_token);
    let mut pages = 0u32;

    while let Some(current) = token.take() {
        let resp = innertube::browse_continuation(transport, api, opts, &current).await
            .map_err(Error::Transport)?;
        let resp: wire::ContinuationResponse = serde_json::from_value(resp)
            .context("Failed to decode the continuation response").map_err(Error::Structure)?;

        // an action-less response is how youtube signals exhaustion
        let Some(actions) = resp.on_response_received_actions else {
            debug!("continuation response carried no received actions, stopping after {pages} pages");
            break;
        };
        let raw = actions.into_iter().next()
            .context("Received actions list was empty").map_err(Error::Structure)?
            .append_continuation_items_action.continuation_items;

        let batch = limit.cap(raw.iter().filter_map(|v| parser.parse_item(v)).collect());
        pages += 1;
        debug!("continuation page {pages} yielded {} items", batch.len());
        items.extend(batch);

        let next = innertube::next_continuation(&raw).map_err(Error::Structure)?;
        if !limit.exhausted() {
            token = next;
        }
    }

    Ok(items)
}
