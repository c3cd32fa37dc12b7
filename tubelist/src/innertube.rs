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
use serde_json::Value;

use crate::constants::BROWSE_URL;
use crate::options::FetchOptions;
use crate::transport::Transport;

/// Everything needed to talk to the browse API on behalf of one page load.
/// Scraped once from the landing page, reused for every continuation call
/// within the same attempt.
#[derive(Debug, Clone)]
pub struct ApiContext {
    pub api_key: String,
    pub context: wire::Context,
}

async fn browse<T: Transport>(transport: &T, api: &ApiContext, opts: &FetchOptions, request: &wire::BrowseRequest<'_>) -> Result<Value, ErrorContext> {
    let mut url = BROWSE_URL.clone();
    url.query_pairs_mut().append_pair("key", &api.api_key);
    let body = serde_json::to_value(request).context("Failed to serialize the browse request")?;
    transport.post_json(&url, opts, &body).await
}

/// One-shot browse by ID - the fallback used when the landing page carries
/// no embedded payload.
pub(crate) async fn browse_initial<T: Transport>(transport: &T, api: &ApiContext, opts: &FetchOptions, browse_id: &str) -> Result<Value, ErrorContext> {
    browse(transport, api, opts, &wire::BrowseRequest {
        context: &api.context,
        browse_id: Some(browse_id),
        continuation: None,
    }).await
}

/// Fetches the next page of a paginated listing.
pub(crate) async fn browse_continuation<T: Transport>(transport: &T, api: &ApiContext, opts: &FetchOptions, token: &str) -> Result<Value, ErrorContext> {
    browse(transport, api, opts, &wire::BrowseRequest {
        context: &api.context,
        browse_id: None,
        continuation: Some(token),
    }).await
}

fn continuation_node(raw_list: &[Value]) -> Result<Option<wire::ContinuationItemRenderer>, ErrorContext> {
    let Some(node) = raw_list.iter().find_map(|v| v.get("continuationItemRenderer")) else {
        return Ok(None);
    };
    serde_json::from_value(node.clone())
        .context("Failed to decode the continuation item")
        .map(Some)
}

/// Continuation token as the landing-page payload carries it: buried in the
/// last entry of an executor command list.
pub(crate) fn initial_continuation(raw_list: &[Value]) -> Result<Option<String>, ErrorContext> {
    let Some(node) = continuation_node(raw_list)? else { return Ok(None) };
    let commands = node.continuation_endpoint.command_executor_command
        .context("Continuation item without an executor command")?
        .commands;
    let command = commands.last().context("Executor command list was empty")?;
    let token = command.continuation_command.as_ref()
        .context("Executor command without a continuation token")?
        .token.clone();
    Ok(Some(token))
}

/// Continuation token as browse responses carry it: directly on the endpoint.
pub(crate) fn next_continuation(raw_list: &[Value]) -> Result<Option<String>, ErrorContext> {
    let Some(node) = continuation_node(raw_list)? else { return Ok(None) };
    let token = node.continuation_endpoint.continuation_command
        .context("Continuation item without a continuation command")?
        .token;
    Ok(Some(token))
}

pub(crate) mod wire {
    use serde::{Deserialize, Serialize};
    use serde_json::Value;
    use serde_with::{serde_as, skip_serializing_none, VecSkipError};

    use crate::utils::{Text, ThumbnailSet};

    #[derive(Serialize, Clone, Debug)]
    pub struct Context {
        pub client: Client,
    }

    #[skip_serializing_none]
    #[derive(Serialize, Clone, Debug)]
    pub struct Client {
        #[serde(rename="clientName")]
        pub client_name: String,
        #[serde(rename="clientVersion")]
        pub client_version: String,
        pub hl: Option<String>,
        pub gl: Option<String>,
        #[serde(rename="utcOffsetMinutes")]
        pub utc_offset_minutes: i32,
    }

    #[skip_serializing_none]
    #[derive(Serialize, Clone)]
    pub struct BrowseRequest<'a> {
        pub context: &'a Context,
        #[serde(rename="browseId")]
        pub browse_id: Option<&'a str>,
        pub continuation: Option<&'a str>,
    }

    // Responses below cover exactly the fields this crate consumes; anything
    // else youtube sends is ignored by serde.

    #[derive(Deserialize)]
    pub struct InitialData {
        pub sidebar: Option<Sidebar>,
        pub contents: Option<Contents>,
        pub alerts: Option<Vec<Alert>>,
    }

    #[derive(Deserialize)]
    pub struct Alert {
        #[serde(rename="alertRenderer")]
        pub alert_renderer: Option<AlertRenderer>,
    }

    #[derive(Deserialize)]
    pub struct AlertRenderer {
        #[serde(rename="type")]
        pub kind: String,
        #[serde(default)]
        pub text: Text,
    }

    #[derive(Deserialize)]
    pub struct Sidebar {
        #[serde(rename="playlistSidebarRenderer")]
        pub playlist_sidebar_renderer: SidebarRenderer,
    }

    #[serde_as]
    #[derive(Deserialize)]
    pub struct SidebarRenderer {
        // the secondary info renderer lives in the same list; skip it
        #[serde_as(as="VecSkipError<_>")]
        pub items: Vec<SidebarItem>,
    }

    #[derive(Deserialize)]
    pub enum SidebarItem {
        #[serde(rename="playlistSidebarPrimaryInfoRenderer")]
        Primary(PrimaryInfo),
    }

    #[derive(Deserialize)]
    pub struct PrimaryInfo {
        pub title: Text,
        #[serde(default)]
        pub stats: Vec<Text>,
        #[serde(rename="thumbnailRenderer")]
        pub thumbnail_renderer: ThumbnailRenderer,
    }

    #[derive(Deserialize)]
    pub struct ThumbnailRenderer {
        #[serde(rename="playlistVideoThumbnailRenderer")]
        pub video: Option<ThumbnailBox>,
        #[serde(rename="playlistCustomThumbnailRenderer")]
        pub custom: Option<ThumbnailBox>,
    }

    #[derive(Deserialize)]
    pub struct ThumbnailBox {
        pub thumbnail: ThumbnailSet,
    }

    #[derive(Deserialize)]
    pub struct Contents {
        #[serde(rename="twoColumnBrowseResultsRenderer")]
        pub two_column_browse_results_renderer: BrowseResultsRenderer,
    }

    #[serde_as]
    #[derive(Deserialize)]
    pub struct BrowseResultsRenderer {
        #[serde_as(as="VecSkipError<_>")]
        pub tabs: Vec<Tab>,
    }

    #[derive(Deserialize)]
    pub struct Tab {
        #[serde(rename="tabRenderer")]
        pub tab_renderer: TabRenderer,
    }

    #[derive(Deserialize)]
    pub struct TabRenderer {
        pub content: TabContent,
    }

    #[derive(Deserialize)]
    pub struct TabContent {
        #[serde(rename="sectionListRenderer")]
        pub section_list_renderer: SectionList,
    }

    #[derive(Deserialize)]
    pub struct SectionList {
        #[serde(default)]
        pub contents: Vec<Value>,
    }

    #[derive(Deserialize)]
    pub struct ItemSection {
        #[serde(default)]
        pub contents: Vec<Value>,
    }

    #[derive(Deserialize)]
    pub struct VideoList {
        #[serde(default)]
        pub contents: Vec<Value>,
    }

    #[derive(Deserialize)]
    pub struct ContinuationItemRenderer {
        #[serde(rename="continuationEndpoint")]
        pub continuation_endpoint: ContinuationEndpoint,
    }

    #[derive(Deserialize)]
    pub struct ContinuationEndpoint {
        #[serde(rename="commandExecutorCommand")]
        pub command_executor_command: Option<CommandExecutor>,
        #[serde(rename="continuationCommand")]
        pub continuation_command: Option<ContinuationCommand>,
    }

    #[derive(Deserialize)]
    pub struct CommandExecutor {
        #[serde(default)]
        pub commands: Vec<ExecutorCommand>,
    }

    #[derive(Deserialize)]
    pub struct ExecutorCommand {
        #[serde(rename="continuationCommand")]
        pub continuation_command: Option<ContinuationCommand>,
    }

    #[derive(Deserialize)]
    pub struct ContinuationCommand {
        pub token: String,
    }

    #[derive(Deserialize)]
    pub struct ContinuationResponse {
        #[serde(rename="onResponseReceivedActions")]
        pub on_response_received_actions: Option<Vec<ReceivedAction>>,
    }

    #[derive(Deserialize)]
    pub struct ReceivedAction {
        #[serde(rename="appendContinuationItemsAction")]
        pub append_continuation_items_action: AppendItemsAction,
    }

    #[derive(Deserialize)]
    pub struct AppendItemsAction {
        #[serde(rename="continuationItems")]
        #[serde(default)]
        pub continuation_items: Vec<Value>,
    }
}
