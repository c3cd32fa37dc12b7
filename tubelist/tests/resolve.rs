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

mod common;

use tubelist::{resolve_id, validate_id, Error};

use crate::common::{MockTransport, Response};

fn vanity_page(channel_id: &str) -> String {
    format!(
        r#"<html><link rel="alternate" type="application/rss+xml"
href="https://www.youtube.com/feeds/videos.xml?channel_id={channel_id}"></html>"#,
    )
}

#[tokio::test]
async fn user_pages_resolve_to_the_uploads_list() {
    let transport = MockTransport::new([Response::Text(vanity_page("UC_aEa8K-EOJ3D6gOs7HcyNg"))]);

    let resolved = resolve_id(&transport, "https://www.youtube.com/user/SomeUser").await.unwrap();
    assert_eq!(resolved, "UU_aEa8K-EOJ3D6gOs7HcyNg");

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "https://www.youtube.com/user/SomeUser");
}

#[tokio::test]
async fn c_pages_resolve_to_the_uploads_list() {
    let transport = MockTransport::new([Response::Text(vanity_page("UC_aEa8K-EOJ3D6gOs7HcyNg"))]);

    let resolved = resolve_id(&transport, "https://www.youtube.com/c/SomeVanityName").await.unwrap();
    assert_eq!(resolved, "UU_aEa8K-EOJ3D6gOs7HcyNg");
    assert_eq!(transport.requests()[0].url, "https://www.youtube.com/c/SomeVanityName");
}

#[tokio::test]
async fn a_vanity_page_without_the_marker_is_unresolvable() {
    let transport = MockTransport::new([Response::Text("<html>no channel here</html>".to_owned())]);

    let err = resolve_id(&transport, "https://www.youtube.com/user/Ghost").await.unwrap_err();
    assert!(matches!(err, Error::Unresolvable(_)));
    // validate stays optimistic about the same reference
    assert!(validate_id("https://www.youtube.com/user/Ghost"));
}

#[tokio::test]
async fn a_failing_vanity_fetch_is_a_transport_error() {
    let transport = MockTransport::new([Response::Error("dns failure")]);

    let err = resolve_id(&transport, "https://www.youtube.com/c/Whoever").await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}
