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

use std::fmt::Display;

use cloneable_errors::ErrorContext;

#[derive(Debug, Clone)]
pub enum Error {
    /// The playlist reference was empty.
    InvalidInput,
    /// The reference was a URL, but not to a known youtube host.
    UnknownHost(String),
    /// Mix/radio lists (`RD…`) cannot be resolved without loading a video page.
    UnsupportedMix,
    /// No playlist ID could be derived from the reference.
    Unresolvable(String),
    /// Youtube served its generic landing page instead of playlist data.
    UnknownPlaylist,
    /// Youtube reported an explicit error alert for this playlist.
    PlatformError(String),
    /// The playlist page carried no video list section.
    EmptyPlaylist,
    /// No usable payload materialized within the retry budget.
    UnsupportedPlaylist,
    /// Neither an embedded payload nor the browse fallback produced data.
    MissingInitialData,
    /// The payload did not have the shape this crate understands.
    Structure(ErrorContext),
    /// The transport collaborator failed.
    Transport(ErrorContext),
}

impl Error {
    /// Whether restarting the whole resolution from scratch can help.
    /// Only wire-shape surprises qualify - validation and platform-reported
    /// failures come out the same on every attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::MissingInitialData | Error::Structure(_))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidInput => write!(f, "the playlist reference has to be a non-empty string"),
            Error::UnknownHost(host) => write!(f, "not a known youtube host: {host}"),
            Error::UnsupportedMix => write!(f, "mixes are not supported"),
            Error::Unresolvable(reference) => write!(f, "unable to find a playlist id in \"{reference}\""),
            Error::UnknownPlaylist => write!(f, "unknown playlist - youtube served a page without playlist data"),
            Error::PlatformError(message) => write!(f, "youtube reported an error: {message}"),
            Error::EmptyPlaylist => write!(f, "empty playlist - the page carried no video list"),
            Error::UnsupportedPlaylist => write!(f, "unsupported playlist - no initial data after all attempts"),
            Error::MissingInitialData => write!(f, "no usable initial data in the response"),
            Error::Structure(err) => write!(f, "unexpected response structure: {err}"),
            Error::Transport(err) => write!(f, "transport error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Structure(err) | Error::Transport(err) => Some(err),
            _ => None,
        }
    }
}
