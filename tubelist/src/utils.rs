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

use serde::Deserialize;

use crate::Thumbnail;

/// Returns the substring of `haystack` between the first occurrence of
/// `start` and the next occurrence of `end` after it.
pub(crate) fn between<'a>(haystack: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let from = haystack.find(start)? + start.len();
    let rest = &haystack[from..];
    let to = rest.find(end)?;
    Some(&rest[..to])
}

/// A display string as youtube renders it - either plain, or split into runs.
#[derive(Deserialize, Default, Debug, Clone)]
pub(crate) struct Text {
    #[serde(rename = "simpleText")]
    pub simple_text: Option<String>,
    pub runs: Option<Vec<TextRun>>,
}

#[derive(Deserialize, Debug, Clone)]
pub(crate) struct TextRun {
    pub text: String,
}

impl Text {
    pub fn flatten(&self) -> String {
        if let Some(ref s) = self.simple_text {
            return s.clone();
        }
        match self.runs {
            Some(ref runs) => runs.iter().map(|r| r.text.as_str()).collect(),
            None => String::new(),
        }
    }
}

/// Pulls the digits out of a human-formatted count ("1,234 videos" -> 1234).
/// Text without any digits ("No views") counts as 0.
pub(crate) fn parse_num(text: &Text) -> u64 {
    let digits: String = text.flatten().chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

#[derive(Deserialize, Default, Debug, Clone)]
pub(crate) struct ThumbnailSet {
    #[serde(default)]
    pub thumbnails: Vec<Thumbnail>,
}

impl ThumbnailSet {
    /// The widest variant available, if any.
    pub fn widest(self) -> Option<Thumbnail> {
        self.thumbnails.into_iter().max_by_key(|t| t.width)
    }

    /// All variants, widest first.
    pub fn sorted(mut self) -> Vec<Thumbnail> {
        self.thumbnails.sort_by(|a, b| b.width.cmp(&a.width));
        self.thumbnails
    }
}
