// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mapwright-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mapwright and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use regex::RegexBuilder;

use crate::model::{AreaId, MapDoc, Room};

/// Fuzzy hits below this `fuzz::ratio` score are dropped.
pub const FUZZY_MIN_RATIO: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomSearchMode {
    Substring,
    Regex,
    Fuzzy,
}

/// Rooms whose vnum or display label matches `needle`.
///
/// Substring and regex results keep the input order. Fuzzy results are ranked best first, ties
/// broken by vnum.
pub fn room_search<'a>(
    rooms: impl IntoIterator<Item = &'a Room>,
    needle: &str,
    mode: RoomSearchMode,
    case_insensitive: bool,
) -> Result<Vec<&'a Room>, regex::Error> {
    let rooms = rooms.into_iter();
    match mode {
        RoomSearchMode::Substring => {
            let needle = fold(needle, case_insensitive);
            Ok(rooms
                .filter(|room| {
                    haystacks(room).any(|hay| fold(hay, case_insensitive).contains(needle.as_str()))
                })
                .collect())
        }
        RoomSearchMode::Regex => {
            let regex = RegexBuilder::new(needle)
                .case_insensitive(case_insensitive)
                .build()?;
            Ok(rooms
                .filter(|room| haystacks(room).any(|hay| regex.is_match(hay)))
                .collect())
        }
        RoomSearchMode::Fuzzy => {
            let needle = fold(needle.trim(), case_insensitive);
            if needle.is_empty() {
                return Ok(Vec::new());
            }
            let mut scored = rooms
                .filter_map(|room| {
                    let score = haystacks(room)
                        .map(|hay| fuzzy_score(&needle, &fold(hay, case_insensitive)))
                        .fold(0.0, f64::max);
                    (score >= FUZZY_MIN_RATIO).then_some((score, room))
                })
                .collect::<Vec<_>>();
            scored.sort_by(|(sa, ra), (sb, rb)| {
                sb.partial_cmp(sa)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| ra.vnum.cmp(&rb.vnum))
            });
            Ok(scored.into_iter().map(|(_, room)| room).collect())
        }
    }
}

/// Best fuzzy match for `needle`, used to jump to a room by name.
pub fn best_room_match<'a>(
    rooms: impl IntoIterator<Item = &'a Room>,
    needle: &str,
) -> Option<&'a Room> {
    room_search(rooms, needle, RoomSearchMode::Fuzzy, true)
        .ok()
        .and_then(|hits| hits.into_iter().next())
}

/// "Did you mean" candidates for an area id that matched no rooms.
///
/// Candidates are catalog areas (by id and name) plus area ids used by rooms, best first.
pub fn suggest_areas(doc: &MapDoc, needle: &str, limit: usize) -> Vec<AreaId> {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut candidates = BTreeSet::<&AreaId>::new();
    if let Some(catalog) = doc.catalog() {
        candidates.extend(catalog.areas.keys());
    }
    candidates.extend(doc.rooms.values().filter_map(Room::area_id));

    let mut scored = candidates
        .into_iter()
        .filter_map(|id| {
            let by_id = fuzzy_score(&needle, &id.as_str().to_lowercase());
            let by_name = fuzzy_score(&needle, &doc.area_name(id).to_lowercase());
            let score = by_id.max(by_name);
            (score >= FUZZY_MIN_RATIO).then_some((score, id))
        })
        .collect::<Vec<_>>();
    scored.sort_by(|(sa, ia), (sb, ib)| {
        sb.partial_cmp(sa).unwrap_or(Ordering::Equal).then_with(|| ia.cmp(ib))
    });
    scored.into_iter().take(limit).map(|(_, id)| id.clone()).collect()
}

fn haystacks(room: &Room) -> impl Iterator<Item = &str> {
    [Some(room.vnum.as_str()), room.label.as_deref()].into_iter().flatten()
}

fn fold(text: &str, case_insensitive: bool) -> String {
    if case_insensitive {
        text.to_lowercase()
    } else {
        text.to_owned()
    }
}

/// `fuzz::ratio`, with containment counted as a full match.
fn fuzzy_score(needle: &str, haystack: &str) -> f64 {
    if haystack.contains(needle) {
        return 1.0;
    }
    rapidfuzz::fuzz::ratio(needle.chars(), haystack.chars())
}
