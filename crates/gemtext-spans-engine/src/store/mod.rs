//! # Span Store
//!
//! Interval index over buffer offsets holding the classified spans. It is
//! the shared substrate the propertizer writes and every reader queries.
//!
//! ## Layout
//!
//! One `BTreeMap` per [`SpanKind`], keyed by span start. Spans of one kind
//! never overlap, so the start is a unique key and the map order is span
//! order. Queries for a range look at the last span starting before the
//! range (the only one that can straddle it) plus the spans starting inside.
//!
//! ## Edits
//!
//! [`SpanStore::rebase`] moves every span through an [`EditNotification`]
//! so offsets track the text rather than line numbers. Only spans at or
//! after the edit are re-keyed; callers then clear and rescan the edited
//! region, so spans damaged by the edit are never read.

pub mod span;

use std::collections::BTreeMap;
use std::iter::Peekable;
use std::ops::Range;

use crate::editing::EditNotification;

pub use span::{Group, GroupKind, Span, SpanKind};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SpanStore {
    kinds: [BTreeMap<usize, Span>; 7],
}

impl SpanStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self, kind: SpanKind) -> &BTreeMap<usize, Span> {
        &self.kinds[kind.index()]
    }

    fn map_mut(&mut self, kind: SpanKind) -> &mut BTreeMap<usize, Span> {
        &mut self.kinds[kind.index()]
    }

    /// Writes a span of `kind` over `range`, replacing spans of that kind
    /// touching it. PreText absorbs abutting PreText so a block written in
    /// several passes stays one span. Empty ranges are ignored.
    pub fn set(&mut self, kind: SpanKind, range: Range<usize>, groups: Vec<Group>) {
        if range.is_empty() {
            return;
        }
        let touching: Vec<usize> = self
            .touching(kind, range.start, range.end)
            .map(|span| span.start())
            .collect();
        let mut range = range;
        let mut groups = groups;
        for start in touching {
            if let Some(old) = self.map_mut(kind).remove(&start)
                && kind.is_multiline()
            {
                range = range.start.min(old.start())..range.end.max(old.end());
            }
        }
        if kind.is_multiline() {
            groups = vec![Group::new(GroupKind::PreContent, range.clone())];
        }
        self.map_mut(kind)
            .insert(range.start, Span::new(kind, range, groups));
    }

    /// Removes spans of the given kinds lying fully or partially in `range`.
    /// Multi-line spans keep the parts outside `range`.
    pub fn clear(&mut self, range: Range<usize>, kinds: &[SpanKind]) {
        if range.is_empty() {
            return;
        }
        for &kind in kinds {
            let hit: Vec<usize> = self.query(range.clone(), kind).map(Span::start).collect();
            for start in hit {
                let Some(old) = self.map_mut(kind).remove(&start) else {
                    continue;
                };
                if !kind.is_multiline() {
                    continue;
                }
                for keep in [old.start()..range.start, range.end..old.end()] {
                    if let Some(rest) = old.clipped(keep) {
                        self.map_mut(kind).insert(rest.start(), rest);
                    }
                }
            }
        }
    }

    /// Removes every span.
    pub fn clear_all(&mut self) {
        self.kinds.iter_mut().for_each(BTreeMap::clear);
    }

    /// Spans of `kind` intersecting `range`, ordered by start.
    pub fn query(
        &self,
        range: Range<usize>,
        kind: SpanKind,
    ) -> impl Iterator<Item = &Span> + Clone + '_ {
        let map = self.map(kind);
        let start = range.start;
        let end = range.end.max(start);
        let straddling = map
            .range(..start)
            .next_back()
            .map(|(_, span)| span)
            .filter(|span| span.end() > start);
        let inside = map.range(start..end).map(|(_, span)| span);
        straddling.into_iter().chain(inside)
    }

    /// Spans of `kind` overlapping or abutting `range`, last first.
    fn touching(&self, kind: SpanKind, start: usize, end: usize) -> impl Iterator<Item = &Span> + '_ {
        self.map(kind)
            .range(..=end)
            .rev()
            .map(|(_, span)| span)
            .take_while(move |span| span.end() >= start)
    }

    /// Spans of every kind intersecting `range`, ordered by start and then
    /// kind. The per-kind queries are merged as the iterator is walked.
    pub fn query_all(&self, range: Range<usize>) -> impl Iterator<Item = &Span> + Clone + '_ {
        MergeByStart {
            heads: SpanKind::ALL
                .iter()
                .map(|&kind| self.query(range.clone(), kind).peekable())
                .collect(),
        }
    }

    /// The span of `kind` covering `pos`.
    pub fn at(&self, kind: SpanKind, pos: usize) -> Option<&Span> {
        self.map(kind)
            .range(..=pos)
            .next_back()
            .map(|(_, span)| span)
            .filter(|span| span.contains(pos))
    }

    /// The span of `kind` starting exactly at `pos`.
    pub fn starting_at(&self, kind: SpanKind, pos: usize) -> Option<&Span> {
        self.map(kind).get(&pos)
    }

    /// Nearest position at or before `pos` covered by a span of `kind`,
    /// looking back no further than `limit`.
    pub fn find_previous_open(&self, kind: SpanKind, pos: usize, limit: usize) -> Option<usize> {
        let span = self.map(kind).range(..=pos).next_back().map(|(_, s)| s)?;
        let found = if span.contains(pos) {
            pos
        } else {
            span.end() - 1
        };
        (found >= limit).then_some(found)
    }

    /// Moves every span through a text edit.
    pub fn rebase(&mut self, edit: &EditNotification) {
        for map in &mut self.kinds {
            let tail = map.split_off(&edit.start);
            // Only the last span starting before the edit can reach into it.
            let straddler = map
                .iter()
                .next_back()
                .filter(|(_, span)| span.end() > edit.start)
                .map(|(&start, _)| start);
            if let Some(span) = straddler
                .and_then(|start| map.remove(&start))
                .and_then(|span| span.rebased(edit))
            {
                map.insert(span.start(), span);
            }
            for (_, span) in tail {
                if let Some(span) = span.rebased(edit) {
                    map.insert(span.start(), span);
                }
            }
        }
    }

    pub fn iter(&self, kind: SpanKind) -> impl Iterator<Item = &Span> + '_ {
        self.map(kind).values()
    }

    pub fn len(&self) -> usize {
        self.kinds.iter().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.iter().all(BTreeMap::is_empty)
    }
}

/// Merges per-kind span iterators, each already ordered by start.
#[derive(Clone)]
struct MergeByStart<'a, I: Iterator<Item = &'a Span>> {
    heads: Vec<Peekable<I>>,
}

impl<'a, I: Iterator<Item = &'a Span>> Iterator for MergeByStart<'a, I> {
    type Item = &'a Span;

    fn next(&mut self) -> Option<&'a Span> {
        let (_, _, index) = self
            .heads
            .iter_mut()
            .enumerate()
            .filter_map(|(index, head)| head.peek().map(|span| (span.start(), span.kind, index)))
            .min()?;
        self.heads[index].next()
    }
}
