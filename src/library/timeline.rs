// SPDX-License-Identifier: MPL-2.0
//! Timeline partitioner: groups a flat, newest-first asset list into dated
//! sections for the grid, and collects the recent assets shown as stories.
//!
//! The partitioner is a plain grouping pass: assets keep their input order
//! inside a group, groups follow the (descending) input order of the list,
//! and no deduplication or merging happens. One layout is produced per
//! grouping granularity so the pinch transition can cross-fade between a
//! day-sectioned and a month-sectioned grid without re-partitioning.

use crate::config::STORY_RECENCY_DAYS;
use crate::library::Asset;
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate};

/// Grouping granularity for grid section headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Day,
    Month,
}

impl Granularity {
    /// Bucket key for an asset under this granularity.
    fn bucket(self, taken_at: &DateTime<Local>) -> (i32, u32, u32) {
        match self {
            Granularity::Day => (taken_at.year(), taken_at.month(), taken_at.day()),
            Granularity::Month => (taken_at.year(), taken_at.month(), 0),
        }
    }

    /// Human-readable section label for an asset's bucket.
    #[must_use]
    pub fn label(self, taken_at: &DateTime<Local>) -> String {
        match self {
            Granularity::Day => taken_at.format("%-d %B %Y").to_string(),
            Granularity::Month => taken_at.format("%B %Y").to_string(),
        }
    }
}

/// One entry of a sectioned layout: a header marker or an asset reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutEntry {
    /// Section header with its display label.
    Header(String),
    /// Index of the asset in the timeline's asset list.
    Media(usize),
}

/// A header-interleaved layout for one granularity.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub granularity: Granularity,
    pub entries: Vec<LayoutEntry>,
    /// Positions of the header entries within `entries`.
    pub header_indexes: Vec<usize>,
}

/// One story: a day's worth of recent assets.
#[derive(Debug, Clone, PartialEq)]
pub struct Story {
    /// Display label (the day's section label).
    pub label: String,
    /// The story's day, used for ordering and cover lookup.
    pub date: NaiveDate,
    /// Indices into the timeline's asset list, in input order.
    pub asset_indices: Vec<usize>,
}

/// The partitioned library: the asset list plus one layout per granularity
/// and the story subsequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Timeline {
    pub assets: Vec<Asset>,
    pub layouts: Vec<Layout>,
    pub stories: Vec<Story>,
}

impl Timeline {
    /// Partitions `assets` (expected newest first) under each granularity
    /// and collects stories from the last [`STORY_RECENCY_DAYS`] days.
    #[must_use]
    pub fn build(assets: Vec<Asset>, granularities: &[Granularity], now: DateTime<Local>) -> Self {
        let layouts = granularities
            .iter()
            .map(|&granularity| partition(&assets, granularity))
            .collect();
        let stories = collect_stories(&assets, now);

        Self {
            assets,
            layouts,
            stories,
        }
    }

    /// Returns the layout built for `granularity`, if one was requested.
    #[must_use]
    pub fn layout(&self, granularity: Granularity) -> Option<&Layout> {
        self.layouts.iter().find(|l| l.granularity == granularity)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// Groups consecutive assets sharing a bucket and interleaves one header
/// per group. With a newest-first input this yields groups in descending
/// recency; within a group the input order is untouched.
fn partition(assets: &[Asset], granularity: Granularity) -> Layout {
    let mut entries = Vec::with_capacity(assets.len());
    let mut header_indexes = Vec::new();
    let mut current_bucket = None;

    for (index, asset) in assets.iter().enumerate() {
        let bucket = granularity.bucket(&asset.taken_at);
        if current_bucket != Some(bucket) {
            current_bucket = Some(bucket);
            header_indexes.push(entries.len());
            entries.push(LayoutEntry::Header(granularity.label(&asset.taken_at)));
        }
        entries.push(LayoutEntry::Media(index));
    }

    Layout {
        granularity,
        entries,
        header_indexes,
    }
}

/// Collects assets captured within the story window into one story per
/// day, newest day first.
fn collect_stories(assets: &[Asset], now: DateTime<Local>) -> Vec<Story> {
    let cutoff = now - Duration::days(STORY_RECENCY_DAYS);
    let mut stories: Vec<Story> = Vec::new();

    for (index, asset) in assets.iter().enumerate() {
        if asset.taken_at < cutoff || asset.taken_at > now {
            continue;
        }

        let date = asset.taken_at.date_naive();
        match stories.last_mut() {
            Some(story) if story.date == date => story.asset_indices.push(index),
            _ => stories.push(Story {
                label: Granularity::Day.label(&asset.taken_at),
                date,
                asset_indices: vec![index],
            }),
        }
    }

    stories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::scanner::sort_newest_first;
    use crate::media::MediaType;
    use chrono::TimeZone;
    use std::path::PathBuf;

    fn asset(name: &str, y: i32, m: u32, d: u32, h: u32) -> Asset {
        Asset {
            path: PathBuf::from(format!("/photos/{name}")),
            kind: MediaType::Image,
            taken_at: Local.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap(),
        }
    }

    fn sample_assets() -> Vec<Asset> {
        let mut assets = vec![
            asset("d1.jpg", 2024, 6, 2, 9),
            asset("d2.jpg", 2024, 6, 2, 8),
            asset("c.jpg", 2024, 6, 1, 12),
            asset("b.jpg", 2024, 5, 20, 10),
            asset("a.jpg", 2024, 5, 19, 10),
        ];
        sort_newest_first(&mut assets);
        assets
    }

    #[test]
    fn day_layout_interleaves_one_header_per_day() {
        let timeline = Timeline::build(
            sample_assets(),
            &[Granularity::Day],
            Local.with_ymd_and_hms(2024, 6, 2, 23, 0, 0).unwrap(),
        );
        let layout = timeline.layout(Granularity::Day).expect("day layout");

        let headers = layout
            .entries
            .iter()
            .filter(|e| matches!(e, LayoutEntry::Header(_)))
            .count();
        assert_eq!(headers, 4); // 2 June, 1 June, 20 May, 19 May
        assert_eq!(layout.header_indexes, vec![0, 3, 5, 7]);
        assert!(matches!(&layout.entries[0], LayoutEntry::Header(label) if label == "2 June 2024"));
    }

    #[test]
    fn month_layout_groups_whole_months() {
        let timeline = Timeline::build(
            sample_assets(),
            &[Granularity::Month],
            Local.with_ymd_and_hms(2024, 6, 2, 23, 0, 0).unwrap(),
        );
        let layout = timeline.layout(Granularity::Month).expect("month layout");

        assert_eq!(layout.header_indexes, vec![0, 4]);
        assert!(matches!(&layout.entries[0], LayoutEntry::Header(label) if label == "June 2024"));
        assert!(matches!(&layout.entries[4], LayoutEntry::Header(label) if label == "May 2024"));
    }

    #[test]
    fn media_entries_keep_input_order_within_groups() {
        let timeline = Timeline::build(
            sample_assets(),
            &[Granularity::Day],
            Local.with_ymd_and_hms(2024, 6, 2, 23, 0, 0).unwrap(),
        );
        let layout = timeline.layout(Granularity::Day).expect("day layout");

        let media: Vec<usize> = layout
            .entries
            .iter()
            .filter_map(|e| match e {
                LayoutEntry::Media(i) => Some(*i),
                LayoutEntry::Header(_) => None,
            })
            .collect();
        assert_eq!(media, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn stories_cover_only_the_recent_window() {
        let now = Local.with_ymd_and_hms(2024, 6, 2, 23, 0, 0).unwrap();
        let timeline = Timeline::build(sample_assets(), &[Granularity::Day], now);

        // 20 May and 19 May are outside the 7-day window.
        assert_eq!(timeline.stories.len(), 2);
        assert_eq!(timeline.stories[0].label, "2 June 2024");
        assert_eq!(timeline.stories[0].asset_indices, vec![0, 1]);
        assert_eq!(timeline.stories[1].asset_indices, vec![2]);
    }

    #[test]
    fn stories_are_grouped_per_day_newest_first() {
        let now = Local.with_ymd_and_hms(2024, 6, 2, 23, 0, 0).unwrap();
        let timeline = Timeline::build(sample_assets(), &[], now);

        let dates: Vec<NaiveDate> = timeline.stories.iter().map(|s| s.date).collect();
        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);
    }

    #[test]
    fn empty_library_builds_empty_timeline() {
        let timeline = Timeline::build(Vec::new(), &[Granularity::Day], Local::now());
        assert!(timeline.is_empty());
        assert!(timeline.stories.is_empty());
        let layout = timeline.layout(Granularity::Day).expect("day layout");
        assert!(layout.entries.is_empty());
        assert!(layout.header_indexes.is_empty());
    }
}
