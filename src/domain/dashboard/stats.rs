//! Dashboard statistics computed from session overview rows.
//!
//! All functions here are pure; the reader port supplies the rows and the
//! application handlers pass in the reference time, so week boundaries are
//! deterministic under test.

use crate::domain::foundation::{LocationId, Sentiment, SessionId, SessionStatus, Timestamp};
use serde::{Deserialize, Serialize};

/// Compact summary data carried on an overview row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryBrief {
    pub sentiment: Sentiment,
    pub score: Option<f64>,
}

/// One session as seen by the dashboard: session fields joined with its
/// location name and summary, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOverview {
    pub session_id: SessionId,
    pub location_id: LocationId,
    pub location_name: String,
    pub customer_name: Option<String>,
    pub status: SessionStatus,
    pub created_at: Timestamp,
    pub summary: Option<SummaryBrief>,
}

/// Sentiment counts across a business's sessions. `pending` counts
/// sessions that have no summary yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SentimentBreakdown {
    pub positive: u32,
    pub neutral: u32,
    pub negative: u32,
    pub pending: u32,
}

/// Aggregate statistics for a business's dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessStats {
    pub total_sessions: u32,
    pub active_sessions: u32,
    pub summarized_sessions: u32,
    pub avg_score: Option<f64>,
    pub sentiment_breakdown: SentimentBreakdown,
    pub this_week_sessions: u32,
    pub last_week_sessions: u32,
}

/// Computes dashboard statistics from overview rows.
pub fn business_stats(rows: &[SessionOverview], now: Timestamp) -> BusinessStats {
    let start_of_this_week = now.start_of_week();
    let start_of_last_week = start_of_this_week.minus_days(7);

    let mut breakdown = SentimentBreakdown::default();
    let mut score_sum = 0.0;
    let mut score_count = 0u32;
    let mut active = 0u32;
    let mut summarized = 0u32;
    let mut this_week = 0u32;
    let mut last_week = 0u32;

    for row in rows {
        if row.status == SessionStatus::Active {
            active += 1;
        }

        match &row.summary {
            Some(brief) => {
                summarized += 1;
                match brief.sentiment {
                    Sentiment::Positive => breakdown.positive += 1,
                    Sentiment::Neutral => breakdown.neutral += 1,
                    Sentiment::Negative => breakdown.negative += 1,
                }
                if let Some(score) = brief.score {
                    score_sum += score;
                    score_count += 1;
                }
            }
            None => breakdown.pending += 1,
        }

        if !row.created_at.is_before(&start_of_this_week) {
            this_week += 1;
        } else if !row.created_at.is_before(&start_of_last_week) {
            last_week += 1;
        }
    }

    BusinessStats {
        total_sessions: rows.len() as u32,
        active_sessions: active,
        summarized_sessions: summarized,
        avg_score: (score_count > 0).then(|| score_sum / score_count as f64),
        sentiment_breakdown: breakdown,
        this_week_sessions: this_week,
        last_week_sessions: last_week,
    }
}

/// One day's sentiment counts in the trend chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentTrendPoint {
    /// ISO `YYYY-MM-DD` date key.
    pub date: String,
    pub positive: u32,
    pub neutral: u32,
    pub negative: u32,
}

/// Buckets summarized sessions per calendar day over the trailing window.
///
/// Every day in the window is present, zero-filled. Sessions without a
/// summary count as neutral, matching the dashboard chart's behavior.
pub fn sentiment_trend(
    rows: &[SessionOverview],
    days: u32,
    now: Timestamp,
) -> Vec<SentimentTrendPoint> {
    let window_start = now.minus_days(days as i64).start_of_day();

    let mut points: Vec<SentimentTrendPoint> = (0..=days)
        .map(|offset| SentimentTrendPoint {
            date: window_start.plus_days(offset as i64).date_key(),
            positive: 0,
            neutral: 0,
            negative: 0,
        })
        .collect();

    for row in rows {
        if row.created_at.is_before(&window_start) {
            continue;
        }
        let key = row.created_at.date_key();
        if let Some(point) = points.iter_mut().find(|p| p.date == key) {
            match row.summary.map(|b| b.sentiment) {
                Some(Sentiment::Positive) => point.positive += 1,
                Some(Sentiment::Negative) => point.negative += 1,
                _ => point.neutral += 1,
            }
        }
    }

    points
}

/// Sentiment filter for the session list; `Pending` selects sessions
/// without a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SentimentFilter {
    Positive,
    Neutral,
    Negative,
    Pending,
}

impl SentimentFilter {
    fn matches(&self, row: &SessionOverview) -> bool {
        match (self, &row.summary) {
            (SentimentFilter::Pending, None) => true,
            (SentimentFilter::Positive, Some(b)) => b.sentiment == Sentiment::Positive,
            (SentimentFilter::Neutral, Some(b)) => b.sentiment == Sentiment::Neutral,
            (SentimentFilter::Negative, Some(b)) => b.sentiment == Sentiment::Negative,
            _ => false,
        }
    }
}

/// A page of filtered session overviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionPage {
    pub sessions: Vec<SessionOverview>,
    pub total: u32,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

/// Applies an optional sentiment filter, then paginates. `page` is
/// 1-based; out-of-range pages yield an empty list with correct totals.
pub fn filter_and_paginate(
    rows: Vec<SessionOverview>,
    sentiment: Option<SentimentFilter>,
    page: u32,
    page_size: u32,
) -> SessionPage {
    let filtered: Vec<SessionOverview> = match sentiment {
        Some(filter) => rows.into_iter().filter(|r| filter.matches(r)).collect(),
        None => rows,
    };

    let total = filtered.len() as u32;
    let page_size = page_size.max(1);
    let page = page.max(1);
    let total_pages = total.div_ceil(page_size);
    // Offset in u64: page * page_size can exceed u32.
    let start = ((page - 1) as u64 * page_size as u64).min(filtered.len() as u64) as usize;

    let sessions = filtered
        .into_iter()
        .skip(start)
        .take(page_size as usize)
        .collect();

    SessionPage {
        sessions,
        total,
        page,
        page_size,
        total_pages,
    }
}
