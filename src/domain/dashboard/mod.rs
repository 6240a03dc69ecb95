//! Dashboard read-model computations.

mod stats;

pub use stats::{
    business_stats, filter_and_paginate, sentiment_trend, BusinessStats, SentimentBreakdown,
    SentimentFilter, SentimentTrendPoint, SessionOverview, SessionPage, SummaryBrief,
};
