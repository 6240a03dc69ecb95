//! GetStats query handler: aggregate dashboard numbers for a business.

use std::sync::Arc;

use crate::domain::dashboard::{
    business_stats, sentiment_trend, BusinessStats, SentimentTrendPoint,
};
use crate::domain::foundation::{BusinessId, Timestamp, UserId};
use crate::ports::{AccessChecker, SessionReader};

use super::DashboardError;

/// Query for a business's dashboard statistics.
#[derive(Debug, Clone)]
pub struct GetStatsQuery {
    pub user_id: UserId,
    pub business_id: BusinessId,
    /// Trailing window for the sentiment trend, in days.
    pub trend_days: u32,
}

/// Statistics plus the per-day sentiment trend.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub stats: BusinessStats,
    pub trend: Vec<SentimentTrendPoint>,
}

/// Handler for GetStats queries.
pub struct GetStatsHandler<C, R>
where
    C: AccessChecker,
    R: SessionReader,
{
    access: Arc<C>,
    reader: Arc<R>,
}

impl<C, R> GetStatsHandler<C, R>
where
    C: AccessChecker,
    R: SessionReader,
{
    /// Creates a new handler with the given dependencies.
    pub fn new(access: Arc<C>, reader: Arc<R>) -> Self {
        Self { access, reader }
    }

    /// Handles a stats query.
    pub async fn handle(&self, query: GetStatsQuery) -> Result<DashboardView, DashboardError> {
        self.access
            .check_business_access(&query.user_id, &query.business_id)
            .await?;

        let rows = self.reader.list_for_business(&query.business_id).await?;
        let now = Timestamp::now();

        Ok(DashboardView {
            stats: business_stats(&rows, now),
            trend: sentiment_trend(&rows, query.trend_days, now),
        })
    }
}
