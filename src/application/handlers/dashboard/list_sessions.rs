//! ListSessions query handler: filtered, paginated session list.

use std::sync::Arc;

use crate::domain::dashboard::{filter_and_paginate, SentimentFilter, SessionPage};
use crate::domain::foundation::{BusinessId, UserId};
use crate::ports::{AccessChecker, SessionReader};

use super::DashboardError;

/// Default page size for the session list.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Query for a business's session list.
#[derive(Debug, Clone)]
pub struct ListSessionsQuery {
    pub user_id: UserId,
    pub business_id: BusinessId,
    pub sentiment: Option<SentimentFilter>,
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
}

/// Handler for ListSessions queries.
pub struct ListSessionsHandler<C, R>
where
    C: AccessChecker,
    R: SessionReader,
{
    access: Arc<C>,
    reader: Arc<R>,
}

impl<C, R> ListSessionsHandler<C, R>
where
    C: AccessChecker,
    R: SessionReader,
{
    /// Creates a new handler with the given dependencies.
    pub fn new(access: Arc<C>, reader: Arc<R>) -> Self {
        Self { access, reader }
    }

    /// Handles a session list query.
    pub async fn handle(&self, query: ListSessionsQuery) -> Result<SessionPage, DashboardError> {
        self.access
            .check_business_access(&query.user_id, &query.business_id)
            .await?;

        let rows = self.reader.list_for_business(&query.business_id).await?;
        Ok(filter_and_paginate(
            rows,
            query.sentiment,
            query.page,
            query.page_size,
        ))
    }
}
