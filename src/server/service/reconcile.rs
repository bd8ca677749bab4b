//! Recomputes denormalized counters from the rows they summarize.
//!
//! Counter writes already run in the same transaction as the change they count; this pass
//! repairs drift from edits made outside the API.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        alliance::{post::AlliancePostRepository, AllianceRepository},
        community::{post::CommunityPostRepository, CommunityRepository},
    },
    error::Error,
    service::retry::RetryContext,
};

pub struct ReconcileService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReconcileService<'a> {
    /// Creates a new instance of [`ReconcileService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Corrects every drifted counter in one transaction
    ///
    /// Each table is recounted by a single `UPDATE` with correlated subqueries.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows whose counters were corrected
    /// - `Err(Error::DbErr)` - Database operation failed after retries
    pub async fn reconcile_counters(&self) -> Result<u64, Error> {
        let db = self.db.clone();

        let corrected = RetryContext::new()
            .execute_with_retry("reconcile counters", || {
                let db = db.clone();

                Box::pin(async move {
                    let txn = db.begin().await?;

                    let communities = CommunityRepository::new(&txn).recount().await?;
                    let alliances = AllianceRepository::new(&txn).recount().await?;
                    let community_posts = CommunityPostRepository::new(&txn).recount().await?;
                    let alliance_posts = AlliancePostRepository::new(&txn).recount().await?;

                    txn.commit().await?;

                    if communities + alliances + community_posts + alliance_posts > 0 {
                        tracing::warn!(
                            communities,
                            alliances,
                            community_posts,
                            alliance_posts,
                            "Corrected drifted counters"
                        );
                    }

                    Ok(communities + alliances + community_posts + alliance_posts)
                })
            })
            .await?;

        tracing::info!(corrected, "Reconciled counters");

        Ok(corrected)
    }
}
