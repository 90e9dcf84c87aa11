//! QuoteMetricsHandler - Acceptance rate and revenue for an operator or the platform.

use super::list_quotes::own_operator_profile;
use super::support::{gate, QuoteAccess};
use crate::domain::access::{Action, Resource};
use crate::domain::foundation::{OperatorProfileId, Principal};
use crate::domain::quote::{QuoteError, QuoteMetrics};
use crate::ports::MetricsScope;

/// Query for derived quote metrics.
///
/// Without `operator_id`, admins get platform-wide figures and operators
/// get their own. With it, only admins and the owning operator may ask.
#[derive(Debug, Clone)]
pub struct QuoteMetricsQuery {
    pub principal: Principal,
    pub operator_id: Option<OperatorProfileId>,
}

pub struct QuoteMetricsHandler {
    access: QuoteAccess,
}

impl QuoteMetricsHandler {
    pub fn new(access: QuoteAccess) -> Self {
        Self { access }
    }

    pub async fn handle(&self, query: QuoteMetricsQuery) -> Result<QuoteMetrics, QuoteError> {
        let scope = self.scope(&query).await?;
        self.access.expire_lapsed().await?;
        let summary = self.access.quotes().summary(scope).await?;
        Ok(QuoteMetrics::new(summary.counts, summary.paid_revenue))
    }

    async fn scope(&self, query: &QuoteMetricsQuery) -> Result<MetricsScope, QuoteError> {
        match query.operator_id {
            None if query.principal.is_admin() => Ok(MetricsScope::Platform),
            None => {
                let profile = own_operator_profile(&self.access, &query.principal).await?;
                Ok(MetricsScope::Operator(profile.id))
            }
            Some(id) => {
                let profile = self.access.operators().find_by_id(&id).await?;
                match profile {
                    Some(profile) => {
                        gate(&query.principal, Resource::OperatorProfile(&profile), Action::Read)?;
                        Ok(MetricsScope::Operator(profile.id))
                    }
                    None => {
                        gate(&query.principal, Resource::PlatformAdministration, Action::Read)?;
                        Err(QuoteError::validation("operator_id", "unknown operator profile"))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::quote::{
        AcceptQuoteCommand, AcceptQuoteHandler, MarkPaidCommand, MarkPaidHandler,
    };
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::access::DenialReason;
    use crate::domain::foundation::QuoteRequestId;
    use crate::domain::quote::QuoteStatus;

    async fn paid(f: &Fixture, price: i64) -> QuoteRequestId {
        let quote = f.quoted_quote(price).await;
        AcceptQuoteHandler::new(f.access())
            .handle(AcceptQuoteCommand {
                principal: f.customer.clone(),
                quote_id: quote.id,
            })
            .await
            .unwrap();
        MarkPaidHandler::new(f.access())
            .handle(MarkPaidCommand {
                quote_id: quote.id,
                payment_reference: None,
                requested_by: None,
            })
            .await
            .unwrap();
        quote.id
    }

    #[tokio::test]
    async fn empty_scope_has_zero_rate() {
        let f = Fixture::new().await;
        let metrics = QuoteMetricsHandler::new(f.access())
            .handle(QuoteMetricsQuery {
                principal: f.operator.clone(),
                operator_id: None,
            })
            .await
            .unwrap();
        assert_eq!(metrics.acceptance_rate, 0);
        assert_eq!(metrics.total_revenue, 0);
    }

    #[tokio::test]
    async fn operator_metrics_count_won_offers_and_revenue() {
        let f = Fixture::new().await;
        paid(&f, 150_000).await;
        paid(&f, 50_000).await;
        f.quoted_quote(70_000).await;
        f.pending_quote().await;

        let metrics = QuoteMetricsHandler::new(f.access())
            .handle(QuoteMetricsQuery {
                principal: f.operator.clone(),
                operator_id: None,
            })
            .await
            .unwrap();

        assert_eq!(metrics.counts.get(QuoteStatus::Paid), 2);
        assert_eq!(metrics.total, 4);
        // 2 won out of 3 offered
        assert_eq!(metrics.acceptance_rate, 67);
        assert_eq!(metrics.total_revenue, 200_000);
    }

    #[tokio::test]
    async fn lapsed_offers_leave_the_quoted_count() {
        let f = Fixture::new().await;
        paid(&f, 10_000).await;
        let stale = f.stale_quote(30).await;

        let metrics = QuoteMetricsHandler::new(f.access())
            .handle(QuoteMetricsQuery {
                principal: f.admin.clone(),
                operator_id: None,
            })
            .await
            .unwrap();

        assert_eq!(metrics.counts.get(QuoteStatus::Quoted), 0);
        assert_eq!(metrics.counts.get(QuoteStatus::Expired), 1);
        assert_eq!(metrics.acceptance_rate, 100);
        assert_eq!(f.stored(&stale.id).await.status, QuoteStatus::Expired);
    }

    #[tokio::test]
    async fn admin_gets_platform_scope() {
        let f = Fixture::new().await;
        paid(&f, 10_000).await;

        let metrics = QuoteMetricsHandler::new(f.access())
            .handle(QuoteMetricsQuery {
                principal: f.admin.clone(),
                operator_id: None,
            })
            .await
            .unwrap();

        assert_eq!(metrics.total, 1);
        assert_eq!(metrics.acceptance_rate, 100);
    }

    #[tokio::test]
    async fn customer_cannot_read_operator_metrics() {
        let f = Fixture::new().await;
        let err = QuoteMetricsHandler::new(f.access())
            .handle(QuoteMetricsQuery {
                principal: f.customer.clone(),
                operator_id: Some(f.profile.id),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, QuoteError::Denied(d) if d.reason == DenialReason::OperatorRoleRequired));
    }
}
