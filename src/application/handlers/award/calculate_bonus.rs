//! CalculateBonusHandler - Query handler for the purchase bonus plan.

use std::sync::Arc;

use crate::domain::award::{calculate_purchase_bonus, AwardError, BonusCalculation};
use crate::domain::foundation::{Cents, UserId};
use crate::ports::AwardRepository;

/// Query for how much bonus a purchase can draw and from which awards.
#[derive(Debug, Clone)]
pub struct CalculateBonusQuery {
    pub user_id: UserId,
    pub price: Cents,
}

/// The deterministic bonus plan for the purchase.
#[derive(Debug, Clone)]
pub struct CalculateBonusResult {
    pub plan: BonusCalculation,
}

/// Handler computing the bonus plan for a purchase.
///
/// Pure over the current ledger state: the same awards and price always
/// produce the same plan, so the draws can later be refunded in reverse.
pub struct CalculateBonusHandler {
    awards: Arc<dyn AwardRepository>,
}

impl CalculateBonusHandler {
    pub fn new(awards: Arc<dyn AwardRepository>) -> Self {
        Self { awards }
    }

    pub async fn handle(&self, query: CalculateBonusQuery) -> Result<CalculateBonusResult, AwardError> {
        let awards = self.awards.find_by_user(&query.user_id).await?;
        Ok(CalculateBonusResult {
            plan: calculate_purchase_bonus(&awards, query.price),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::award::testing::seeded;
    use crate::domain::award::{AwardRecord, AwardTemplate, ATTENDANCE_AWARD_NAME};
    use crate::domain::foundation::{AwardId, TemplateId, Timestamp};

    fn user() -> UserId {
        UserId::new("test-user-123").unwrap()
    }

    fn award_at(name: &str, value: i64, days_ago: i64) -> AwardRecord {
        let template = AwardTemplate::new(TemplateId::new(), name, Cents::new(value));
        AwardRecord::grant(
            AwardId::new(),
            user(),
            &template,
            None,
            Timestamp::now().minus_days(days_ago),
        )
    }

    #[tokio::test]
    async fn plans_oldest_award_first() {
        let older = award_at("Premio Benvenuto", 300, 30);
        let newer = award_at("Premio Abbonamento Stagionale", 1000, 5);
        let older_id = older.id;
        let (repo, _) = seeded(vec![newer, older]);
        let handler = CalculateBonusHandler::new(repo);

        let result = handler
            .handle(CalculateBonusQuery {
                user_id: user(),
                price: Cents::new(500),
            })
            .await
            .unwrap();

        assert_eq!(result.plan.applied, Cents::new(500));
        assert_eq!(result.plan.draws[0].award_id, older_id);
    }

    #[tokio::test]
    async fn attendance_award_is_excluded() {
        let awards = vec![award_at(ATTENDANCE_AWARD_NAME, 2000, 10)];
        let (repo, _) = seeded(awards);
        let handler = CalculateBonusHandler::new(repo);

        let result = handler
            .handle(CalculateBonusQuery {
                user_id: user(),
                price: Cents::new(1000),
            })
            .await
            .unwrap();

        assert!(result.plan.is_empty());
    }

    #[tokio::test]
    async fn empty_wallet_yields_empty_plan() {
        let (repo, _) = seeded(vec![]);
        let handler = CalculateBonusHandler::new(repo);

        let result = handler
            .handle(CalculateBonusQuery {
                user_id: user(),
                price: Cents::new(3000),
            })
            .await
            .unwrap();

        assert!(result.plan.is_empty());
        assert_eq!(result.plan.applied, Cents::ZERO);
    }
}
