use pricewatch_core::model::Price;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::app::model::subscription::{self, Channel};
use crate::app::state::AppState;

/// A price movement that may trigger subscriptions.
#[derive(Debug, Clone)]
pub struct PriceDrop {
    pub product_id: i32,
    pub name: String,
    pub old_price: Price,
    pub new_price: Price,
}

/// A subscription fires when the price crosses down through its target:
/// the old price sat above the target and the new one is at or below it.
pub fn triggered(target_price: f64, old: &Price, new: &Price) -> bool {
    old.amount > target_price && new.at_or_below(target_price)
}

/// Fan a batch of price drops out to the matching subscriptions.
///
/// Delivery problems are logged per subscription; a failed delivery
/// never fails the refresh pass that detected the drop.
pub async fn dispatch_price_drops(state: &AppState, drops: &[PriceDrop]) {
    for drop in drops {
        let subscriptions = match subscription::Entity::find()
            .filter(subscription::Column::ProductId.eq(drop.product_id))
            .all(&state.db)
            .await
        {
            Ok(subscriptions) => subscriptions,
            Err(err) => {
                tracing::error!(
                    "failed to load subscriptions for product {}: {err}",
                    drop.product_id
                );
                continue;
            }
        };

        for sub in subscriptions {
            if !triggered(sub.target_price, &drop.old_price, &drop.new_price) {
                continue;
            }

            if let Err(err) = deliver(state, &sub, drop).await {
                tracing::error!(subscription = sub.id, "price alert delivery failed: {err:#}");
            }
        }
    }
}

async fn deliver(
    state: &AppState,
    sub: &subscription::Model,
    drop: &PriceDrop,
) -> anyhow::Result<()> {
    let text = format!(
        "Price drop: {} is now {} (was {})",
        drop.name, drop.new_price, drop.old_price
    );

    match sub.channel {
        Channel::Email => {
            let Some(mailer) = &state.mailer else {
                anyhow::bail!("e-mail delivery is not configured");
            };
            mailer.send(&sub.recipient, "Price drop alert", text).await
        }
        Channel::Telegram => {
            let Some(telegram) = &state.telegram else {
                anyhow::bail!("telegram delivery is not configured");
            };
            telegram.send_message(&sub.recipient, &text).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_when_the_price_crosses_the_target() {
        let old = Price::new(120.0, "USD");
        let new = Price::new(95.0, "USD");

        assert!(triggered(100.0, &old, &new));
    }

    #[test]
    fn fires_on_an_exact_hit() {
        let old = Price::new(101.0, "USD");
        let new = Price::new(100.0, "USD");

        assert!(triggered(100.0, &old, &new));
    }

    #[test]
    fn stays_quiet_when_already_below_the_target() {
        let old = Price::new(95.0, "USD");
        let new = Price::new(90.0, "USD");

        assert!(!triggered(100.0, &old, &new));
    }

    #[test]
    fn stays_quiet_above_the_target() {
        let old = Price::new(150.0, "USD");
        let new = Price::new(120.0, "USD");

        assert!(!triggered(100.0, &old, &new));
    }
}
