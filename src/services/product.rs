use anyhow::{Context, Result};
use chrono::Utc;
use pricewatch_core::model::Price;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::Deserialize;

use crate::app::model::product;
use crate::app::state::AppState;
use crate::services::notify::{self, PriceDrop};

/// One product row as served by the upstream catalog API.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamProduct {
    pub id: String,
    pub name: String,
    pub url: String,
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Pull the current catalog snapshot from the upstream API.
pub async fn fetch_products(
    client: &reqwest::Client,
    api_url: &str,
) -> Result<Vec<UpstreamProduct>> {
    let response = client
        .get(api_url)
        .send()
        .await
        .with_context(|| format!("product API request to {api_url} failed"))?
        .error_for_status()
        .context("product API returned an error status")?;

    let products = response
        .json::<Vec<UpstreamProduct>>()
        .await
        .context("product API returned an unexpected payload")?;

    Ok(products)
}

/// Fetch the upstream catalog and reconcile it into the database.
///
/// Returns the number of upstream products processed. Price drops are
/// handed to the notifier; a delivery failure never fails the pass.
pub async fn fetch_and_update_products(state: &AppState) -> Result<usize> {
    let upstream = fetch_products(&state.http, &state.config.product_api_url).await?;

    let mut drops = Vec::new();

    for item in &upstream {
        if let Some(drop) = upsert_product(&state.db, item).await? {
            drops.push(drop);
        }
    }

    if !drops.is_empty() {
        tracing::info!(count = drops.len(), "price drops detected");
        notify::dispatch_price_drops(state, &drops).await;
    }

    Ok(upstream.len())
}

async fn upsert_product(
    db: &DatabaseConnection,
    item: &UpstreamProduct,
) -> Result<Option<PriceDrop>> {
    let now = Utc::now();
    let price = Price::new(item.price, item.currency.clone());

    let existing = product::Entity::find()
        .filter(product::Column::ExternalId.eq(item.id.clone()))
        .one(db)
        .await?;

    let Some(current) = existing else {
        product::ActiveModel {
            external_id: Set(item.id.clone()),
            name: Set(item.name.clone()),
            url: Set(item.url.clone()),
            price: Set(price),
            last_checked_at: Set(now),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;

        return Ok(None);
    };

    let old_price = current.price.clone();
    let product_id = current.id;
    let name = current.name.clone();

    let mut active: product::ActiveModel = current.into();
    active.name = Set(item.name.clone());
    active.url = Set(item.url.clone());
    active.price = Set(price.clone());
    active.last_checked_at = Set(now);
    active.update(db).await?;

    if price.amount < old_price.amount {
        return Ok(Some(PriceDrop {
            product_id,
            name,
            old_price,
            new_price: price,
        }));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn parses_the_upstream_catalog() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/products");
                then.status(200).json_body(serde_json::json!([
                    {
                        "id": "p-1",
                        "name": "Mechanical Keyboard",
                        "url": "https://shop.example/p-1",
                        "price": 129.99,
                        "currency": "EUR"
                    },
                    {
                        "id": "p-2",
                        "name": "Laptop Stand",
                        "url": "https://shop.example/p-2",
                        "price": 39.5
                    }
                ]));
            })
            .await;

        let client = reqwest::Client::new();
        let products = fetch_products(&client, &server.url("/products")).await.unwrap();

        mock.assert_async().await;
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, "p-1");
        assert_eq!(products[0].currency, "EUR");
        // currency falls back when the upstream omits it
        assert_eq!(products[1].currency, "USD");
    }

    #[tokio::test]
    async fn upstream_errors_are_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/products");
                then.status(503);
            })
            .await;

        let client = reqwest::Client::new();

        assert!(fetch_products(&client, &server.url("/products")).await.is_err());
    }
}
