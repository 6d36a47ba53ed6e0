use async_trait::async_trait;
use aws_sdk_dynamodb::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use std::collections::HashMap;
use tracing::debug;

use crate::config::{AwsConfig, StaticCredentials};
use crate::error::VendError;
use crate::store::DrinkStore;
use crate::types::Drink;

const CREDENTIALS_PROVIDER: &str = "drink-vend";

/// Drink records held in a DynamoDB table
#[derive(Debug, Clone)]
pub struct DynamoDrinkStore {
    client: Client,
}

impl DynamoDrinkStore {
    pub fn new(aws: &AwsConfig, credentials: &StaticCredentials) -> Self {
        let mut builder = aws_sdk_dynamodb::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(aws.region.clone()))
            .credentials_provider(Credentials::new(
                credentials.access_key_id.clone(),
                credentials.secret_access_key.clone(),
                None,
                None,
                CREDENTIALS_PROVIDER,
            ));
        if let Some(endpoint) = &aws.endpoint_url {
            builder = builder.endpoint_url(endpoint.clone());
        }

        Self {
            client: Client::from_conf(builder.build()),
        }
    }
}

#[async_trait]
impl DrinkStore for DynamoDrinkStore {
    async fn scan(&self, table: &str) -> Result<Vec<Drink>, VendError> {
        let mut items = self
            .client
            .scan()
            .table_name(table)
            .into_paginator()
            .items()
            .send();

        let mut drinks = Vec::new();
        while let Some(item) = items.try_next().await.map_err(aws_sdk_dynamodb::Error::from)? {
            drinks.push(drink_from_item(&item)?);
        }

        debug!(table, count = drinks.len(), "Scanned drinks table");
        Ok(drinks)
    }
}

/// Convert one scanned item into a `Drink`.
pub fn drink_from_item(item: &HashMap<String, AttributeValue>) -> Result<Drink, VendError> {
    let malformed = |attribute: &str| VendError::MalformedRecord {
        attribute: attribute.to_string(),
    };

    let name = item
        .get("name")
        .and_then(|v| v.as_s().ok())
        .ok_or_else(|| malformed("name"))?;
    let cost = item
        .get("cost")
        .and_then(|v| v.as_n().ok())
        .and_then(|n| n.parse::<f64>().ok())
        .filter(|c| c.is_finite() && *c >= 0.0)
        .ok_or_else(|| malformed("cost"))?;
    let alcoholic = item
        .get("alcoholic")
        .and_then(|v| v.as_bool().ok())
        .ok_or_else(|| malformed("alcoholic"))?;

    Ok(Drink {
        name: name.clone(),
        cost,
        alcoholic: *alcoholic,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, cost: &str, alcoholic: bool) -> HashMap<String, AttributeValue> {
        HashMap::from([
            ("name".to_string(), AttributeValue::S(name.to_string())),
            ("cost".to_string(), AttributeValue::N(cost.to_string())),
            ("alcoholic".to_string(), AttributeValue::Bool(alcoholic)),
        ])
    }

    #[test]
    fn test_drink_from_item() {
        let drink = drink_from_item(&item("Southern Comfort & Lemonade", "3.7", true)).unwrap();
        assert_eq!(
            drink,
            Drink {
                name: "Southern Comfort & Lemonade".to_string(),
                cost: 3.7,
                alcoholic: true,
            }
        );
    }

    #[test]
    fn test_missing_attribute_is_reported_by_name() {
        let mut record = item("Diet Lemonade", "2.1", false);
        record.remove("alcoholic");

        match drink_from_item(&record) {
            Err(VendError::MalformedRecord { attribute }) => assert_eq!(attribute, "alcoholic"),
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_mistyped_cost_is_rejected() {
        let mut record = item("Apple Juice", "1.8", false);
        record.insert("cost".to_string(), AttributeValue::S("1.80".to_string()));
        assert!(matches!(
            drink_from_item(&record),
            Err(VendError::MalformedRecord { attribute }) if attribute == "cost"
        ));

        assert!(drink_from_item(&item("Apple Juice", "-1", false)).is_err());
    }
}
