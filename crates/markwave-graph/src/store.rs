//! `ReferralStore` implementation backed by Neo4j.
//!
//! Every mutation is a single Cypher statement so atomicity comes from the
//! store's native merge / conditional-match semantics, never from a
//! read-then-write sequence in this code.

use anyhow::anyhow;
use async_trait::async_trait;
use neo4rs::{Query, Row};

use markwave_core::error::MarkwaveResult;
use markwave_core::purchase::model::{NewPurchase, Purchase};
use markwave_core::store::ReferralStore;
use markwave_core::user::model::{DeviceInfo, ReferralType, User};

use crate::GraphClient;

const USER_FIELDS: &str = "u.mobile AS mobile, u.name AS name, \
     u.referral_type AS referral_type, COALESCE(u.verified, false) AS verified";

/// Gateway over User and Purchase nodes and `PURCHASED` edges.
#[derive(Clone)]
pub struct GraphStore {
    client: GraphClient,
}

impl GraphStore {
    pub fn new(client: GraphClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReferralStore for GraphStore {
    async fn upsert_user(
        &self,
        mobile: &str,
        name: &str,
        referral_type: ReferralType,
    ) -> MarkwaveResult<User> {
        // MERGE keyed solely on mobile; verified only seeded on create.
        let query = Query::new(format!(
            "MERGE (u:User {{mobile: $mobile}})
             ON CREATE SET u.verified = false
             SET u.name = $name, u.referral_type = $referral_type
             RETURN {USER_FIELDS}"
        ))
        .param("mobile", mobile)
        .param("name", name)
        .param("referral_type", referral_type.as_str());

        let row = self
            .client
            .query_one(query)
            .await?
            .ok_or_else(|| anyhow!("upsert for '{mobile}' returned no row"))?;
        user_from_row(&row)
    }

    async fn list_users_by_type(&self, referral_type: ReferralType) -> MarkwaveResult<Vec<User>> {
        let query = Query::new(format!(
            "MATCH (u:User {{referral_type: $referral_type}})
             RETURN {USER_FIELDS}"
        ))
        .param("referral_type", referral_type.as_str());

        let rows = self.client.query(query).await?;
        rows.iter().map(user_from_row).collect()
    }

    async fn record_purchase(
        &self,
        mobile: &str,
        purchase: &NewPurchase,
    ) -> MarkwaveResult<Option<Purchase>> {
        // MATCH gates the CREATE: no user, no row, no write.
        let query = Query::new(
            "MATCH (u:User {mobile: $mobile})
             CREATE (u)-[:PURCHASED {item: $item, details: $details}]->(p:Purchase {id: $id})
             RETURN p.id AS id"
                .to_string(),
        )
        .param("mobile", mobile)
        .param("id", purchase.id.as_str())
        .param("item", purchase.item.as_deref().unwrap_or(""))
        .param("details", purchase.details.as_deref().unwrap_or(""));

        match self.client.query_one(query).await? {
            Some(row) => {
                let id: String = row
                    .get("id")
                    .map_err(|e| anyhow!("Failed to get field 'id': {e:?}"))?;
                Ok(Some(Purchase { id }))
            }
            None => Ok(None),
        }
    }

    async fn mark_verified(
        &self,
        mobile: &str,
        device: &DeviceInfo,
    ) -> MarkwaveResult<Option<User>> {
        // Eligibility and write in one conditional statement; an ineligible
        // or missing user simply matches nothing.
        let query = Query::new(format!(
            "MATCH (u:User {{mobile: $mobile, referral_type: 'new_referral'}})
             WHERE COALESCE(u.verified, false) = false
             SET u.device_id = $device_id, u.device_model = $device_model, u.verified = true
             RETURN {USER_FIELDS}"
        ))
        .param("mobile", mobile)
        .param("device_id", device.device_id.as_str())
        .param("device_model", device.device_model.as_str());

        match self.client.query_one(query).await? {
            Some(row) => Ok(Some(user_from_row(&row)?)),
            None => Ok(None),
        }
    }
}

fn user_from_row(row: &Row) -> MarkwaveResult<User> {
    let mobile: String = get_field(row, "mobile")?;
    let name: String = get_field(row, "name")?;
    let referral_type: String = get_field(row, "referral_type")?;
    let verified: bool = get_field(row, "verified")?;

    Ok(User {
        mobile,
        name,
        referral_type: ReferralType::parse(&referral_type)?,
        verified,
    })
}

fn get_field<T: serde::de::DeserializeOwned>(row: &Row, field: &str) -> MarkwaveResult<T> {
    row.get(field)
        .map_err(|e| anyhow!("Failed to get field '{field}': {e:?}").into())
}
