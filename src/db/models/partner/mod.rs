use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{any::AnyRow, FromRow, Row as _};

use crate::partners::ordering::Shift;

pub mod manager;

/// Trait for reading partners outside of a transaction.
#[async_trait]
pub trait Manager {
    /// Find all partners, sorted by display order and then id.
    async fn find_all_ordered(&self) -> anyhow::Result<Vec<Partner>>;
    /// Find a partner by id.
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Partner>>;
}

/// Trait for managing transactions on partners.
#[async_trait]
pub trait TxManager {
    /// Take the write lock on the partner table for the rest of the transaction.
    /// Serializes concurrent reorders so their shifts cannot interleave.
    async fn lock_for_reorder(&mut self) -> anyhow::Result<()>;
    /// Find a partner by id within the transaction.
    async fn find_by_id(&mut self, id: i64) -> anyhow::Result<Option<Partner>>;
    /// Highest display order in use, `None` when there are no partners.
    async fn find_max_order(&mut self) -> anyhow::Result<Option<i64>>;
    /// Apply a bulk order shift. Returns the number of partners moved.
    async fn shift_orders(&mut self, shift: &Shift, updated_at: &str) -> anyhow::Result<u64>;
    /// Insert a new partner at `order`.
    async fn create(
        &mut self,
        partner: &NewPartner,
        order: i64,
        created_at: &str,
    ) -> anyhow::Result<Partner>;
    /// Overwrite the fields and order of an existing partner.
    async fn update(&mut self, partner: &Partner) -> anyhow::Result<()>;
    /// Delete a partner by id. Returns the number of deleted rows.
    async fn delete_by_id(&mut self, id: i64) -> anyhow::Result<u64>;
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// Model for a partner logo shown in the "trusted by" strip.
pub struct Partner {
    /// Store-assigned identifier.
    #[serde(rename = "_id")]
    pub id: i64,
    /// Partner name.
    pub name: String,
    /// URL of the logo image.
    pub logo: String,
    /// Name shown under the logo. Empty when unset.
    pub display_name: String,
    /// Alt text for the logo. Empty when unset.
    pub alt_text: String,
    /// Outbound link. Empty when unset.
    pub url: String,
    /// Display order. Lower values render first.
    pub order: i64,
    /// Creation time, RFC 3339.
    pub created_at: String,
    /// Last update time, RFC 3339.
    pub updated_at: String,
}

impl FromRow<'_, AnyRow> for Partner {
    fn from_row(row: &AnyRow) -> anyhow::Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            logo: row.try_get("logo")?,
            display_name: row.try_get("display_name")?,
            alt_text: row.try_get("alt_text")?,
            url: row.try_get("url")?,
            order: row.try_get("display_order")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Fields of a partner that is about to be inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPartner {
    /// Partner name.
    pub name: String,
    /// URL of the logo image.
    pub logo: String,
    /// Name shown under the logo.
    pub display_name: String,
    /// Alt text for the logo.
    pub alt_text: String,
    /// Outbound link.
    pub url: String,
}

/// Partial update of a partner. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartnerChanges {
    /// New name. An empty name keeps the stored one.
    pub name: Option<String>,
    /// New logo. An empty logo keeps the stored one.
    pub logo: Option<String>,
    /// New display name, may be empty to clear it.
    pub display_name: Option<String>,
    /// New alt text, may be empty to clear it.
    pub alt_text: Option<String>,
    /// New outbound link, may be empty to clear it.
    pub url: Option<String>,
    /// New display order.
    pub order: Option<i64>,
}

impl Partner {
    /// Merge `changes` into a copy of this partner.
    ///
    /// `name` and `logo` are required on a partner, so empty values for them
    /// fall back to the stored ones. The optional text fields can be cleared.
    #[must_use]
    pub fn merged(&self, changes: PartnerChanges, updated_at: String) -> Self {
        let non_empty = |value: Option<String>, current: &str| {
            value
                .filter(|val| !val.is_empty())
                .unwrap_or_else(|| current.to_owned())
        };
        Self {
            id: self.id,
            name: non_empty(changes.name, &self.name),
            logo: non_empty(changes.logo, &self.logo),
            display_name: changes
                .display_name
                .unwrap_or_else(|| self.display_name.clone()),
            alt_text: changes.alt_text.unwrap_or_else(|| self.alt_text.clone()),
            url: changes.url.unwrap_or_else(|| self.url.clone()),
            order: changes.order.unwrap_or(self.order),
            created_at: self.created_at.clone(),
            updated_at,
        }
    }
}
