//! Manager for the partner model.
use super::{NewPartner, Partner};
use crate::db::{DatabaseConnection, DatabaseKind, DatabaseTransaction};
use crate::partners::ordering::Shift;
use async_trait::async_trait;

#[async_trait]
impl super::Manager for DatabaseConnection {
    /// Find all partners sorted for display.
    /// Ties on `display_order` are broken by id so the result is deterministic.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_all_ordered(&self) -> anyhow::Result<Vec<Partner>> {
        let statement = "
            SELECT *
            FROM partner
            ORDER BY display_order ASC, id ASC
        ";
        let mut connection = self.pool.acquire().await?;
        let rows = sqlx::query_as::<_, Partner>(statement)
            .fetch_all(&mut *connection)
            .await?;
        Ok(rows)
    }

    /// Find a partner by id.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Partner>> {
        let statement = "
            SELECT *
            FROM partner
            WHERE id = $1
        ";
        let mut connection = self.pool.acquire().await?;
        let row = sqlx::query_as::<_, Partner>(statement)
            .bind(id)
            .fetch_optional(&mut *connection)
            .await?;
        Ok(row)
    }
}

#[async_trait]
impl super::TxManager for DatabaseTransaction {
    /// Take the partner table's write lock.
    ///
    /// # Errors
    /// Errors if the lock cannot be acquired before the database's busy timeout.
    async fn lock_for_reorder(&mut self) -> anyhow::Result<()> {
        let statement = match self.kind {
            // Any UPDATE starts a write transaction in SQLite, even one that matches no rows.
            DatabaseKind::Sqlite => "UPDATE partner SET display_order = display_order WHERE 1 = 0",
            DatabaseKind::Postgres => "LOCK TABLE partner IN SHARE ROW EXCLUSIVE MODE",
        };
        sqlx::query(statement).execute(&mut *self.tx).await?;
        Ok(())
    }

    /// Find a partner by id.
    ///
    /// # Errors
    /// Errors if the query fails.
    async fn find_by_id(&mut self, id: i64) -> anyhow::Result<Option<Partner>> {
        let statement = "
            SELECT *
            FROM partner
            WHERE id = $1
        ";
        let row = sqlx::query_as::<_, Partner>(statement)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    /// Highest display order in use.
    ///
    /// # Errors
    /// Errors if the query fails.
    async fn find_max_order(&mut self) -> anyhow::Result<Option<i64>> {
        // `MAX()` over an empty table is an untyped NULL that the `Any` driver cannot decode.
        let statement = "
            SELECT display_order
            FROM partner
            ORDER BY display_order DESC
            LIMIT 1
        ";
        let row = sqlx::query_as::<_, (i64,)>(statement)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row.map(|(order,)| order))
    }

    /// Apply `shift` to every partner in its range.
    ///
    /// # Errors
    /// Errors if the update fails.
    async fn shift_orders(&mut self, shift: &Shift, updated_at: &str) -> anyhow::Result<u64> {
        // Ids start at 1, so 0 excludes nothing.
        let statement = "
            UPDATE partner
            SET display_order = display_order + $1, updated_at = $2
            WHERE display_order >= $3
                AND display_order <= COALESCE($4, display_order)
                AND id <> COALESCE($5, 0)
        ";
        let result = sqlx::query(statement)
            .bind(shift.delta)
            .bind(updated_at)
            .bind(shift.from)
            .bind(shift.to)
            .bind(shift.exclude)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected())
    }

    /// Insert a partner and return it with its new id.
    ///
    /// # Errors
    /// Errors if the partner cannot be inserted into the database.
    async fn create(
        &mut self,
        partner: &NewPartner,
        order: i64,
        created_at: &str,
    ) -> anyhow::Result<Partner> {
        let statement = "
            INSERT INTO partner ( name, logo, display_name, alt_text, url, display_order, created_at, updated_at )
            VALUES ( $1, $2, $3, $4, $5, $6, $7, $8 )
            RETURNING id
        ";
        let (id,) = sqlx::query_as::<_, (i64,)>(statement)
            .bind(&partner.name)
            .bind(&partner.logo)
            .bind(&partner.display_name)
            .bind(&partner.alt_text)
            .bind(&partner.url)
            .bind(order)
            .bind(created_at)
            .bind(created_at)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(Partner {
            id,
            name: partner.name.clone(),
            logo: partner.logo.clone(),
            display_name: partner.display_name.clone(),
            alt_text: partner.alt_text.clone(),
            url: partner.url.clone(),
            order,
            created_at: created_at.to_owned(),
            updated_at: created_at.to_owned(),
        })
    }

    /// Overwrite a partner's fields.
    ///
    /// # Errors
    /// Errors if the partner cannot be updated.
    async fn update(&mut self, partner: &Partner) -> anyhow::Result<()> {
        let statement = "
            UPDATE partner
            SET name = $1, logo = $2, display_name = $3, alt_text = $4, url = $5,
                display_order = $6, updated_at = $7
            WHERE id = $8
        ";
        sqlx::query(statement)
            .bind(&partner.name)
            .bind(&partner.logo)
            .bind(&partner.display_name)
            .bind(&partner.alt_text)
            .bind(&partner.url)
            .bind(partner.order)
            .bind(&partner.updated_at)
            .bind(partner.id)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    /// Delete a partner. Other partners keep their orders.
    ///
    /// # Errors
    /// Errors if the delete fails.
    async fn delete_by_id(&mut self, id: i64) -> anyhow::Result<u64> {
        let statement = "
            DELETE FROM partner
            WHERE id = $1
        ";
        let result = sqlx::query(statement)
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected())
    }
}
