//! The ordered partner list.
//!
//! Partners are rendered by ascending `order`. Inserting at, or moving to, an
//! order that is already taken shifts the neighbouring partners by one slot so
//! that the relative order of everything else is kept. Each operation runs in
//! a single transaction which first takes the partner table's write lock, so
//! concurrent reorders are applied one after the other and a failure in any
//! step leaves the list untouched.
//!
//! Deleting a partner does not compact the remaining orders. Gaps are harmless
//! because listing sorts by `(order, id)` and appending uses `max(order) + 1`.

use derive_more::Display;

use crate::db::models::partner::{self, NewPartner, Partner, PartnerChanges, TxManager as _};
use crate::db::models::timestamp_now;
use crate::db::{DatabaseConnection, DatabaseTransaction, Tx as _};

pub mod ordering;

use ordering::{insert_fits, next_order, Shift, LAST_ORDER};

/// Position given to the first partner when the configuration does not set one.
pub const DEFAULT_FIRST_ORDER: i64 = 1;

/// Errors callers of the partner list are expected to handle.
/// Anything else surfaces as an opaque `anyhow::Error`.
#[derive(Debug, Display, PartialEq, Eq)]
pub enum PartnerError {
    /// No partner with the given id.
    #[display(fmt = "Partner {} not found", _0)]
    NotFound(i64),
    /// Requested order is before the first position or past [`LAST_ORDER`].
    #[display(
        fmt = "Order {} is outside the range {}..={}",
        order,
        first_order,
        last_order
    )]
    OrderOutOfRange {
        /// Requested order.
        order: i64,
        /// Lowest valid order.
        first_order: i64,
        /// Highest valid order.
        last_order: i64,
    },
    /// The partner at [`LAST_ORDER`] would have to move back to make room.
    #[display(fmt = "No display order left after {}", _0)]
    NoRoom(i64),
}

impl std::error::Error for PartnerError {}

/// All partners in display order.
///
/// # Errors
/// Errors if the partners cannot be read.
#[tracing::instrument(skip(db))]
pub async fn list(db: &DatabaseConnection) -> anyhow::Result<Vec<Partner>> {
    partner::Manager::find_all_ordered(db).await
}

/// A single partner.
///
/// # Errors
/// Errors with [`PartnerError::NotFound`] if there is no partner with `id`.
#[tracing::instrument(skip(db))]
pub async fn get(db: &DatabaseConnection, id: i64) -> anyhow::Result<Partner> {
    partner::Manager::find_by_id(db, id)
        .await?
        .ok_or_else(|| PartnerError::NotFound(id).into())
}

/// Insert a partner at `requested_order`, or after the last partner when no
/// order is given. Partners at or after the requested order move back by one.
///
/// # Errors
/// Errors with [`PartnerError::OrderOutOfRange`] if the order is below
/// `first_order` or above [`LAST_ORDER`], [`PartnerError::NoRoom`] if the
/// partners after it cannot move back, or if any database write fails.
#[tracing::instrument(skip(db, new_partner), fields(name = %new_partner.name))]
pub async fn insert(
    db: &DatabaseConnection,
    new_partner: &NewPartner,
    requested_order: Option<i64>,
    first_order: i64,
) -> anyhow::Result<Partner> {
    if let Some(order) = requested_order {
        check_order(order, first_order)?;
    }
    let mut tx = DatabaseTransaction::begin(db).await?;
    let result = insert_within(&mut tx, new_partner, requested_order, first_order).await;
    finish(tx, result).await
}

/// Steps of [`insert`] that run inside its transaction.
async fn insert_within(
    tx: &mut DatabaseTransaction,
    new_partner: &NewPartner,
    requested_order: Option<i64>,
    first_order: i64,
) -> anyhow::Result<Partner> {
    tx.lock_for_reorder().await?;
    let now = timestamp_now();
    let max_order = tx.find_max_order().await?;
    let order = if let Some(order) = requested_order {
        if !insert_fits(max_order, order) {
            return Err(PartnerError::NoRoom(LAST_ORDER).into());
        }
        let moved = tx.shift_orders(&Shift::for_insert(order), &now).await?;
        tracing::debug!(order, moved, "Made room for new partner");
        order
    } else {
        next_order(max_order, first_order).ok_or(PartnerError::NoRoom(LAST_ORDER))?
    };
    let created = tx.create(new_partner, order, &now).await?;
    tracing::info!(id = created.id, order, "Partner created");
    Ok(created)
}

/// Apply `changes` to partner `id`. When the order changes, the partners
/// between the old and the new position move one slot towards the old one.
///
/// # Errors
/// Errors with [`PartnerError::NotFound`] if there is no partner with `id`,
/// [`PartnerError::OrderOutOfRange`] if the new order is outside
/// `first_order..=LAST_ORDER`,
/// or if any database write fails.
#[tracing::instrument(skip(db, changes))]
pub async fn reposition(
    db: &DatabaseConnection,
    id: i64,
    changes: PartnerChanges,
    first_order: i64,
) -> anyhow::Result<Partner> {
    if let Some(order) = changes.order {
        check_order(order, first_order)?;
    }
    let mut tx = DatabaseTransaction::begin(db).await?;
    let result = reposition_within(&mut tx, id, changes).await;
    finish(tx, result).await
}

/// Steps of [`reposition`] that run inside its transaction.
async fn reposition_within(
    tx: &mut DatabaseTransaction,
    id: i64,
    changes: PartnerChanges,
) -> anyhow::Result<Partner> {
    tx.lock_for_reorder().await?;
    let current = partner::TxManager::find_by_id(tx, id)
        .await?
        .ok_or(PartnerError::NotFound(id))?;
    let now = timestamp_now();
    let updated = current.merged(changes, now.clone());
    if let Some(shift) = Shift::for_reposition(id, current.order, updated.order) {
        let moved = tx.shift_orders(&shift, &now).await?;
        tracing::debug!(
            from = current.order,
            to = updated.order,
            moved,
            "Shifted partners around moved partner"
        );
    }
    tx.update(&updated).await?;
    tracing::info!(id, order = updated.order, "Partner updated");
    Ok(updated)
}

/// Delete partner `id`. The orders of the other partners are left as they are.
///
/// # Errors
/// Errors with [`PartnerError::NotFound`] if there is no partner with `id`, or
/// if the delete fails.
#[tracing::instrument(skip(db))]
pub async fn delete(db: &DatabaseConnection, id: i64) -> anyhow::Result<()> {
    let mut tx = DatabaseTransaction::begin(db).await?;
    let result = match tx.delete_by_id(id).await {
        Ok(0) => Err(PartnerError::NotFound(id).into()),
        Ok(_) => Ok(()),
        Err(err) => Err(err),
    };
    finish(tx, result).await?;
    tracing::info!(id, "Partner deleted");
    Ok(())
}

/// Reject orders before the first position or past the last one.
fn check_order(order: i64, first_order: i64) -> Result<(), PartnerError> {
    if !(first_order..=LAST_ORDER).contains(&order) {
        return Err(PartnerError::OrderOutOfRange {
            order,
            first_order,
            last_order: LAST_ORDER,
        });
    }
    Ok(())
}

/// Commit `tx` if `result` is a success, roll it back otherwise.
async fn finish<T>(tx: DatabaseTransaction, result: anyhow::Result<T>) -> anyhow::Result<T> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!("Failed to roll back partner transaction: {rollback_err}");
            }
            Err(err)
        }
    }
}
