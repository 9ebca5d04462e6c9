//! Display-order arithmetic for ordered collections.
//!
//! Partners carry an integer `order` that is used as their sort key. Moving or
//! inserting one record means every record in a contiguous range of orders has
//! to move by one slot. [`Shift`] describes that range so the database layer
//! can apply it as a single bulk `UPDATE`.

/// A bulk adjustment of display orders.
///
/// Every record whose order lies in `from..=to` (or `from..` when `to` is
/// `None`), apart from `exclude`, has `delta` added to its order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shift {
    /// Lowest affected order, inclusive.
    pub from: i64,
    /// Highest affected order, inclusive. `None` means unbounded.
    pub to: Option<i64>,
    /// Amount added to each affected order. Always `1` or `-1`.
    pub delta: i64,
    /// Record id left untouched, i.e. the record being moved.
    pub exclude: Option<i64>,
}

impl Shift {
    /// Make room for a new record at `order`: everything at `order` or later
    /// moves back by one.
    #[must_use]
    pub const fn for_insert(order: i64) -> Self {
        Self {
            from: order,
            to: None,
            delta: 1,
            exclude: None,
        }
    }

    /// Shift needed to move record `id` from `old_order` to `new_order`.
    ///
    /// Moving later pulls the records in `(old, new]` one slot earlier, moving
    /// earlier pushes the records in `[new, old)` one slot later. Returns
    /// `None` when the order does not change.
    #[must_use]
    pub const fn for_reposition(id: i64, old_order: i64, new_order: i64) -> Option<Self> {
        if new_order > old_order {
            Some(Self {
                from: old_order + 1,
                to: Some(new_order),
                delta: -1,
                exclude: Some(id),
            })
        } else if new_order < old_order {
            Some(Self {
                from: new_order,
                to: Some(old_order - 1),
                delta: 1,
                exclude: Some(id),
            })
        } else {
            None
        }
    }

    /// Whether a record with `id` currently at `order` is moved by this shift.
    #[must_use]
    pub fn applies_to(&self, id: i64, order: i64) -> bool {
        if self.exclude == Some(id) {
            return false;
        }
        order >= self.from && self.to.is_none_or(|upper| order <= upper)
    }

    /// New order of a record with `id` currently at `order`.
    #[must_use]
    pub fn apply(&self, id: i64, order: i64) -> i64 {
        if self.applies_to(id, order) {
            order + self.delta
        } else {
            order
        }
    }
}

/// Highest order a record may hold, the largest 32-bit integer.
/// Order columns are read back through 32-bit integers on some backends.
pub const LAST_ORDER: i64 = 2_147_483_647;

/// Order given to a record appended to a collection whose highest order is
/// `max_order`. An empty collection starts at `first_order`.
///
/// Returns `None` when the next order would pass [`LAST_ORDER`].
#[must_use]
pub fn next_order(max_order: Option<i64>, first_order: i64) -> Option<i64> {
    let next = match max_order {
        Some(max) => max.checked_add(1)?.max(first_order),
        None => first_order,
    };
    (next <= LAST_ORDER).then_some(next)
}

/// Whether a record can be inserted at `order` when the highest order in use
/// is `max_order`, given that every record at `order` or later moves back by one.
#[must_use]
pub fn insert_fits(max_order: Option<i64>, order: i64) -> bool {
    match max_order {
        Some(max) if max >= order => max < LAST_ORDER,
        _ => order <= LAST_ORDER,
    }
}
