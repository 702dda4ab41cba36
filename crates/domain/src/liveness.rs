use chrono::{DateTime, Utc};

/// Compound visibility condition for soft-deletable rows.
///
/// Every entity in the schema carries an `active` flag and a nullable
/// `deleted_at` timestamp; a row only counts when both hold. Access
/// resolution must apply this predicate to every join step, so it lives in
/// one place instead of being restated per query.
pub trait Liveness {
    /// Returns the row's `active` flag.
    fn active(&self) -> bool;

    /// Returns the row's soft-delete timestamp, if set.
    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    /// Returns whether the row is active and not soft-deleted.
    fn is_live(&self) -> bool {
        self.active() && self.deleted_at().is_none()
    }
}
