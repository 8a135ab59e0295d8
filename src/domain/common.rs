use uuid::Uuid;

/// Tolerance used when comparing monetary amounts stored as `f64`.
pub const MONEY_EPSILON: f64 = 0.005;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides access to a human-friendly entity name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

pub(crate) fn approx_eq(left: f64, right: f64) -> bool {
    (left - right).abs() < MONEY_EPSILON
}
