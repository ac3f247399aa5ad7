//! Plain data row types written by output backends.

/// One train traversing one connection, with stations named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementRow {
    pub turn:  u64,
    /// Display label, e.g. `"T3"`.
    pub train: String,
    pub from:  String,
    pub to:    String,
}

/// Totals for one logged turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnSummaryRow {
    pub turn:          u64,
    pub moves:         u64,
    /// Trains at the destination after this turn.
    pub arrived_total: u64,
}
