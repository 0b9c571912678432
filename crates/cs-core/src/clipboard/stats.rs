use serde::Serialize;

/// Aggregates over the cached history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HistoryStats {
    pub total_count: usize,
    pub total_bytes: i64,
    pub today_count: usize,
}
