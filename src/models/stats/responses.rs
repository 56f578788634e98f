use serde::Serialize;

use super::entities::{CategoryStats, TimeStats};

#[derive(Debug, Clone, Serialize)]
pub struct PostStatsResponse {
    pub stats_by_time: Vec<TimeStats>,
    pub stats_by_category: Vec<CategoryStats>,
}
