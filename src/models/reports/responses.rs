use super::entities::Report;
use crate::models::common::PaginatedResponse;

pub type ReportListResponse = PaginatedResponse<Report>;
