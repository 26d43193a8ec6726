use axum::extract::{Json, Query, State};
use serde::Deserialize;

use crate::http::server::AppState;
use crate::pricing::{Billing, PricingTable};

#[derive(Debug, Deserialize)]
pub struct PricingQuery {
    #[serde(default)]
    pub billing: Billing,
}

/// `GET /api/pricing?billing=monthly|annual|lifetime`
pub async fn get_pricing(
    State(state): State<AppState>,
    Query(query): Query<PricingQuery>,
) -> Json<PricingTable> {
    Json(state.pricing.table(query.billing))
}
