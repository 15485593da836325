// src/handlers/catalog.rs

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    catalog,
    models::offer::{Branch, Offer},
};

#[derive(Debug, Serialize, ToSchema)]
pub struct BranchDirectory {
    pub branches: Vec<Branch>,
    pub hotlines: Vec<&'static str>,
}

#[utoipa::path(
    get,
    path = "/api/catalog/offers",
    tag = "Catalog",
    responses((status = 200, body = Vec<Offer>))
)]
pub async fn list_offers() -> Json<Vec<Offer>> {
    Json(catalog::OFFERS.to_vec())
}

#[utoipa::path(
    get,
    path = "/api/catalog/branches",
    tag = "Catalog",
    responses((status = 200, body = BranchDirectory))
)]
pub async fn list_branches() -> Json<BranchDirectory> {
    Json(BranchDirectory {
        branches: catalog::BRANCHES.to_vec(),
        hotlines: catalog::HOTLINES.to_vec(),
    })
}
