// src/models/offer.rs

use serde::Serialize;
use utoipa::ToSchema;

/// Oferta promocional do catálogo estático ("compre X, ganhe Y").
/// O preço médio é sempre derivado de `buy_price`, nunca guardado.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Premium Facial")]
    pub buy_item: &'static str,
    // Texto livre de marketing, pode ser uma faixa "min - max"
    #[schema(example = "3,200 - 4,000")]
    pub buy_price: &'static str,
    #[schema(example = "Hair SPA")]
    pub free_item: &'static str,
    #[schema(example = "2,000 - 2,400")]
    pub free_price: &'static str,
    pub emoji: &'static str,
}

#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    #[schema(example = "Dhanmondi")]
    pub name: &'static str,
    pub address: &'static str,
    pub phone: &'static str,
}
