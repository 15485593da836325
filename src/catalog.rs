// src/catalog.rs

//! Catálogo estático da landing page. Não é editável em tempo de execução.

use crate::models::offer::{Branch, Offer};

pub const BRANCHES: &[Branch] = &[
    Branch {
        name: "Mohammadpur",
        address: "18/1 Ring Road",
        phone: "01886571288",
    },
    Branch {
        name: "Dhanmondi",
        address: "59/759, Sathmasjid Road",
        phone: "01886471288",
    },
];

pub const HOTLINES: &[&str] = &["01886771288", "01886971288"];

pub const OFFERS: &[Offer] = &[
    Offer { id: 1, buy_item: "Premium Facial", buy_price: "3,200 - 4,000", free_item: "Hair SPA", free_price: "2,000 - 2,400", emoji: "💆‍♀️" },
    Offer { id: 2, buy_item: "Luxury Facial", buy_price: "2,500", free_item: "Spa Pedi / Mani", free_price: "1,500", emoji: "✨" },
    Offer { id: 3, buy_item: "Luxury Pedi + Mani", buy_price: "4,000", free_item: "Deluxe Facial", free_price: "2,000", emoji: "💅" },
    Offer { id: 4, buy_item: "Deluxe Pedi + Mani", buy_price: "3,600", free_item: "Ginga-Rita Hair Treat", free_price: "1,500 - 1,900", emoji: "🦶" },
    Offer { id: 5, buy_item: "Combo 1/2/3/4", buy_price: "5,000 - 8,000", free_item: "Full Body Massage", free_price: "2,000", emoji: "🎁" },
    Offer { id: 6, buy_item: "Omega Shine / Botox Miracle", buy_price: "10,000 - 16,000", free_item: "Premium Facial", free_price: "3,200 - 4,000", emoji: "🌟" },
    Offer { id: 7, buy_item: "Shine Bonded / Deep Shine Magic", buy_price: "10,000 - 16,000", free_item: "Luxury Facial", free_price: "2,500", emoji: "💇‍♀️" },
    Offer { id: 8, buy_item: "Base With Highlight", buy_price: "8,000 - 12,000", free_item: "Hair Protein Treatment", free_price: "2,000 - 2,400", emoji: "🎨" },
    Offer { id: 9, buy_item: "Bridal Makeover", buy_price: "10,000", free_item: "Fair Polish Combo", free_price: "2,000", emoji: "👰" },
    Offer { id: 10, buy_item: "Exclusive Party Makeover", buy_price: "5,000", free_item: "Face Fair Polish", free_price: "700", emoji: "💄" },
];

/// Busca tolerante: ids desconhecidos devolvem `None` (exibidos como "Unknown").
pub fn find_offer(offers: &[Offer], id: i32) -> Option<&Offer> {
    offers.iter().find(|o| o.id == id)
}
