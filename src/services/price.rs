// src/services/price.rs

use rust_decimal::Decimal;

/// Converte uma faixa de preço de marketing ("3,200 - 4,000") no valor médio.
///
/// Remove separadores de milhar e qualquer caractere que não seja dígito ou `-`.
/// Com `-`, a faixa precisa ter exatamente dois números e devolve a média;
/// sem `-`, é lido como um único inteiro. Qualquer falha devolve zero.
pub fn parse_average_price(text: &str) -> Decimal {
    let clean: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();

    if clean.contains('-') {
        let mut parts = clean.split('-');
        let (Some(min), Some(max), None) = (parts.next(), parts.next(), parts.next()) else {
            return Decimal::ZERO;
        };
        return match (parse_whole(min), parse_whole(max)) {
            (Some(min), Some(max)) => (min + max) / Decimal::TWO,
            _ => Decimal::ZERO,
        };
    }

    parse_whole(&clean).unwrap_or(Decimal::ZERO)
}

fn parse_whole(digits: &str) -> Option<Decimal> {
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u64>().ok().map(Decimal::from)
}
