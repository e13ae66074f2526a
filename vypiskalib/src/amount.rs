//! Точные денежные суммы: разбор и форматирование без двоичной плавающей точки.

use crate::error::{Result, VypiskaError};
use rust_decimal::{Decimal, RoundingStrategy};

/// Пустое поле считается нулём; всё остальное — точный Decimal.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str_exact(s)
        .or_else(|_| s.parse())
        .map_err(|e| VypiskaError::Parse(format!("amount '{s}': {e}")))
}

/// Ровно два знака после запятой, половина — от нуля: 2.005 -> "2.01".
pub fn format_amount(d: Decimal) -> String {
    let mut q = d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    q.rescale(2);
    q.to_string()
}
