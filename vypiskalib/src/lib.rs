//! vypiskalib — конвертация CSV-выписки Revolut Business в camt.053.001.02
//! и в HTML-отчёт: нормализация, сверка остатков, построение строк выписки.

pub mod amount;
pub mod error;
pub mod model;
pub mod statement;
pub mod taxonomy;
pub mod traits;

pub mod formats {
    pub mod camt053;
    pub mod html;
    pub mod revolut;
}
