//! Чтение CSV-выписки Revolut Business.
//!
//! Поддерживаются оба поколения экспорта:
//!   старое: Date completed (UTC), Total amount, Amount, Payment currency, ID,
//!           Reference, Beneficiary IBAN/BIC, Orig currency/amount, Exchange rate, ...
//!   новое:  Completed Date, Started Date, Amount, Fee, Currency, State, Balance, ...
//! Поколение определяется по наличию колонки «Date completed (UTC)».

use crate::{
    amount::parse_amount,
    error::{Result, VypiskaError},
    model::{FxDetail, Transaction, TxKind, SETTLEMENT_CURRENCY},
    taxonomy,
};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use std::io::BufRead;

/// Объединение колонок обоих поколений; отсутствующие в файле — пустые.
#[derive(Debug, Default, serde::Deserialize)]
struct RevolutRow {
    #[serde(rename = "Type", default)]
    kind: String,
    #[serde(rename = "State", default)]
    state: Option<String>,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "Balance", default)]
    balance: String,
    #[serde(rename = "Amount", default)]
    amount: String,

    // старое поколение
    #[serde(rename = "Date completed (UTC)", default)]
    date_completed: Option<String>,
    #[serde(rename = "Total amount", default)]
    total_amount: String,
    #[serde(rename = "Payment currency", default)]
    payment_currency: String,
    #[serde(rename = "ID", default)]
    tx_id: String,
    #[serde(rename = "Reference", default)]
    reference: String,
    #[serde(rename = "Beneficiary IBAN", default)]
    beneficiary_iban: String,
    #[serde(rename = "Beneficiary BIC", default)]
    beneficiary_bic: String,
    #[serde(rename = "Orig currency", default)]
    orig_currency: String,
    #[serde(rename = "Orig amount", default)]
    orig_amount: String,
    #[serde(rename = "Exchange rate", default)]
    exchange_rate: String,

    // новое поколение
    #[serde(rename = "Completed Date", default)]
    completed_date: String,
    #[serde(rename = "Started Date", default)]
    started_date: String,
    #[serde(rename = "Fee", default)]
    fee: String,
    #[serde(rename = "Currency", default)]
    currency: String,
}

pub struct Revolut;

impl Revolut {
    /// Читает CSV и отдаёт завершённые операции в порядке файла.
    pub fn read<R: BufRead>(r: R) -> Result<Vec<Transaction>> {
        let mut rdr = ReaderBuilder::new().flexible(true).from_reader(r);
        let mut out = Vec::new();
        for rec in rdr.deserialize::<RevolutRow>() {
            let row = rec?;
            if let Some(tx) = normalize(row)? {
                out.push(tx);
            }
        }
        Ok(out)
    }
}

fn normalize(row: RevolutRow) -> Result<Option<Transaction>> {
    // Статус есть в обоих поколениях; отсутствие колонки означает «завершена».
    if let Some(state) = &row.state {
        if state.trim() != "COMPLETED" {
            return Ok(None);
        }
    }

    let kind = taxonomy::normalize(row.kind.trim());
    let balance_after = parse_amount(&row.balance)?;

    let tx = if row.date_completed.is_some() {
        legacy(row, kind, balance_after)?
    } else {
        modern(row, kind, balance_after)?
    };
    Ok(Some(tx))
}

fn legacy(row: RevolutRow, kind: TxKind, balance_after: Decimal) -> Result<Transaction> {
    let fx = fx_detail(&row)?;
    Ok(Transaction {
        completed: parse_date(row.date_completed.as_deref().unwrap_or_default())?,
        kind,
        description: row.description.trim().to_string(),
        reference: row.reference.trim().to_string(),
        tx_id: row.tx_id.trim().to_string(),
        currency: non_blank(&row.payment_currency, SETTLEMENT_CURRENCY),
        total_amount: parse_amount(&row.total_amount)?,
        raw_amount: parse_amount(&row.amount)?,
        balance_after,
        beneficiary_iban: row.beneficiary_iban.trim().to_string(),
        beneficiary_bic: row.beneficiary_bic.trim().to_string(),
        fx,
    })
}

fn modern(row: RevolutRow, kind: TxKind, balance_after: Decimal) -> Result<Transaction> {
    // Дата завершения; если её нет — дата создания операции.
    let completed = match date_part(&row.completed_date) {
        Some(d) => parse_date(d)?,
        None => match date_part(&row.started_date) {
            Some(d) => parse_date(d)?,
            None => {
                return Err(VypiskaError::Parse(
                    "transaction without completed or started date".into(),
                ))
            }
        },
    };

    let amount = parse_amount(&row.amount)?;
    let fee = parse_amount(&row.fee)?;

    Ok(Transaction {
        completed,
        kind,
        description: row.description.trim().to_string(),
        reference: String::new(),
        tx_id: String::new(),
        currency: non_blank(&row.currency, SETTLEMENT_CURRENCY),
        total_amount: amount + fee,
        raw_amount: amount,
        balance_after,
        beneficiary_iban: String::new(),
        beneficiary_bic: String::new(),
        fx: None,
    })
}

/// FX присутствует только когда заполнены все три поля.
fn fx_detail(row: &RevolutRow) -> Result<Option<FxDetail>> {
    let ccy = row.orig_currency.trim();
    let amt = row.orig_amount.trim();
    let rate = row.exchange_rate.trim();
    if ccy.is_empty() || amt.is_empty() || rate.is_empty() {
        return Ok(None);
    }
    Ok(Some(FxDetail {
        currency: ccy.to_string(),
        amount: parse_amount(amt)?,
        rate: Decimal::from_str_exact(rate)
            .or_else(|_| rate.parse())
            .map_err(|e| VypiskaError::Parse(format!("exchange rate '{rate}': {e}")))?,
    }))
}

// "2026-01-15 10:30:00" -> "2026-01-15"
fn date_part(s: &str) -> Option<&str> {
    s.split_whitespace().next()
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| VypiskaError::Parse(format!("date '{s}': {e}")))
}

fn non_blank(s: &str, default: &str) -> String {
    let s = s.trim();
    if s.is_empty() {
        default.to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_part_strips_time() {
        assert_eq!(date_part("2026-01-15 10:30:00"), Some("2026-01-15"));
        assert_eq!(date_part("2026-01-15"), Some("2026-01-15"));
        assert_eq!(date_part("   "), None);
        assert_eq!(date_part(""), None);
    }

    #[test]
    fn fx_requires_all_three_fields() {
        let row = RevolutRow {
            orig_currency: "USD".into(),
            orig_amount: "55.00".into(),
            exchange_rate: String::new(),
            ..RevolutRow::default()
        };
        assert_eq!(fx_detail(&row).unwrap(), None);

        let row = RevolutRow {
            orig_currency: "USD".into(),
            orig_amount: "55.00".into(),
            exchange_rate: "1.10".into(),
            ..RevolutRow::default()
        };
        let fx = fx_detail(&row).unwrap().unwrap();
        assert_eq!(fx.currency, "USD");
        assert_eq!(fx.rate, Decimal::from_str_exact("1.10").unwrap());
    }
}
