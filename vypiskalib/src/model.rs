//! Доменные модели — нормализованная транзакция и готовая выписка.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Обслуживающий банк — фиксированный для всех транзакций.
pub const SERVICER_BIC: &str = "REVOLT21";
pub const SERVICER_NAME: &str = "Revolut Bank UAB";
pub const SERVICER_COUNTRY: &str = "LT";

/// Валюта расчётного счёта; счёт одновалютный.
pub const SETTLEMENT_CURRENCY: &str = "EUR";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DebitCredit {
    Debit,
    Credit,
}

/// Тип операции: известные ключи таксономии плюс сквозной произвольный.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TxKind {
    CardPayment,
    Topup,
    Fee,
    Transfer,
    Cashback,
    CardRefund,
    Other(String),
}

impl TxKind {
    /// Канонический ключ ("CARD_PAYMENT", ...); для неизвестного — исходная строка.
    pub fn key(&self) -> &str {
        match self {
            TxKind::CardPayment => "CARD_PAYMENT",
            TxKind::Topup => "TOPUP",
            TxKind::Fee => "FEE",
            TxKind::Transfer => "TRANSFER",
            TxKind::Cashback => "CASHBACK",
            TxKind::CardRefund => "CARD_REFUND",
            TxKind::Other(raw) => raw,
        }
    }
}

/// Валютная часть операции в иностранной валюте.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FxDetail {
    pub currency: String,
    pub amount: Decimal,
    pub rate: Decimal,
}

/// Нормализованная строка выписки: одна запись на завершённую операцию,
/// независимо от поколения входного CSV.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub completed: NaiveDate,
    pub kind: TxKind,
    pub description: String,
    pub reference: String,
    pub tx_id: String,
    /// Валюта списания/зачисления.
    pub currency: String,
    /// Сумма с учётом комиссии, со знаком.
    pub total_amount: Decimal,
    /// Сумма до комиссии — контрэквивалент для валютных операций.
    pub raw_amount: Decimal,
    /// Остаток на счёте сразу после операции.
    pub balance_after: Decimal,
    pub beneficiary_iban: String,
    pub beneficiary_bic: String,
    pub fx: Option<FxDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub iban: String,
    pub owner: String,
    pub address: [String; 2],
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Period {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Итоги по выписке, разнесённые по направлению.
/// Дебетовая сумма хранится по модулю.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntryTotals {
    pub credit_count: usize,
    pub credit_sum: Decimal,
    pub debit_count: usize,
    pub debit_sum: Decimal,
}

impl EntryTotals {
    pub fn net(&self) -> Decimal {
        self.credit_sum - self.debit_sum
    }

    pub fn gross(&self) -> Decimal {
        self.credit_sum + self.debit_sum
    }
}

/// Сумма операции глазами плательщика: либо всё в валюте счёта,
/// либо исходная валюта + контрэквивалент + курс.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AmountDetails {
    Domestic {
        amount: Decimal,
    },
    Exchange {
        currency: String,
        amount: Decimal,
        counter_value: Decimal,
        rate: Decimal,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Party {
    pub name: String,
    pub address: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PartyAccount {
    pub iban: String,
    pub name: String,
}

/// FinInstnId: имя опционально — для чужого банка известен только BIC.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Institution {
    pub bic: String,
    pub name: Option<String>,
}

impl Institution {
    pub fn servicer() -> Self {
        Institution {
            bic: SERVICER_BIC.to_string(),
            name: Some(SERVICER_NAME.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelatedParties {
    pub debtor: Party,
    pub debtor_account: Option<PartyAccount>,
    pub creditor: Option<Party>,
    pub creditor_account: Option<PartyAccount>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelatedAgents {
    pub debtor_agent: Institution,
    pub creditor_agent: Option<Institution>,
}

/// Полностью собранная строка выписки.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatementEntry {
    /// Порядковый номер с единицы, в хронологическом порядке.
    pub seq: u32,
    /// Сумма по модулю, с комиссией.
    pub amount: Decimal,
    pub currency: String,
    pub dc: DebitCredit,
    pub booking_date: NaiveDate,
    pub value_date: NaiveDate,
    pub code: String,
    pub info: String,
    pub tx_id: String,
    pub details: AmountDetails,
    pub parties: RelatedParties,
    pub agents: RelatedAgents,
    pub remittance: String,
    pub description: String,
    pub balance_after: Decimal,
}

/// Корневой агрегат: собирается один раз, рендерерам отдаётся по ссылке.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Statement {
    pub account: Account,
    pub currency: String,
    pub period: Period,
    pub created_at: DateTime<Utc>,
    pub opening_balance: Decimal,
    pub closing_balance: Decimal,
    pub totals: EntryTotals,
    pub entries: Vec<StatementEntry>,
}
