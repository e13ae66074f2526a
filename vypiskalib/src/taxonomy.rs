//! Таксономия операций: тип -> проприетарный код банка + текстовая пометка.
//! Отображение тотально: неизвестный тип получает общий код и «очеловеченную» метку.

use crate::model::TxKind;

/// Сырое значение колонки Type (оба поколения CSV) -> канонический тип.
/// Нераспознанные значения проходят насквозь.
pub fn normalize(raw: &str) -> TxKind {
    match raw {
        "CARD_PAYMENT" | "Card Payment" => TxKind::CardPayment,
        "TOPUP" | "Topup" => TxKind::Topup,
        "FEE" | "Fee" => TxKind::Fee,
        "TRANSFER" | "Transfer" => TxKind::Transfer,
        "CASHBACK" => TxKind::Cashback,
        "CARD_REFUND" | "Card Refund" => TxKind::CardRefund,
        other => TxKind::Other(other.to_string()),
    }
}

/// Код BkTxCd по каталогу SBA.
pub fn code(kind: &TxKind) -> &'static str {
    match kind {
        TxKind::CardPayment => "30000301000",
        TxKind::Topup => "10000405000",
        TxKind::Fee => "40000605000",
        TxKind::Transfer => "20000405000",
        TxKind::Cashback => "10000405000",
        TxKind::CardRefund => "30000301000",
        TxKind::Other(_) => "99999999999",
    }
}

/// Текст для AddtlTxInf.
pub fn info(kind: &TxKind) -> String {
    match kind {
        TxKind::CardPayment => "Kartova transakcia".to_string(),
        TxKind::Topup => "Prijata platba".to_string(),
        TxKind::Fee => "Poplatok".to_string(),
        TxKind::Transfer => "Odchadzajuca platba".to_string(),
        TxKind::Cashback => "Vratenie cashback".to_string(),
        TxKind::CardRefund => "Vratenie kartovej transakcie".to_string(),
        TxKind::Other(raw) => humanize(raw),
    }
}

// "SOME_WEIRD_KIND" -> "Some Weird Kind"
fn humanize(raw: &str) -> String {
    raw.replace('_', " ")
        .split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
