use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::io::Cursor;
use vypiskalib::{formats::revolut::Revolut, model::TxKind};

fn dec(s: &str) -> Decimal {
    Decimal::from_str_exact(s).unwrap()
}

#[test]
fn legacy_format_read() {
    let csv = "\
Date completed (UTC),Type,State,Description,Reference,Payment currency,Total amount,Amount,Balance,ID,Beneficiary IBAN,Beneficiary BIC,Orig currency,Orig amount,Exchange rate
2026-01-15,Card Payment,COMPLETED,Grocery store,,EUR,-50.00,-48.50,950.00,tx-1,,,USD,55.00,1.10
2026-01-16,TOPUP,REVERTED,Money added from Jane Doe,,EUR,100.00,100.00,1050.00,tx-2,,,,,
2026-01-17,Topup,COMPLETED,Money added from Jane Doe,ref-7,EUR,200.00,200.00,1150.00,tx-3,LT111,AGBLLT2X,,,
";
    let rows = Revolut::read(Cursor::new(csv)).expect("read legacy");

    // REVERTED отброшена
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].kind, TxKind::CardPayment);
    assert_eq!(rows[0].completed, NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
    assert_eq!(rows[0].total_amount, dec("-50.00"));
    assert_eq!(rows[0].raw_amount, dec("-48.50"));
    assert_eq!(rows[0].balance_after, dec("950.00"));
    assert_eq!(rows[0].tx_id, "tx-1");
    let fx = rows[0].fx.as_ref().expect("fx present");
    assert_eq!(fx.currency, "USD");
    assert_eq!(fx.amount, dec("55.00"));
    assert_eq!(fx.rate, dec("1.10"));

    assert_eq!(rows[1].kind, TxKind::Topup);
    assert_eq!(rows[1].reference, "ref-7");
    assert_eq!(rows[1].beneficiary_iban, "LT111");
    assert_eq!(rows[1].beneficiary_bic, "AGBLLT2X");
    assert!(rows[1].fx.is_none());
}

#[test]
fn modern_format_read() {
    let csv = "\
Type,Product,Started Date,Completed Date,Description,Amount,Fee,Currency,State,Balance
TOPUP,Current,2026-02-01 09:00:00,2026-02-01 10:30:00,Payment from ACME Ltd,100.00,0.00,EUR,COMPLETED,500.00
CARD_PAYMENT,Current,2026-02-02 12:00:00,,Coffee,-3.50,-0.10,,COMPLETED,496.40
TRANSFER,Current,2026-02-03 08:00:00,2026-02-03 08:00:05,Rent,-400.00,0.00,EUR,PENDING,96.40
";
    let rows = Revolut::read(Cursor::new(csv)).expect("read modern");

    // PENDING отброшена
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].kind, TxKind::Topup);
    assert_eq!(rows[0].completed, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
    assert_eq!(rows[0].total_amount, dec("100.00"));
    assert_eq!(rows[0].currency, "EUR");
    assert!(rows[0].fx.is_none());
    assert!(rows[0].reference.is_empty());
    assert!(rows[0].beneficiary_iban.is_empty());

    // Completed Date пустая -> дата из Started Date; валюта по умолчанию;
    // сумма = Amount + Fee
    assert_eq!(rows[1].completed, NaiveDate::from_ymd_opt(2026, 2, 2).unwrap());
    assert_eq!(rows[1].currency, "EUR");
    assert_eq!(rows[1].total_amount, dec("-3.60"));
    assert_eq!(rows[1].raw_amount, dec("-3.50"));
}

#[test]
fn missing_state_column_counts_as_completed() {
    let csv = "\
Type,Completed Date,Amount,Fee,Currency,Balance
FEE,2026-03-01,-1.00,0.00,EUR,99.00
";
    let rows = Revolut::read(Cursor::new(csv)).expect("read");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].kind, TxKind::Fee);
}

#[test]
fn unknown_kind_passes_through() {
    let csv = "\
Type,Completed Date,Amount,Fee,Currency,Balance
ATM_WITHDRAWAL,2026-03-02,-20.00,0.00,EUR,79.00
";
    let rows = Revolut::read(Cursor::new(csv)).expect("read");
    assert_eq!(rows[0].kind, TxKind::Other("ATM_WITHDRAWAL".into()));
}
