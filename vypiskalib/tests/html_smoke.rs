use chrono::NaiveDate;
use rust_decimal::Decimal;
use vypiskalib::{
    formats::html::HtmlReport,
    model::{Account, Transaction, TxKind},
    statement,
    traits::WriteFormat,
};

fn dec(s: &str) -> Decimal {
    Decimal::from_str_exact(s).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn tx(d: NaiveDate, kind: TxKind, desc: &str, total: &str, balance: &str) -> Transaction {
    Transaction {
        completed: d,
        kind,
        description: desc.into(),
        reference: String::new(),
        tx_id: String::new(),
        currency: "EUR".into(),
        total_amount: dec(total),
        raw_amount: dec(total),
        balance_after: dec(balance),
        beneficiary_iban: String::new(),
        beneficiary_bic: String::new(),
        fx: None,
    }
}

fn render(rows: Vec<Transaction>) -> String {
    let account = Account {
        iban: "LT601010012345678901".into(),
        owner: "Muller & Co s.r.o.".into(),
        address: ["Street number".into(), "City, Post Code".into()],
    };
    let st = statement::build(rows, account).expect("build");
    let mut buf = Vec::new();
    HtmlReport::write(&mut buf, &st).expect("write html");
    String::from_utf8(buf).expect("utf8")
}

#[test]
fn report_sections_present() {
    let html = render(vec![
        tx(date(2026, 1, 1), TxKind::Topup, "Money added from Jane Doe", "100.00", "500.00"),
        tx(date(2026, 1, 2), TxKind::CardPayment, "Grocery store", "-30.00", "470.00"),
    ]);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<h1>Revolut Bank UAB</h1>"));
    assert!(html.contains("Account Statement (camt.053)"));

    // владелец с экранированием
    assert!(html.contains("Muller &amp; Co s.r.o."));
    assert!(html.contains("LT601010012345678901"));
    assert!(html.contains("2026-01-01 to 2026-01-02"));

    // сводка: opening 400, closing 470, обороты по направлениям
    assert!(html.contains("Opening Balance"));
    assert!(html.contains("EUR 400.00"));
    assert!(html.contains("EUR +100.00 (1 transactions)"));
    assert!(html.contains("EUR -30.00 (1 transactions)"));
    assert!(html.contains("EUR 470.00"));

    // таблица операций: даты дд.мм.гггг, знак и остаток
    assert!(html.contains("Transaction Details"));
    assert!(html.contains("01.01.2026"));
    assert!(html.contains("02.01.2026"));
    assert!(html.contains(">+100.00<"));
    assert!(html.contains(">-30.00<"));
    assert!(html.contains(">470.00<"));
    assert!(html.contains("Prijata platba"));
    assert!(html.contains("Kartova transakcia"));

    assert!(html.contains("Generated on"));
    assert!(html.contains("2 transactions"));
}

#[test]
fn long_descriptions_are_truncated() {
    let long = "x".repeat(120);
    let html = render(vec![tx(
        date(2026, 1, 1),
        TxKind::CardPayment,
        &long,
        "-5.00",
        "95.00",
    )]);

    assert!(html.contains(&"x".repeat(80)));
    assert!(!html.contains(&"x".repeat(81)));
}
