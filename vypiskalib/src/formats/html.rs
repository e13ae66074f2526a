//! HTML-отчёт по выписке: шапка счёта, сводка остатков, полная таблица
//! операций. Чисто презентационный слой — все значения берутся из агрегата
//! как есть, ничего не пересчитывается.

use crate::{
    amount::format_amount,
    error::Result,
    model::{DebitCredit, Statement, SERVICER_BIC, SERVICER_NAME},
    traits::WriteFormat,
};
use std::borrow::Cow;
use std::fmt::Write as FmtWrite;
use std::io::Write;

const HEADER_BG: &str = "#2C3E50";
const CREDIT_TEXT: &str = "#1B7A2B";
const DEBIT_TEXT: &str = "#C0392B";
const ROW_BG_ALT: &str = "#F7F8FA";
const GRID: &str = "#DDDDDD";
const RULE: &str = "#333333";
const MUTED: &str = "#888888";

const DESCRIPTION_LIMIT: usize = 80;

pub struct HtmlReport;

impl WriteFormat for HtmlReport {
    fn write<W: Write>(mut w: W, st: &Statement) -> Result<()> {
        w.write_all(render(st).as_bytes())?;
        Ok(())
    }
}

fn render(st: &Statement) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html lang=\"en\">");
    let _ = writeln!(out, "<head>");
    let _ = writeln!(out, "<meta charset=\"utf-8\">");
    let _ = writeln!(
        out,
        "<title>{} — Account Statement</title>",
        escape_html(&st.account.owner)
    );
    write_style(&mut out);
    let _ = writeln!(out, "</head>");
    let _ = writeln!(out, "<body>");

    let _ = writeln!(out, "<h1>{SERVICER_NAME}</h1>");
    let _ = writeln!(out, "<p class=\"subtitle\">Account Statement (camt.053)</p>");
    let _ = writeln!(out, "<hr>");

    write_account_info(&mut out, st);
    write_balance_summary(&mut out, st);
    write_transactions(&mut out, st);

    let _ = writeln!(out, "<hr class=\"light\">");
    let _ = writeln!(
        out,
        "<p class=\"footer\">Generated on {} &bull; {} transactions &bull; {} &bull; {}</p>",
        st.created_at.format("%Y-%m-%d %H:%M UTC"),
        st.entries.len(),
        SERVICER_NAME,
        escape_html(&st.account.iban),
    );

    let _ = writeln!(out, "</body>");
    let _ = writeln!(out, "</html>");
    out
}

fn write_style(out: &mut String) {
    let _ = writeln!(out, "<style>");
    let _ = writeln!(
        out,
        "body {{ font-family: Helvetica, Arial, sans-serif; font-size: 13px; \
         color: #1a1a1a; max-width: 900px; margin: 24px auto; }}"
    );
    let _ = writeln!(out, "h1 {{ font-size: 22px; margin-bottom: 2px; }}");
    let _ = writeln!(
        out,
        "h2 {{ font-size: 15px; color: {RULE}; margin: 18px 0 6px; }}"
    );
    let _ = writeln!(out, "p.subtitle {{ margin-top: 0; }}");
    let _ = writeln!(out, "hr {{ border: none; border-top: 1px solid {RULE}; }}");
    let _ = writeln!(
        out,
        "hr.light {{ border-top: 1px solid {GRID}; margin-top: 24px; }}"
    );
    let _ = writeln!(out, "table {{ border-collapse: collapse; width: 100%; }}");
    let _ = writeln!(out, "table.info td, table.info th {{ padding: 2px 8px 2px 0; }}");
    let _ = writeln!(
        out,
        "table.info th, table.balances th {{ text-align: left; white-space: nowrap; }}"
    );
    let _ = writeln!(
        out,
        "table.balances {{ max-width: 480px; }} \
         table.balances td {{ text-align: right; padding: 3px 0; }}"
    );
    let _ = writeln!(
        out,
        "table.balances tr.closing {{ font-weight: bold; border-top: 1px solid {RULE}; }}"
    );
    let _ = writeln!(
        out,
        "table.txs th {{ background: {HEADER_BG}; color: #fff; text-align: left; \
         padding: 4px 6px; }}"
    );
    let _ = writeln!(
        out,
        "table.txs td {{ border: 1px solid {GRID}; padding: 3px 6px; }}"
    );
    let _ = writeln!(out, "table.txs tr.alt {{ background: {ROW_BG_ALT}; }}");
    let _ = writeln!(out, ".num {{ text-align: right; }}");
    let _ = writeln!(out, ".credit {{ color: {CREDIT_TEXT}; }}");
    let _ = writeln!(out, ".debit {{ color: {DEBIT_TEXT}; }}");
    let _ = writeln!(out, "p.footer {{ color: {MUTED}; text-align: center; }}");
    let _ = writeln!(out, "</style>");
}

fn write_account_info(out: &mut String, st: &Statement) {
    let _ = writeln!(out, "<table class=\"info\">");
    info_row(out, "Account Owner:", &st.account.owner);
    info_row(out, "IBAN:", &st.account.iban);
    info_row(
        out,
        "Address:",
        &format!("{}, {}", st.account.address[0], st.account.address[1]),
    );
    info_row(
        out,
        "Bank:",
        &format!("{SERVICER_NAME} (BIC: {SERVICER_BIC})"),
    );
    info_row(out, "Currency:", &st.currency);
    info_row(
        out,
        "Statement Period:",
        &format!("{} to {}", st.period.from, st.period.to),
    );
    let _ = writeln!(out, "</table>");
}

fn info_row(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(
        out,
        "<tr><th>{}</th><td>{}</td></tr>",
        label,
        escape_html(value)
    );
}

fn write_balance_summary(out: &mut String, st: &Statement) {
    let ccy = &st.currency;
    let t = &st.totals;

    let _ = writeln!(out, "<h2>Balance Summary</h2>");
    let _ = writeln!(out, "<table class=\"balances\">");
    let _ = writeln!(
        out,
        "<tr><th>Opening Balance:</th><td>{ccy} {}</td></tr>",
        format_amount(st.opening_balance)
    );
    let _ = writeln!(
        out,
        "<tr><th>Total Credits:</th><td class=\"credit\">{ccy} +{} ({} transactions)</td></tr>",
        format_amount(t.credit_sum),
        t.credit_count
    );
    let _ = writeln!(
        out,
        "<tr><th>Total Debits:</th><td class=\"debit\">{ccy} -{} ({} transactions)</td></tr>",
        format_amount(t.debit_sum),
        t.debit_count
    );
    let _ = writeln!(
        out,
        "<tr class=\"closing\"><th>Closing Balance:</th><td>{ccy} {}</td></tr>",
        format_amount(st.closing_balance)
    );
    let _ = writeln!(out, "</table>");
}

fn write_transactions(out: &mut String, st: &Statement) {
    let _ = writeln!(out, "<h2>Transaction Details</h2>");
    let _ = writeln!(out, "<table class=\"txs\">");
    let _ = writeln!(
        out,
        "<thead><tr><th>#</th><th>Date</th><th>Description</th><th>Type</th>\
         <th class=\"num\">Amount</th><th class=\"num\">Balance</th></tr></thead>"
    );
    let _ = writeln!(out, "<tbody>");

    for e in &st.entries {
        let (class, sign) = match e.dc {
            DebitCredit::Credit => ("credit", '+'),
            DebitCredit::Debit => ("debit", '-'),
        };
        let row_class = if e.seq % 2 == 0 { " class=\"alt\"" } else { "" };
        let _ = writeln!(
            out,
            "<tr{row_class}><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td class=\"num {class}\">{sign}{}</td><td class=\"num\">{}</td></tr>",
            e.seq,
            e.booking_date.format("%d.%m.%Y"),
            escape_html(&shorten(&e.description)),
            escape_html(&e.info),
            format_amount(e.amount),
            format_amount(e.balance_after),
        );
    }

    let _ = writeln!(out, "</tbody>");
    let _ = writeln!(out, "</table>");
}

fn shorten(s: &str) -> String {
    if s.chars().count() <= DESCRIPTION_LIMIT {
        s.to_string()
    } else {
        s.chars().take(DESCRIPTION_LIMIT).collect()
    }
}

fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 10);
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}
