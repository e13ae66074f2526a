use crate::{
    amount::format_amount,
    error::{Result, VypiskaError},
    model::{
        AmountDetails, DebitCredit, Institution, RelatedAgents, RelatedParties, Statement,
        StatementEntry, SERVICER_BIC, SERVICER_COUNTRY, SERVICER_NAME,
    },
    traits::WriteFormat,
};
use quick_xml::{
    events::{BytesDecl, BytesStart, BytesText, Event},
    Writer,
};
use rust_decimal::Decimal;
use std::io::Write;

const NAMESPACE: &str = "urn:iso:std:iso:20022:tech:xsd:camt.053.001.02";
const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str =
    "urn:iso:std:iso:20022:tech:xsd:camt.053.001.02 camt.053.001.02.xsd";

/// Периодичность выписки в GrpHdr/AddtlInf — так её помечает ЦСОБ.
const STATEMENT_CYCLE: &str = "mesacny";

const CREATED_FMT: &str = "%Y-%m-%dT%H:%M:%S.0+00:00";

pub struct Camt053;

impl WriteFormat for Camt053 {
    fn write<W: Write>(mut w: W, st: &Statement) -> Result<()> {
        let mut wr = Writer::new_with_indent(&mut w, b' ', 2);

        wr.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml)?;

        let mut doc = BytesStart::new("Document");
        doc.push_attribute(("xmlns", NAMESPACE));
        doc.push_attribute(("xmlns:xsi", XSI));
        doc.push_attribute(("xsi:schemaLocation", SCHEMA_LOCATION));
        wr.write_event(Event::Start(doc)).map_err(xml)?;

        open(&mut wr, "BkToCstmrStmt").map_err(xml)?;
        write_group_header(&mut wr, st).map_err(xml)?;
        write_statement(&mut wr, st).map_err(xml)?;
        close(&mut wr, "BkToCstmrStmt").map_err(xml)?;
        close(&mut wr, "Document").map_err(xml)?;
        Ok(())
    }
}

type XmlResult<T> = std::result::Result<T, quick_xml::Error>;

fn write_group_header<W: Write>(wr: &mut Writer<W>, st: &Statement) -> XmlResult<()> {
    open(wr, "GrpHdr")?;
    let msg_id = format!(
        "{}-{}-{}-{}",
        SERVICER_BIC,
        iban_tail(&st.account.iban),
        st.created_at.format("%y%m%d"),
        st.created_at.format("%H%M%S"),
    );
    el(wr, "MsgId", &msg_id)?;
    el(wr, "CreDtTm", &st.created_at.format(CREATED_FMT).to_string())?;
    open(wr, "MsgPgntn")?;
    el(wr, "PgNb", "1")?;
    el(wr, "LastPgInd", "true")?;
    close(wr, "MsgPgntn")?;
    el(wr, "AddtlInf", STATEMENT_CYCLE)?;
    close(wr, "GrpHdr")
}

fn write_statement<W: Write>(wr: &mut Writer<W>, st: &Statement) -> XmlResult<()> {
    open(wr, "Stmt")?;
    let stmt_id = format!(
        "{}-{}-{}",
        st.account.iban,
        st.period.from.format("%y%m%d"),
        st.period.to.format("%y%m%d"),
    );
    el(wr, "Id", &stmt_id)?;
    el(wr, "ElctrncSeqNb", "1")?;
    el(wr, "LglSeqNb", "1")?;
    el(wr, "CreDtTm", &st.created_at.format(CREATED_FMT).to_string())?;

    open(wr, "FrToDt")?;
    el(
        wr,
        "FrDtTm",
        &format!("{}T00:00:00.0+00:00", st.period.from.format("%Y-%m-%d")),
    )?;
    el(
        wr,
        "ToDtTm",
        &format!("{}T23:59:59.9+00:00", st.period.to.format("%Y-%m-%d")),
    )?;
    close(wr, "FrToDt")?;

    write_account(wr, st)?;
    write_balance(wr, "PRCD", st.opening_balance, st)?;
    write_balance(wr, "CLBD", st.closing_balance, st)?;
    write_summary(wr, st)?;

    for e in &st.entries {
        write_entry(wr, e)?;
    }

    close(wr, "Stmt")
}

fn write_account<W: Write>(wr: &mut Writer<W>, st: &Statement) -> XmlResult<()> {
    open(wr, "Acct")?;
    open(wr, "Id")?;
    el(wr, "IBAN", &st.account.iban)?;
    close(wr, "Id")?;
    open(wr, "Tp")?;
    el(wr, "Cd", "CACC")?;
    close(wr, "Tp")?;
    el(wr, "Ccy", &st.currency)?;
    el(wr, "Nm", &st.account.owner)?;

    open(wr, "Ownr")?;
    el(wr, "Nm", &st.account.owner)?;
    open(wr, "PstlAdr")?;
    el(wr, "AdrLine", &st.account.address[0])?;
    el(wr, "AdrLine", &st.account.address[1])?;
    el(wr, "AdrLine", "LITHUANIA")?;
    close(wr, "PstlAdr")?;
    close(wr, "Ownr")?;

    open(wr, "Svcr")?;
    open(wr, "FinInstnId")?;
    el(wr, "BIC", SERVICER_BIC)?;
    el(wr, "Nm", SERVICER_NAME)?;
    open(wr, "PstlAdr")?;
    el(wr, "Ctry", SERVICER_COUNTRY)?;
    close(wr, "PstlAdr")?;
    close(wr, "FinInstnId")?;
    close(wr, "Svcr")?;
    close(wr, "Acct")
}

/// PRCD — остаток на начало периода, CLBD — на конец.
fn write_balance<W: Write>(
    wr: &mut Writer<W>,
    code: &str,
    amount: Decimal,
    st: &Statement,
) -> XmlResult<()> {
    let date = if code == "PRCD" {
        st.period.from
    } else {
        st.period.to
    };

    open(wr, "Bal")?;
    open(wr, "Tp")?;
    open(wr, "CdOrPrtry")?;
    el(wr, "Cd", code)?;
    close(wr, "CdOrPrtry")?;
    close(wr, "Tp")?;
    amt_el(wr, &st.currency, amount.abs())?;
    el(wr, "CdtDbtInd", dc_text_signed(amount))?;
    open(wr, "Dt")?;
    el(wr, "Dt", &date.format("%Y-%m-%d").to_string())?;
    close(wr, "Dt")?;
    close(wr, "Bal")
}

fn write_summary<W: Write>(wr: &mut Writer<W>, st: &Statement) -> XmlResult<()> {
    let t = &st.totals;

    open(wr, "TxsSummry")?;
    open(wr, "TtlNtries")?;
    el(wr, "NbOfNtries", &st.entries.len().to_string())?;
    el(wr, "Sum", &format_amount(t.gross()))?;
    el(wr, "TtlNetNtryAmt", &format_amount(t.net().abs()))?;
    el(wr, "CdtDbtInd", dc_text_signed(t.net()))?;
    close(wr, "TtlNtries")?;

    open(wr, "TtlCdtNtries")?;
    el(wr, "NbOfNtries", &t.credit_count.to_string())?;
    el(wr, "Sum", &format_amount(t.credit_sum))?;
    close(wr, "TtlCdtNtries")?;

    open(wr, "TtlDbtNtries")?;
    el(wr, "NbOfNtries", &t.debit_count.to_string())?;
    el(wr, "Sum", &format_amount(t.debit_sum))?;
    close(wr, "TtlDbtNtries")?;
    close(wr, "TxsSummry")
}

fn write_entry<W: Write>(wr: &mut Writer<W>, e: &StatementEntry) -> XmlResult<()> {
    let seq = e.seq.to_string();

    open(wr, "Ntry")?;
    el(wr, "NtryRef", &seq)?;
    amt_el(wr, &e.currency, e.amount)?;
    el(wr, "CdtDbtInd", dc_text(e.dc))?;
    el(wr, "RvslInd", "false")?;
    el(wr, "Sts", "BOOK")?;

    open(wr, "BookgDt")?;
    el(wr, "Dt", &e.booking_date.format("%Y-%m-%d").to_string())?;
    close(wr, "BookgDt")?;
    open(wr, "ValDt")?;
    el(wr, "Dt", &e.value_date.format("%Y-%m-%d").to_string())?;
    close(wr, "ValDt")?;

    write_tx_code(wr, &e.code)?;

    open(wr, "NtryDtls")?;
    open(wr, "TxDtls")?;

    open(wr, "Refs")?;
    el(wr, "AcctSvcrRef", &seq)?;
    el(wr, "TxId", &e.tx_id)?;
    close(wr, "Refs")?;

    write_amount_details(wr, e)?;
    write_tx_code(wr, &e.code)?;
    write_parties(wr, &e.parties)?;
    write_agents(wr, &e.agents)?;

    open(wr, "RmtInf")?;
    el(wr, "Ustrd", &e.remittance)?;
    close(wr, "RmtInf")?;

    el(wr, "AddtlTxInf", &e.info)?;

    close(wr, "TxDtls")?;
    close(wr, "NtryDtls")?;
    close(wr, "Ntry")
}

fn write_tx_code<W: Write>(wr: &mut Writer<W>, code: &str) -> XmlResult<()> {
    open(wr, "BkTxCd")?;
    open(wr, "Prtry")?;
    el(wr, "Cd", code)?;
    el(wr, "Issr", "SBA")?;
    close(wr, "Prtry")?;
    close(wr, "BkTxCd")
}

fn write_amount_details<W: Write>(wr: &mut Writer<W>, e: &StatementEntry) -> XmlResult<()> {
    open(wr, "AmtDtls")?;
    match &e.details {
        AmountDetails::Exchange {
            currency,
            amount,
            counter_value,
            rate,
        } => {
            open(wr, "InstdAmt")?;
            amt_el(wr, currency, *amount)?;
            close(wr, "InstdAmt")?;

            open(wr, "CntrValAmt")?;
            amt_el(wr, &e.currency, *counter_value)?;
            open(wr, "CcyXchg")?;
            el(wr, "SrcCcy", currency)?;
            el(wr, "TrgtCcy", &e.currency)?;
            el(wr, "XchgRate", &rate.to_string())?;
            close(wr, "CcyXchg")?;
            close(wr, "CntrValAmt")?;
        }
        AmountDetails::Domestic { amount } => {
            open(wr, "InstdAmt")?;
            amt_el(wr, &e.currency, *amount)?;
            close(wr, "InstdAmt")?;
        }
    }
    close(wr, "AmtDtls")
}

fn write_parties<W: Write>(wr: &mut Writer<W>, p: &RelatedParties) -> XmlResult<()> {
    open(wr, "RltdPties")?;

    open(wr, "Dbtr")?;
    el(wr, "Nm", &p.debtor.name)?;
    write_address(wr, &p.debtor.address)?;
    close(wr, "Dbtr")?;

    if let Some(acct) = &p.debtor_account {
        open(wr, "DbtrAcct")?;
        open(wr, "Id")?;
        el(wr, "IBAN", &acct.iban)?;
        close(wr, "Id")?;
        el(wr, "Nm", &acct.name)?;
        close(wr, "DbtrAcct")?;
    }

    if let Some(creditor) = &p.creditor {
        open(wr, "Cdtr")?;
        el(wr, "Nm", &creditor.name)?;
        write_address(wr, &creditor.address)?;
        close(wr, "Cdtr")?;
    }

    if let Some(acct) = &p.creditor_account {
        open(wr, "CdtrAcct")?;
        open(wr, "Id")?;
        el(wr, "IBAN", &acct.iban)?;
        close(wr, "Id")?;
        el(wr, "Nm", &acct.name)?;
        close(wr, "CdtrAcct")?;
    }

    close(wr, "RltdPties")
}

fn write_address<W: Write>(wr: &mut Writer<W>, lines: &[String]) -> XmlResult<()> {
    if lines.is_empty() {
        return Ok(());
    }
    open(wr, "PstlAdr")?;
    for line in lines {
        el(wr, "AdrLine", line)?;
    }
    close(wr, "PstlAdr")
}

fn write_agents<W: Write>(wr: &mut Writer<W>, a: &RelatedAgents) -> XmlResult<()> {
    open(wr, "RltdAgts")?;
    open(wr, "DbtrAgt")?;
    write_institution(wr, &a.debtor_agent)?;
    close(wr, "DbtrAgt")?;
    if let Some(agent) = &a.creditor_agent {
        open(wr, "CdtrAgt")?;
        write_institution(wr, agent)?;
        close(wr, "CdtrAgt")?;
    }
    close(wr, "RltdAgts")
}

fn write_institution<W: Write>(wr: &mut Writer<W>, i: &Institution) -> XmlResult<()> {
    open(wr, "FinInstnId")?;
    el(wr, "BIC", &i.bic)?;
    if let Some(name) = &i.name {
        el(wr, "Nm", name)?;
    }
    close(wr, "FinInstnId")
}

/* --------------------------- мелкие помощники ---------------------------- */

fn open<W: Write>(wr: &mut Writer<W>, name: &str) -> XmlResult<()> {
    wr.write_event(Event::Start(BytesStart::new(name)))
}

fn close<W: Write>(wr: &mut Writer<W>, name: &str) -> XmlResult<()> {
    wr.write_event(Event::End(BytesStart::new(name).to_end()))
}

fn el<W: Write>(wr: &mut Writer<W>, name: &str, text: &str) -> XmlResult<()> {
    open(wr, name)?;
    wr.write_event(Event::Text(BytesText::new(text)))?;
    close(wr, name)
}

/// <Amt Ccy="...">сумма в две цифры</Amt>
fn amt_el<W: Write>(wr: &mut Writer<W>, ccy: &str, amount: Decimal) -> XmlResult<()> {
    wr.write_event(Event::Start(
        BytesStart::new("Amt").with_attributes([("Ccy", ccy)]),
    ))?;
    wr.write_event(Event::Text(BytesText::new(&format_amount(amount))))?;
    close(wr, "Amt")
}

fn dc_text(dc: DebitCredit) -> &'static str {
    match dc {
        DebitCredit::Credit => "CRDT",
        DebitCredit::Debit => "DBIT",
    }
}

fn dc_text_signed(amount: Decimal) -> &'static str {
    if amount >= Decimal::ZERO {
        "CRDT"
    } else {
        "DBIT"
    }
}

/// Последние четыре знака IBAN для идентификатора сообщения.
fn iban_tail(iban: &str) -> &str {
    match iban.char_indices().rev().nth(3) {
        Some((i, _)) => &iban[i..],
        None => iban,
    }
}

fn xml<E: std::fmt::Display>(e: E) -> VypiskaError {
    VypiskaError::Xml(e.to_string())
}
