//! Сборка выписки из нормализованных операций: хронологический порядок,
//! сверка остатков, итоги и полные строки выписки.

use crate::{
    error::{Result, VypiskaError},
    model::{
        Account, AmountDetails, DebitCredit, EntryTotals, Institution, Party, PartyAccount,
        Period, RelatedAgents, RelatedParties, Statement, StatementEntry, Transaction,
        SETTLEMENT_CURRENCY,
    },
    taxonomy,
};
use chrono::Utc;
use regex::Regex;
use rust_decimal::Decimal;

const SENDER_PATTERN: &str = r"(?i)^(?:Money added|Payment) from (.+)$";

/// Экспорт Revolut монотонен по дате, но направление бывает любым.
/// Если первая дата позже последней — файл «новые сверху», переворачиваем.
/// Сравниваются только две крайние записи; немонотонный вход не распознаётся.
pub fn order_chronological(rows: &mut [Transaction]) {
    if rows.len() >= 2 && rows[0].completed > rows[rows.len() - 1].completed {
        rows.reverse();
    }
}

/// Собирает агрегат выписки. Пустой список операций — фатальная ошибка:
/// без единой записи остатки вывести не из чего.
pub fn build(mut rows: Vec<Transaction>, account: Account) -> Result<Statement> {
    if rows.is_empty() {
        return Err(VypiskaError::Empty);
    }

    order_chronological(&mut rows);

    let mut from = rows[0].completed;
    let mut to = rows[0].completed;
    for tx in &rows {
        if tx.completed < from {
            from = tx.completed;
        }
        if tx.completed > to {
            to = tx.completed;
        }
    }

    // Колонка Balance — остаток сразу ПОСЛЕ операции.
    let opening_balance = rows[0].balance_after - rows[0].total_amount;
    let closing_balance = rows[rows.len() - 1].balance_after;

    let mut totals = EntryTotals {
        credit_count: 0,
        credit_sum: Decimal::ZERO,
        debit_count: 0,
        debit_sum: Decimal::ZERO,
    };
    for tx in &rows {
        if tx.total_amount >= Decimal::ZERO {
            totals.credit_count += 1;
            totals.credit_sum += tx.total_amount;
        } else {
            totals.debit_count += 1;
            totals.debit_sum += tx.total_amount.abs();
        }
    }

    let sender_re =
        Regex::new(SENDER_PATTERN).map_err(|e| VypiskaError::Parse(e.to_string()))?;

    let entries = rows
        .iter()
        .enumerate()
        .map(|(i, tx)| build_entry(i as u32 + 1, tx, &account, &sender_re))
        .collect();

    Ok(Statement {
        account,
        currency: SETTLEMENT_CURRENCY.to_string(),
        period: Period { from, to },
        created_at: Utc::now(),
        opening_balance,
        closing_balance,
        totals,
        entries,
    })
}

fn build_entry(
    seq: u32,
    tx: &Transaction,
    account: &Account,
    sender_re: &Regex,
) -> StatementEntry {
    let dc = if tx.total_amount >= Decimal::ZERO {
        DebitCredit::Credit
    } else {
        DebitCredit::Debit
    };
    let abs_amount = tx.total_amount.abs();

    // Валютная ветка: исходная сумма в чужой валюте, контрэквивалент —
    // сумма ДО комиссии в валюте счёта.
    let details = match &tx.fx {
        Some(fx) if fx.currency != tx.currency => AmountDetails::Exchange {
            currency: fx.currency.clone(),
            amount: fx.amount.abs(),
            counter_value: tx.raw_amount.abs(),
            rate: fx.rate,
        },
        _ => AmountDetails::Domestic { amount: abs_amount },
    };

    StatementEntry {
        seq,
        amount: abs_amount,
        currency: tx.currency.clone(),
        dc,
        booking_date: tx.completed,
        value_date: tx.completed,
        code: taxonomy::code(&tx.kind).to_string(),
        info: taxonomy::info(&tx.kind),
        tx_id: tx.tx_id.clone(),
        details,
        parties: related_parties(tx, dc, account, sender_re),
        agents: related_agents(tx, dc),
        remittance: remittance_text(tx),
        description: tx.description.clone(),
        balance_after: tx.balance_after,
    }
}

/// Роли сторон зависят от направления: по зачислению плательщик — отправитель
/// из описания, получатель — владелец счёта; по списанию плательщик — владелец,
/// сторона получателя не заполняется.
fn related_parties(
    tx: &Transaction,
    dc: DebitCredit,
    account: &Account,
    sender_re: &Regex,
) -> RelatedParties {
    match dc {
        DebitCredit::Credit => {
            let sender = extract_sender_name(sender_re, &tx.description);
            let debtor_account = if tx.beneficiary_iban.is_empty() {
                None
            } else {
                Some(PartyAccount {
                    iban: tx.beneficiary_iban.clone(),
                    name: sender.clone(),
                })
            };
            RelatedParties {
                debtor: Party {
                    name: sender,
                    address: Vec::new(),
                },
                debtor_account,
                creditor: Some(Party {
                    name: account.owner.clone(),
                    address: account.address.to_vec(),
                }),
                creditor_account: Some(PartyAccount {
                    iban: account.iban.clone(),
                    name: account.owner.clone(),
                }),
            }
        }
        DebitCredit::Debit => RelatedParties {
            debtor: Party {
                name: account.owner.clone(),
                address: account.address.to_vec(),
            },
            debtor_account: Some(PartyAccount {
                iban: account.iban.clone(),
                name: account.owner.clone(),
            }),
            creditor: None,
            creditor_account: None,
        },
    }
}

fn related_agents(tx: &Transaction, dc: DebitCredit) -> RelatedAgents {
    match dc {
        DebitCredit::Credit => RelatedAgents {
            // Банк отправителя известен только по BIC; без него — сервисер.
            debtor_agent: if tx.beneficiary_bic.is_empty() {
                Institution::servicer()
            } else {
                Institution {
                    bic: tx.beneficiary_bic.clone(),
                    name: None,
                }
            },
            creditor_agent: Some(Institution::servicer()),
        },
        DebitCredit::Debit => RelatedAgents {
            debtor_agent: Institution::servicer(),
            creditor_agent: None,
        },
    }
}

/// Описание и референс через «; », пустые куски опускаются;
/// если пусто и то и другое — ключ типа операции.
fn remittance_text(tx: &Transaction) -> String {
    let mut parts = Vec::new();
    if !tx.description.is_empty() {
        parts.push(tx.description.as_str());
    }
    if !tx.reference.is_empty() {
        parts.push(tx.reference.as_str());
    }
    if parts.is_empty() {
        tx.kind.key().to_string()
    } else {
        parts.join("; ")
    }
}

/// «Money added from X» / «Payment from X» -> «X»; иначе описание как есть.
fn extract_sender_name(re: &Regex, description: &str) -> String {
    match re.captures(description) {
        Some(caps) => caps[1].trim().to_string(),
        None => description.to_string(),
    }
}
