//! # Rendering
//!
//! Turns the session into what the operator reads.
//!
//! ## Session Report (`show`)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Sessão v4 (iniciada 2026-10-19 08:02 UTC)                              │
//! │                                                                         │
//! │  Cédulas                                                                │
//! │    Valor          Físico  Ajuste  Efetivo            Total              │
//! │    R$ 200              0       0        0          R$ 0,00              │
//! │    R$ 100              1      -3        0          R$ 0,00  !           │
//! │    ...                                                                  │
//! │  Moedas                                                                 │
//! │    ...                                                                  │
//! │  Avariadas    cédulas R$ 0,00    moedas R$ 0,00                         │
//! │  Entradas extras                                                        │
//! │    [1] Entrada Extra 1                             R$ 0,00              │
//! │  Movimentações                                                          │
//! │    #1  saída      3 × R$ 100       R$ 300,00  Sangria                   │
//! │  Resumo                                                                 │
//! │    Total geral                                   R$ 105,00              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `--json` output is the serialized [`LedgerSnapshot`] and [`Totals`].

use std::fmt::Write as _;

use serde::Serialize;
use tesouraria_core::{
    Category, DenominationTable, Direction, ExtraEntry, LedgerSnapshot, LedgerStore, Totals,
    Transaction, TransactionDraft,
};

use crate::error::CliError;
use crate::state::SessionState;

const MONEY_WIDTH: usize = 16;

/// JSON shape of `show --json`.
#[derive(Debug, Serialize)]
pub struct SessionView<'a> {
    pub snapshot: LedgerSnapshot,
    pub totals: &'a Totals,
}

impl<'a> SessionView<'a> {
    pub fn of(store: &'a LedgerStore) -> Self {
        SessionView {
            snapshot: store.snapshot(),
            totals: store.totals(),
        }
    }
}

/// Pretty-printed JSON of any serializable view.
pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Portuguese label for a direction, as shown in reports.
pub fn direction_label(direction: Direction) -> &'static str {
    match direction {
        Direction::In => "entrada",
        Direction::Out => "saída",
    }
}

/// Full session report.
pub fn session(session: &SessionState) -> String {
    let store = session.store();
    let totals = store.totals();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Sessão v{} (iniciada {})",
        store.version(),
        session.started_at().format("%Y-%m-%d %H:%M UTC")
    );
    out.push('\n');
    out.push_str(&counts(totals));

    let damaged = store.damaged();
    let _ = writeln!(
        out,
        "Avariadas    cédulas {}    moedas {}",
        damaged.notes_value, damaged.coins_value
    );
    out.push_str(&extras(store.extras()));
    out.push_str(&transactions(store, store.transactions()));
    out.push_str(&summary(totals));
    out
}

/// The per-denomination grid, grouped by category.
pub fn counts(totals: &Totals) -> String {
    let mut out = String::new();

    for category in [Category::Note, Category::Coin] {
        let mut lines = totals.lines.iter().filter(|l| l.category == category).peekable();
        if lines.peek().is_none() {
            continue;
        }

        let _ = writeln!(out, "{}", category.heading());
        let _ = writeln!(
            out,
            "  {:<12} {:>6} {:>7} {:>8} {:>w$}",
            "Valor",
            "Físico",
            "Ajuste",
            "Efetivo",
            "Total",
            w = MONEY_WIDTH
        );
        for line in lines {
            let flag = if line.over_withdrawn { "  !" } else { "" };
            let _ = writeln!(
                out,
                "  {:<12} {:>6} {:>7} {:>8} {:>w$}{}",
                line.label,
                line.physical_count,
                signed(line.adjustment),
                line.effective_count,
                line.line_total.to_string(),
                flag,
                w = MONEY_WIDTH
            );
        }
    }

    out
}

pub fn extras(extras: &[ExtraEntry]) -> String {
    let mut out = String::from("Entradas extras\n");
    for extra in extras {
        let _ = writeln!(
            out,
            "  [{}] {:<30} {:>w$}",
            extra.id,
            extra.description,
            extra.value.to_string(),
            w = MONEY_WIDTH
        );
    }
    out
}

pub fn transactions(store: &LedgerStore, transactions: &[Transaction]) -> String {
    let mut out = String::from("Movimentações\n");
    if transactions.is_empty() {
        out.push_str("  (nenhuma)\n");
        return out;
    }

    for tx in transactions {
        let _ = writeln!(
            out,
            "  {:<5} {:<8} {:>5} × {:<10} {:>w$}  {}",
            tx.id.to_string(),
            direction_label(tx.direction),
            tx.quantity,
            store.label_for(tx.denomination_value),
            tx.total_value.to_string(),
            tx.description,
            w = MONEY_WIDTH
        );
    }
    out
}

/// The summary card.
pub fn summary(totals: &Totals) -> String {
    let rows = [
        ("Cédulas", totals.notes_total),
        ("Moedas", totals.coins_total),
        ("Avariadas", totals.damaged_total),
        ("Dinheiro físico", totals.physical_total),
        ("Entradas extras", totals.extras_total),
        ("Total geral", totals.grand_total),
    ];

    let mut out = String::from("Resumo\n");
    for (label, amount) in rows {
        let _ = writeln!(out, "  {:<20} {:>w$}", label, amount.to_string(), w = MONEY_WIDTH);
    }
    let _ = writeln!(
        out,
        "  (movimentações: entradas {}, saídas {})",
        totals.inflow_total, totals.outflow_total
    );

    for line in totals.over_withdrawn() {
        let _ = writeln!(
            out,
            "  ! {}: saídas acima do contado, considerado 0",
            line.label
        );
    }
    out
}

pub fn draft(store: &LedgerStore, draft: &TransactionDraft) -> String {
    format!(
        "Rascunho: {} {} quantidade \"{}\" descrição \"{}\"",
        direction_label(draft.direction),
        store.label_for(draft.denomination_value),
        draft.quantity,
        draft.description
    )
}

pub fn denominations(table: &DenominationTable) -> String {
    let mut out = String::new();
    for category in [Category::Note, Category::Coin] {
        let values: Vec<_> = table
            .in_category(category)
            .map(|d| format!("{} ({})", d.label, d.value.to_decimal_string()))
            .collect();
        if !values.is_empty() {
            let _ = writeln!(out, "{}: {}", category.heading(), values.join(", "));
        }
    }
    out
}

fn signed(n: i64) -> String {
    if n == 0 {
        "0".to_string()
    } else {
        format!("{:+}", n)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tesouraria_core::Money;

    fn reais(n: i64) -> Money {
        Money::from_cents(n * 100)
    }

    #[test]
    fn test_summary_lists_every_total() {
        let mut store = LedgerStore::new(DenominationTable::brl());
        store.set_count(reais(100), 1);
        store.set_count(reais(5), 1);

        let text = summary(store.totals());
        assert!(text.contains("Cédulas"));
        assert!(text.contains("R$ 105,00"));
        assert!(!text.contains('!'));
    }

    #[test]
    fn test_over_withdrawal_is_flagged() {
        let mut store = LedgerStore::new(DenominationTable::brl());
        store.add_transaction("Sangria", reais(100), 2, Direction::Out).unwrap();

        let grid = counts(store.totals());
        let row = grid.lines().find(|l| l.trim_start().starts_with("R$ 100 ")).unwrap();
        assert!(row.contains("-2"));
        assert!(row.ends_with('!'));

        assert!(summary(store.totals()).contains("! R$ 100"));
    }

    #[test]
    fn test_transactions_report() {
        let mut store = LedgerStore::new(DenominationTable::brl());
        assert!(transactions(&store, store.transactions()).contains("(nenhuma)"));

        store.add_transaction("Troco", reais(20), 3, Direction::In).unwrap();
        let text = transactions(&store, store.transactions());
        assert!(text.contains("#1"));
        assert!(text.contains("entrada"));
        assert!(text.contains("R$ 60,00"));
        assert!(text.contains("Troco"));
    }

    #[test]
    fn test_denominations_listing() {
        let text = denominations(&DenominationTable::brl());
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("Cédulas: R$ 200 (200.00)"));
        assert!(lines.next().unwrap().contains("R$ 0,05 (0.05)"));
    }

    #[test]
    fn test_session_view_json() {
        let store = LedgerStore::new(DenominationTable::brl());
        let text = json(&SessionView::of(&store)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["snapshot"]["version"], 0);
        assert_eq!(value["totals"]["lines"].as_array().unwrap().len(), 12);
    }
}
