//! # Drawer Commands
//!
//! What the operator counted: unit counts, damaged money, extra entries.
//!
//! All three accept half-typed input the way the counting form does. A
//! count of `abc` is 0, a negative count is 0, a damaged amount of `-5` is
//! R$ 0,00. Only the denomination value and the extra id must name
//! something that exists.

use tesouraria_core::validation::{parse_amount, parse_count};
use tesouraria_core::{DamagedField, ExtraId, ExtraUpdate};
use tracing::{debug, info, warn};

use super::{parse_value, Outcome};
use crate::error::CliError;
use crate::state::SessionState;

/// Sets the physical count of one denomination.
///
/// ## User Workflow
/// ```text
/// > count 100 3
/// R$ 100 × 3 = R$ 300,00
///
/// > count 3 1
/// error [NOT_FOUND]: Denomination not found: R$ 3,00
/// ```
pub fn set_count(session: &mut SessionState, value: &str, count: &str) -> Result<Outcome, CliError> {
    debug!(value = %value, count = %count, "count command");

    let value = parse_value(value)?;
    let count = parse_count(count);

    let store = session.store_mut();
    if !store.set_count(value, count) {
        warn!(%value, "Count ignored: denomination not configured");
        return Err(CliError::not_found("Denomination", value));
    }

    info!(%value, count, version = store.version(), "Physical count set");

    let label = store.label_for(value);
    let reply = match store.totals().line(value) {
        Some(line) if line.adjustment != 0 => format!(
            "{} × {} = {} (efetivo {} após movimentações)",
            label, count, line.line_total, line.effective_count
        ),
        Some(line) => format!("{} × {} = {}", label, count, line.line_total),
        None => format!("{} × {}", label, count),
    };
    Ok(Outcome::Reply(reply))
}

/// Sets the damaged notes or coins amount. Negative amounts are stored as zero.
pub fn set_damaged(
    session: &mut SessionState,
    field: DamagedField,
    amount: &str,
) -> Result<Outcome, CliError> {
    debug!(?field, amount = %amount, "damaged command");

    let store = session.store_mut();
    store.set_damaged(field, parse_amount(amount));

    let stored = store.damaged().get(field);
    info!(?field, amount = %stored, version = store.version(), "Damaged amount set");

    let name = match field {
        DamagedField::Notes => "cédulas",
        DamagedField::Coins => "moedas",
    };
    Ok(Outcome::Reply(format!(
        "Avariadas {}: {} (total avariadas {})",
        name,
        stored,
        store.totals().damaged_total
    )))
}

pub fn set_extra_description(
    session: &mut SessionState,
    id: u32,
    description: &str,
) -> Result<Outcome, CliError> {
    debug!(id, description = %description, "extra description command");

    let id = ExtraId(id);
    let store = session.store_mut();
    if !store.set_extra_field(id, ExtraUpdate::Description(description.to_string())) {
        warn!(%id, "Extra edit ignored: no such entry");
        return Err(CliError::not_found("Extra entry", id));
    }

    info!(%id, version = store.version(), "Extra description set");
    Ok(Outcome::Reply(format!("[{}] {}", id, description)))
}

/// Sets an extra entry's value. Unlike damaged amounts, the sign is kept.
pub fn set_extra_value(session: &mut SessionState, id: u32, amount: &str) -> Result<Outcome, CliError> {
    debug!(id, amount = %amount, "extra value command");

    let id = ExtraId(id);
    let value = parse_amount(amount);
    let store = session.store_mut();
    if !store.set_extra_field(id, ExtraUpdate::Value(value)) {
        warn!(%id, "Extra edit ignored: no such entry");
        return Err(CliError::not_found("Extra entry", id));
    }

    info!(%id, %value, version = store.version(), "Extra value set");
    Ok(Outcome::Reply(format!(
        "[{}] {} (total extras {})",
        id,
        value,
        store.totals().extras_total
    )))
}

// =============================================================================
// Unit Tests
// =============================================================================
