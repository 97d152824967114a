use crate::Map;
use crate::types::{IndexTuple, Model, VarKey, VarKind};
use std::io::Write;

/// Export the assembled model in CPLEX LP format.
///
/// Variable names flatten the key: quantity label, then `t{hour}`,
/// `j{sub-interval}`, and `s{unit}`/`w{unit}` as the index carries them.
/// Rows are named by family with a per-family counter in emission order.
/// The text loads into any LP-reading solver, which is the escape hatch for
/// inspecting a surprising model outside this crate.
pub fn export_lp(model: &Model, buffer: &mut impl Write) -> Result<(), std::io::Error> {
    let registry = model.variables();
    let names = registry
        .iter()
        .map(|(_, info)| lp_name(&info.key))
        .collect::<Vec<_>>();

    writeln!(buffer, "\\ {}", model.name())?;

    writeln!(buffer, "Maximize")?;
    let mut objective = String::new();
    for &(id, coefficient) in &model.objective().terms {
        append_term(&mut objective, coefficient, &names[id.as_usize()]);
    }
    writeln!(buffer, " obj:{objective}")?;

    writeln!(buffer, "Subject To")?;
    let mut counters = Map::default();
    for row in model.constraints() {
        let ordinal = counters.entry(row.family).or_insert(0usize);
        *ordinal += 1;
        let mut body = String::new();
        for &(id, coefficient) in &row.terms {
            append_term(&mut body, coefficient, &names[id.as_usize()]);
        }
        writeln!(
            buffer,
            " {}_{}:{} {} {}",
            row.family.label(),
            ordinal,
            body,
            row.sense,
            row.rhs
        )?;
    }

    // Continuous variables default to [0, +inf) in LP format, so only
    // departures from that need a record.
    writeln!(buffer, "Bounds")?;
    for (id, info) in registry.iter() {
        if info.kind != VarKind::Continuous {
            continue;
        }
        let name = &names[id.as_usize()];
        match (info.lower != 0.0, info.upper.is_finite()) {
            (false, false) => {}
            (false, true) => writeln!(buffer, " {name} <= {}", info.upper)?,
            (true, false) => writeln!(buffer, " {name} >= {}", info.lower)?,
            (true, true) => writeln!(buffer, " {} <= {name} <= {}", info.lower, info.upper)?,
        }
    }

    writeln!(buffer, "Binaries")?;
    for (id, info) in registry.iter() {
        if info.kind == VarKind::Binary {
            writeln!(buffer, " {}", names[id.as_usize()])?;
        }
    }

    writeln!(buffer, "End")?;
    Ok(())
}

/// `quantity_t{hour}[_j{sub}][_s{unit}|_w{unit}]`, safe for LP identifiers.
fn lp_name(key: &VarKey) -> String {
    let label = key.quantity.label();
    match key.index {
        IndexTuple::Hour(hour) => format!("{label}_t{}", hour.0),
        IndexTuple::Slot(slot) => format!("{label}_t{}_j{}", slot.hour.0, slot.interval),
        IndexTuple::Storage(slot, unit) => {
            format!("{label}_t{}_j{}_s{}", slot.hour.0, slot.interval, unit.0)
        }
        IndexTuple::Wind(slot, unit) => {
            format!("{label}_t{}_j{}_w{}", slot.hour.0, slot.interval, unit.0)
        }
    }
}

/// Append ` + c name` / ` - c name`, dropping zero terms.
fn append_term(text: &mut String, coefficient: f64, name: &str) {
    if coefficient == 0.0 {
        return;
    }
    let sign = if coefficient < 0.0 { '-' } else { '+' };
    text.push_str(&format!(" {sign} {} {name}", coefficient.abs()));
}
