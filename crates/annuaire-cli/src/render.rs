//! Table and JSON rendering of company rows.

use annuaire_core::{
    display_row, lookup_link, opco_link, phone_directory_link, CompanyRow, DisplayRow,
};
use serde_json::{json, Value};

const TABLE_HEADERS: [&str; 10] = [
    "N°",
    "Nom",
    "Adresse",
    "Téléphone",
    "Secteur",
    "SIRET",
    "SIREN",
    "Dirigeant",
    "Effectif",
    "Pappers",
];

fn table_cells(row: &DisplayRow) -> [String; 10] {
    [
        row.index.to_string(),
        row.name.clone(),
        row.address.clone(),
        row.phone.clone(),
        row.sector.clone(),
        row.siret.clone(),
        row.siren.clone(),
        row.leader.clone(),
        row.headcount.clone(),
        row.lookup.to_string(),
    ]
}

/// Left-aligned text table, one line per row, columns sized to their widest cell.
///
/// Names, addresses and leaders are shown truncated; the rows themselves are
/// not modified.
pub(crate) fn format_table(rows: &[CompanyRow]) -> String {
    let lines: Vec<[String; 10]> = rows
        .iter()
        .zip(1..)
        .map(|(row, index)| table_cells(&display_row(index, row)))
        .collect();

    let mut widths = TABLE_HEADERS.map(|h| h.chars().count());
    for cells in &lines {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &TABLE_HEADERS.map(str::to_string), &widths);
    for cells in &lines {
        push_line(&mut out, cells, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 10], widths: &[usize; 10]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Full-length rows with their outbound links, as a JSON array.
pub(crate) fn rows_json(rows: &[CompanyRow]) -> Value {
    Value::Array(
        rows.iter()
            .zip(1..)
            .map(|(row, index): (&CompanyRow, usize)| {
                json!({
                    "index": index,
                    "name": row.name,
                    "address": row.address,
                    "phone": row.phone,
                    "sector": row.sector,
                    "siret": row.siret,
                    "siren": row.siren,
                    "leader": row.leader,
                    "headcount": row.headcount,
                    "status": row.status,
                    "lookup_link": lookup_link(&row.siren),
                    "phone_directory_link": phone_directory_link(&row.name, &row.address),
                    "opco_link": opco_link(&row.siret),
                })
            })
            .collect(),
    )
}

/// Status line shown after a search.
pub(crate) fn result_summary(count: usize) -> String {
    match count {
        0 => "Aucune entreprise trouvée".to_string(),
        1 => "1 entreprise trouvée".to_string(),
        n => format!("{n} entreprises trouvées"),
    }
}
