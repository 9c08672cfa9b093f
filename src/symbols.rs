use crate::{
    error::{LayoutError, Result},
    grid::{CellType, Grid},
};

use std::collections::HashMap;
use std::hash::BuildHasher;

pub fn tokenize_row(row: &str) -> Vec<String> {
    if row.contains(',') {
        row.split(',').map(|s| s.trim().to_owned()).collect()
    } else {
        row.chars().map(String::from).collect()
    }
}

pub fn build_grid<S: AsRef<str>, H: BuildHasher>(
    rows: &[S],
    symbols: &HashMap<String, CellType, H>,
) -> Result<Grid> {
    let tokens: Vec<Vec<String>> = rows.iter().map(|r| tokenize_row(r.as_ref())).collect();
    check_rectangular(&tokens)?;

    let mut typed_rows = Vec::with_capacity(tokens.len());
    for (y, row) in tokens.into_iter().enumerate() {
        let typed = row
            .into_iter()
            .enumerate()
            .map(|(x, symbol)| match symbols.get(&symbol) {
                Some(t) => Ok(*t),
                None => Err(LayoutError::UnknownSymbol { symbol, x, y }),
            })
            .collect::<Result<Vec<_>>>()?;
        typed_rows.push(typed);
    }

    Grid::from_rows(typed_rows)
}

/// Shape is validated on raw tokens so a ragged layout is reported as such even when it also
/// contains unknown symbols.
fn check_rectangular(rows: &[Vec<String>]) -> Result<()> {
    let expected = match rows.first() {
        Some(first) if !first.is_empty() => first.len(),
        _ => return Err(LayoutError::EmptyLayout),
    };
    for (row, r) in rows.iter().enumerate() {
        if r.len() != expected {
            return Err(LayoutError::MalformedLayout {
                row,
                expected,
                found: r.len(),
            });
        }
    }

    Ok(())
}
