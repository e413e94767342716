use serde_json::Value;

use super::cell_text;

/// Print just the key answer from the output.
///
/// Ratio analyses print one `ratio: band` line per finding; other results
/// print the first well-known field, falling back to the first field.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Some(Value::Array(findings)) = result_obj.get("findings") {
        for finding in findings {
            println!(
                "{}: {}",
                cell_text(&finding["ratio"]),
                cell_text(&finding["band"])
            );
        }
        return;
    }

    let priority_keys = ["wacc_pct", "wacc", "final_value"];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", cell_text(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, cell_text(val));
            return;
        }
    }

    if let Value::Array(rows) = result_obj {
        for row in rows {
            println!("{}", cell_text(row.get("industry").unwrap_or(row)));
        }
        return;
    }

    println!("{}", cell_text(result_obj));
}
