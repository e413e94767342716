use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{cell_text, is_record_array};

/// Format output as tables using the tabled crate.
///
/// Scalar fields of the result go into a Field/Value table; arrays of
/// records (schedules, comparisons, findings) and nested objects each get
/// their own titled table.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_field_table(map);
            }
        }
        Value::Array(arr) => print_record_table(arr),
        _ => println!("{}", cell_text(value)),
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    match result {
        Value::Object(res_map) => {
            let (sections, scalars): (Vec<_>, Vec<_>) = res_map
                .iter()
                .partition(|(_, v)| is_record_array(v) || is_nested_object(v));

            if !scalars.is_empty() {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                for (key, val) in scalars {
                    builder.push_record([key.as_str(), &cell_text(val)]);
                }
                println!("{}", Table::from(builder));
            }

            for (key, val) in sections {
                println!("\n{}:", title_case(key));
                match val {
                    Value::Array(arr) => print_record_table(arr),
                    Value::Object(inner) => print_field_table(inner),
                    _ => {}
                }
            }
        }
        Value::Array(arr) => print_record_table(arr),
        _ => println!("{}", cell_text(result)),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_field_table(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &cell_text(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_record_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(cell_text).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", cell_text(item));
        }
    }
}

/// A ratio value object (`{"defined": ..}`) renders as a scalar, not a section.
fn is_nested_object(value: &Value) -> bool {
    match value {
        Value::Object(map) => !(map.len() == 1 && map.contains_key("defined")),
        _ => false,
    }
}

fn title_case(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>().replace('_', " "),
        None => String::new(),
    }
}
