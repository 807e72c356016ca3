use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields in order of priority,
/// then fall back to the first field in the result object. For array
/// results (schedules, projections) print the headline figure per row.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "total_tax",
        "annual_payment",
        "useful_life_years",
        "cash_flow",
        "charge",
        "payment",
    ];

    match result {
        Value::Object(map) => {
            for key in &priority_keys {
                if let Some(val) = map.get(*key) {
                    if !val.is_null() {
                        println!("{}", format_minimal(val));
                        return;
                    }
                }
            }
            if let Some((key, val)) = map.iter().next() {
                println!("{}: {}", key, format_minimal(val));
            }
        }
        Value::Array(rows) => {
            for row in rows {
                if let Value::Object(map) = row {
                    let headline = priority_keys
                        .iter()
                        .find_map(|k| map.get(*k))
                        .or_else(|| map.values().next());
                    if let Some(val) = headline {
                        println!("{}", format_minimal(val));
                    }
                } else {
                    println!("{}", format_minimal(row));
                }
            }
        }
        other => println!("{}", format_minimal(other)),
    }
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
