use ao_adapter::OutcomeRecord;
use serde_json::Value;

/// Render an outcome as four fixed lines: Output, Messages, Spawns, Error.
pub fn format_outcome(outcome: &OutcomeRecord) -> String {
    let error = match &outcome.error {
        None | Some(Value::Null) => "None".to_string(),
        Some(err) => pretty(err),
    };
    format!(
        "Output: {}\nMessages: {} message(s)\nSpawns: {} spawn(s)\nError: {}",
        pretty(&outcome.output),
        outcome.messages.len(),
        outcome.spawns.len(),
        error
    )
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_outcome() {
        let outcome: OutcomeRecord = serde_json::from_value(json!({
            "Output": {"status": "success"},
            "Messages": [],
            "Spawns": [],
            "Error": null
        }))
        .unwrap();
        assert_eq!(
            format_outcome(&outcome),
            "Output: {\n  \"status\": \"success\"\n}\n\
             Messages: 0 message(s)\n\
             Spawns: 0 spawn(s)\n\
             Error: None"
        );
    }

    #[test]
    fn counts_and_error() {
        let outcome = OutcomeRecord {
            output: json!("plain"),
            messages: vec![json!({}), json!({})],
            spawns: vec![json!({"Process": "child"})],
            error: Some(json!({"code": 1})),
        };
        assert_eq!(
            format_outcome(&outcome),
            "Output: \"plain\"\nMessages: 2 message(s)\nSpawns: 1 spawn(s)\n\
             Error: {\n  \"code\": 1\n}"
        );
    }

    #[test]
    fn keeps_output_key_order() {
        let outcome = OutcomeRecord {
            output: json!({"zeta": 1, "alpha": 2}),
            ..Default::default()
        };
        let text = format_outcome(&outcome);
        assert!(text.find("zeta").unwrap() < text.find("alpha").unwrap());
    }

    #[test]
    fn missing_output_prints_null() {
        let text = format_outcome(&OutcomeRecord::default());
        assert!(text.starts_with("Output: null\n"));
        assert!(text.ends_with("Error: None"));
    }
}
