use serde_json::{Map, Value};

/// Lowers the leading run of uppercase characters.
///
/// The last capital of a run is kept when it starts the next word, so
/// `TotalCount` becomes `totalCount`, `ID` becomes `id` and `URLValue`
/// becomes `urlValue`.
pub fn camel_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    if !chars.first().is_some_and(|c| c.is_uppercase()) {
        return name.to_owned();
    }

    let mut lowered = chars.clone();
    for i in 0..chars.len() {
        if i == 1 && !chars[i].is_uppercase() {
            break;
        }
        let next = chars.get(i + 1);
        if i > 0 && next.is_some_and(|c| !c.is_uppercase()) {
            if next.is_some_and(|c| c.is_whitespace()) {
                lowered[i] = to_lower(chars[i]);
            }
            break;
        }
        lowered[i] = to_lower(chars[i]);
    }
    lowered.into_iter().collect()
}

fn to_lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Re-keys every object in `value`, recursively, with [`camel_case`].
pub fn camel_case_keys(value: Value) -> Value {
    match value {
        Value::Object(object) => Value::Object(
            object
                .into_iter()
                .map(|(key, value)| (camel_case(&key), camel_case_keys(value)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(camel_case_keys).collect()),
        other => other,
    }
}
