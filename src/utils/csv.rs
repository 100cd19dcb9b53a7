use std::fmt::Display;

/// Quotes one CSV field. Every present value is wrapped in double quotes with
/// embedded quotes doubled; a missing value is an empty, unquoted field.
pub fn escape_csv_field<T: Display>(value: Option<T>) -> String {
    match value {
        None => String::new(),
        Some(v) => {
            let text = v.to_string();
            let mut out = String::with_capacity(text.len() + 2);
            out.push('"');
            for c in text.chars() {
                if c == '"' {
                    out.push('"');
                }
                out.push(c);
            }
            out.push('"');
            out
        }
    }
}

pub fn join_record<I>(fields: I) -> String
where
    I: IntoIterator<Item = String>,
{
    fields.into_iter().collect::<Vec<_>>().join(",")
}
