use crate::error::{BotError, Result};

/// Fills `{name}` placeholders in `template` from `values`.
///
/// `{{` and `}}` produce literal braces. A placeholder that is not one of the
/// given names, an empty placeholder or an unbalanced brace is a
/// configuration error.
pub fn format_prompt(template: &str, values: &[(&str, &str)]) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') | None => {
                            return Err(BotError::Config(format!(
                                "Unclosed placeholder in prompt template: {template:?}"
                            )))
                        }
                        Some(c) => name.push(c),
                    }
                }
                let value = values
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| *value)
                    .ok_or_else(|| {
                        BotError::Config(format!(
                            "Unknown placeholder {{{name}}} in prompt template"
                        ))
                    })?;
                out.push_str(value);
            }
            '}' => {
                return Err(BotError::Config(format!(
                    "Unmatched '}}' in prompt template: {template:?}"
                )))
            }
            c => out.push(c),
        }
    }
    Ok(out)
}
