use anyhow::{Result, anyhow};
use dialoguer::{Confirm, Input};
use std::io::IsTerminal;

/// Use `value` when given, otherwise ask for it on the terminal
pub fn prompt_required_string_with_validation<F>(
    value: Option<&str>,
    prompt_message: &str,
    validator: F,
) -> Result<String>
where
    F: Fn(&str) -> Result<(), String>,
{
    match value {
        Some(val) => {
            validator(val).map_err(|e| anyhow!("Invalid value '{}': {}", val, e))?;
            Ok(val.to_string())
        }
        None => {
            if !is_interactive() {
                return Err(anyhow!("{} (required when not running interactively)", prompt_message));
            }

            let input: String = Input::new()
                .with_prompt(prompt_message)
                .validate_with(|input: &String| validator(input.trim()))
                .interact_text()?;

            Ok(input.trim().to_string())
        }
    }
}

/// Yes/no question on the terminal
pub fn prompt_confirm(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal()
}
