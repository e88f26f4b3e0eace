use color_eyre::eyre::eyre;
use color_eyre::Result;
use dialoguer::{Confirm, Input, Password, Select};

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt(prompt);
    if let Some(default_value) = default {
        input = input.default(default_value.to_string());
    }
    input
        .interact_text()
        .map(|s| s.trim().to_string())
        .map_err(|e| eyre!("Failed to read input: {}", e))
}

/// Masked input. Leaving it blank keeps `current` when there is one.
pub fn prompt_secret(prompt: &str, current: Option<&str>) -> Result<String> {
    let prompt = match current {
        Some(_) => format!("{} (leave blank to keep the stored value)", prompt),
        None => prompt.to_string(),
    };
    let value = Password::new()
        .with_prompt(prompt)
        .allow_empty_password(current.is_some())
        .interact()
        .map_err(|e| eyre!("Failed to read secret: {}", e))?;

    match (value.trim(), current) {
        ("", Some(existing)) => Ok(existing.to_string()),
        (v, _) => Ok(v.to_string()),
    }
}

/// Prompt for yes/no with a default
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| eyre!("Failed to read confirmation: {}", e))
}

/// Pick one of `items`; returns its index.
pub fn prompt_choice(prompt: &str, items: &[&str], default: usize) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()
        .map_err(|e| eyre!("Failed to read selection: {}", e))
}
