use super::prompts;
use super::{load_config, load_credential_store};
use crate::output::{new_table, Output};
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color};
use ondeck_config::{Config, PathManager};
use ondeck_models::ProviderMode;
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, output),
        ConfigCommands::Init => init_config(output),
    }
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    let config = load_config(&path_manager)?;
    let credentials = load_credential_store(&path_manager)?;

    let secret = |value: Option<&String>| match value {
        Some(v) if full => v.clone(),
        Some(v) => mask_string(v),
        None => "<not set>".to_string(),
    };
    let access_token = secret(credentials.get_access_token());
    let api_key = secret(credentials.get_api_key());
    let account_id = credentials
        .get_account_id()
        .cloned()
        .unwrap_or_else(|| "<not set>".to_string());

    if !output.is_human() {
        output.json(&json!({
            "config_file": config_file.display().to_string(),
            "config_file_exists": config_file.exists(),
            "config": config,
            "credentials": {
                "access_token": access_token,
                "api_key": api_key,
                "account_id": account_id,
            }
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    println!("\n{}", "Configuration".bright_cyan().bold());
    if !config_file.exists() {
        output.warn(format!(
            "No config file at {}; showing defaults. Run 'ondeck config init' to create one.",
            config_file.display()
        ));
    }

    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Setting").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);
    let rows: Vec<(&str, String)> = vec![
        ("Config file", config_file.display().to_string()),
        ("Region", config.tmdb.region.clone()),
        ("Language", config.tmdb.language.clone()),
        ("Mode", config.eligibility.mode.to_string()),
        ("Genre filter", yes_no(config.eligibility.genre_filter)),
        ("Allowed providers", config.eligibility.allowed_providers.join(", ")),
        ("Number-one list", config.lists.number_one.clone()),
        ("Watched list", config.lists.watched.clone()),
        ("On Deck list", config.lists.on_deck.clone()),
        (
            "Excluded list",
            config.lists.excluded_list().unwrap_or("<disabled>").to_string(),
        ),
        ("Create missing lists", yes_no(config.lists.create_missing)),
        ("Write delay", format!("{} ms", config.pacing.write_delay_ms)),
        (
            "Schedule",
            config
                .scheduler
                .as_ref()
                .map(|s| s.schedule.clone())
                .unwrap_or_else(|| "<default>".to_string()),
        ),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }
    output.table(&table);

    let mut creds_table = new_table();
    creds_table.set_header(vec![Cell::new("Credentials")
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)]);
    creds_table.add_row(vec![Cell::new("Access token (v4)"), Cell::new(access_token)]);
    creds_table.add_row(vec![Cell::new("API key (v3)"), Cell::new(api_key)]);
    creds_table.add_row(vec![Cell::new("Account id"), Cell::new(account_id)]);
    output.table(&creds_table);
    Ok(())
}

fn init_config(output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    let mut config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    let mut credentials = load_credential_store(&path_manager)?;

    output.info("Create a TMDB API application at https://www.themoviedb.org/settings/api first.");

    let access_token = prompts::prompt_secret(
        "TMDB read access token (v4)",
        credentials.get_access_token().map(String::as_str),
    )?;
    let api_key = prompts::prompt_secret("TMDB API key (v3)", credentials.get_api_key().map(String::as_str))?;
    let account_id = prompts::prompt_string(
        "TMDB v4 account id",
        credentials.get_account_id().map(String::as_str),
    )?;
    credentials.set_access_token(access_token);
    credentials.set_api_key(api_key);
    credentials.set_account_id(account_id);

    config.tmdb.region = prompts::prompt_string("Watch-provider region", Some(config.tmdb.region.as_str()))?.to_uppercase();
    config.tmdb.language = prompts::prompt_string("Language for new lists", Some(config.tmdb.language.as_str()))?;

    let modes = [ProviderMode::Free, ProviderMode::Rent, ProviderMode::All];
    let labels = [
        "free - free, ad-supported or allow-listed subscription",
        "rent - also accept rentals",
        "all - ignore watch providers",
    ];
    let current = modes.iter().position(|m| *m == config.eligibility.mode).unwrap_or(0);
    config.eligibility.mode = modes[prompts::prompt_choice("Eligibility mode", &labels, current)?];
    config.eligibility.genre_filter =
        prompts::prompt_yes_no("Filter out animation and horror?", config.eligibility.genre_filter)?;
    config.lists.on_deck = prompts::prompt_string("On Deck list name", Some(config.lists.on_deck.as_str()))?;
    config.lists.create_missing = prompts::prompt_yes_no(
        "Create genre lists that do not exist yet?",
        config.lists.create_missing,
    )?;

    config.validate().map_err(|e| eyre!("Invalid configuration: {}", e))?;
    credentials
        .tmdb_credentials()
        .map_err(|e| eyre!("{}", e))?;

    path_manager
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create {}: {}", path_manager.config_dir().display(), e))?;
    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;
    credentials
        .save()
        .map_err(|e| eyre!("Failed to save credentials: {}", e))?;

    output.success(format!("Configuration saved to {}", path_manager.config_dir().display()));
    Ok(())
}

fn yes_no(value: bool) -> String {
    let text = if value { "yes" } else { "no" };
    text.to_string()
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    if s.len() <= 4 {
        return "*".repeat(s.len());
    }
    let head: String = s.chars().take(2).collect();
    let tail: String = s.chars().rev().take(2).collect::<Vec<_>>().into_iter().rev().collect();
    format!("{}***{}", head, tail)
}
