use super::{build_client, load_config, load_credentials};
use crate::output::{new_table, Output};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color};
use ondeck_config::{Config, PathManager};
use ondeck_core::fetch_lists;
use ondeck_models::NamedList;
use serde_json::json;

pub async fn run_lists(output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config = load_config(&path_manager)?;
    let credentials = load_credentials(&path_manager)?;
    let client = build_client(&config, &credentials);

    let mut lists = fetch_lists(client.as_ref(), &credentials.account_id)
        .await
        .map_err(|e| eyre!("Failed to fetch lists: {:#}", e))?;
    lists.sort_by(|a, b| a.name.cmp(&b.name));

    if !output.is_human() {
        let rows: Vec<_> = lists
            .iter()
            .map(|list| {
                json!({
                    "id": list.id,
                    "name": list.name,
                    "number_of_items": list.number_of_items,
                    "sort_by": list.sort_by,
                    "role": role(&config, list),
                })
            })
            .collect();
        output.json(&json!({ "lists": rows }));
        return Ok(());
    }

    let mut table = new_table();
    table.set_header(vec![
        Cell::new("ID").add_attribute(Attribute::Bold),
        Cell::new("Name").add_attribute(Attribute::Bold),
        Cell::new("Items").add_attribute(Attribute::Bold),
        Cell::new("Sorted").add_attribute(Attribute::Bold),
        Cell::new("Role").add_attribute(Attribute::Bold),
    ]);
    for list in &lists {
        let sorted = if list.sort_by == Some(config.lists.sort_by) {
            Cell::new("✓").fg(Color::Green)
        } else {
            Cell::new("✗").fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(list.id),
            Cell::new(&list.name),
            Cell::new(list.number_of_items.map(|n| n.to_string()).unwrap_or_default()),
            sorted,
            Cell::new(role(&config, list).unwrap_or("")),
        ]);
    }
    output.table(&table);
    output.info(format!("{} lists on account {}", lists.len(), credentials.account_id));
    Ok(())
}

/// What a sync run uses the list for, if anything.
fn role(config: &Config, list: &NamedList) -> Option<&'static str> {
    let lists = &config.lists;
    if list.name == lists.number_one {
        Some("source")
    } else if list.name == lists.watched {
        Some("watched")
    } else if list.name == lists.on_deck {
        Some("on deck")
    } else if lists.excluded_list() == Some(list.name.as_str()) {
        Some("excluded")
    } else {
        None
    }
}
