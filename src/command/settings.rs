use anyhow::{anyhow, Result};
use serde_json::{json, Value};

use crate::argsets::{SettingsGetArgs, SettingsSetArgs};
use crate::interfaces::settings;
use crate::interfaces::settings_store::{StoreRO, StoreRW};

pub fn settings_set(args: SettingsSetArgs) -> Result<()> {
    let store = StoreRW::open(settings::store_path())?;
    // Store JSON as-is, anything else as a JSON string
    match serde_json::from_str::<Value>(&args.value) {
        Ok(value) => store.set(&args.key, value)?,
        Err(_) => store.set(&args.key, json!(args.value))?,
    }
    log::info!("Stored setting '{}'", args.key);
    Ok(())
}

pub fn settings_get(args: SettingsGetArgs) -> Result<()> {
    let missing = || anyhow!("No value set for key '{}'", &args.key);
    let store = StoreRO::open(settings::store_path())?.ok_or_else(missing)?;
    let value: Value = store.get(&args.key)?.ok_or_else(missing)?;
    match value {
        Value::String(text) => print!("{text}"),
        other => print!("{other}"),
    }
    Ok(())
}
