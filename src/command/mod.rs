mod configuration;
mod device;
mod settings;

pub use configuration::{
    config_create, config_delete, config_list, config_metric_show, config_show, config_update,
};
pub use device::{edge_set_modules, query};
pub use settings::{settings_get, settings_set};

use anyhow::Result;
use serde::Serialize;

use crate::interfaces::settings::store_path;
use crate::interfaces::{HubClient, HubSettings};

fn hub_client(hub: Option<&str>) -> Result<HubClient> {
    let settings = HubSettings::resolve(hub, &store_path())?;
    Ok(HubClient::new(&settings)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
