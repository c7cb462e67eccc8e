mod argsets;
mod command;
mod config_mgmt;
mod constants;
mod helpers;
mod interfaces;

use anyhow::{anyhow, Result};
use env_logger::Env;

use config_mgmt::ConfigKind;
use constants::{defaults, envvars};

const CMD_CONFIG_CREATE: &str = "config-create";
const CMD_CONFIG_SHOW: &str = "config-show";
const CMD_CONFIG_UPDATE: &str = "config-update";
const CMD_CONFIG_DELETE: &str = "config-delete";
const CMD_CONFIG_LIST: &str = "config-list";
const CMD_CONFIG_METRIC_SHOW: &str = "config-metric-show";
const CMD_EDGE_CREATE: &str = "edge-deployment-create";
const CMD_EDGE_SHOW: &str = "edge-deployment-show";
const CMD_EDGE_UPDATE: &str = "edge-deployment-update";
const CMD_EDGE_DELETE: &str = "edge-deployment-delete";
const CMD_EDGE_LIST: &str = "edge-deployment-list";
const CMD_EDGE_METRIC_SHOW: &str = "edge-deployment-metric-show";
const CMD_EDGE_SET_MODULES: &str = "edge-set-modules";
const CMD_QUERY: &str = "query";
const CMD_SETTINGS_GET: &str = "settings-get";
const CMD_SETTINGS_SET: &str = "settings-set";

const SUBCOMMANDS: [&str; 16] = [
    CMD_CONFIG_CREATE,
    CMD_CONFIG_SHOW,
    CMD_CONFIG_UPDATE,
    CMD_CONFIG_DELETE,
    CMD_CONFIG_LIST,
    CMD_CONFIG_METRIC_SHOW,
    CMD_EDGE_CREATE,
    CMD_EDGE_SHOW,
    CMD_EDGE_UPDATE,
    CMD_EDGE_DELETE,
    CMD_EDGE_LIST,
    CMD_EDGE_METRIC_SHOW,
    CMD_EDGE_SET_MODULES,
    CMD_QUERY,
    CMD_SETTINGS_GET,
    CMD_SETTINGS_SET,
];

fn main() -> Result<()> {
    let dotenv_paths = helpers::load_dotenv();
    env_logger::Builder::from_env(Env::default().filter_or(envvars::LOG_LEVEL, defaults::LOG_LEVEL))
        .init();
    for path in dotenv_paths {
        log::debug!("Loaded environment from {}", path.display());
    }

    let mut args = pico_args::Arguments::from_env();
    let subcommand = args.subcommand()?;
    let hub: Option<String> = args.opt_value_from_str("--hub")?;

    let run: Box<dyn FnOnce() -> Result<()>> = match subcommand.as_deref() {
        Some(CMD_CONFIG_CREATE) => {
            let args = argsets::ConfigCreateArgs::parse(&mut args, hub)?;
            Box::new(move || command::config_create(ConfigKind::Automatic, args))
        }
        Some(CMD_EDGE_CREATE) => {
            let args = argsets::ConfigCreateArgs::parse(&mut args, hub)?;
            Box::new(move || command::config_create(ConfigKind::Edge, args))
        }
        Some(CMD_CONFIG_SHOW | CMD_EDGE_SHOW) => {
            let args = argsets::ConfigShowArgs::parse(&mut args, hub)?;
            Box::new(move || command::config_show(args))
        }
        Some(CMD_CONFIG_UPDATE) => {
            let args = argsets::ConfigUpdateArgs::parse(&mut args, hub)?;
            Box::new(move || command::config_update(ConfigKind::Automatic, args))
        }
        Some(CMD_EDGE_UPDATE) => {
            let args = argsets::ConfigUpdateArgs::parse(&mut args, hub)?;
            Box::new(move || command::config_update(ConfigKind::Edge, args))
        }
        Some(CMD_CONFIG_DELETE | CMD_EDGE_DELETE) => {
            let args = argsets::ConfigDeleteArgs::parse(&mut args, hub)?;
            Box::new(move || command::config_delete(args))
        }
        Some(CMD_CONFIG_LIST) => {
            let args = argsets::ConfigListArgs::parse(&mut args, hub)?;
            Box::new(move || command::config_list(ConfigKind::Automatic, args))
        }
        Some(CMD_EDGE_LIST) => {
            let args = argsets::ConfigListArgs::parse(&mut args, hub)?;
            Box::new(move || command::config_list(ConfigKind::Edge, args))
        }
        Some(CMD_CONFIG_METRIC_SHOW | CMD_EDGE_METRIC_SHOW) => {
            let args = argsets::MetricShowArgs::parse(&mut args, hub)?;
            Box::new(move || command::config_metric_show(args))
        }
        Some(CMD_EDGE_SET_MODULES) => {
            let args = argsets::SetModulesArgs::parse(&mut args, hub)?;
            Box::new(move || command::edge_set_modules(args))
        }
        Some(CMD_QUERY) => {
            let args = argsets::QueryArgs::parse(&mut args, hub)?;
            Box::new(move || command::query(args))
        }
        Some(CMD_SETTINGS_GET) => {
            let args = argsets::SettingsGetArgs {
                key: args.free_from_str()?,
            };
            Box::new(move || command::settings_get(args))
        }
        Some(CMD_SETTINGS_SET) => {
            let args = argsets::SettingsSetArgs {
                key: args.free_from_str()?,
                value: args.free_from_str()?,
            };
            Box::new(move || command::settings_set(args))
        }
        _ => {
            return Err(anyhow!(
                "Subcommand must be one of '{}'",
                SUBCOMMANDS.join("', '")
            ))
        }
    };

    let unused = args.finish();
    if !unused.is_empty() {
        return Err(anyhow!("Unrecognized arguments: {unused:?}"));
    }
    run()
}
