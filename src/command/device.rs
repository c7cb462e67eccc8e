use anyhow::Result;

use super::{hub_client, print_json};
use crate::argsets::{QueryArgs, SetModulesArgs};
use crate::config_mgmt::operations;

pub fn edge_set_modules(args: SetModulesArgs) -> Result<()> {
    let client = hub_client(args.hub.as_deref())?;
    let modules = operations::set_modules(&client, &args.device_id, &args.content)?;
    print_json(&modules)
}

pub fn query(args: QueryArgs) -> Result<()> {
    let client = hub_client(args.hub.as_deref())?;
    print_json(&operations::query(&client, &args.query, args.top)?)
}
