use anyhow::Result;

use super::{hub_client, print_json};
use crate::argsets::{
    ConfigCreateArgs, ConfigDeleteArgs, ConfigListArgs, ConfigShowArgs, ConfigUpdateArgs,
    MetricShowArgs,
};
use crate::config_mgmt::operations::{self, CreateRequest};
use crate::config_mgmt::ConfigKind;

pub fn config_create(kind: ConfigKind, args: ConfigCreateArgs) -> Result<()> {
    let client = hub_client(args.hub.as_deref())?;
    let created = operations::create(
        &client,
        kind,
        CreateRequest {
            config_id: args.config_id,
            content: args.content,
            target_condition: args.target_condition,
            priority: args.priority,
            labels: args.labels,
            metrics: args.metrics,
            layered: args.layered,
            no_validation: args.no_validation,
        },
    )?;
    print_json(&created)
}

pub fn config_show(args: ConfigShowArgs) -> Result<()> {
    let client = hub_client(args.hub.as_deref())?;
    print_json(&operations::show(&client, &args.config_id)?)
}

pub fn config_update(kind: ConfigKind, args: ConfigUpdateArgs) -> Result<()> {
    let client = hub_client(args.hub.as_deref())?;
    let updated = operations::update(
        &client,
        kind,
        &args.config_id,
        &args.parameters,
        args.etag.as_deref(),
    )?;
    print_json(&updated)
}

pub fn config_delete(args: ConfigDeleteArgs) -> Result<()> {
    let client = hub_client(args.hub.as_deref())?;
    operations::delete(&client, &args.config_id, args.etag.as_deref())?;
    Ok(())
}

pub fn config_list(kind: ConfigKind, args: ConfigListArgs) -> Result<()> {
    let client = hub_client(args.hub.as_deref())?;
    print_json(&operations::list(&client, kind, args.top)?)
}

pub fn config_metric_show(args: MetricShowArgs) -> Result<()> {
    let client = hub_client(args.hub.as_deref())?;
    let report = operations::metric_show(
        &client,
        &args.config_id,
        &args.metric_id,
        &args.metric_type,
    )?;
    print_json(&report)
}
