use pico_args::Arguments;

type ParseResult<T> = Result<T, pico_args::Error>;

const CONFIG_ID: [&str; 2] = ["-n", "--config-id"];
const CONTENT: [&str; 2] = ["-k", "--content"];

pub struct ConfigCreateArgs {
    pub hub: Option<String>,
    pub config_id: String,
    pub content: String,
    pub target_condition: Option<String>,
    pub priority: Option<i64>,
    pub labels: Option<String>,
    pub metrics: Option<String>,
    pub layered: bool,
    pub no_validation: bool,
}

impl ConfigCreateArgs {
    pub fn parse(args: &mut Arguments, hub: Option<String>) -> ParseResult<Self> {
        Ok(Self {
            hub,
            layered: args.contains("--layered"),
            no_validation: args.contains("--no-validation"),
            config_id: args.value_from_str(CONFIG_ID)?,
            content: args.value_from_str(CONTENT)?,
            target_condition: args.opt_value_from_str(["-t", "--target-condition"])?,
            priority: args.opt_value_from_str("--priority")?,
            labels: args.opt_value_from_str("--labels")?,
            metrics: args.opt_value_from_str(["-m", "--metrics"])?,
        })
    }
}

pub struct ConfigShowArgs {
    pub hub: Option<String>,
    pub config_id: String,
}

impl ConfigShowArgs {
    pub fn parse(args: &mut Arguments, hub: Option<String>) -> ParseResult<Self> {
        Ok(Self {
            hub,
            config_id: args.value_from_str(CONFIG_ID)?,
        })
    }
}

pub struct ConfigUpdateArgs {
    pub hub: Option<String>,
    pub config_id: String,
    pub parameters: String,
    pub etag: Option<String>,
}

impl ConfigUpdateArgs {
    pub fn parse(args: &mut Arguments, hub: Option<String>) -> ParseResult<Self> {
        Ok(Self {
            hub,
            config_id: args.value_from_str(CONFIG_ID)?,
            parameters: args.value_from_str("--parameters")?,
            etag: args.opt_value_from_str(["-e", "--etag"])?,
        })
    }
}

pub struct ConfigDeleteArgs {
    pub hub: Option<String>,
    pub config_id: String,
    pub etag: Option<String>,
}

impl ConfigDeleteArgs {
    pub fn parse(args: &mut Arguments, hub: Option<String>) -> ParseResult<Self> {
        Ok(Self {
            hub,
            config_id: args.value_from_str(CONFIG_ID)?,
            etag: args.opt_value_from_str(["-e", "--etag"])?,
        })
    }
}

pub struct ConfigListArgs {
    pub hub: Option<String>,
    pub top: Option<i64>,
}

impl ConfigListArgs {
    pub fn parse(args: &mut Arguments, hub: Option<String>) -> ParseResult<Self> {
        Ok(Self {
            hub,
            top: args.opt_value_from_str("--top")?,
        })
    }
}

pub struct MetricShowArgs {
    pub hub: Option<String>,
    pub config_id: String,
    pub metric_id: String,
    pub metric_type: String,
}

impl MetricShowArgs {
    pub fn parse(args: &mut Arguments, hub: Option<String>) -> ParseResult<Self> {
        Ok(Self {
            hub,
            config_id: args.value_from_str(CONFIG_ID)?,
            metric_id: args.value_from_str(["-m", "--metric-id"])?,
            metric_type: args
                .opt_value_from_str("--metric-type")?
                .unwrap_or_else(|| "user".to_string()),
        })
    }
}

pub struct SetModulesArgs {
    pub hub: Option<String>,
    pub device_id: String,
    pub content: String,
}

impl SetModulesArgs {
    pub fn parse(args: &mut Arguments, hub: Option<String>) -> ParseResult<Self> {
        Ok(Self {
            hub,
            device_id: args.value_from_str(["-d", "--device-id"])?,
            content: args.value_from_str(CONTENT)?,
        })
    }
}

pub struct QueryArgs {
    pub hub: Option<String>,
    pub query: String,
    pub top: Option<usize>,
}

impl QueryArgs {
    pub fn parse(args: &mut Arguments, hub: Option<String>) -> ParseResult<Self> {
        Ok(Self {
            hub,
            query: args.value_from_str(["-q", "--query-command"])?,
            top: args.opt_value_from_str("--top")?,
        })
    }
}

pub struct SettingsGetArgs {
    pub key: String,
}

pub struct SettingsSetArgs {
    pub key: String,
    pub value: String,
}
