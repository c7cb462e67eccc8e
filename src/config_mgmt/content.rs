use serde_json::{Map, Value};

use super::input::type_name;
use super::models::{ConfigKind, ConfigurationContent};
use super::schema::validate_edge_content;
use super::{ConfigError, ADM_MISSING_CONTENT, EDGE_MISSING_CONTENT};
use crate::constants::keys;

/// Whether edge content is checked against the deployment schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaCheck {
    Enforce,
    Skip,
}

/// Checks that `content` carries exactly the content key `kind` requires and
/// keeps only that key.
pub(super) fn classify(
    kind: ConfigKind,
    mut content: Map<String, Value>,
    schema_check: SchemaCheck,
) -> Result<ConfigurationContent, ConfigError> {
    match kind {
        ConfigKind::Edge => {
            let modules = take_object(&mut content, keys::MODULES_CONTENT)?
                .ok_or_else(|| ConfigError::MissingContent(EDGE_MISSING_CONTENT.to_string()))?;
            if has_content(&content, keys::DEVICE_CONTENT) || has_content(&content, keys::MODULE_CONTENT) {
                return Err(ConfigError::MissingContent(
                    "Edge deployment payloads must not include deviceContent or moduleContent"
                        .to_string(),
                ));
            }

            if schema_check == SchemaCheck::Enforce {
                let mut document = Map::new();
                document.insert(keys::MODULES_CONTENT.to_string(), Value::Object(modules.clone()));
                validate_edge_content(&Value::Object(document))?;
            } else {
                log::debug!("Skipping edge deployment schema validation");
            }

            Ok(ConfigurationContent {
                modules_content: Some(modules),
                ..Default::default()
            })
        }
        ConfigKind::Automatic => {
            if has_content(&content, keys::MODULES_CONTENT) {
                return Err(ConfigError::MissingContent(ADM_MISSING_CONTENT.to_string()));
            }
            let device_content = take_object(&mut content, keys::DEVICE_CONTENT)?;
            let module_content = take_object(&mut content, keys::MODULE_CONTENT)?;

            match (device_content, module_content) {
                (Some(device_content), None) => Ok(ConfigurationContent {
                    device_content: Some(device_content),
                    ..Default::default()
                }),
                (None, Some(module_content)) => Ok(ConfigurationContent {
                    module_content: Some(module_content),
                    ..Default::default()
                }),
                (None, None) => Err(ConfigError::MissingContent(ADM_MISSING_CONTENT.to_string())),
                (Some(_), Some(_)) => Err(ConfigError::MissingContent(
                    "Automatic device configuration payloads must specify only one of deviceContent or moduleContent"
                        .to_string(),
                )),
            }
        }
    }
}

// Null and empty objects count as absent, as the hub returns them for
// unused content keys.
fn has_content(content: &Map<String, Value>, key: &str) -> bool {
    match content.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::Object(object)) => !object.is_empty(),
        Some(_) => true,
    }
}

fn take_object(
    content: &mut Map<String, Value>,
    key: &str,
) -> Result<Option<Map<String, Value>>, ConfigError> {
    match content.remove(key) {
        Some(Value::Object(object)) if object.is_empty() => Ok(None),
        Some(Value::Object(object)) => Ok(Some(object)),
        Some(Value::Null) => Ok(None),
        Some(other) => Err(ConfigError::InputFormat(format!(
            "Property '{key}' must be a JSON object, got {}",
            type_name(&other)
        ))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_mgmt::input::NormalizedContent;
    use serde_json::json;

    const EDGE_DEPLOYMENT: &str = include_str!("../../tests/fixtures/edge_deployment.json");
    const EDGE_DEPLOYMENT_LAYERED: &str =
        include_str!("../../tests/fixtures/edge_deployment_layered.json");
    const EDGE_DEPLOYMENT_MALFORMED: &str =
        include_str!("../../tests/fixtures/edge_deployment_malformed.json");
    const ADM_DEVICE: &str = include_str!("../../tests/fixtures/adm_device_content.json");
    const ADM_MODULE: &str = include_str!("../../tests/fixtures/adm_module_content.json");

    fn content(raw: &str) -> Map<String, Value> {
        NormalizedContent::from_arg(raw).unwrap().content
    }

    #[test]
    fn edge_content_keeps_modules_content() {
        let classified = classify(ConfigKind::Edge, content(EDGE_DEPLOYMENT), SchemaCheck::Enforce).unwrap();
        let expected: Value = serde_json::from_str(EDGE_DEPLOYMENT).unwrap();
        assert_eq!(
            Value::Object(classified.modules_content.unwrap()),
            expected["content"]["modulesContent"]
        );
        assert!(classified.device_content.is_none());
        assert!(classified.module_content.is_none());
    }

    #[test]
    fn layered_content_fails_schema_but_passes_when_skipped() {
        assert!(matches!(
            classify(ConfigKind::Edge, content(EDGE_DEPLOYMENT_LAYERED), SchemaCheck::Enforce),
            Err(ConfigError::SchemaValidation(_))
        ));
        let classified =
            classify(ConfigKind::Edge, content(EDGE_DEPLOYMENT_LAYERED), SchemaCheck::Skip).unwrap();
        assert!(classified.modules_content.unwrap().contains_key("$edgeHub"));
    }

    #[test]
    fn malformed_edge_content_fails_validation() {
        assert!(matches!(
            classify(ConfigKind::Edge, content(EDGE_DEPLOYMENT_MALFORMED), SchemaCheck::Enforce),
            Err(ConfigError::SchemaValidation(_))
        ));
    }

    #[test]
    fn edge_requires_modules_content() {
        let err = classify(ConfigKind::Edge, content(ADM_DEVICE), SchemaCheck::Skip).unwrap_err();
        assert_eq!(err.to_string(), EDGE_MISSING_CONTENT);
    }

    #[test]
    fn automatic_content_selects_device_or_module() {
        let device = classify(ConfigKind::Automatic, content(ADM_DEVICE), SchemaCheck::Enforce).unwrap();
        assert!(device.device_content.is_some() && device.module_content.is_none());

        let module = classify(ConfigKind::Automatic, content(ADM_MODULE), SchemaCheck::Enforce).unwrap();
        assert!(module.module_content.is_some() && module.device_content.is_none());
    }

    #[test]
    fn automatic_rejects_edge_or_empty_content() {
        for raw in [EDGE_DEPLOYMENT, EDGE_DEPLOYMENT_LAYERED, "{}", r#"{"content": {}}"#] {
            let err = classify(ConfigKind::Automatic, content(raw), SchemaCheck::Enforce).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Automatic device configuration payloads require property: deviceContent or moduleContent"
            );
        }
    }

    #[test]
    fn edge_rejects_device_or_module_content() {
        for key in ["deviceContent", "moduleContent"] {
            let mut raw = content(EDGE_DEPLOYMENT);
            raw.insert(key.to_string(), json!({"properties.desired.x": 1}));
            let err = classify(ConfigKind::Edge, raw, SchemaCheck::Skip).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Edge deployment payloads must not include deviceContent or moduleContent"
            );
        }
    }

    #[test]
    fn empty_sibling_keys_are_ignored() {
        let mut edge = content(EDGE_DEPLOYMENT);
        edge.insert("deviceContent".to_string(), json!({}));
        edge.insert("moduleContent".to_string(), Value::Null);
        let classified = classify(ConfigKind::Edge, edge, SchemaCheck::Enforce).unwrap();
        assert!(classified.device_content.is_none() && classified.module_content.is_none());

        let mut adm = content(ADM_DEVICE);
        adm.insert("modulesContent".to_string(), json!({}));
        let classified = classify(ConfigKind::Automatic, adm, SchemaCheck::Enforce).unwrap();
        assert!(classified.device_content.is_some() && classified.modules_content.is_none());

        let err = classify(
            ConfigKind::Edge,
            json!({"modulesContent": {}}).as_object().unwrap().clone(),
            SchemaCheck::Skip,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), EDGE_MISSING_CONTENT);
    }

    #[test]
    fn automatic_rejects_both_keys_and_non_objects() {
        let both = json!({"deviceContent": {"a": 1}, "moduleContent": {"b": 2}});
        assert!(matches!(
            classify(ConfigKind::Automatic, both.as_object().unwrap().clone(), SchemaCheck::Enforce),
            Err(ConfigError::MissingContent(_))
        ));

        let scalar = json!({"deviceContent": 5});
        assert!(matches!(
            classify(ConfigKind::Automatic, scalar.as_object().unwrap().clone(), SchemaCheck::Enforce),
            Err(ConfigError::InputFormat(_))
        ));
    }
}
