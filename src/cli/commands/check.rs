use anyhow::{Context, Result, bail};
use clap::Args;
use colored::*;
use log::info;
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;

use super::run::print_values;
use crate::config::Config;
use crate::form::{FormDocument, FormRenderer, Scalar, SubmitOutcome};

#[derive(Args)]
pub struct CheckCommands {
    /// Form file (defaults to the configured form, then form.json)
    pub form: Option<PathBuf>,

    /// JSON file with values: an object keyed by field key or an array by position
    #[arg(long, value_name = "FILE")]
    pub values: Option<PathBuf>,

    /// Set one field, e.g. --set email=a@b.c (repeatable, applied after --values)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

pub async fn check_command(args: CheckCommands, config: &Config) -> Result<()> {
    if args.no_color {
        colored::control::set_override(false);
    }

    let path = config.resolve_form_path(args.form);
    let mut form = FormRenderer::new(FormDocument::load(&path)?, config.settings.render_options());

    if let Some(values_path) = &args.values {
        let content = fs::read_to_string(values_path)
            .with_context(|| format!("Failed to read values file: {:?}", values_path))?;
        let values: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse values file: {:?}", values_path))?;
        apply_values(&mut form, &values)?;
    }
    for assignment in &args.set {
        let (key, value) = parse_assignment(assignment)?;
        form.set_value_by_key(key, value)?;
    }

    match form.submit() {
        SubmitOutcome::Accepted(values) => {
            info!("Check accepted {} values", values.len());
            if args.json {
                println!("{}", serde_json::to_string_pretty(&values)?);
            } else {
                print_values(&values);
            }
            Ok(())
        }
        SubmitOutcome::Rejected(errors) => {
            let report = rejection_report(&form);
            if args.json {
                let object: Map<String, Value> = report
                    .iter()
                    .map(|(key, _, message)| (key.clone(), Value::String(message.clone())))
                    .collect();
                let report = serde_json::json!({ "errors": object });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for (key, caption, message) in &report {
                    eprintln!(
                        "{} {} {}: {}",
                        "✗".red(),
                        format!("[{}]", key).yellow(),
                        caption,
                        message.red()
                    );
                }
            }
            bail!("Form rejected: {} invalid field(s)", errors.len())
        }
    }
}

/// Apply a values document: an object keyed by field key or an array by position
pub fn apply_values(form: &mut FormRenderer, values: &Value) -> Result<()> {
    match values {
        Value::Object(entries) => {
            for (key, value) in entries {
                form.set_value_by_key(key, value_text(key, value)?)?;
            }
        }
        Value::Array(items) => {
            if items.len() > form.len() {
                bail!(
                    "Values array has {} entries but the form has {} fields",
                    items.len(),
                    form.len()
                );
            }
            for (index, value) in items.iter().enumerate() {
                form.set_value(index, value_text(&index.to_string(), value)?)?;
            }
        }
        _ => bail!("Values must be a JSON object or array"),
    }
    Ok(())
}

/// Split `KEY=VALUE`; the value may itself contain '='
pub fn parse_assignment(assignment: &str) -> Result<(&str, &str)> {
    match assignment.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => bail!("Invalid --set '{}': expected KEY=VALUE", assignment),
    }
}

fn value_text(key: &str, value: &Value) -> Result<String> {
    if value.is_null() {
        return Ok(String::new());
    }
    let scalar: Scalar = serde_json::from_value(value.clone())
        .with_context(|| format!("Value for '{}' must be a string, number or boolean", key))?;
    Ok(scalar.to_string())
}

/// (key, caption, message) for every field with a displayed error
pub fn rejection_report(form: &FormRenderer) -> Vec<(String, String, String)> {
    form.instructions()
        .iter()
        .enumerate()
        .flat_map(|(index, instruction)| {
            form.messages_for(index)
                .into_iter()
                .map(move |message| (instruction.key.to_string(), instruction.caption(), message))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(json: &str) -> FormRenderer {
        FormRenderer::new(FormDocument::from_json(json).unwrap(), Default::default())
    }

    #[test]
    fn test_apply_object_and_array() {
        let mut f = form(r#"[{"type": "text", "name": "who"}, {"type": "number"}]"#);
        apply_values(&mut f, &json!({"who": "Ada", "1": 7})).unwrap();
        assert_eq!(f.value(0), Some("Ada"));
        assert_eq!(f.value(1), Some("7"));

        apply_values(&mut f, &json!(["Grace"])).unwrap();
        assert_eq!(f.value(0), Some("Grace"));
        assert_eq!(f.value(1), Some("7"));
    }

    #[test]
    fn test_apply_rejects_bad_shapes() {
        let mut f = form(r#"[{"type": "text"}]"#);
        assert!(apply_values(&mut f, &json!("x")).is_err());
        assert!(apply_values(&mut f, &json!(["a", "b"])).is_err());
        assert!(apply_values(&mut f, &json!({"missing": "x"})).is_err());
        assert!(apply_values(&mut f, &json!([["nested"]])).is_err());
    }

    #[test]
    fn test_apply_checks_dropdown_options() {
        let mut f = form(r#"[{"type": "dropdown", "name": "size", "options": ["s", "m"]}]"#);
        apply_values(&mut f, &json!({"size": "m"})).unwrap();
        assert_eq!(f.value(0), Some("m"));

        assert!(apply_values(&mut f, &json!({"size": "xl"})).is_err());
        assert!(apply_values(&mut f, &json!(["xl"])).is_err());
        assert_eq!(f.value(0), Some("m"));
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("a=b=c").unwrap(), ("a", "b=c"));
        assert_eq!(parse_assignment("a=").unwrap(), ("a", ""));
        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("=x").is_err());
    }

    #[test]
    fn test_rejection_report() {
        let mut f = form(r#"[{"type": "number", "min_value": 1, "label": "Age"}]"#);
        f.set_value(0, "0").unwrap();
        assert!(!f.submit().is_accepted());
        assert_eq!(
            rejection_report(&f),
            vec![("0".to_string(), "Age".to_string(), "Minimum value should be 1".to_string())]
        );
    }
}
