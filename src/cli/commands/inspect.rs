use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::*;
use json_optional::codec;
use json_optional::{Optional, State};
use log::{debug, info};
use serde_json::{Map, Value};
use std::path::PathBuf;

#[derive(Args)]
pub struct InspectCommand {
    /// JSON file to read (stdin when omitted)
    pub path: Option<PathBuf>,
    /// Field to report; repeat for several (default: every key of the object)
    #[arg(short, long = "field")]
    pub fields: Vec<String>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Read the document, classify the requested fields and print the report
pub fn handle_inspect_command(cmd: InspectCommand) -> Result<()> {
    let source = match &cmd.path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display()))?,
        None => std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?,
    };
    debug!("Read {} bytes of input", source.len());

    let report = inspect_fields(&source, &cmd.fields)?;
    info!("Inspected {} fields", report.len());

    match cmd.format {
        OutputFormat::Text => {
            for (name, value) in &report {
                println!("{}: {}", name.bold(), colorize(value));
            }
        }
        OutputFormat::Json => {
            let summary = render_json(&report);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

/// Classify `fields` of the JSON object in `source`.
///
/// With no fields requested every key of the object is reported.
pub fn inspect_fields(source: &str, fields: &[String]) -> Result<Vec<(String, Optional<Value>)>> {
    let document: Value = serde_json::from_str(source).context("Input is not valid JSON")?;
    let object = match document {
        Value::Object(object) => object,
        other => anyhow::bail!("Expected a JSON object, got {}", type_name(&other)),
    };

    let names: Vec<String> = if fields.is_empty() {
        object.keys().cloned().collect()
    } else {
        fields.to_vec()
    };

    let mut report = Vec::with_capacity(names.len());
    for name in names {
        let value = codec::get_field::<Value>(&object, &name)
            .with_context(|| format!("Failed to read field '{}'", name))?;
        report.push((name, value));
    }
    Ok(report)
}

/// Map each field to its state name
pub fn render_json(report: &[(String, Optional<Value>)]) -> Value {
    let summary: Map<String, Value> = report
        .iter()
        .map(|(name, value)| (name.clone(), Value::String(value.state().to_string())))
        .collect();
    Value::Object(summary)
}

fn colorize(value: &Optional<Value>) -> ColoredString {
    let rendered = value.to_string();
    match value.state() {
        State::Present => rendered.green(),
        State::Null => rendered.yellow(),
        State::Absent => rendered.dimmed(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
