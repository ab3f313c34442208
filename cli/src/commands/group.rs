use crate::commands::permission::{print_descriptor_text, print_permission_text};
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use authz::{AuthGroup, AuthGroupRecord};
use colored::*;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read an auth group in descriptor form and print its remote record
pub fn to_record(path: &Path, format: OutputFormat) -> Result<()> {
    let group: AuthGroup = read_document(path)?;
    let record = group
        .to_record()
        .with_context(|| format!("Failed to encode permissions of group {:?}", group.name))?;

    format.print(&record, print_record_text)
}

/// Read an auth group record and print it in descriptor form
pub fn from_record(path: &Path, format: OutputFormat) -> Result<()> {
    let record: AuthGroupRecord = read_document(path)?;
    let group = AuthGroup::from_record(&record)
        .with_context(|| format!("Failed to decode permissions of group {:?}", record.name))?;

    format.print(&group, print_group_text)
}

/// Load a JSON document (`.json`) or a YAML document (anything else)
fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    debug!("Reading {} as {}", path.display(), if is_json { "JSON" } else { "YAML" });

    if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON from {}", path.display()))
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML from {}", path.display()))
    }
}

fn print_header(name: &str, description: &str, count: usize) {
    println!("{}", format!("=== Group {} ===", name).bold());
    if !description.is_empty() {
        println!("{}", description);
    }
    println!();
    if count == 0 {
        println!("{}", "No permissions".yellow());
    }
}

fn print_record_text(record: &AuthGroupRecord) {
    print_header(&record.name, &record.description, record.permissions.len());
    for permission in &record.permissions {
        print_permission_text(permission);
    }
}

fn print_group_text(group: &AuthGroup) {
    print_header(&group.name, &group.description, group.permissions.len());
    for descriptor in &group.permissions {
        print_descriptor_text(descriptor);
    }
}
