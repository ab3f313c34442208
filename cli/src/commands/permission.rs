use crate::output::OutputFormat;
use anyhow::{Context, Result};
use authz::{NamedArguments, Permission, PermissionDescriptor};
use colored::*;

/// Encode a descriptor given on the command line and print the permission
pub fn encode(
    entitlement: String,
    entity_type: String,
    args: Vec<(String, String)>,
    format: OutputFormat,
) -> Result<()> {
    let entity_args = collect_args(args)?;
    let descriptor = PermissionDescriptor {
        entitlement,
        entity_type,
        entity_args,
    };

    let permission = descriptor.to_permission().with_context(|| {
        format!(
            "Failed to encode {} permission for entity type {:?}",
            descriptor.entitlement, descriptor.entity_type
        )
    })?;

    format.print(&permission, print_permission_text)
}

/// Decode a stored permission and print its descriptor
pub fn decode(
    entitlement: String,
    entity_type: String,
    entity_reference: String,
    format: OutputFormat,
) -> Result<()> {
    let permission = Permission {
        entitlement,
        entity_type,
        entity_reference,
    };

    let descriptor = permission
        .to_descriptor()
        .with_context(|| format!("Failed to decode {:?}", permission.entity_reference))?;

    format.print(&descriptor, print_descriptor_text)
}

/// Parse a `key=value` command line argument
pub fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {:?}", raw))?;

    if key.is_empty() {
        return Err(format!("missing argument name in {:?}", raw));
    }

    Ok((key.to_string(), value.to_string()))
}

fn collect_args(args: Vec<(String, String)>) -> Result<NamedArguments> {
    let mut entity_args = NamedArguments::new();
    for (key, value) in args {
        if entity_args.contains_key(&key) {
            anyhow::bail!("Argument {:?} given more than once", key);
        }
        entity_args.insert(key, value);
    }
    Ok(entity_args)
}

pub(crate) fn print_permission_text(permission: &Permission) {
    println!(
        "{} {} {}",
        permission.entitlement.cyan(),
        permission.entity_type.yellow(),
        permission.entity_reference.green()
    );
}

pub(crate) fn print_descriptor_text(descriptor: &PermissionDescriptor) {
    println!(
        "{} {}",
        descriptor.entitlement.cyan(),
        descriptor.entity_type.yellow()
    );
    for (name, value) in &descriptor.entity_args {
        println!("  {}: {}", name.cyan(), value.green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("name=c1").unwrap(),
            ("name".to_string(), "c1".to_string())
        );
        // Only the first '=' separates
        assert_eq!(
            parse_key_value("name=a=b").unwrap(),
            ("name".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_key_value("location=").unwrap(),
            ("location".to_string(), String::new())
        );
    }

    #[test]
    fn test_parse_key_value_errors() {
        assert!(parse_key_value("name").unwrap_err().contains("KEY=VALUE"));
        assert!(parse_key_value("=c1").is_err());
    }

    #[test]
    fn test_collect_args_rejects_duplicates() {
        let args = vec![
            ("name".to_string(), "a".to_string()),
            ("name".to_string(), "b".to_string()),
        ];
        let err = collect_args(args).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }
}
