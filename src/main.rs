//! hiera-redis command-line lookup.
//!
//! Resolves each key given on the command line within one lookup session, printing
//! `KEY<TAB>JSON` for every key found.

use std::process::ExitCode;

use anyhow::{Context, bail};

use hiera_redis::{InMemoryContext, LookupOptions, RedisLookupKey, StoreConfig};

const ENV_SCOPE: &str = "HIERA_REDIS_SCOPE";

const USAGE: &str = "usage: hiera-redis [--scope SCOPE] KEY...";

struct Args {
    scope: Option<String>,
    keys: Vec<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut scope = None;
    let mut keys = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--scope" | "-s" => {
                scope = Some(args.next().context("--scope requires a value")?);
            }
            "--help" | "-h" => bail!(USAGE),
            _ => keys.push(arg),
        }
    }

    if keys.is_empty() {
        bail!(USAGE);
    }

    Ok(Args { scope, keys })
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args(std::env::args().skip(1))?;

    let config = StoreConfig::from_env()?;
    config.validate()?;

    tracing::info!(endpoint = %config.endpoint(), "hiera-redis starting");

    let options = LookupOptions {
        scope: args
            .scope
            .or_else(|| std::env::var(ENV_SCOPE).ok().filter(|s| !s.is_empty())),
        ..Default::default()
    };

    let mut session = InMemoryContext::with_capacity(config.session_capacity);
    let function = RedisLookupKey::from_config(config);
    let mut missing = 0usize;

    for key in &args.keys {
        match function.execute_with_options(key, &options, &mut session) {
            Ok(value) => println!("{}\t{}", key, serde_json::to_string(&value)?),
            Err(e) if e.is_not_found() => {
                eprintln!("{key}: not found");
                missing += 1;
            }
            Err(e) => return Err(e).with_context(|| format!("lookup of '{key}' failed")),
        }
    }

    if missing > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_parse_keys_and_scope() {
        let parsed = parse_args(args(&["--scope", "common", "foo", "bar"])).expect("parse");
        assert_eq!(parsed.scope.as_deref(), Some("common"));
        assert_eq!(parsed.keys, vec!["foo".to_string(), "bar".to_string()]);
    }

    #[test]
    fn test_parse_requires_key() {
        assert!(parse_args(args(&["--scope", "common"])).is_err());
    }

    #[test]
    fn test_parse_scope_requires_value() {
        assert!(parse_args(args(&["foo", "--scope"])).is_err());
    }
}
