//! List command implementation.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use serde_json::Value;

use slate_http::Resource;

use crate::cli::ConnectionArgs;
use crate::output;
use crate::session;

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum Collection {
    Teachers,
    Students,
    Exams,
    AssignedExams,
}

impl From<Collection> for Resource {
    fn from(collection: Collection) -> Self {
        match collection {
            Collection::Teachers => Resource::Teachers,
            Collection::Students => Resource::Students,
            Collection::Exams => Resource::Exams,
            Collection::AssignedExams => Resource::AssignedExams,
        }
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Collection to list
    #[arg(value_enum)]
    pub collection: Collection,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: ListArgs, connection: &ConnectionArgs) -> Result<()> {
    let context = session::open(connection)?;
    let resource = Resource::from(args.collection);

    let body: Value = context
        .gateway()
        .get_json(resource.path())
        .await
        .with_context(|| format!("Failed to list {:?}", args.collection))?;

    // Paginated endpoints wrap items in "results".
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) if matches!(map.get("results"), Some(Value::Array(_))) => {
            match map.remove("results") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            }
        }
        other => vec![other],
    };

    if items.is_empty() {
        eprintln!("{}", "No records found.".dimmed());
        return Ok(());
    }

    for item in &items {
        if args.pretty {
            output::json_pretty(item)?;
        } else {
            output::json(item)?;
        }
    }

    Ok(())
}
