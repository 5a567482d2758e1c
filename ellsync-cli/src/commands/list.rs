//! `ellsync <ROUTER> list [--all] [--json]`

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use ellsync_core::{OsFilesystem, Router, StreamListing};

/// Arguments for `ellsync list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Include streams whose directories are not currently present.
    #[arg(long)]
    pub all: bool,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct StreamRow {
    #[tabled(rename = "stream")]
    name: String,
    #[tabled(rename = "from")]
    from: String,
    #[tabled(rename = "to")]
    to: String,
}

#[derive(Tabled)]
struct StreamRowWithAvailability {
    #[tabled(rename = "stream")]
    name: String,
    #[tabled(rename = "from")]
    from: String,
    #[tabled(rename = "to")]
    to: String,
    #[tabled(rename = "available")]
    available: String,
}

impl ListArgs {
    pub fn run(self, router: &Router) -> Result<()> {
        let rows = if self.all {
            router.list_all(&OsFilesystem)
        } else {
            router.list(&OsFilesystem)
        };

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&rows).context("failed to serialize stream list")?
            );
            return Ok(());
        }

        if rows.is_empty() {
            println!("No streams available.");
            return Ok(());
        }

        let mut table = if self.all {
            Table::new(rows.into_iter().map(with_availability))
        } else {
            Table::new(rows.into_iter().map(|r| StreamRow {
                name: r.name.0,
                from: r.from,
                to: r.to,
            }))
        };
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}

fn with_availability(r: StreamListing) -> StreamRowWithAvailability {
    let available = if r.available {
        "yes".green().to_string()
    } else {
        "no".red().to_string()
    };
    StreamRowWithAvailability {
        name: r.name.0,
        from: r.from,
        to: r.to,
        available,
    }
}
