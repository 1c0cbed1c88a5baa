use anyhow::Result;
use serde::Serialize;
use spacelaunch_lib::ListRow;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

#[derive(Tabled, Serialize)]
struct LaunchRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Mission")]
    #[serde(rename = "Mission")]
    mission: String,
    #[tabled(rename = "Site")]
    #[serde(rename = "Site")]
    site: String,
    #[tabled(rename = "Patch")]
    #[serde(rename = "Patch")]
    patch: String,
}

// -- Row builders --

fn build_launch_rows(rows: &[ListRow]) -> Vec<LaunchRow> {
    rows.iter()
        .map(|r| LaunchRow {
            id: r.id.clone(),
            mission: r.title.clone().unwrap_or_default(),
            site: r.description.clone().unwrap_or_default(),
            patch: r.thumbnail_url.clone().unwrap_or_default(),
        })
        .collect()
}

// -- Table output --

pub fn print_launches_table(rows: &[ListRow]) {
    println!("{}", Table::new(build_launch_rows(rows)));
}

// -- Markdown output --

pub fn print_launches_markdown(rows: &[ListRow]) {
    let mut table = Table::new(build_launch_rows(rows));
    table.with(Style::markdown());
    println!("{}", table);
}

// -- CSV output --

pub fn print_launches_csv(rows: &[ListRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in build_launch_rows(rows) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
