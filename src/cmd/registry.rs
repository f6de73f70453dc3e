use std::io;

use chrono::DateTime;

use vault_dispatch::constants as C;
use vault_dispatch::DispatchEngine;

pub fn run(engine: &DispatchEngine, json: bool) -> io::Result<()> {
    let records = engine.records();

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("Nothing published.");
        return Ok(());
    }

    for record in &records {
        let when = DateTime::from_timestamp(record.published_at as i64, 0)
            .map(|dt| dt.format(C::DATE_DISPLAY_FORMAT).to_string())
            .unwrap_or_default();
        println!(
            "{:<30} {:<10} {}  {}",
            record.slug, record.visibility.to_string(), when, record.published_url
        );
    }
    Ok(())
}
