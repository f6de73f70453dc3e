use std::io;

use vault_dispatch::DispatchEngine;

pub fn run(engine: &DispatchEngine, slug: &str, json: bool) -> io::Result<()> {
    let record = engine.unpublish(slug).map_err(io::Error::other)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("Unpublished: {} (was {})", slug, record.published_url);
    }
    Ok(())
}
