use std::io;
use std::path::Path;

use vault_dispatch::{lint, scanner, DispatchEngine};

pub fn run(engine: &DispatchEngine, path: &Path, json: bool) -> io::Result<()> {
    let path = super::resolve_note_path(engine, path);
    let note = scanner::read_note(&path, &engine.config().vault_path)?;
    let warnings = lint::lint(&note);

    if json {
        println!("{}", serde_json::to_string_pretty(&warnings)?);
        return Ok(());
    }

    if warnings.is_empty() {
        println!("Ready to publish");
        return Ok(());
    }

    for warning in &warnings {
        let kind = if warning.blocking { "blocking" } else { "advisory" };
        println!("[{}] {}", kind, warning.message);
    }
    if lint::is_safe(&warnings) {
        println!("Ready to publish (advisories only)");
    } else {
        println!("Fix issues to publish");
    }
    Ok(())
}
