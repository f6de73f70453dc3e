use std::io;
use std::path::Path;

use vault_dispatch::git::RemoteSync;
use vault_dispatch::{DispatchEngine, PublishError};

pub fn run(
    engine: &DispatchEngine,
    path: &Path,
    slug: Option<&str>,
    republish: bool,
    json: bool,
) -> io::Result<()> {
    let path = super::resolve_note_path(engine, path);

    let outcome = match engine.publish(&path, slug, republish) {
        Ok(outcome) => outcome,
        Err(PublishError::Unsafe { warnings }) => {
            eprintln!("Not safe to publish:");
            for warning in &warnings {
                eprintln!("  - {}", warning);
            }
            eprintln!("Fix issues, or pass --republish for an already-published note.");
            return Err(io::Error::other("note is not safe to publish"));
        }
        Err(e) => return Err(io::Error::other(e)),
    };

    if json {
        let payload = serde_json::json!({
            "record": outcome.record,
            "remote_sync": outcome.remote_sync,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("Published: {}", outcome.record.published_url);
    match &outcome.remote_sync {
        RemoteSync::Pushed => println!("Pushed to remote."),
        RemoteSync::Skipped => println!("Nothing new to commit (already up to date)."),
        RemoteSync::Failed { detail } => {
            // Partial success: the registry and local copy are updated
            println!("Registry updated, but remote sync failed: {}", detail);
            println!("Retry the sync from the site repo when ready.");
        }
    }
    Ok(())
}
