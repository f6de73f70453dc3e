use std::io;

use vault_dispatch::DispatchEngine;

pub fn run(engine: &DispatchEngine, json: bool) -> io::Result<()> {
    let status = engine.repo_status();

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    if status.ok {
        println!("Site repo ok (branch: {})", status.branch);
    } else if let Some(error) = &status.error {
        println!("Site repo not ready: {}", error);
    }
    if !status.dirty_files.is_empty() {
        println!("{} uncommitted changes outside published content:", status.dirty_files.len());
        for file in &status.dirty_files {
            println!("  {}", file);
        }
    }
    Ok(())
}
