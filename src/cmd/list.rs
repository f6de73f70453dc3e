use std::io;

use vault_dispatch::DispatchEngine;

pub fn run(engine: &DispatchEngine, limit: Option<usize>, json: bool) -> io::Result<()> {
    let mut views = engine.scan().map_err(io::Error::other)?;

    // Most recently modified first, like the app's file list
    views.sort_by(|a, b| b.modified.cmp(&a.modified));
    if let Some(limit) = limit {
        views.truncate(limit);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    for view in &views {
        let title = view.title.as_deref().unwrap_or("(untitled)");
        let marker = if view.is_safe { " " } else { "!" };
        println!(
            "{} {:<12} {:<10} {}  [{}]",
            marker,
            view.status.to_string(),
            view.visibility.to_string(),
            title,
            view.source_dir,
        );
        for warning in &view.warnings {
            println!("      - {}", warning);
        }
    }
    println!("{} notes", views.len());
    Ok(())
}
