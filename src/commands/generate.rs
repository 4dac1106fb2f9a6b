//! Generate static files

use anyhow::Result;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::time::Duration;

use crate::content::loader::ContentLoader;
use crate::generator::Generator;
use crate::Slicepress;

/// Generate the static site
pub fn run(site: &Slicepress) -> Result<()> {
    let start = std::time::Instant::now();

    let documents = ContentLoader::new(site).load_documents()?;
    tracing::info!("Loaded {} documents", documents.len());

    let generator = Generator::new(site)?;
    let stats = generator.generate(&documents)?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} posts ({} skipped, {} assets) in {:.2}s",
        stats.posts,
        stats.skipped,
        stats.assets,
        duration.as_secs_f64()
    );

    Ok(())
}

/// Watch the source directory and config, regenerating on change
///
/// Blocks until the watcher channel closes.
pub fn watch<F>(site: &Slicepress, mut on_change: F) -> Result<()>
where
    F: FnMut(&Slicepress),
{
    let (tx, rx) = std::sync::mpsc::channel();

    // Collapse bursts of events into one rebuild
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if site.source_dir.exists() {
        debouncer
            .watcher()
            .watch(&site.source_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", site.source_dir);
    }

    let config_path = site.config_path();
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events.iter().any(|e| {
                    let path = e.path.to_string_lossy();
                    !path.contains(".git") && !path.contains(".DS_Store") && !path.ends_with('~')
                });
                if !relevant {
                    continue;
                }

                for event in &events {
                    tracing::info!("File changed: {}", event.path.display());
                }

                // Config edits change every page, so reload the site handle
                let site = match Slicepress::new(&site.base_dir) {
                    Ok(site) => site,
                    Err(e) => {
                        tracing::error!("Failed to reload config: {}", e);
                        continue;
                    }
                };
                match run(&site) {
                    Ok(()) => on_change(&site),
                    Err(e) => tracing::error!("Generation failed: {}", e),
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::init::init_site;
    use std::fs;

    #[test]
    fn test_generate_initialized_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();
        let site = Slicepress::new(dir.path()).unwrap();

        run(&site).unwrap();

        let page = fs::read_to_string(site.public_dir.join("blog/hello-world/index.html")).unwrap();
        assert!(page.contains(r#"<h1 data-wio-id="hello-world">Hello World</h1>"#));
        assert!(page.contains("<blockquote>Carpe diem</blockquote>"));
        assert!(site.public_dir.join("index.html").exists());
    }
}
