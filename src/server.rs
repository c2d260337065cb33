use std::path::{Path, PathBuf};

use axum::Router;
use notify::{Event, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tower_http::services::ServeDir;
use tower_livereload::LiveReloadLayer;

use crate::gallery::{GalleryOptions, write_gallery};
use crate::prefs;

/// Regenerate the gallery from the preferences file
fn regenerate(prefs_path: &Path, output: &Path, options: &GalleryOptions) -> anyhow::Result<()> {
    let prefs = prefs::load_or_default(prefs_path)?;
    write_gallery(&prefs, output, options)
}

/// Start the preview server with hot reload
pub async fn serve(prefs_path: &Path, output: &Path, port: u16, options: GalleryOptions) -> anyhow::Result<()> {
    regenerate(prefs_path, output, &options)?;
    println!("Generated initial gallery in {}", output.display());

    // Create channel for file change notifications
    let (tx, mut rx) = mpsc::channel::<()>(1);

    let watched_file = prefs_path.file_name().map(|n| n.to_os_string());
    let mut watcher = notify::recommended_watcher(move |res: Result<Event, _>| {
        if let Ok(event) = res {
            let touches_prefs = event
                .paths
                .iter()
                .any(|p| p.file_name().map(|n| n.to_os_string()) == watched_file);
            if touches_prefs && (event.kind.is_modify() || event.kind.is_create()) {
                let _ = tx.blocking_send(());
            }
        }
    })?;

    // Watch the preferences file's parent directory
    let watch_path = prefs_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    watcher.watch(&watch_path, RecursiveMode::NonRecursive)?;

    let prefs_for_regen = prefs_path.to_path_buf();
    let output_for_regen = output.to_path_buf();
    tokio::spawn(async move {
        while rx.recv().await.is_some() {
            // Debounce: wait a bit for rapid changes to settle
            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
            while rx.try_recv().is_ok() {}

            match regenerate(&prefs_for_regen, &output_for_regen, &options) {
                Ok(()) => println!("Regenerated gallery"),
                Err(e) => {
                    tracing::warn!(error = %e, "regeneration failed");
                    eprintln!("Error regenerating: {e}");
                }
            }
        }
    });

    let livereload = LiveReloadLayer::new();
    let reloader = livereload.reloader();

    // Reload the browser whenever the output changes
    let mut output_watcher = notify::recommended_watcher(move |res: Result<Event, _>| {
        if let Ok(event) = res {
            if event.kind.is_modify() || event.kind.is_create() {
                reloader.reload();
            }
        }
    })?;
    output_watcher.watch(output, RecursiveMode::Recursive)?;

    let app = Router::new()
        .fallback_service(ServeDir::new(output))
        .layer(livereload);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!("Preview server running at http://localhost:{port}");
    println!("Watching {} for changes...", prefs_path.display());
    println!("Press Ctrl+C to stop");

    // Keep watchers alive
    let _watcher = watcher;
    let _output_watcher = output_watcher;

    axum::serve(listener, app).await?;

    Ok(())
}
