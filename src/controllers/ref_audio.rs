use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    controllers::load_files,
    domain::reference_audio::{
        DeleteAck, RefAudioCatalog, ReferenceAudioManager, ReferenceUploadBatch,
    },
    error::AppResult,
};

pub struct RefAudioController {
    manager: Arc<ReferenceAudioManager>,
}

impl RefAudioController {
    pub fn new(manager: Arc<ReferenceAudioManager>) -> Self {
        Self { manager }
    }

    /// `refs list`
    pub async fn list(&self) -> AppResult<RefAudioCatalog> {
        let catalog = self.manager.refresh().await?;
        println!("{}", render_catalog(&catalog, self.manager.selected().as_deref()));
        Ok(catalog)
    }

    /// `refs preview <id>` - returns where the clip was written
    pub async fn preview(&self, id: &str) -> AppResult<String> {
        let location = self.manager.preview(id).await?;
        println!("Preview of {} saved to {}", id, location);
        Ok(location)
    }

    /// `refs upload <files>...`
    pub async fn upload(&self, paths: &[PathBuf]) -> AppResult<ReferenceUploadBatch> {
        let files = load_files(paths).await?;
        let batch = self.manager.upload(files).await?;

        if batch.result.is_complete_success() {
            println!("{}", batch.result.summary());
        } else {
            eprintln!("{}", batch.result.summary());
        }
        if let Some(selected) = batch.selected.as_deref() {
            println!("Selected reference audio: {}", selected);
        }
        Ok(batch)
    }

    /// `refs delete <id>`
    pub async fn delete(&self, id: &str) -> AppResult<DeleteAck> {
        let ack = self.manager.delete(id).await?;
        println!("{}", ack.message);
        Ok(ack)
    }
}

/// Catalog as printed by `refs list`: one block per category, the selected
/// entry marked with `*`.
pub fn render_catalog(catalog: &RefAudioCatalog, selected: Option<&str>) -> String {
    if catalog.is_empty() {
        return "No reference audio available".to_string();
    }

    let mut lines = Vec::new();
    for (category, entries) in catalog.grouped() {
        lines.push(format!("{}:", category));
        for entry in entries {
            let marker = if selected == Some(entry.id.as_str()) { '*' } else { ' ' };
            if entry.transcript.is_empty() {
                lines.push(format!(" {} {}", marker, entry.id));
            } else {
                lines.push(format!(" {} {}  \"{}\"", marker, entry.id, entry.transcript));
            }
        }
    }
    lines.join("\n")
}
