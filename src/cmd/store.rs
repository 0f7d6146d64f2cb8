use clap::Args;
use serde_json::Value;
use skinstric::cache::SessionCache;
use skinstric::error::SkResult;
use skinstric::intake::{record_capture, record_upload_response};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Upload response to keep for review (JSON file).
    #[arg(short, long, required_unless_present = "capture")]
    pub payload: Option<String>,

    /// Name recorded for the uploaded photo; defaults to the payload's file name.
    #[arg(long, requires = "payload")]
    pub file_name: Option<String>,

    /// Approved camera capture as a `data:<mime>;base64,<payload>` URL.
    #[arg(long)]
    pub capture: Option<String>,
}

pub fn run(args: &StoreArgs, cache_path: &str) -> SkResult<()> {
    let mut cache = SessionCache::open(cache_path)?;

    if let Some(data_url) = &args.capture {
        let submission = record_capture(&mut cache, data_url)?;
        println!(
            "Stored capture preview ({} base64 chars) in {}",
            submission.image.len(),
            cache_path
        );
    }

    if let Some(payload) = &args.payload {
        let raw = fs::read_to_string(payload)?;
        let response: Value = serde_json::from_str(&raw)?;

        let file_name = args.file_name.clone().unwrap_or_else(|| {
            Path::new(payload)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| payload.clone())
        });

        record_upload_response(&mut cache, &file_name, &response)?;
        println!("Stored response for '{}' in {}", file_name, cache_path);
    }

    cache.save()
}
