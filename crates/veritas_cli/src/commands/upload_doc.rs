use std::path::{Path, PathBuf};

use clap::Args;

use veritas_service::issuance::CreateDocumentParams;
use veritas_service::VeritasService;

#[derive(Debug, Args)]
pub struct UploadDocArgs {
    /// Path to the file to register (e.g. ./certificado.pdf)
    #[arg(short, long)]
    pub file: PathBuf,
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

pub async fn execute(
    service: VeritasService,
    args: UploadDocArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("📎 Registering Document...");

    let file_name = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or("file path has no file name")?
        .to_string();
    let bytes = std::fs::read(&args.file)?;
    let content_type = content_type_for(&args.file);

    let issued = service
        .create_document(CreateDocumentParams {
            file_name,
            bytes,
            content_type: content_type.to_string(),
        })
        .await?;

    println!("✅ Document Registered. UUID: {}", issued.id);
    println!("   File URL:   {}", issued.file_url);
    println!("   Verify URL: {}", issued.verify_url);
    Ok(())
}
