use clap::Args;

use veritas_service::VeritasService;

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Document id or student validation code
    pub code: String,
}

pub async fn execute(
    service: VeritasService,
    args: VerifyArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Resolving '{}'...", args.code);

    let record = service.resolve(&args.code).await?;

    println!("✅ Record Found.");
    println!("   Title:      {}", record.title);
    println!("   File URL:   {}", record.file_url);
    println!("   Registered: {}", record.created_at.format("%d/%m/%Y %H:%M"));
    Ok(())
}
