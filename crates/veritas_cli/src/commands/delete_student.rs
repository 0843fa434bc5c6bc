use clap::Args;
use uuid::Uuid;

use veritas_service::VeritasService;

#[derive(Debug, Args)]
pub struct DeleteStudentArgs {
    /// Account id of the student to remove
    #[arg(short, long)]
    pub id: Uuid,
}

pub async fn execute(
    service: VeritasService,
    args: DeleteStudentArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("🗑️  Deleting Student {}...", args.id);

    service.delete_student(args.id).await?;

    println!("✅ Account and diploma record removed.");
    Ok(())
}
