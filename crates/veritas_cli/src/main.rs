use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;

use veritas_service::{Config, VeritasService};

mod commands;

#[derive(Parser)]
#[command(name = "veritas")]
#[command(about = "Diploma issuance and verification toolchain", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the database schema from embedded assets
    Rebuild(commands::rebuild::RebuildArgs),

    /// Upload a standalone PDF and register it for verification
    UploadDoc(commands::upload_doc::UploadDocArgs),

    /// Create a student account with its diploma record
    CreateStudent(commands::create_student::CreateStudentArgs),

    /// Delete a student account and its diploma record
    DeleteStudent(commands::delete_student::DeleteStudentArgs),

    /// Resolve a verification code the way the public page does
    Verify(commands::verify::VerifyArgs),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load Config (fails fast if invalid)
    let config = Config::from_env()?;

    // 2. Parse arguments and route to the correct command
    let cli = Cli::parse();

    match cli.command {
        Commands::Rebuild(args) => {
            // Rebuild talks straight to Postgres, no service wiring needed.
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&config.database_url)
                .await?;
            commands::rebuild::execute(pool, args).await?;
        }
        Commands::UploadDoc(args) => {
            let service = VeritasService::connect(&config).await?;
            commands::upload_doc::execute(service, args).await?;
        }
        Commands::CreateStudent(args) => {
            let service = VeritasService::connect(&config).await?;
            commands::create_student::execute(service, args).await?;
        }
        Commands::DeleteStudent(args) => {
            let service = VeritasService::connect(&config).await?;
            commands::delete_student::execute(service, args).await?;
        }
        Commands::Verify(args) => {
            let service = VeritasService::connect(&config).await?;
            commands::verify::execute(service, args).await?;
        }
    }

    Ok(())
}
