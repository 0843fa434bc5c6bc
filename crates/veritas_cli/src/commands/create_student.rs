use clap::Args;

use veritas_core::models::EnrollmentStatus;
use veritas_service::issuance::CreateStudentParams;
use veritas_service::VeritasService;

#[derive(Debug, Args)]
pub struct CreateStudentArgs {
    /// Login e-mail for the new student account
    #[arg(long)]
    pub email: String,

    /// Initial password
    #[arg(long)]
    pub password: String,

    /// Full name as printed on the diploma
    #[arg(long)]
    pub full_name: String,

    /// Course name (e.g. "Direito")
    #[arg(long)]
    pub course: String,

    /// Registration number ("matrícula")
    #[arg(long, default_value = "")]
    pub registration_number: String,

    /// Public URL of the diploma PDF
    #[arg(long, default_value = "")]
    pub diploma_url: String,

    /// Verification code; generated when omitted
    #[arg(long)]
    pub code: Option<String>,

    /// Enrollment status (CONCLUÍDO, CURSANDO, TRANCADO, CANCELADO)
    #[arg(long)]
    pub status: Option<String>,

    /// Academic period (e.g. "2023.2")
    #[arg(long)]
    pub period: Option<String>,

    /// Average grade (e.g. "8.75")
    #[arg(long)]
    pub grade: Option<String>,

    /// Mandatory hours completion (e.g. "100%")
    #[arg(long)]
    pub mandatory_hours: Option<String>,

    /// Complementary hours completion (e.g. "100%")
    #[arg(long)]
    pub complementary_hours: Option<String>,

    /// Registration book entry (e.g. "LB-2024/001")
    #[arg(long)]
    pub book: Option<String>,

    /// Issue date, dd/mm/YYYY
    #[arg(long)]
    pub issue_date: Option<String>,
}

pub async fn execute(
    service: VeritasService,
    args: CreateStudentArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("🎓 Issuing Student Diploma Record...");

    let enrollment_status = args
        .status
        .map(EnrollmentStatus::try_from)
        .transpose()?;

    let issued = service
        .create_student(CreateStudentParams {
            email: args.email,
            password: args.password,
            full_name: args.full_name,
            course_name: args.course,
            registration_number: args.registration_number,
            diploma_url: args.diploma_url,
            validation_code: args.code,
            enrollment_status,
            academic_period: args.period,
            average_grade: args.grade,
            mandatory_hours_pct: args.mandatory_hours,
            complementary_hours_pct: args.complementary_hours,
            registration_book: args.book,
            issue_date: args.issue_date,
        })
        .await?;

    println!("✅ Student Issued. Account: {}", issued.account_id);
    println!("   Validation Code: {}", issued.validation_code);
    println!("   Verify URL:      {}", issued.verify_url);
    Ok(())
}
