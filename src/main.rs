use anyhow::Result;
use clap::{Parser, Subcommand};
use dialoguer::Input;
use dotenvy::dotenv;
use sms::cli::{course_line, render_courses, render_students, student_line};
use sms::logging::init_tracing;
use sms::state::{AppState, init_app_state};
use sms_cli::seeder::{self, SeedConfig};
use sms_config::{DatabaseConfig, LoggingConfig};
use sms_models::{CourseId, CreateStudentDto};

#[derive(Parser)]
#[command(name = "sms")]
#[command(about = "SMS - Student management tools", long_about = None)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run pending database migrations
    Migrate,
    /// Course lookups
    #[command(subcommand)]
    Courses(CourseCommands),
    /// Student creation and lookups
    #[command(subcommand)]
    Students(StudentCommands),
    /// Seed the database with fake courses and students
    Seed {
        /// Number of courses to create
        #[arg(short = 'c', long, default_value = "8")]
        courses: usize,

        /// Number of students to create
        #[arg(short = 's', long, default_value = "40")]
        students: usize,
    },
    /// Delete all courses and students
    ClearSeed,
}

#[derive(Subcommand)]
enum CourseCommands {
    /// List all courses
    List,
    /// Show one course
    Get {
        /// Course ID
        id: CourseId,
    },
}

#[derive(Subcommand)]
enum StudentCommands {
    /// List all students
    List,
    /// Find a student by email
    Get {
        /// Email address
        email: String,
    },
    /// Create a student
    Create {
        /// Email address (prompted if not provided)
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Full name (prompted if not provided)
        #[arg(short = 'n', long)]
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = init_tracing(&LoggingConfig::from_env()) {
        eprintln!("⚠️  {:#}. Continuing without logging...", e);
    }

    if let Err(e) = run(cli).await {
        eprintln!("\n❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = DatabaseConfig::from_env()?;
    let state = init_app_state(&config).await?;

    match cli.command {
        Commands::Migrate => handle_migrate(&state).await,
        Commands::Courses(command) => handle_courses(&state, command, cli.json).await,
        Commands::Students(command) => handle_students(&state, command, cli.json).await,
        Commands::Seed { courses, students } => {
            let report = seeder::seed_all(&state.db, &SeedConfig::new(courses, students)).await?;
            println!(
                "✅ Created {} courses and {} students",
                report.courses, report.students
            );
            Ok(())
        }
        Commands::ClearSeed => {
            let report = seeder::clear_all(&state.db).await?;
            println!(
                "✅ Deleted {} courses and {} students",
                report.courses, report.students
            );
            Ok(())
        }
    }
}

async fn handle_migrate(state: &AppState) -> Result<()> {
    sms_db::migrator().run(&state.db).await?;
    println!("✅ Migrations applied");
    Ok(())
}

async fn handle_courses(state: &AppState, command: CourseCommands, json: bool) -> Result<()> {
    match command {
        CourseCommands::List => {
            let courses = state
                .courses
                .get_all_courses()
                .await
                .map_err(|e| e.into_anyhow())?;
            println!("{}", render_courses(&courses, json)?);
        }
        CourseCommands::Get { id } => {
            let course = state
                .courses
                .get_course_by_id(id)
                .await
                .map_err(|e| e.into_anyhow())?;
            println!("{}", sms::cli::render(&course, json, course_line)?);
        }
    }
    Ok(())
}

async fn handle_students(state: &AppState, command: StudentCommands, json: bool) -> Result<()> {
    match command {
        StudentCommands::List => {
            let students = state
                .students
                .get_all_students()
                .await
                .map_err(|e| e.into_anyhow())?;
            println!("{}", render_students(&students, json)?);
        }
        StudentCommands::Get { email } => {
            let student = state
                .students
                .get_student_by_email(&email)
                .await
                .map_err(|e| e.into_anyhow())?;
            println!("{}", sms::cli::render(&student, json, student_line)?);
        }
        StudentCommands::Create { email, name } => {
            let email = match email {
                Some(email) => email,
                None => Input::<String>::new().with_prompt("Email address").interact_text()?,
            };
            let name = match name {
                Some(name) => name,
                None => Input::<String>::new().with_prompt("Full name").interact_text()?,
            };

            let student = state
                .students
                .create_student(CreateStudentDto::new(email, name))
                .await
                .map_err(|e| e.into_anyhow())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&student)?);
            } else {
                println!("✅ Student created successfully!");
                println!("   ID: {}", student.id);
                println!("   Email: {}", student.email);
                println!("   Name: {}", student.name);
            }
        }
    }
    Ok(())
}
