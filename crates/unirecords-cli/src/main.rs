use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dialoguer::Input;
use tracing::debug;

use unirecords::Dashboard;
use unirecords::logging::init_logging;
use unirecords_config::{ClientConfig, LoggingConfig, QueryCacheConfig, load_dotenv};
use unirecords_models::{
    CreateDepartmentInput, CreateFacultyInput, DepartmentId, DepartmentListParams, ExportFormat,
    FacultyId, FacultyListParams, SessionId, SessionListParams, StaffListParams, StudentId,
    StudentListParams, StudentStatus, UserId, parse_select,
};

#[derive(Parser)]
#[command(name = "unirecords-cli")]
#[command(about = "UniRecords CLI - Administrative tools for the records backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage faculties
    #[command(subcommand)]
    Faculties(FacultyCommand),
    /// Manage departments
    #[command(subcommand)]
    Departments(DepartmentCommand),
    /// Browse and promote students
    #[command(subcommand)]
    Students(StudentCommand),
    /// Browse staff records
    #[command(subcommand)]
    Staff(StaffCommand),
    /// Manage academic sessions
    #[command(subcommand)]
    Sessions(SessionCommand),
    /// Download an export file
    Export {
        /// Resource to export
        #[arg(value_parser = ["students", "staff"])]
        resource: String,

        /// File format (csv or excel)
        #[arg(short = 'f', long, default_value = "csv")]
        format: ExportFormat,

        /// Output path (defaults to `{resource}-{date}.{ext}`)
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum FacultyCommand {
    /// List faculties
    List {
        #[arg(short = 's', long)]
        search: Option<String>,
    },
    /// Show a faculty by code
    Show { code: String },
    /// Create a faculty
    Create {
        #[arg(short = 'n', long)]
        name: Option<String>,

        #[arg(short = 'c', long)]
        code: Option<String>,

        #[arg(short = 'd', long)]
        description: Option<String>,
    },
    /// Delete a faculty by id
    Delete { id: String },
}

#[derive(Subcommand)]
enum DepartmentCommand {
    /// List departments
    List {
        /// Only departments of this faculty id
        #[arg(long)]
        faculty: Option<String>,
    },
    /// Show a department by code
    Show { code: String },
    /// Create a department
    Create {
        #[arg(short = 'n', long)]
        name: Option<String>,

        #[arg(short = 'c', long)]
        code: Option<String>,

        /// Owning faculty id
        #[arg(long)]
        faculty: Option<String>,

        /// Years of study
        #[arg(long)]
        years: Option<u32>,
    },
    /// Assign a head of department
    AssignHod { department: String, user: String },
    /// Delete a department by id
    Delete { id: String },
}

#[derive(Subcommand)]
enum StudentCommand {
    /// List students
    List {
        #[arg(long, default_value = "")]
        department: String,

        #[arg(long, default_value = "all", value_parser = select::<u32>)]
        level: Select<u32>,

        #[arg(long, default_value = "all", value_parser = select::<StudentStatus>)]
        status: Select<StudentStatus>,

        #[arg(short = 's', long, default_value = "")]
        search: String,
    },
    /// Promote a student to a new level
    Promote { id: String, level: u32 },
}

/// A filter flag value. `all` (or blank) clears the filter.
#[derive(Debug, Clone, PartialEq)]
struct Select<T>(Option<T>);

fn select<T>(raw: &str) -> Result<Select<T>, String>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    parse_select::<T>(raw).map(Select).map_err(|e| e.to_string())
}

#[derive(Subcommand)]
enum StaffCommand {
    /// List staff
    List,
    /// Staff totals by employment type
    Stats,
}

#[derive(Subcommand)]
enum SessionCommand {
    /// List sessions
    List,
    /// Show the active session
    Active,
    /// Make a session the active one
    Activate { id: String },
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_logging(&LoggingConfig::from_env());

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("\n❌ {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let client = ClientConfig::from_env();
    debug!(api.url = %client.api_url, "Connecting to records backend");
    let dashboard = Dashboard::from_config(&client, QueryCacheConfig::from_env())
        .context("Invalid backend configuration")?;

    match cli.command {
        Commands::Faculties(command) => handle_faculties(&dashboard, command).await,
        Commands::Departments(command) => handle_departments(&dashboard, command).await,
        Commands::Students(command) => handle_students(&dashboard, command).await,
        Commands::Staff(command) => handle_staff(&dashboard, command).await,
        Commands::Sessions(command) => handle_sessions(&dashboard, command).await,
        Commands::Export {
            resource,
            format,
            out,
        } => handle_export(&dashboard, &resource, format, out).await,
    }
}

async fn handle_faculties(dashboard: &Dashboard, command: FacultyCommand) -> Result<()> {
    let governance = dashboard.governance();

    match command {
        FacultyCommand::List { search } => {
            let mut params = FacultyListParams::default();
            if let Some(term) = search {
                params.pagination = params.pagination.with_search(term);
            }
            let page = governance.faculties(&params).await?;
            for faculty in &page.data {
                println!("{:<8} {:<40} {}", faculty.code, faculty.name, faculty.id);
            }
            println!("\n{} of {} faculties", page.data.len(), page.meta.total);
        }
        FacultyCommand::Show { code } => {
            let faculty = governance.faculty_by_code(&code).await?;
            println!("{} ({})", faculty.name, faculty.code);
            if let Some(dean) = &faculty.dean {
                println!("   Dean: {}", dean.display_name());
            }
            for department in &faculty.departments {
                println!("   - {:<8} {}", department.code, department.name);
            }
        }
        FacultyCommand::Create {
            name,
            code,
            description,
        } => {
            let mut input = CreateFacultyInput::new(
                prompt_missing(name, "Faculty name")?,
                prompt_missing(code, "Faculty code")?,
            );
            input.description = description;

            let faculty = governance.create_faculty(&input).await?;
            println!("\n✅ Faculty created successfully!");
            println!("   Code: {}", faculty.code);
            println!("   Id: {}", faculty.id);
        }
        FacultyCommand::Delete { id } => {
            governance.delete_faculty(&FacultyId::new(id)).await?;
            println!("✅ Faculty deleted");
        }
    }
    Ok(())
}

async fn handle_departments(dashboard: &Dashboard, command: DepartmentCommand) -> Result<()> {
    let governance = dashboard.governance();

    match command {
        DepartmentCommand::List { faculty } => {
            let params = match faculty {
                Some(id) => DepartmentListParams::for_faculty(FacultyId::new(id)),
                None => DepartmentListParams::default(),
            };
            let page = governance.departments(&params).await?;
            for department in &page.data {
                let hod = department
                    .hod
                    .as_ref()
                    .map(|h| h.display_name())
                    .unwrap_or_else(|| "-".to_string());
                println!("{:<8} {:<40} {}", department.code, department.name, hod);
            }
            println!("\n{} of {} departments", page.data.len(), page.meta.total);
        }
        DepartmentCommand::Show { code } => {
            let department = governance.department_by_code(&code).await?;
            println!("{} ({})", department.name, department.code);
            if let Some(years) = department.number_of_years {
                println!("   Years of study: {years}");
            }
            for scale in &department.grade_scales {
                println!(
                    "   {:<3} {:>5.1} - {:>5.1}  {:.1}",
                    scale.grade, scale.min_score, scale.max_score, scale.grade_point
                );
            }
        }
        DepartmentCommand::Create {
            name,
            code,
            faculty,
            years,
        } => {
            let mut input = CreateDepartmentInput::new(
                prompt_missing(name, "Department name")?,
                prompt_missing(code, "Department code")?,
                FacultyId::new(prompt_missing(faculty, "Faculty id")?),
            );
            input.number_of_years = years;

            let department = governance.create_department(&input).await?;
            println!("\n✅ Department created successfully!");
            println!("   Code: {}", department.code);
            println!("   Id: {}", department.id);
        }
        DepartmentCommand::AssignHod { department, user } => {
            governance
                .assign_hod(&DepartmentId::new(department), &UserId::new(user))
                .await?;
            println!("✅ HOD assigned");
        }
        DepartmentCommand::Delete { id } => {
            governance.delete_department(&DepartmentId::new(id)).await?;
            println!("✅ Department deleted");
        }
    }
    Ok(())
}

async fn handle_students(dashboard: &Dashboard, command: StudentCommand) -> Result<()> {
    let students = dashboard.students();

    match command {
        StudentCommand::List {
            department,
            level,
            status,
            search,
        } => {
            let params = StudentListParams {
                level: level.0,
                status: status.0,
                ..StudentListParams::from_filters(&department, "", "", &search)
            };
            let page = students.list(&params).await?;
            for student in &page.data {
                println!(
                    "{:<14} {:<32} {:>4} {}",
                    student.matric_number,
                    student.display_name(),
                    student.level,
                    student.status
                );
            }
            println!("\n{} of {} students", page.data.len(), page.meta.total);
        }
        StudentCommand::Promote { id, level } => {
            students.promote(&StudentId::new(id), level).await?;
            println!("✅ Student promoted to level {level}");
        }
    }
    Ok(())
}

async fn handle_staff(dashboard: &Dashboard, command: StaffCommand) -> Result<()> {
    let staff = dashboard.staff();

    match command {
        StaffCommand::List => {
            let page = staff.list(&StaffListParams::default()).await?;
            for member in &page.data {
                println!(
                    "{:<12} {:<32} {:<8} {}",
                    member.staff_number,
                    member.display_name(),
                    member.department_code,
                    member.employment_type.label()
                );
            }
            println!("\n{} of {} staff", page.data.len(), page.meta.total);
        }
        StaffCommand::Stats => {
            let stats = staff.stats().await?;
            println!("Total staff: {}", stats.total);
            for entry in &stats.by_employment_type {
                println!("   {:<12} {}", entry.employment_type.label(), entry.count);
            }
        }
    }
    Ok(())
}

async fn handle_sessions(dashboard: &Dashboard, command: SessionCommand) -> Result<()> {
    let sessions = dashboard.sessions();

    match command {
        SessionCommand::List => {
            let page = sessions.list(&SessionListParams::default()).await?;
            for session in &page.data {
                let marker = if session.is_active { "*" } else { " " };
                println!(
                    "{marker} {:<12} {} - {}  {}",
                    session.label,
                    session.start_date.format("%Y-%m-%d"),
                    session.end_date.format("%Y-%m-%d"),
                    session.id
                );
            }
        }
        SessionCommand::Active => {
            let session = sessions.active().await?;
            println!("{} ({})", session.label, session.id);
        }
        SessionCommand::Activate { id } => {
            sessions.activate(&SessionId::new(id)).await?;
            println!("✅ Session activated");
        }
    }
    Ok(())
}

async fn handle_export(
    dashboard: &Dashboard,
    resource: &str,
    format: ExportFormat,
    out: Option<PathBuf>,
) -> Result<()> {
    let contents = match resource {
        "students" => dashboard.students().export(format).await?,
        _ => dashboard.staff().export(format).await?,
    };

    let path = out.unwrap_or_else(|| PathBuf::from(format.file_name(resource, chrono::Utc::now())));
    std::fs::write(&path, &contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("✅ Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

/// Returns `value`, prompting for it when it was not passed on the command line.
fn prompt_missing(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Input::new()
            .with_prompt(prompt)
            .interact_text()
            .with_context(|| format!("Failed to read {}", prompt.to_lowercase())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("unirecords-cli").chain(args.iter().copied()))
    }

    fn student_filters(args: &[&str]) -> (Select<u32>, Select<StudentStatus>) {
        match parse(args).unwrap().command {
            Commands::Students(StudentCommand::List { level, status, .. }) => (level, status),
            _ => panic!("expected students list"),
        }
    }

    #[test]
    fn test_students_list_rejects_bad_level() {
        assert!(parse(&["students", "list", "--level", "abc"]).is_err());
    }

    #[test]
    fn test_students_list_rejects_bad_status() {
        assert!(parse(&["students", "list", "--status", "bogus"]).is_err());
    }

    #[test]
    fn test_students_list_filters_default_to_all() {
        let (level, status) = student_filters(&["students", "list"]);
        assert_eq!(level, Select(None));
        assert_eq!(status, Select(None));
    }

    #[test]
    fn test_students_list_parses_filters() {
        let (level, status) =
            student_filters(&["students", "list", "--level", "300", "--status", "suspended"]);
        assert_eq!(level, Select(Some(300)));
        assert_eq!(status, Select(Some(StudentStatus::Suspended)));

        let (level, _) = student_filters(&["students", "list", "--level", "ALL"]);
        assert_eq!(level, Select(None));
    }
}
