use clap::{Parser, Subcommand};
use learnup::api::QuizBackend;
use learnup::certificate::Certificate;
use learnup::error::{AppResult, run_with_error_handler};
use learnup::model::entity::{
    Course,
    CourseCreate,
    Discipline,
    DisciplineCreate,
    Lesson,
    LessonCreate,
    Specialty,
    SpecialtyCreate,
    User,
};
use learnup::quiz::{QuizError, ResultReview};
use learnup::{Config, TOKEN_ENV};

mod prompt;
mod quiz;

#[derive(Parser, Debug)]
#[command(about = "LearnUp command-line client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and print the bearer token. The password is read from
    /// `LEARNUP_PASSWORD` or prompted for on stdin.
    Login {
        #[arg(long)]
        email: String,
    },

    /// Browse and manage courses
    Course {
        #[command(subcommand)]
        action: CourseCommands,
    },

    /// Browse and manage lessons
    Lesson {
        #[command(subcommand)]
        action: LessonCommands,
    },

    /// Manage disciplines
    Discipline {
        #[command(subcommand)]
        action: DisciplineCommands,
    },

    /// Manage specialties
    Specialty {
        #[command(subcommand)]
        action: SpecialtyCommands,
    },

    /// List users (admin only)
    Users,

    /// Take the exam of a course
    Quiz {
        #[arg(long)]
        course_id: i64,
    },

    /// Review a stored attempt
    #[command(name = "result")]
    Review {
        #[arg(long)]
        id: i64,
    },

    /// Print the certificate of a passed attempt
    Certificate {
        #[arg(long)]
        result_id: i64,
        /// Name printed on the certificate, defaults to the signed-in user
        #[arg(long)]
        student: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CourseCommands {
    List {
        /// Only courses of this specialty
        #[arg(long)]
        specialty_id: Option<i64>,
    },
    Show {
        #[arg(long)]
        id: i64,
    },
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        specialty_id: i64,
        #[arg(long)]
        required_score: Option<u32>,
        /// URL of the cover image
        #[arg(long)]
        image: Option<String>,
    },
    Delete {
        #[arg(long)]
        id: i64,
    },
    Enroll {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum LessonCommands {
    List {
        #[arg(long)]
        course_id: i64,
    },
    Add {
        #[arg(long)]
        course_id: i64,
        #[arg(long)]
        title: String,
        /// Path to a Markdown file with lesson content
        #[arg(long)]
        file: String,
        #[arg(long)]
        position: Option<i32>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DisciplineCommands {
    List,
    Add {
        #[arg(long)]
        name: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SpecialtyCommands {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        discipline_id: i64,
    },
}

#[tokio::main]
async fn main() {
    learnup::setup_trace();
    run_with_error_handler(run).await;
}

async fn run() -> AppResult<()> {
    let args = Cli::parse();
    let client = learnup::build_client().await?;
    let defaults = Config::get_or_init(cfg!(debug_assertions)).await.quiz();

    match args.command {
        Commands::Login { email } => {
            let password = prompt::password(&mut prompt::stdin_lines()).await?;
            let session = client.login(&email, &password).await?;
            if let Some(user) = session.user() {
                eprintln!("Signed in as {} ({})", user.name(), user.role());
            }
            let token = session.bearer()?;
            println!("export {TOKEN_ENV}={token}");
        }

        Commands::Course { action } => match action {
            CourseCommands::List { specialty_id } => {
                let courses = match specialty_id {
                    Some(id) => client.specialty_courses(id).await?,
                    None => client.list::<Course>().await?,
                };
                for c in courses {
                    println!("{:>5}  {}", c.id(), c.title());
                }
            }
            CourseCommands::Show { id } => {
                let course: Course = client.find_by_id(id).await?;
                println!("{}\n\n{}", course.title(), course.description());
                if let Some(image) = course.image() {
                    println!("\nCover: {image}");
                }
                match course.exam() {
                    Some(exam) => println!(
                        "\nExam #{} (pass at {}%)",
                        exam.id,
                        course.required_score().unwrap_or(defaults.required_score())
                    ),
                    None => println!("\nNo exam yet."),
                }
                for lesson in client.course_lessons(id).await? {
                    println!("  - {}", lesson.title());
                }
            }
            CourseCommands::Add { title, description, specialty_id, required_score, image } => {
                let course = client
                    .create::<Course>(&CourseCreate {
                        title,
                        description,
                        specialty_id,
                        required_score,
                        image,
                    })
                    .await?;
                println!("Course created: #{} {}", course.id(), course.title());
            }
            CourseCommands::Delete { id } => {
                client.delete::<Course>(id).await?;
                println!("Course #{id} deleted");
            }
            CourseCommands::Enroll { id } => {
                client.enroll(id).await?;
                println!("Enrolled in course #{id}");
            }
        },

        Commands::Lesson { action } => match action {
            LessonCommands::List { course_id } => {
                for lesson in client.course_lessons(course_id).await? {
                    println!("{:>5}  {}", lesson.id(), lesson.title());
                }
            }
            LessonCommands::Add { course_id, title, file, position } => {
                let content = std::fs::read_to_string(file)?;
                let lesson = client
                    .create::<Lesson>(&LessonCreate {
                        course_id,
                        title,
                        content,
                        position,
                    })
                    .await?;
                println!("Lesson created: #{} {}", lesson.id(), lesson.title());
            }
        },

        Commands::Discipline { action } => match action {
            DisciplineCommands::List => {
                for d in client.list::<Discipline>().await? {
                    println!("{:>5}  {}", d.id(), d.name());
                }
            }
            DisciplineCommands::Add { name } => {
                let d = client.create::<Discipline>(&DisciplineCreate { name }).await?;
                println!("Discipline created: #{} {}", d.id(), d.name());
            }
        },

        Commands::Specialty { action } => match action {
            SpecialtyCommands::List => {
                for s in client.list::<Specialty>().await? {
                    println!("{:>5}  {} (discipline #{})", s.id(), s.name(), s.discipline_id());
                }
            }
            SpecialtyCommands::Add { name, discipline_id } => {
                let s = client
                    .create::<Specialty>(&SpecialtyCreate { name, discipline_id })
                    .await?;
                println!("Specialty created: #{} {}", s.id(), s.name());
            }
        },

        Commands::Users => {
            for u in client.list::<User>().await? {
                println!("{:>5}  {:<8} {} <{}>", u.id(), u.role().to_string(), u.name(), u.email());
            }
        }

        Commands::Quiz { course_id } => {
            quiz::take(client, course_id, defaults).await?;
        }

        Commands::Review { id } => {
            let review = match ResultReview::load(&client, id, defaults.required_score()).await {
                Ok(review) => review,
                Err(e) => return report(e),
            };
            quiz::print_review(&review);
        }

        Commands::Certificate { result_id, student } => {
            let review = match ResultReview::load(&client, result_id, defaults.required_score()).await {
                Ok(review) => review,
                Err(e) => return report(e),
            };
            let Some(course_id) = review.course_id() else {
                println!("This attempt is not linked to a course.");
                return Ok(());
            };
            let course = client.fetch_course(course_id).await?;
            let student = student
                .or_else(|| client.session().and_then(|s| s.user()).map(|u| u.name().to_string()))
                .unwrap_or_else(|| String::from("Student"));

            match Certificate::issue(&student, &course, review.passed_exam(), defaults.required_score()) {
                Some(cert) => println!("{cert}"),
                None => println!(
                    "No certificate: scored {}%, {}% required.",
                    review.score(),
                    review.required_score()
                ),
            }
        }
    }

    Ok(())
}

/// Shows a quiz error the way the quiz screen would, without failing the
/// process.
fn report(error: QuizError) -> AppResult<()> {
    quiz::print_recovery(&error);
    Ok(())
}
