use clap::{Parser, Subcommand};
use serde_json::Value;

use course_proxy::course::{courses_from_payload, Filters, Normalizer, SchemaVersion, SearchQuery};

#[derive(Parser)]
#[command(name = "course-cli")]
#[command(about = "Query the course proxy and print normalized course records", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Course schema revision to normalize against (v1 or v2)
    #[arg(long, default_value_t = SchemaVersion::V2)]
    schema: SchemaVersion,

    /// Print normalized records as JSON instead of one line each
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every course
    All,
    /// Search courses by keyword
    Search {
        keywords: String,

        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Requirement a course must satisfy (repeatable)
        #[arg(short = 'r', long = "requirement")]
        requirements: Vec<String>,

        /// Match any listed requirement instead of all
        #[arg(long)]
        any: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::All => client.get(format!("{}/api/all", base)).send().await?,
        Commands::Search {
            keywords,
            offset,
            requirements,
            any,
        } => {
            let query = SearchQuery {
                keywords,
                offset: Some(offset),
                filters: Some(Filters {
                    requirements: (!requirements.is_empty()).then_some(requirements),
                    requirements_or: any,
                }),
            };
            client
                .post(format!("{}/api/search", base))
                .json(&query)
                .send()
                .await?
        }
    };

    print_courses(res, Normalizer::new(cli.schema), cli.json).await
}

async fn print_courses(
    res: reqwest::Response,
    normalizer: Normalizer,
    as_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: proxy returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let payload: Value = res.json().await?;
    let courses: Vec<_> = courses_from_payload(payload)
        .iter()
        .map(|course| normalizer.normalize(course))
        .collect();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&courses)?);
    } else {
        for course in &courses {
            println!("{}", course.summary());
        }
        eprintln!("{} course(s), schema {}", courses.len(), normalizer.schema());
    }
    Ok(())
}
