use clap::{Parser, Subcommand};
use candidate_registry::{CandidateService, NewCandidate, RankingStrategy, RegistryError};

#[derive(Parser)]
#[command(name = "candidate-cli")]
#[command(about = "Candidate Registry CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Database path
    #[arg(short, long, default_value = "candidates.db")]
    db: String,

    /// Ranking strategy (tiered, word_overlap)
    #[arg(short, long, default_value = "tiered")]
    ranker: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Search candidates by name
    Search {
        /// Search query
        query: String,
    },

    /// List all candidates
    List,

    /// Add a candidate
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        age: i64,

        /// M, F or O
        #[arg(long)]
        gender: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: String,
    },

    /// Delete a candidate by id
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let strategy: RankingStrategy = cli.ranker.parse()?;
    let service = CandidateService::with_strategy(&cli.db, strategy).await?;

    match cli.command {
        Commands::Search { query } => {
            println!("🔍 Searching for: {}", query);

            let results = service.search(&query).await?;
            if results.is_empty() {
                println!("No matching candidates");
            }
            for (i, candidate) in results.iter().enumerate() {
                println!("   {}. {} <{}>", i + 1, candidate.display_name(), candidate.email);
            }
        }

        Commands::List => {
            for candidate in service.list().await? {
                println!(
                    "#{:<4} {:<30} {:>3} {} {} {}",
                    candidate.id,
                    candidate.name,
                    candidate.age,
                    candidate.gender,
                    candidate.email,
                    candidate.phone_number
                );
            }
        }

        Commands::Add { name, age, gender, email, phone } => {
            match service.create(NewCandidate::new(name, age, gender, email, phone)).await {
                Ok(candidate) => println!("✅ Created {}", candidate.display_name()),
                Err(RegistryError::Validation(errors)) => {
                    for field in errors.fields() {
                        for message in errors.get(field).unwrap_or_default() {
                            eprintln!("   {}: {}", field, message);
                        }
                    }
                    anyhow::bail!("candidate rejected");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Commands::Delete { id } => {
            service.delete(id).await?;
            println!("✅ Deleted candidate #{}", id);
        }
    }

    Ok(())
}
