use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use catalog::{CatalogApi, HttpCatalogClient};
use services::{ListMode, ListState, ListViewController, QuizFlow};
use trivia_core::model::{CategoryId, QuestionDraft, QuestionId};

#[derive(Parser, Debug)]
#[command(name = "trivia", about = "Client for the trivia question catalog")]
struct Args {
    /// Base URL of the catalog API; falls back to TRIVIA_API_BASE.
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the category map.
    Categories,
    /// Browse one page of questions.
    List {
        /// Category id to filter by; omit for all categories.
        #[arg(long)]
        category: Option<u64>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Full-text search over question text.
    Search { term: String },
    /// Create a question.
    Add {
        #[arg(long)]
        question: String,
        #[arg(long)]
        answer: String,
        /// Category id.
        #[arg(long)]
        category: u64,
        /// Difficulty, 1 to 5.
        #[arg(long)]
        difficulty: u8,
    },
    /// Delete a question by id.
    Delete { id: u64 },
    /// Play an interactive quiz: Enter reveals, `n` advances, `q` quits.
    Quiz {
        /// Category id to draw from; omit for any category.
        #[arg(long)]
        category: Option<u64>,
    },
}

fn print_page(state: &ListState) {
    if state.items().is_empty() {
        println!("No questions found.");
        return;
    }
    for question in state.items() {
        println!(
            "#{:<5} [cat {} diff {}] {}",
            question.id, question.category, question.difficulty, question.question
        );
        println!("       -> {}", question.answer);
    }
    match state.mode() {
        ListMode::Browse => println!(
            "Page {} / {} ({} questions)",
            state.page(),
            state.page_count(),
            state.total()
        ),
        ListMode::Search => println!("{} matching questions", state.total()),
    }
}

async fn run_quiz(catalog: Arc<dyn CatalogApi>, category: Option<CategoryId>) -> Result<()> {
    let mut quiz = QuizFlow::new(catalog, category);
    quiz.next().await?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let Some(question) = quiz.current() else {
            println!("No more questions.");
            return Ok(());
        };
        println!();
        println!("Q: {} (difficulty {})", question.question, question.difficulty);

        loop {
            print!("[enter] show answer, [n] next, [q] quit > ");
            io::stdout().flush()?;
            let Some(line) = lines.next() else {
                return Ok(());
            };
            match line?.trim() {
                "q" => return Ok(()),
                "n" => {
                    quiz.advance().await?;
                    break;
                }
                _ => {
                    let question = quiz.reveal()?;
                    println!("A: {}", question.answer);
                }
            }
        }
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();
    let base_url = args
        .base_url
        .or_else(|| std::env::var("TRIVIA_API_BASE").ok())
        .context("--base-url or TRIVIA_API_BASE is required")?;
    let client: Arc<dyn CatalogApi> = Arc::new(HttpCatalogClient::new(base_url));

    match args.command {
        Command::Categories => {
            let categories = client.categories().await?;
            for (id, name) in categories.iter() {
                println!("{id:<4} {name}");
            }
        }
        Command::List { category, page } => {
            let mut controller = ListViewController::new(client);
            controller
                .set_category_filter(category.map(CategoryId::new))
                .await?;
            if page > 1 {
                controller.go_to_page(page).await?;
            }
            print_page(controller.state());
        }
        Command::Search { term } => {
            let mut controller = ListViewController::new(client);
            controller.search(&term).await?;
            print_page(controller.state());
        }
        Command::Add {
            question,
            answer,
            category,
            difficulty,
        } => {
            let mut controller = ListViewController::new(client);
            // An empty catalog 404s on the initial browse; the post-create
            // reload repopulates state either way.
            controller.set_category_filter(None).await.ok();
            let id = controller
                .create_question(QuestionDraft {
                    question,
                    answer,
                    category: CategoryId::new(category),
                    difficulty,
                })
                .await?;
            println!("Created question #{id}");
        }
        Command::Delete { id } => {
            let mut controller = ListViewController::new(client);
            controller.set_category_filter(None).await?;
            controller.delete_question(QuestionId::new(id)).await?;
            println!("Deleted question #{id}");
            print_page(controller.state());
        }
        Command::Quiz { category } => {
            run_quiz(client, category.map(CategoryId::new)).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}
