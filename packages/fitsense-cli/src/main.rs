use clap::{Parser, Subcommand};
use fitsense_client::{ClientState, format_workout_display, health_check};
use fitsense_core::{ActivityLevel, Plan, SignupInput, parse_height, parse_weight};
use uuid::Uuid;

mod menu;
mod user_commands;
mod workout_commands;

#[derive(Parser)]
#[command(name = "fitsense-cli")]
#[command(about = "FitSense terminal client")]
struct Cli {
    #[arg(
        short,
        long,
        env = "FITSENSE_SERVER",
        default_value = "http://127.0.0.1:3000"
    )]
    server: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Server health check
    Health,
    /// Create a user with a first metric and workout
    Signup {
        /// Height in inches
        #[arg(long, value_parser = parse_height)]
        height: i32,
        /// Weight in pounds
        #[arg(long, value_parser = parse_weight)]
        weight: f64,
        #[arg(long)]
        plan: Plan,
        #[arg(long)]
        activity: ActivityLevel,
        /// Target muscle groups for the first workout
        #[arg(long)]
        workout: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// User profile management
    User {
        #[command(subcommand)]
        action: user_commands::UserAction,
    },
    /// Height and weight records
    Metric {
        #[command(subcommand)]
        action: user_commands::MetricAction,
    },
    /// Workout generation and tracking
    Workout {
        #[command(subcommand)]
        action: workout_commands::WorkoutAction,
    },
    /// Exercise catalog
    Exercise {
        #[command(subcommand)]
        action: workout_commands::ExerciseAction,
    },
    /// Interactive console menu (default)
    Interactive {
        /// Continue as an existing user instead of signing up
        #[arg(long)]
        user: Option<Uuid>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("❌ {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let state = ClientState::new(&cli.server);
    let client = &state.client;

    match cli.command.unwrap_or(Commands::Interactive { user: None }) {
        Commands::Health => {
            if health_check(&state).await? {
                println!("✅ Server is healthy");
            } else {
                anyhow::bail!("server at {} is not responding", cli.server);
            }
        }
        Commands::Signup {
            height,
            weight,
            plan,
            activity,
            workout,
            username,
            password,
        } => {
            let input = SignupInput {
                height,
                weight,
                plan,
                activity,
                workout,
                username,
                password,
            };
            println!("🏋️  Signing up and generating the first workout...");
            let response = state.signup(&input).await?;
            println!("✅ {}", response.message);
            println!("   User ID: {}", response.user_id);
            println!("   Workout ID: {}", response.workout_id);
            println!(
                "{}",
                format_workout_display("Your first workout", &response.workout_details)
            );
        }
        Commands::User { action } => user_commands::handle_user_command(client, action).await?,
        Commands::Metric { action } => {
            user_commands::handle_metric_command(client, action).await?
        }
        Commands::Workout { action } => {
            workout_commands::handle_workout_command(client, action).await?
        }
        Commands::Exercise { action } => {
            workout_commands::handle_exercise_command(client, action).await?
        }
        Commands::Interactive { user } => {
            if let Some(user_id) = user {
                state.set_user(user_id);
            }
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut output = std::io::stdout();
            menu::run(&state, &mut input, &mut output).await?;
        }
    }
    Ok(())
}
