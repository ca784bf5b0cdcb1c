use anyhow::Result;
use clap::Subcommand;
use fitsense_client::{format_exercise, format_workout};
use fitsense_core::{ExerciseInput, Refinement, WorkoutRequest};
use fitsense_sdk::FitsenseClient;
use uuid::Uuid;

#[derive(Subcommand)]
pub enum WorkoutAction {
    /// Generate a workout from the user's stored profile
    Generate {
        /// User ID
        user: Uuid,
        /// Target muscle groups, e.g. "legs, glutes"
        muscles: String,
        /// Run a second pass that revises the draft against recent workouts
        #[arg(long)]
        refine: bool,
    },
    /// List a user's workouts, newest first
    List {
        /// User ID
        user: Uuid,
    },
    /// Show a user's latest workout
    Latest {
        /// User ID
        user: Uuid,
    },
    /// Show one workout
    Show {
        /// Workout ID
        id: Uuid,
    },
    /// Mark a workout as completed
    Complete {
        /// Workout ID
        id: Uuid,
    },
    /// Delete one workout
    Delete {
        /// Workout ID
        id: Uuid,
    },
}

#[derive(Subcommand)]
pub enum ExerciseAction {
    /// Add an exercise to the catalog, or a custom one with --owner
    Create {
        name: String,
        #[arg(long)]
        primary: Option<String>,
        #[arg(long)]
        secondary: Option<String>,
        #[arg(long)]
        equipment: Option<String>,
        #[arg(long)]
        difficulty: Option<String>,
        #[arg(long)]
        instructions: Option<String>,
        #[arg(long)]
        video_url: Option<String>,
        /// Owning user; marks the exercise as custom
        #[arg(long)]
        owner: Option<Uuid>,
    },
    /// Look up an exercise by name
    Show { name: String },
}

pub async fn handle_workout_command(client: &FitsenseClient, action: WorkoutAction) -> Result<()> {
    match action {
        WorkoutAction::Generate {
            user,
            muscles,
            refine,
        } => {
            println!("🏋️  Generating workout for {muscles}...");
            let generated = client
                .generate_workout(
                    user,
                    &WorkoutRequest {
                        workout: muscles,
                        refine,
                    },
                )
                .await?;
            if generated.refinement == Refinement::RefinementFailed {
                println!("⚠️  Refinement failed; showing the first draft");
            }
            println!("{}", format_workout(&generated.workout));
        }
        WorkoutAction::List { user } => {
            let workouts = client.list_workouts(user).await?;
            println!("📋 Workouts ({} total):", workouts.len());
            for workout in &workouts {
                println!("{}\n", format_workout(workout));
            }
        }
        WorkoutAction::Latest { user } => {
            println!("{}", format_workout(&client.latest_workout(user).await?));
        }
        WorkoutAction::Show { id } => {
            println!("{}", format_workout(&client.get_workout(id).await?));
        }
        WorkoutAction::Complete { id } => {
            let workout = client.complete_workout(id).await?;
            println!("✅ Workout {} completed", workout.workout_id);
        }
        WorkoutAction::Delete { id } => {
            client.delete_workout(id).await?;
            println!("🗑️  Workout {id} deleted");
        }
    }
    Ok(())
}

pub async fn handle_exercise_command(client: &FitsenseClient, action: ExerciseAction) -> Result<()> {
    match action {
        ExerciseAction::Create {
            name,
            primary,
            secondary,
            equipment,
            difficulty,
            instructions,
            video_url,
            owner,
        } => {
            let input = ExerciseInput {
                name,
                primary_muscle_group: primary,
                secondary_muscle_group: secondary,
                equipment,
                difficulty,
                instructions,
                video_url,
                is_custom: owner.is_some(),
                user_id: owner,
            };
            let exercise = client.create_exercise(&input).await?;
            println!("✅ Created {}", exercise.name);
        }
        ExerciseAction::Show { name } => {
            println!("{}", format_exercise(&client.get_exercise(&name).await?));
        }
    }
    Ok(())
}
