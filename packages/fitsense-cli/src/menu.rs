use anyhow::Result;
use fitsense_client::prompt::{ask, ask_muscles, onboarding};
use fitsense_client::{ClientState, format_metric, format_user, format_workout, format_workout_display};
use fitsense_core::{Refinement, parse_height, parse_weight};
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ReadUser,
    LogMetric,
    GenerateWorkout,
    ListWorkouts,
    CompleteWorkout,
    DeleteAccount,
    Quit,
}

impl MenuChoice {
    const ALL: [MenuChoice; 7] = [
        MenuChoice::ReadUser,
        MenuChoice::LogMetric,
        MenuChoice::GenerateWorkout,
        MenuChoice::ListWorkouts,
        MenuChoice::CompleteWorkout,
        MenuChoice::DeleteAccount,
        MenuChoice::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            MenuChoice::ReadUser => "Show my profile",
            MenuChoice::LogMetric => "Log height/weight",
            MenuChoice::GenerateWorkout => "Generate a workout",
            MenuChoice::ListWorkouts => "List my workouts",
            MenuChoice::CompleteWorkout => "Complete a workout",
            MenuChoice::DeleteAccount => "Delete my account",
            MenuChoice::Quit => "Quit",
        }
    }

    pub fn parse(text: &str) -> Result<Self, String> {
        text.parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| format!("choose 1-{}", Self::ALL.len()))
    }
}

/// Blank keeps the stored value.
fn optional_height(text: &str) -> Result<Option<i32>, String> {
    if text.is_empty() {
        return Ok(None);
    }
    parse_height(text).map(Some).map_err(|e| e.to_string())
}

fn optional_weight(text: &str) -> Result<Option<f64>, String> {
    if text.is_empty() {
        return Ok(None);
    }
    parse_weight(text).map(Some).map_err(|e| e.to_string())
}

fn yes_no(text: &str) -> Result<bool, &'static str> {
    match text.to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" | "" => Ok(false),
        _ => Err("answer y or n"),
    }
}

/// Run the console menu until the user quits or input ends.
pub async fn run<R: BufRead, W: Write>(
    state: &ClientState,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    if state.user_id().is_none() {
        writeln!(output, "👋 Welcome to FitSense! Let's set up your profile.")?;
        let signup = onboarding(input, output)?;
        writeln!(output, "🏋️  Creating your profile and first workout...")?;
        let response = state.signup(&signup).await?;
        writeln!(output, "✅ {} (user id {})", response.message, response.user_id)?;
        writeln!(
            output,
            "{}",
            format_workout_display("Your first workout", &response.workout_details)
        )?;
    }

    loop {
        writeln!(output)?;
        for (i, choice) in MenuChoice::ALL.iter().enumerate() {
            writeln!(output, "  {}. {}", i + 1, choice.label())?;
        }
        let choice = ask(input, output, "Choose: ", MenuChoice::parse)?;
        if choice == MenuChoice::Quit {
            writeln!(output, "👋 Bye")?;
            return Ok(());
        }
        if let Err(e) = dispatch(state, choice, input, output).await {
            writeln!(output, "❌ {e:#}")?;
        }
        if state.user_id().is_none() {
            return Ok(());
        }
    }
}

async fn dispatch<R: BufRead, W: Write>(
    state: &ClientState,
    choice: MenuChoice,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    match choice {
        MenuChoice::ReadUser => {
            writeln!(output, "👤 {}", format_user(&state.profile().await?))?;
        }
        MenuChoice::LogMetric => {
            let height = ask(input, output, "Height (inches, blank to keep): ", optional_height)?;
            let weight = ask(input, output, "Weight (pounds, blank to keep): ", optional_weight)?;
            if height.is_none() && weight.is_none() {
                writeln!(output, "Nothing to record")?;
                return Ok(());
            }
            let metric = state.log_metric(height, weight).await?;
            writeln!(output, "✅ Recorded {}", format_metric(&metric))?;
        }
        MenuChoice::GenerateWorkout => {
            let muscles = ask_muscles(input, output)?;
            let refine = ask(input, output, "Refine with your history? [y/N]: ", yes_no)?;
            writeln!(output, "🏋️  Generating...")?;
            let generated = state.generate_workout(&muscles, refine).await?;
            if generated.refinement == Refinement::RefinementFailed {
                writeln!(output, "⚠️  Refinement failed; showing the first draft")?;
            }
            writeln!(output, "{}", format_workout(&generated.workout))?;
        }
        MenuChoice::ListWorkouts => {
            let workouts = state.workouts().await?;
            writeln!(output, "📋 Workouts ({} total):", workouts.len())?;
            for workout in &workouts {
                writeln!(output, "{}\n", format_workout(workout))?;
            }
        }
        MenuChoice::CompleteWorkout => {
            let workouts = state.workouts().await?;
            if workouts.is_empty() {
                writeln!(output, "No workouts yet")?;
                return Ok(());
            }
            for (i, workout) in workouts.iter().enumerate() {
                writeln!(
                    output,
                    "  {}. {} {} ({})",
                    i + 1,
                    workout.date_generated.format("%Y-%m-%d"),
                    workout.muscles_targeted,
                    workout.status.as_str()
                )?;
            }
            let count = workouts.len();
            let index = ask(input, output, "Workout number: ", |text| {
                text.parse::<usize>()
                    .ok()
                    .filter(|n| (1..=count).contains(n))
                    .ok_or_else(|| format!("choose 1-{count}"))
            })?;
            let workout = state.complete_workout(workouts[index - 1].workout_id).await?;
            writeln!(output, "✅ Workout {} completed", workout.workout_id)?;
        }
        MenuChoice::DeleteAccount => {
            if ask(input, output, "Delete your account and all data? [y/N]: ", yes_no)? {
                state.delete_account().await?;
                writeln!(output, "🗑️  Account deleted")?;
            }
        }
        MenuChoice::Quit => {}
    }
    Ok(())
}
