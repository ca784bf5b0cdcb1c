use crate::db::exercise_ops;
use crate::error::AppError;
use fitsense_core::ExerciseInput;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One file of the free-exercise-db `exercises/` directory.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogEntry {
    name: Option<String>,
    #[serde(default)]
    primary_muscles: Vec<String>,
    #[serde(default)]
    secondary_muscles: Vec<String>,
    equipment: Option<String>,
    level: Option<String>,
    #[serde(default)]
    instructions: Vec<String>,
}

impl CatalogEntry {
    fn into_input(self) -> Option<ExerciseInput> {
        let name = self.name.filter(|n| !n.trim().is_empty())?;
        Some(ExerciseInput {
            name,
            primary_muscle_group: join_nonempty(&self.primary_muscles, ", "),
            secondary_muscle_group: join_nonempty(&self.secondary_muscles, ", "),
            equipment: self.equipment,
            difficulty: self.level,
            instructions: join_nonempty(&self.instructions, "\n"),
            video_url: None,
            is_custom: false,
            user_id: None,
        })
    }
}

fn join_nonempty(parts: &[String], sep: &str) -> Option<String> {
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(sep))
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct SeedReport {
    pub(crate) inserted: usize,
    pub(crate) skipped: usize,
    pub(crate) failed: usize,
}

async fn catalog_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load every `*.json` exercise in `dir` as a catalog exercise.
pub(crate) async fn seed_exercises(
    db: &DatabaseConnection,
    dir: &Path,
) -> Result<SeedReport, AppError> {
    let files = catalog_files(dir)
        .await
        .map_err(|e| AppError::Internal(format!("cannot read {}: {e}", dir.display())))?;

    let mut report = SeedReport::default();
    for path in files {
        let entry = match tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())
            .and_then(|text| serde_json::from_str::<CatalogEntry>(&text).map_err(|e| e.to_string()))
        {
            Ok(entry) => entry,
            Err(error) => {
                warn!(file = %path.display(), %error, "skipping unreadable exercise file");
                report.failed += 1;
                continue;
            }
        };

        let Some(input) = entry.into_input() else {
            warn!(file = %path.display(), "skipping exercise without a name");
            report.failed += 1;
            continue;
        };

        if exercise_ops::find_exercise_by_name(db, &input.name).await?.is_some() {
            report.skipped += 1;
            continue;
        }
        exercise_ops::create_exercise(db, input).await?;
        report.inserted += 1;
    }

    info!(
        inserted = report.inserted,
        skipped = report.skipped,
        failed = report.failed,
        "exercise catalog seeded"
    );
    Ok(report)
}
