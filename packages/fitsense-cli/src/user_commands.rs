use anyhow::Result;
use clap::Subcommand;
use fitsense_client::{format_metric, format_user};
use fitsense_core::{ActivityLevel, MetricInput, Plan, UpdateUserInput, parse_height, parse_weight};
use fitsense_sdk::FitsenseClient;
use uuid::Uuid;

#[derive(Subcommand)]
pub enum UserAction {
    /// Show a user profile
    Show {
        /// User ID
        id: Uuid,
    },
    /// Update one or more profile fields
    Update {
        /// User ID
        id: Uuid,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        activity: Option<ActivityLevel>,
        #[arg(long)]
        plan: Option<Plan>,
    },
    /// Delete a user with all their data
    Delete {
        /// User ID
        id: Uuid,
    },
}

#[derive(Subcommand)]
pub enum MetricAction {
    /// Record height and/or weight; a missing value carries over
    Record {
        /// User ID
        user: Uuid,
        /// Height in inches
        #[arg(long, value_parser = parse_height)]
        height: Option<i32>,
        /// Weight in pounds
        #[arg(long, value_parser = parse_weight)]
        weight: Option<f64>,
    },
    /// List recorded metrics, newest first
    List {
        /// User ID
        user: Uuid,
    },
    /// Show the latest metric
    Latest {
        /// User ID
        user: Uuid,
    },
    /// Delete every metric of a user
    Clear {
        /// User ID
        user: Uuid,
    },
}

pub async fn handle_user_command(client: &FitsenseClient, action: UserAction) -> Result<()> {
    match action {
        UserAction::Show { id } => {
            let user = client.get_user(id).await?;
            println!("👤 {}", format_user(&user));
        }
        UserAction::Update {
            id,
            username,
            password,
            activity,
            plan,
        } => {
            let input = UpdateUserInput {
                username,
                password,
                activity: activity.map(|a| a.to_string()),
                plan: plan.map(|p| p.to_string()),
            };
            let response = client.update_user(id, &input).await?;
            println!("✅ Updated: {}", response.updated_fields.join(", "));
        }
        UserAction::Delete { id } => {
            client.delete_user(id).await?;
            println!("🗑️  User {id} deleted");
        }
    }
    Ok(())
}

pub async fn handle_metric_command(client: &FitsenseClient, action: MetricAction) -> Result<()> {
    match action {
        MetricAction::Record {
            user,
            height,
            weight,
        } => {
            if height.is_none() && weight.is_none() {
                anyhow::bail!("provide --height, --weight or both");
            }
            let metric = client
                .record_metric(user, &MetricInput { height, weight })
                .await?;
            println!("✅ Recorded {}", format_metric(&metric));
        }
        MetricAction::List { user } => {
            let metrics = client.list_metrics(user).await?;
            println!("📏 Metrics ({} total):", metrics.len());
            for metric in &metrics {
                println!("  {}", format_metric(metric));
            }
        }
        MetricAction::Latest { user } => {
            let metric = client.latest_metric(user).await?;
            println!("📏 {}", format_metric(&metric));
        }
        MetricAction::Clear { user } => {
            let deleted = client.delete_metrics(user).await?;
            println!("🗑️  Deleted {} metrics", deleted.deleted_count);
        }
    }
    Ok(())
}
