use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use nutritrack::models::user::ProfilePatch;

#[derive(Parser)]
#[command(
    name = "nutritrack",
    version,
    about = "Local-first nutrition, water and challenge tracking CLI"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as human-readable text instead of JSON
    #[arg(long = "human", short = 'H', global = true)]
    pub human: bool,

    /// Override date (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub date: Option<NaiveDate>,

    /// User id (defaults to `default_user` from config)
    #[arg(long, short = 'u', global = true)]
    pub user: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize config and data directory
    Init {
        /// Create a profile with this name and make it the default user
        #[arg(long)]
        name: Option<String>,
    },

    /// Manage user profiles
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Log a meal
    Meal {
        /// breakfast, lunch, dinner or snack
        meal_type: String,

        /// JSON array or "[QTYx ]NAME:KCAL[/P/C/F], ..."
        items: String,
    },

    /// Add water (ml), or show today's total when no amount is given
    Water { amount: Option<f64> },

    /// Log calories burned by exercise
    Exercise { kcal: f64 },

    /// Write or delete a day's trend record directly
    Trend {
        #[command(subcommand)]
        action: TrendAction,
    },

    /// Show trend records and averages for a period
    Trends {
        /// week, month or last30
        #[arg(long, default_value = "last30")]
        period: String,
    },

    /// Daily logging streak
    Streak {
        #[command(subcommand)]
        action: StreakAction,
    },

    /// Manage challenges
    Challenge {
        #[command(subcommand)]
        action: ChallengeAction,
    },

    /// Dashboard overview for the day
    Status,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Print shell completions
    Completions { shell: Shell },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init { .. } => "init",
            Self::User { .. } => "user",
            Self::Meal { .. } => "meal",
            Self::Water { .. } => "water",
            Self::Exercise { .. } => "exercise",
            Self::Trend { .. } => "trend",
            Self::Trends { .. } => "trends",
            Self::Streak { .. } => "streak",
            Self::Challenge { .. } => "challenge",
            Self::Status => "status",
            Self::Config { .. } => "config",
            Self::Completions { .. } => "completions",
        }
    }
}

#[derive(Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub calorie_goal: Option<f64>,
    #[arg(long)]
    pub water_goal: Option<f64>,
    #[arg(long)]
    pub age: Option<u16>,
    #[arg(long)]
    pub gender: Option<String>,
    #[arg(long)]
    pub height: Option<f64>,
    #[arg(long)]
    pub weight: Option<f64>,
    #[arg(long)]
    pub activity_level: Option<String>,
    #[arg(long)]
    pub fitness_goal: Option<String>,
    /// Mark onboarding as finished (or not)
    #[arg(long)]
    pub onboarded: Option<bool>,
}

impl ProfileArgs {
    pub fn into_patch(self, name: Option<String>) -> ProfilePatch {
        ProfilePatch {
            name,
            calorie_goal: self.calorie_goal,
            water_goal_ml: self.water_goal,
            age: self.age,
            gender: self.gender,
            height_cm: self.height,
            weight_kg: self.weight,
            activity_level: self.activity_level,
            fitness_goal: self.fitness_goal,
            onboarded: self.onboarded,
        }
    }
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Create a profile
    Create {
        name: String,
        /// Explicit id instead of a generated one
        #[arg(long)]
        id: Option<String>,
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Show the selected profile
    Show,
    /// List all profiles
    List,
    /// Update profile fields
    Update {
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Delete the selected profile and all its records
    Delete,
}

#[derive(Subcommand)]
pub enum TrendAction {
    /// Set scalars and/or append foods on a day's record
    Update {
        #[arg(long)]
        calories: Option<f64>,
        #[arg(long)]
        water: Option<f64>,
        #[arg(long)]
        exercise: Option<f64>,
        /// Foods to append, same formats as `meal`
        #[arg(long)]
        foods: Option<String>,
        /// Meal type recorded on appended foods
        #[arg(long, default_value = "snack")]
        meal_type: String,
    },
    /// Delete a day's record
    Delete,
}

#[derive(Subcommand)]
pub enum StreakAction {
    /// Show the current streak
    Show,
    /// Record today's activity
    Record,
}

#[derive(Subcommand)]
pub enum ChallengeAction {
    /// Return the active challenge, generating one from a random template if none
    New,
    /// Create a challenge from a template or custom fields
    Create {
        /// Template index (see `challenge templates`)
        #[arg(long, conflicts_with_all = ["title", "kind", "category"])]
        template: Option<usize>,
        #[arg(long, required_unless_present = "template")]
        title: Option<String>,
        /// streak or one_time
        #[arg(long = "type", required_unless_present = "template")]
        kind: Option<String>,
        /// nutrition, exercise, water or sleep
        #[arg(long, required_unless_present = "template")]
        category: Option<String>,
        #[arg(long, required_unless_present = "template")]
        target: Option<f64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        reward: Option<u32>,
        #[arg(long)]
        icon: Option<String>,
    },
    /// List the user's challenges
    List {
        /// Only challenges not yet completed
        #[arg(long)]
        active: bool,
    },
    /// Show a challenge
    Show { id: String },
    /// Edit challenge details
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        target: Option<f64>,
        #[arg(long)]
        reward: Option<u32>,
        #[arg(long)]
        icon: Option<String>,
    },
    /// Record progress (increments by 1 unless --by or --set is given)
    Progress {
        id: String,
        #[arg(long, conflicts_with = "set")]
        by: Option<f64>,
        /// Absolute progress value
        #[arg(long)]
        set: Option<f64>,
    },
    /// Delete a challenge
    Delete { id: String },
    /// List the built-in templates
    Templates,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set a config value
    Set {
        /// default_user, log_level, goals.calories, goals.water, display.week_start
        key: String,
        value: String,
    },
}
