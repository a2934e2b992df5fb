use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// User assumed when `--user` is not given.
    pub default_user: Option<String>,
    /// Fallback tracing filter when no log env var is set.
    pub log_level: Option<String>,
    #[serde(default)]
    pub goals: Goals,
    #[serde(default)]
    pub display: DisplaySettings,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Goals {
    #[serde(default = "default_calorie_goal")]
    pub calorie_goal: f64,
    #[serde(default = "default_water_goal")]
    pub water_goal_ml: f64,
}

fn default_calorie_goal() -> f64 {
    2000.0
}
fn default_water_goal() -> f64 {
    2000.0
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            calorie_goal: default_calorie_goal(),
            water_goal_ml: default_water_goal(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            Self::Sunday => Weekday::Sun,
            Self::Monday => Weekday::Mon,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default)]
    pub week_starts_on: WeekStart,
}

impl Config {
    /// Load config from the standard path, or return defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::path();
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the standard path.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                std::fs::set_permissions(parent, std::fs::Permissions::from_mode(0o700))?;
            }
        }
        let contents = toml::to_string_pretty(self)?;

        #[cfg(unix)]
        {
            use std::fs::{self, OpenOptions};
            use std::io::Write;
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&path)?;
            file.write_all(contents.as_bytes())?;

            let mut perms = file.metadata()?.permissions();
            if perms.mode() & 0o777 != 0o600 {
                perms.set_mode(0o600);
                fs::set_permissions(&path, perms)?;
            }
        }
        #[cfg(not(unix))]
        {
            std::fs::write(&path, contents)?;
        }

        Ok(())
    }

    /// Pick the explicit user, falling back to `default_user`.
    pub fn resolve_user(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .map(str::to_string)
            .or_else(|| self.default_user.clone())
            .filter(|u| !u.trim().is_empty())
    }

    pub fn data_dir() -> PathBuf {
        if let Ok(home) = std::env::var("NUTRITRACK_HOME") {
            return PathBuf::from(home);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".nutritrack")
    }

    pub fn path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }

    pub fn db_path() -> PathBuf {
        Self::data_dir().join("data.db")
    }

    pub fn water_cache_path() -> PathBuf {
        Self::data_dir().join("water_cache.json")
    }
}
