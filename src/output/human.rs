use colored::Colorize;
use comfy_table::{Table, presets::UTF8_FULL_CONDENSED};

use crate::core::status::StatusData;
use crate::core::trend::TrendsReport;
use crate::models::challenge::Challenge;
use crate::models::trend::{DailyTrend, FoodCount};
use crate::models::user::UserProfile;

fn format_foods(foods: &[FoodCount]) -> String {
    foods
        .iter()
        .map(|f| format!("{}({})", f.name, f.count))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One-line summary of a day's record.
pub fn format_trend(t: &DailyTrend) -> String {
    let mut line = format!(
        "{} | {:.0} kcal in, {:.0} kcal out, {:.0} ml water, {} food(s)",
        t.date,
        t.calorie_intake,
        t.exercise_calories,
        t.water_intake,
        t.food_entries.len()
    );
    if !t.most_eaten_foods.is_empty() {
        line.push_str(&format!("  [{}]", format_foods(&t.most_eaten_foods)));
    }
    line
}

pub fn format_trends_report(r: &TrendsReport) -> String {
    if r.trends.is_empty() {
        return format!("No records between {} and {}", r.window.from, r.window.to);
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Date", "Calories", "Water (ml)", "Exercise", "Foods"]);
    for t in &r.trends {
        table.add_row(vec![
            t.date.to_string(),
            format!("{:.0}", t.calorie_intake),
            format!("{:.0}", t.water_intake),
            format!("{:.0}", t.exercise_calories),
            t.food_entries.len().to_string(),
        ]);
    }
    let a = &r.averages;
    let mut out = format!(
        "Trends ({}: {} to {})\n{}\n\nAverages: {:.0} kcal | P {:.1}g C {:.1}g F {:.1}g | {:.0} ml water",
        r.period, r.window.from, r.window.to, table, a.calories, a.protein, a.carbs, a.fat, a.water
    );
    if !r.most_eaten_foods.is_empty() {
        out.push_str(&format!(
            "\nMost eaten: {}",
            format_foods(&r.most_eaten_foods)
        ));
    }
    out
}

pub fn format_challenge(c: &Challenge) -> String {
    let mark = if c.completed {
        "DONE".green().bold()
    } else {
        "....".yellow()
    };
    let mut line = format!(
        "[{}] {} ({}/{}) {}/{}  id={}",
        mark, c.title, c.kind, c.category, c.current_value, c.target_value, c.id
    );
    if let Some(done) = c.completed_date {
        line.push_str(&format!("  completed {}", done.format("%Y-%m-%d")));
    }
    line
}

pub fn format_user(u: &UserProfile) -> String {
    let mut out = format!(
        "{} ({})\nCalorie goal: {:.0} kcal | Water goal: {:.0} ml\nStreak: {} day(s)",
        u.name, u.id, u.calorie_goal, u.water_goal_ml, u.streaks
    );
    if let Some(last) = u.last_streak {
        out.push_str(&format!(" (last {})", last));
    }
    if !u.onboarded {
        out.push_str("\nOnboarding not finished");
    }
    out
}

/// Pretty-print the dashboard overview.
pub fn format_status(s: &StatusData) -> String {
    let mut out = format!("=== {} — {} ===\n\n", s.name, s.date);
    let remaining = if s.calories.remaining >= 0.0 {
        format!("{:.0} left", s.calories.remaining).green()
    } else {
        format!("{:.0} over", -s.calories.remaining).red()
    };
    out.push_str(&format!(
        "Calories: {:.0} / {:.0} kcal (exercise {:.0}) — {}\n",
        s.calories.intake, s.calories.goal, s.calories.exercise, remaining
    ));
    out.push_str(&format!(
        "Water: {:.0} / {:.0} ml",
        s.water.intake_ml, s.water.goal_ml
    ));
    if let Some(p) = s.water.progress_pct {
        out.push_str(&format!(" ({:.1}%)", p));
    }
    if s.streak > 0 {
        out.push_str(&format!("\nLogging streak: {} day(s)", s.streak));
    }
    if !s.most_eaten_foods.is_empty() {
        out.push_str(&format!(
            "\nMost eaten today: {}",
            format_foods(&s.most_eaten_foods)
        ));
    }
    for c in &s.active_challenges {
        out.push_str(&format!("\n{}", format_challenge(c)));
    }
    out
}
