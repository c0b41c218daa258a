//! Rendering of age results for people.
//!
//! Nothing here feeds back into parsing or calculation; the shell picks a
//! `Style` and prints what these helpers return.

use crate::age::AgeResult;
use crate::calendar::CalendarDate;

const RULE: &str = "--------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Emoji,
    Plain,
}

/// Short status messages in the selected style.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageFormatter {
    style: Style,
}

impl MessageFormatter {
    pub fn new(style: Style) -> Self {
        Self { style }
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn title(&self) -> String {
        match self.style {
            Style::Emoji => "🎂 Age Calculator 🎂".to_string(),
            Style::Plain => "Age Calculator".to_string(),
        }
    }

    pub fn goodbye(&self) -> String {
        match self.style {
            Style::Emoji => "Goodbye! 👋".to_string(),
            Style::Plain => "Goodbye!".to_string(),
        }
    }

    pub fn warning(&self, message: &str) -> String {
        match self.style {
            Style::Emoji => format!("⚠️ {message}"),
            Style::Plain => format!("Warning: {message}"),
        }
    }

    pub fn error(&self, message: &str) -> String {
        match self.style {
            Style::Emoji => format!("❌ {message}"),
            Style::Plain => format!("Error: {message}"),
        }
    }

    /// Error raised while evaluating a recognised date.
    pub fn failure(&self, message: &str) -> String {
        match self.style {
            Style::Emoji => format!("❌ Error: {message}"),
            Style::Plain => format!("Error: {message}"),
        }
    }

    pub fn results_header(&self) -> String {
        match self.style {
            Style::Emoji => "✨ Results:".to_string(),
            Style::Plain => "Results:".to_string(),
        }
    }

    pub fn birthday_message(&self, days_until: i64) -> String {
        let text = if days_until == 0 {
            "Happy Birthday!".to_string()
        } else {
            format!("Your next birthday is in {days_until} day{}!", plural(days_until))
        };
        match (self.style, days_until) {
            (Style::Plain, _) => text,
            (Style::Emoji, 0) => format!("{text} 🎉"),
            (Style::Emoji, _) => format!("{text} 🎂"),
        }
    }
}

fn plural(n: i64) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// "33 years, 8 months and 12 days". Zero parts are left out; a newborn is
/// "0 days".
pub fn describe_age(age: &AgeResult) -> String {
    let mut parts = Vec::with_capacity(3);
    for (n, unit) in [(age.years, "year"), (age.months, "month"), (age.days, "day")] {
        if n > 0 {
            parts.push(format!("{n} {unit}{}", plural(i64::from(n))));
        }
    }

    match parts.as_slice() {
        [] => "0 days".to_string(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

/// Digit grouping with commas: 12309 → "12,309".
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if n < 0 { format!("-{grouped}") } else { grouped }
}

/// Multi-line result block printed by the shell.
pub fn render_report(birth: CalendarDate, age: &AgeResult, style: Style) -> String {
    let messages = MessageFormatter::new(style);
    let birthday = birth.as_naive().format("%B %d, %Y");

    let mut out = String::new();
    out.push_str(&format!("\n{}\n{RULE}\n", messages.results_header()));
    out.push_str(&format!("Birthday: {birthday}\n"));
    out.push_str(&format!("Born on a {}\n", age.birth_day_name()));
    out.push_str(&format!("You are {} old.\n", describe_age(age)));
    out.push_str(&format!(
        "That's a total of {} day{}!\n",
        group_thousands(age.total_days),
        plural(age.total_days)
    ));
    out.push_str(&format!("{}\n", messages.birthday_message(age.next_birthday_in_days)));
    out
}
