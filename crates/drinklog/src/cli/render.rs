//! Plain-text rendering of API results.
//!
//! Everything except [`print_messages`] returns a `String` so layouts can be
//! tested without a terminal. Columns are padded by display width, so drink
//! names with wide characters still line up.

use chrono::Local;
use colored::Colorize;
use drinklogapp::aggregate::{ChartDataset, DayTotal, PeriodTotal, RangeReport};
use drinklogapp::commands::{CmdMessage, MessageLevel};
use drinklogapp::model::{DrinkRecord, FavoriteDrink};
use drinklogapp::units::VolumeUnit;
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

const NAME_WIDTH: usize = 24;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

fn pad_right(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn pad_left(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", " ".repeat(padding), s)
}

fn drink_line(record: &DrinkRecord) -> String {
    let time = record.occurred_at.with_timezone(&Local).format("%H:%M");
    format!(
        "  {}  {}  {} {} {}  (id {})",
        time,
        pad_right(&record.name, NAME_WIDTH),
        pad_left(&format!("{:.0} ml", record.volume), 9),
        pad_left(&format!("{}%", record.abv), 6),
        pad_left(&format!("{:.2} ml", record.pure_alcohol_ml()), 10),
        record.id
    )
}

pub(super) fn render_day(day: &DayTotal) -> String {
    let mut out = String::new();
    if !day.has_records() {
        let _ = writeln!(out, "No drinks logged on {}", day.date);
        return out;
    }
    let _ = writeln!(out, "{}", day.date);
    for record in &day.drinks {
        let _ = writeln!(out, "{}", drink_line(record));
    }
    let _ = writeln!(out, "Total: {:.2} ml pure alcohol", day.pure_alcohol_ml);
    out
}

pub(super) fn render_range(report: &RangeReport) -> String {
    let mut out = String::new();
    if report.days.is_empty() {
        let _ = writeln!(out, "No drinks in this range");
        return out;
    }
    for day in &report.days {
        let _ = writeln!(out, "{}  {:.2} ml", day.date, day.pure_alcohol_ml);
        for record in &day.drinks {
            let _ = writeln!(out, "{}", drink_line(record));
        }
    }
    let _ = writeln!(out, "Grand total: {:.2} ml pure alcohol", report.grand_total_ml);
    out
}

pub(super) fn render_chart(dataset: &ChartDataset) -> String {
    let mut out = String::new();
    if dataset.rows.is_empty() {
        let _ = writeln!(out, "No drinks in this range");
        return out;
    }

    let widths: Vec<usize> = dataset
        .drink_names
        .iter()
        .map(|name| name.width().max(8))
        .collect();

    let mut header = pad_right("date", 10);
    for (name, width) in dataset.drink_names.iter().zip(&widths) {
        header.push_str("  ");
        header.push_str(&pad_left(name, *width));
    }
    let _ = writeln!(out, "{}", header);

    for row in &dataset.rows {
        let mut line = row.date.to_string();
        for ((_, ml), width) in row.values.iter().zip(&widths) {
            line.push_str("  ");
            line.push_str(&pad_left(&format!("{:.2}", ml), *width));
        }
        let _ = writeln!(out, "{}", line);
    }
    out
}

pub(super) fn render_summary(totals: &[PeriodTotal]) -> String {
    let mut out = String::new();
    if totals.is_empty() {
        let _ = writeln!(out, "No drinks in this range");
        return out;
    }
    for total in totals {
        let _ = writeln!(
            out,
            "{}  {} {}  {} ml",
            pad_right(&total.key, 10),
            pad_left(&total.drink_count.to_string(), 4),
            if total.drink_count == 1 { "drink " } else { "drinks" },
            pad_left(&format!("{:.2}", total.pure_alcohol_ml), 10)
        );
    }
    out
}

pub(super) fn render_favorites(favorites: &[FavoriteDrink]) -> String {
    let mut out = String::new();
    for fav in favorites {
        let _ = writeln!(
            out,
            "  {} {} {}",
            pad_right(&fav.name, NAME_WIDTH),
            pad_left(&format!("{:.0} ml", fav.volume), 9),
            pad_left(&format!("{}%", fav.abv), 6)
        );
    }
    out
}

pub(super) fn render_units() -> String {
    let mut units: Vec<VolumeUnit> = VolumeUnit::ALL.to_vec();
    units.sort_by_key(|u| u.abbreviation().to_lowercase());

    let mut out = String::new();
    for unit in units {
        let _ = writeln!(
            out,
            "{}  {} ml",
            pad_right(unit.abbreviation(), 6),
            unit.ml_factor()
        );
    }
    let _ = writeln!(out, "(oz is accepted for fl-oz)");
    out
}
