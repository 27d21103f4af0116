use std::fmt;
use std::io::Write;

use chrono::Local;
use dashboard_core::{DerivedView, HealthStatus, PresentationSink, Record, PLACEHOLDER};
use dashboard_logging::dash_warn;

/// Plain-text presentation on a terminal (or any writer).
///
/// Each surface is only reprinted when its content changes, so redundant
/// presents from the dispatcher do not scroll the terminal.
pub struct TerminalSink<W: Write> {
    out: W,
    last_status: Option<String>,
    last_health: Option<HealthStatus>,
    last_run_enabled: Option<bool>,
    last_rows: Option<(DerivedView, Option<u64>)>,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_status: None,
            last_health: None,
            last_run_enabled: None,
            last_rows: None,
        }
    }

    pub fn print_text(&mut self, text: &str) {
        self.emit(format_args!("{text}"));
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, line: fmt::Arguments<'_>) {
        if let Err(err) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            dash_warn!("Failed to write to terminal: {}", err);
        }
    }
}

impl<W: Write> PresentationSink for TerminalSink<W> {
    fn render_rows(&mut self, view: &DerivedView, total: Option<u64>) {
        if self
            .last_rows
            .as_ref()
            .is_some_and(|(last_view, last_total)| last_view == view && *last_total == total)
        {
            return;
        }

        let total_text = total
            .map(|total| total.to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        self.emit(format_args!(
            "Total: {} | Shown: {} | Last load: {}",
            total_text,
            view.shown_count,
            view.last_loaded_label()
        ));
        self.emit(format_args!(
            "{:<4} {:<28} {:<10} {:>12} {:<20} {}",
            "Code", "Name", "Region", "Population", "Capital", "Loaded at"
        ));
        for record in &view.visible_items {
            let row = format_row(record);
            self.emit(format_args!("{row}"));
        }
        self.last_rows = Some((view.clone(), total));
    }

    fn set_status(&mut self, text: &str) {
        if self.last_status.as_deref() == Some(text) {
            return;
        }
        let now = Local::now().format("%H:%M:%S");
        self.emit(format_args!("[{now}] {text}"));
        self.last_status = Some(text.to_string());
    }

    fn set_health(&mut self, state: HealthStatus, label: &str) {
        if self.last_health == Some(state) {
            return;
        }
        let dot = match state {
            HealthStatus::Unknown => "( )",
            HealthStatus::Ok => "(+)",
            HealthStatus::Error => "(!)",
        };
        self.emit(format_args!("{dot} {label}"));
        self.last_health = Some(state);
    }

    fn set_run_enabled(&mut self, enabled: bool) {
        if self.last_run_enabled == Some(enabled) {
            return;
        }
        if enabled {
            self.emit(format_args!("Run ETL: available"));
        } else {
            self.emit(format_args!("Run ETL: disabled while a run is in progress"));
        }
        self.last_run_enabled = Some(enabled);
    }
}

fn format_row(record: &Record) -> String {
    let cell = |value: &Option<String>| value.clone().unwrap_or_default();
    format!(
        "{:<4} {:<28} {:<10} {:>12} {:<20} {}",
        cell(&record.code),
        cell(&record.name),
        cell(&record.region),
        record.population_text(),
        cell(&record.capital),
        cell(&record.loaded_at)
    )
}
