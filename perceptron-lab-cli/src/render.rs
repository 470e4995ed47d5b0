//! Colored terminal output for reports and the dataset catalog.

use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use perceptron_lab::prelude::*;
use std::io::{self, Write};

const BAR_WIDTH: usize = 40;
const CURVE_ROWS: usize = 20;

fn heading<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    execute!(
        out,
        SetForegroundColor(Color::Magenta),
        Print(format!("\n--- {} ---\n", title)),
        ResetColor
    )
}

fn field<W: Write>(out: &mut W, key: &str, value: String, color: Color) -> io::Result<()> {
    execute!(
        out,
        SetForegroundColor(Color::DarkGrey),
        Print(format!("  {:<18}", key)),
        SetForegroundColor(color),
        Print(format!("{}\n", value)),
        ResetColor
    )
}

/// Epochs to draw: all of them when the history is short, otherwise an even
/// sample that always keeps the first and last epoch. Epochs are 1-based.
pub fn curve_rows(history: &[usize], max_rows: usize) -> Vec<(usize, usize)> {
    let n = history.len();
    if n <= max_rows || max_rows < 2 {
        return history.iter().enumerate().map(|(i, &e)| (i + 1, e)).collect();
    }
    let step = (n - 1) as f64 / (max_rows - 1) as f64;
    let mut rows: Vec<(usize, usize)> = (0..max_rows)
        .map(|k| {
            let i = (k as f64 * step).round() as usize;
            (i + 1, history[i])
        })
        .collect();
    rows.dedup_by_key(|r| r.0);
    rows
}

/// A bar proportional to `value / max`, at least one cell for any non-zero value.
pub fn bar(value: usize, max: usize, width: usize) -> String {
    if max == 0 || value == 0 {
        return String::new();
    }
    let cells = ((value as f64 / max as f64) * width as f64).round() as usize;
    "█".repeat(cells.clamp(1, width))
}

fn accuracy_color(acc: f64) -> Color {
    if acc >= 0.9 {
        Color::Green
    } else if acc >= 0.7 {
        Color::Yellow
    } else {
        Color::Red
    }
}

pub fn print_report<W: Write>(out: &mut W, report: &ExperimentReport) -> io::Result<()> {
    heading(out, &report.dataset.name)?;
    execute!(
        out,
        SetForegroundColor(Color::DarkGrey),
        Print(format!("  {}\n", report.dataset.description)),
        ResetColor
    )?;
    let (sep_text, sep_color) = if report.dataset.linearly_separable {
        ("yes", Color::Green)
    } else {
        ("no", Color::Yellow)
    };
    field(out, "separable", sep_text.to_string(), sep_color)?;
    field(
        out,
        "samples",
        format!("{} train / {} test", report.n_train, report.n_test),
        Color::White,
    )?;

    heading(out, "Training")?;
    let model = &report.model;
    field(
        out,
        "learning rate",
        format!("{}", model.learning_rate),
        Color::White,
    )?;
    match model.convergence_epoch {
        Some(epoch) => field(out, "converged", format!("epoch {}", epoch), Color::Green)?,
        None => field(
            out,
            "converged",
            format!("did not converge in {} epochs", model.epochs),
            Color::Red,
        )?,
    }
    field(
        out,
        "training time",
        format!("{:.3} ms", model.train_time.as_secs_f64() * 1e3),
        Color::White,
    )?;
    field(
        out,
        "weights",
        format!(
            "[{}]  bias {:.4}",
            model
                .weights
                .iter()
                .map(|w| format!("{:.4}", w))
                .collect::<Vec<_>>()
                .join(", "),
            model.bias
        ),
        Color::White,
    )?;
    match &report.boundary {
        Some(line) => field(out, "boundary", line.to_string(), Color::Cyan)?,
        None => field(out, "boundary", "vertical (w2 = 0)".to_string(), Color::Cyan)?,
    }

    heading(out, "Evaluation")?;
    field(
        out,
        "train accuracy",
        format!("{:.2}%", report.train_accuracy * 100.0),
        accuracy_color(report.train_accuracy),
    )?;
    let test = &report.test;
    field(
        out,
        "test accuracy",
        format!("{:.2}%", test.accuracy * 100.0),
        accuracy_color(test.accuracy),
    )?;
    field(
        out,
        "precision",
        format!("{:.3}", test.precision),
        Color::White,
    )?;
    field(out, "recall", format!("{:.3}", test.recall), Color::White)?;
    field(out, "f1", format!("{:.3}", test.f1), Color::White)?;
    let cm = &test.confusion;
    execute!(
        out,
        SetForegroundColor(Color::DarkGrey),
        Print("  confusion          pred 0  pred 1\n"),
        Print(format!("    true 0          {:>6}  {:>6}\n", cm.tn, cm.fp)),
        Print(format!("    true 1          {:>6}  {:>6}\n", cm.fn_, cm.tp)),
        ResetColor
    )?;

    heading(out, "Errors per epoch")?;
    let max = report.errors_history.iter().copied().max().unwrap_or(0);
    for (epoch, errors) in curve_rows(&report.errors_history, CURVE_ROWS) {
        let color = if errors == 0 { Color::Green } else { Color::Yellow };
        execute!(
            out,
            SetForegroundColor(Color::DarkGrey),
            Print(format!("  {:>5} {:>5} ", epoch, errors)),
            SetForegroundColor(color),
            Print(format!("{}\n", bar(errors, max, BAR_WIDTH))),
            ResetColor
        )?;
    }
    out.flush()
}

pub fn print_catalog<W: Write>(out: &mut W) -> io::Result<()> {
    heading(out, "Datasets")?;
    for kind in DatasetKind::catalog() {
        let info = kind.info();
        let color = if info.linearly_separable {
            Color::Green
        } else {
            Color::Yellow
        };
        execute!(
            out,
            SetForegroundColor(Color::Cyan),
            Print(format!("  {:<8}", kind.name())),
            SetForegroundColor(Color::White),
            Print(format!("{:<30}", info.name)),
            SetForegroundColor(color),
            Print(format!(
                "{:<15}",
                if info.linearly_separable {
                    "separable"
                } else {
                    "not separable"
                }
            )),
            SetForegroundColor(Color::DarkGrey),
            Print(format!("{} samples. {}\n", kind.n_samples(), info.description)),
            ResetColor
        )?;
    }
    out.flush()
}
