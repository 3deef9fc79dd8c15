use std::fmt::Write;

use clap::ValueEnum;
use toxscore_core::present::{CardView, ResultView};

use crate::util::to_pretty;

const BAR_CELLS: usize = 20;
const LABEL_WIDTH: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn print_result(view: &ResultView, format: OutputFormat) {
    match format {
        OutputFormat::Text => print!("{}", render_text(view)),
        OutputFormat::Json => println!("{}", to_pretty(view)),
    }
}

pub fn render_text(view: &ResultView) -> String {
    let mut out = String::new();
    let counts = &view.aggregate.level_counts;

    let _ = writeln!(out, "Aggregate");
    let _ = writeln!(
        out,
        "  {:<LABEL_WIDTH$} {}",
        "Mean toxicity", view.aggregate.mean_toxicity
    );
    let _ = writeln!(
        out,
        "  {:<LABEL_WIDTH$} {} (high {}, medium {}, low {})",
        "Items", view.aggregate.item_count, counts.high, counts.medium, counts.low
    );

    for card in &view.cards {
        out.push('\n');
        render_card(&mut out, card);
    }
    out
}

fn render_card(out: &mut String, card: &CardView) {
    let _ = writeln!(
        out,
        "[{:>3}% toxic | {:<6}] {}",
        card.headline_percent,
        card.level,
        bar(card.bar_width)
    );
    if let Some(text) = &card.text {
        let _ = writeln!(out, "  {text}");
    }
    for line in &card.scores {
        let _ = writeln!(out, "    {:<LABEL_WIDTH$} {}", line.label, line.value);
    }
}

fn bar(width_percent: u8) -> String {
    let filled = (usize::from(width_percent.min(100)) * BAR_CELLS + 50) / 100;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_CELLS - filled))
}
