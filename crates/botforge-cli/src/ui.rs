//! BotForge CLI UI primitives.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Forge palette
pub mod colors {
    use console::Color;

    pub const BLURPLE: Color = Color::Color256(105); // Discord-ish blurple
    pub const EMBER: Color = Color::Color256(208);   // Forge orange
    pub const GREEN: Color = Color::Color256(82);
    pub const DIM: Color = Color::Color256(240);
}

pub mod symbols {
    pub const DIAMOND: &str = "\u{25C6}";         // ◆
    pub const DIAMOND_OUTLINE: &str = "\u{25C7}"; // ◇
    pub const TARGET_FILLED: &str = "\u{25C9}";   // ◉
    pub const TRIANGLE: &str = "\u{25B8}";        // ▸
    pub const ARROW: &str = "\u{2500}\u{25B8}";   // ─▸
}

/// Print compact version header
pub fn print_compact_header(version: &str) {
    println!(
        "  {} {} {}",
        style(symbols::DIAMOND).fg(colors::BLURPLE),
        style("botforge").fg(colors::BLURPLE).bold(),
        style(version).dim()
    );
    println!();
}

pub fn success(msg: &str) {
    println!("  {} {}", style(symbols::TARGET_FILLED).fg(colors::GREEN), msg);
}

pub fn warning(msg: &str) {
    println!(
        "  {} {}",
        style(symbols::DIAMOND).fg(colors::EMBER),
        style(msg).fg(colors::EMBER)
    );
}

pub fn info(msg: &str) {
    println!("  {} {}", style(symbols::DIAMOND_OUTLINE).fg(colors::BLURPLE), msg);
}

pub fn dim(msg: &str) {
    println!("  {}", style(msg).fg(colors::DIM));
}

/// Spinner shown while a step runs
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner()
        .tick_chars("\u{25C7}\u{25C6}\u{25C7}\u{25C6}") // ◇◆◇◆
        .template("  {spinner:.magenta} {msg}")
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

pub fn box_header(title: &str) {
    let width: usize = 55;
    let title_padded = format!(" {} ", title);
    let dashes = width.saturating_sub(title_padded.chars().count() + 4);

    println!(
        "  {}{}{}{}",
        style("\u{256D}\u{2500}").fg(colors::BLURPLE), // ╭─
        style(title_padded).fg(colors::BLURPLE).bold(),
        style("\u{2500}".repeat(dashes)).fg(colors::BLURPLE),
        style("\u{256E}").fg(colors::BLURPLE) // ╮
    );
}

pub fn box_line(content: &str) {
    let width: usize = 53;
    let padding = width.saturating_sub(console::measure_text_width(content));
    println!(
        "  {} {}{}{}",
        style("\u{2502}").fg(colors::BLURPLE), // │
        content,
        " ".repeat(padding),
        style("\u{2502}").fg(colors::BLURPLE)
    );
}

pub fn box_footer() {
    let width = 55;
    println!(
        "  {}{}{}",
        style("\u{2570}").fg(colors::BLURPLE), // ╰
        style("\u{2500}".repeat(width - 2)).fg(colors::BLURPLE),
        style("\u{256F}").fg(colors::BLURPLE) // ╯
    );
}

/// Print a tree item at `depth`, e.g. one node of a field hierarchy
pub fn tree_item(depth: usize, name: &str, description: Option<&str>, is_last: bool) {
    let prefix = "\u{2502}  ".repeat(depth); // │
    let connector = if is_last {
        "\u{2570}\u{2500}\u{2500}" // ╰──
    } else {
        "\u{251C}\u{2500}\u{2500}" // ├──
    };

    match description {
        Some(desc) => println!(
            "  {}{}  {}   {}",
            style(prefix).fg(colors::DIM),
            style(connector).fg(colors::DIM),
            style(name).fg(colors::BLURPLE),
            style(desc).dim()
        ),
        None => println!(
            "  {}{}  {}",
            style(prefix).fg(colors::DIM),
            style(connector).fg(colors::DIM),
            style(name).fg(colors::BLURPLE)
        ),
    }
}

/// Print a command summary line
pub fn command_line(name: &str, kind: &str, options: usize) {
    println!(
        "  {}   /{:20} {:12} {} option(s)",
        style(symbols::TRIANGLE).fg(colors::BLURPLE),
        style(name).bold(),
        kind,
        options
    );
}

pub fn timing(label: &str, duration_ms: u128) {
    println!(
        "  {} {} in {}ms",
        style(symbols::DIAMOND_OUTLINE).fg(colors::BLURPLE),
        label,
        duration_ms
    );
}

/// Header printed before validation failures
pub fn nope_header() {
    println!();
    println!(
        "  {} {}",
        style(symbols::DIAMOND).fg(colors::EMBER).bold(),
        style("Not quite.").fg(colors::EMBER).bold()
    );
    println!();
}

pub fn looking_good() {
    println!(
        "  {} {}",
        style(symbols::TARGET_FILLED).fg(colors::GREEN),
        style("Looking good.").bold()
    );
}

/// Shortens `s` to `max` characters for one-line previews.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}\u{2026}", cut)
}
