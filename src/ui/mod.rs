//! Presentational shells - props in, text out.
//!
//! A [`Shell`] knows nothing about where its values come from. Pages build
//! shells from their view-state; [`Page::render`] lays them out for the
//! current [`Viewport`].

use std::fmt::Write;

/// Money, percentage, date and input-mask formatting
pub mod format;

/// Viewports narrower than this are mobile.
pub const MOBILE_BREAKPOINT: u16 = 768;

const BAR_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewport {
    /// Tables render as stacked cards
    Mobile,
    Desktop,
}

impl Viewport {
    /// Classifies a width against the default breakpoint.
    #[must_use]
    pub const fn from_width(width: u16) -> Self {
        Self::with_breakpoint(width, MOBILE_BREAKPOINT)
    }

    #[must_use]
    pub const fn with_breakpoint(width: u16, breakpoint: u16) -> Self {
        if width < breakpoint {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsCard {
    pub title: String,
    pub value: String,
    pub subtitle: Option<String>,
}

impl StatsCard {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            subtitle: None,
        }
    }

    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }
}

/// One entry of a card list, e.g. a customer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListItem {
    pub title: String,
    pub subtitle: Option<String>,
    /// Secondary lines shown under the title
    pub meta: Vec<String>,
    /// Short status tag shown next to the title
    pub badge: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    /// Formatted value printed after the bar
    pub display: String,
}

/// Bar series; each bar is scaled against the largest value.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shell {
    Stats(StatsCard),
    ListItem(ListItem),
    Table(Table),
    Chart(Chart),
    Empty { message: String },
    /// Failed section with the action that retries it
    Error { message: String, retry: String },
    Loading { label: String },
}

impl Shell {
    pub fn empty(message: impl Into<String>) -> Self {
        Self::Empty {
            message: message.into(),
        }
    }

    pub fn loading(label: impl Into<String>) -> Self {
        Self::Loading {
            label: label.into(),
        }
    }

    pub fn error(message: impl Into<String>, retry: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
            retry: retry.into(),
        }
    }

    /// Renders the shell as text lines for `viewport`.
    #[must_use]
    pub fn render(&self, viewport: Viewport) -> String {
        let mut out = String::new();
        match self {
            Self::Stats(card) => {
                let _ = writeln!(out, "{}: {}", card.title, card.value);
                if let Some(subtitle) = &card.subtitle {
                    let _ = writeln!(out, "  {subtitle}");
                }
            }
            Self::ListItem(item) => render_list_item(&mut out, item),
            Self::Table(table) => match viewport {
                Viewport::Desktop => render_table(&mut out, table),
                Viewport::Mobile => render_stacked(&mut out, table),
            },
            Self::Chart(chart) => render_chart(&mut out, chart),
            Self::Empty { message } => {
                let _ = writeln!(out, "({message})");
            }
            Self::Error { message, retry } => {
                let _ = writeln!(out, "! {message}");
                let _ = writeln!(out, "  Retry: {retry}");
            }
            Self::Loading { label } => {
                let _ = writeln!(out, "Loading {label}...");
            }
        }
        out
    }
}

fn render_list_item(out: &mut String, item: &ListItem) {
    match &item.badge {
        Some(badge) => {
            let _ = writeln!(out, "* {} [{badge}]", item.title);
        }
        None => {
            let _ = writeln!(out, "* {}", item.title);
        }
    }
    if let Some(subtitle) = &item.subtitle {
        let _ = writeln!(out, "  {subtitle}");
    }
    for line in &item.meta {
        let _ = writeln!(out, "  {line}");
    }
}

fn width_of(text: &str) -> usize {
    text.chars().count()
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(width_of(text));
    format!("{text}{}", " ".repeat(fill))
}

fn render_table(out: &mut String, table: &Table) {
    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            table
                .rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| width_of(cell))
                .chain(std::iter::once(width_of(column)))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(cell, *width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let _ = writeln!(out, "{}", line(&table.columns));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));
    for row in &table.rows {
        let _ = writeln!(out, "{}", line(row));
    }
}

fn render_stacked(out: &mut String, table: &Table) {
    for (index, row) in table.rows.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        for (column, cell) in table.columns.iter().zip(row) {
            let _ = writeln!(out, "{column}: {cell}");
        }
    }
}

fn render_chart(out: &mut String, chart: &Chart) {
    let _ = writeln!(out, "{}", chart.title);
    let max = chart.bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
    let label_width = chart.bars.iter().map(|b| width_of(&b.label)).max().unwrap_or(0);
    for bar in &chart.bars {
        let length = if max > 0.0 {
            // Bounded by BAR_WIDTH.
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                clippy::cast_precision_loss
            )]
            let length = ((bar.value.max(0.0) / max) * BAR_WIDTH as f64).round() as usize;
            length
        } else {
            0
        };
        let _ = writeln!(
            out,
            "{} {} {}",
            pad(&bar.label, label_width),
            "#".repeat(length),
            bar.display
        );
    }
}

/// A titled group of shells that loads and fails on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub shells: Vec<Shell>,
}

impl Section {
    pub fn new(title: impl Into<String>, shells: Vec<Shell>) -> Self {
        Self {
            title: title.into(),
            shells,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub title: String,
    pub sections: Vec<Section>,
}

impl Page {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Section by title, for callers inspecting a built page.
    #[must_use]
    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title == title)
    }

    #[must_use]
    pub fn render(&self, viewport: Viewport) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "== {} ==", self.title);
        for section in &self.sections {
            let _ = writeln!(out, "\n-- {} --", section.title);
            for shell in &section.shells {
                out.push_str(&shell.render(viewport));
            }
        }
        out
    }
}
