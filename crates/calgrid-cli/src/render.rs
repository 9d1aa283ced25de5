//! Terminal rendering
//!
//! Paints a [`RenderedCalendar`] as ANSI text. Colors can be turned off
//! for plain output (pipes, tests).

use calgrid_core::render::{RenderedBody, RenderedDay, RenderedMonth, RenderedWeek, RenderedYear};
use calgrid_core::RenderedCalendar;
use nu_ansi_term::{Color, Style};

/// Width of one day cell, including the separating space
const CELL_WIDTH: usize = 4;

/// Terminal painter
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    color: bool,
}

impl Painter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.color {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Render the whole calendar
    pub fn render(&self, calendar: &RenderedCalendar) -> String {
        let mut out = String::new();
        out.push_str(&self.header(calendar));
        out.push('\n');

        match &calendar.body {
            RenderedBody::Days { weekdays, weeks } => {
                out.push_str(&self.weekday_row(weekdays));
                out.push('\n');
                for week in weeks {
                    out.push_str(&self.week_row(week));
                    out.push('\n');
                }
                out.push_str(&self.legend(weeks));
            }
            RenderedBody::Months { months } => {
                for row in months.chunks(3) {
                    let cells: Vec<String> = row.iter().map(|m| self.month_cell(m)).collect();
                    out.push_str(&cells.join(" "));
                    out.push('\n');
                }
            }
            RenderedBody::Years { years } => {
                for row in years.chunks(4) {
                    let cells: Vec<String> = row.iter().map(|y| self.year_cell(y)).collect();
                    out.push_str(&cells.join(" "));
                    out.push('\n');
                }
            }
        }

        out
    }

    fn header(&self, calendar: &RenderedCalendar) -> String {
        let title = format!("{} {}", calendar.header.month_label, calendar.header.year);
        let width = 3 + CELL_WIDTH * 7;
        let inner = width.saturating_sub(4);
        format!(
            "< {} >",
            self.paint(Color::Cyan.bold(), &format!("{:^inner$}", title))
        )
    }

    fn weekday_row(&self, weekdays: &[String]) -> String {
        let mut row = self.paint(Style::new().dimmed(), "Wk ");
        for name in weekdays {
            let short: String = name.chars().take(3).collect();
            row.push_str(&self.paint(Style::new().bold(), &format!("{:>3} ", short)));
        }
        row.trim_end().to_string()
    }

    fn week_row(&self, week: &RenderedWeek) -> String {
        let mut row = self.paint(Style::new().dimmed(), &format!("{:>2} ", week.week_number));
        for day in &week.days {
            row.push_str(&self.day_cell(day));
        }
        row.trim_end().to_string()
    }

    fn day_cell(&self, day: &RenderedDay) -> String {
        let marker = if day.is_today { '*' } else { ' ' };
        let text = format!("{:>2}{}", day.day, marker);

        let style = day_style(day);
        let connector = if day.pipe_start || day.is_in_range {
            self.paint(Color::Cyan.normal(), "─")
        } else {
            " ".to_string()
        };
        format!("{}{}", self.paint(style, &text), connector)
    }

    fn legend(&self, weeks: &[RenderedWeek]) -> String {
        let mut out = String::new();
        for day in weeks.iter().flat_map(|w| &w.days) {
            if !day.in_current_month {
                continue;
            }
            if let Some(color) = &day.legend_color {
                let dot = self.paint(parse_color(color).normal(), "●");
                out.push_str(&format!("  {} {} {}\n", day.aria_label, dot, day.tooltip));
            }
        }
        out
    }

    fn month_cell(&self, month: &RenderedMonth) -> String {
        let text = format!("{:^11}", month.label);
        self.paint(item_style(month.is_current, month.is_selected), &text)
    }

    fn year_cell(&self, year: &RenderedYear) -> String {
        let text = format!("{:^7}", year.year);
        self.paint(item_style(year.is_current, year.is_selected), &text)
    }
}

fn day_style(day: &RenderedDay) -> Style {
    let mut style = if day.is_selected || day.is_range_start || day.is_range_end {
        Color::Black.on(Color::Cyan).bold()
    } else if day.is_in_range {
        Color::Cyan.bold()
    } else if let Some(color) = &day.legend_color {
        parse_color(color).normal()
    } else if day.is_weekend {
        Color::LightRed.normal()
    } else {
        Style::new()
    };

    if day.is_today {
        style = style.underline();
    }
    if day.is_disabled || !day.in_current_month {
        style = style.dimmed();
    }
    if day.is_disabled {
        style = style.strikethrough();
    }
    style
}

fn item_style(is_current: bool, is_selected: bool) -> Style {
    match (is_current, is_selected) {
        (_, true) => Color::Black.on(Color::Cyan).bold(),
        (true, false) => Color::Cyan.bold().underline(),
        (false, false) => Style::new(),
    }
}

/// Map a legend color (name or `#rrggbb`) to a terminal color
pub fn parse_color(value: &str) -> Color {
    let value = value.trim().to_lowercase();
    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            if let (Some(r), Some(g), Some(b)) = (channel(0), channel(2), channel(4)) {
                return Color::Rgb(r, g, b);
            }
        }
    }

    match value.as_str() {
        "red" => Color::Red,
        "green" => Color::Green,
        "blue" => Color::Blue,
        "yellow" | "orange" => Color::Yellow,
        "purple" | "magenta" => Color::Purple,
        "cyan" | "teal" => Color::Cyan,
        "white" => Color::White,
        "black" => Color::Black,
        // grey とその他の未知の色
        _ => Color::DarkGray,
    }
}
