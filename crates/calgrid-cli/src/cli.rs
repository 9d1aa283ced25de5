//! CLI (Command Line Interface) mode
//!
//! Provides an interactive REPL that drives a calendar from the keyboard.
//! Also supports non-interactive print mode for one-shot rendering.

use std::borrow::Cow;
use std::cell::RefCell;
use std::io::{IsTerminal, Write};
use std::rc::Rc;

use calgrid_core::{
    Calendar, CalendarEvent, CalendarView, EnglishLabels, LabelSource, SelectionMode, ViewState,
};
use chrono::{Datelike, NaiveDate};
use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use nu_ansi_term::{Color, Style};
use reedline::{
    ColumnarMenu, Completer, DefaultHinter, Emacs, KeyCode, KeyModifiers, Keybindings,
    MenuBuilder, Prompt, PromptEditMode, PromptHistorySearch, Reedline, ReedlineEvent,
    ReedlineMenu, Signal, Span, Suggestion,
};
use tracing::info;

use crate::command::{COMMANDS, Command};
use crate::error::Result;
use crate::render::Painter;

/// Completer for command names and `/month` arguments
#[derive(Clone, Default)]
pub struct CommandCompleter;

impl CommandCompleter {
    fn suggestion(value: String, description: String, span: Span) -> Suggestion {
        Suggestion {
            value,
            description: Some(description),
            extra: None,
            span,
            append_whitespace: true,
            style: None,
        }
    }
}

impl Completer for CommandCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let line = line.get(..pos).unwrap_or(line);
        if !line.starts_with('/') {
            return Vec::new();
        }

        // "/month 1" のように引数を入力中なら月番号を候補にする
        if let Some(partial) = line.strip_prefix("/month ") {
            let span = Span::new(line.len() - partial.len(), line.len());
            return (1..=12u32)
                .map(|month| (month.to_string(), month))
                .filter(|(value, _)| value.starts_with(partial.trim()))
                .map(|(value, month)| Self::suggestion(value, EnglishLabels.month_long(month), span))
                .collect();
        }

        COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(line))
            .map(|(cmd, desc)| Self::suggestion(cmd.to_string(), desc.to_string(), Span::new(0, line.len())))
            .collect()
    }
}

/// Prompt showing the active view and anchor month, with the selection
/// mode on the right
struct CalendarPrompt {
    view: CalendarView,
    anchor: NaiveDate,
    mode: SelectionMode,
}

impl CalendarPrompt {
    fn of(calendar: &Calendar) -> Self {
        Self {
            view: calendar.view(),
            anchor: calendar.anchor(),
            mode: calendar.config().mode,
        }
    }

    fn label(&self) -> String {
        match self.view {
            CalendarView::Days => format!("days {}", self.anchor.format("%Y-%m")),
            CalendarView::Months => format!("months {}", self.anchor.year()),
            CalendarView::Years => {
                let years = ViewState::new(self.anchor).years();
                match (years.first(), years.last()) {
                    (Some(first), Some(last)) => format!("years {}-{}", first, last),
                    _ => format!("years {}", self.anchor.year()),
                }
            }
        }
    }

    fn style(&self) -> Style {
        match self.view {
            CalendarView::Days => Color::Cyan.bold(),
            CalendarView::Months => Color::Green.bold(),
            CalendarView::Years => Color::Yellow.bold(),
        }
    }
}

impl Prompt for CalendarPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Owned(self.style().paint(format!("{} > ", self.label())).to_string())
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        let mode = match self.mode {
            SelectionMode::Single => "single",
            SelectionMode::Multi => "multi",
            SelectionMode::Range => "range",
        };
        Cow::Owned(Style::new().dimmed().paint(format!("[{}]", mode)).to_string())
    }

    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_history_search_indicator(&self, _history_search: PromptHistorySearch) -> Cow<'_, str> {
        Cow::Borrowed("")
    }
}

/// Result of one REPL command
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Redraw,
    Stay,
    Exit,
}

/// Run CLI interactive mode
pub fn run_cli(mut calendar: Calendar) -> anyhow::Result<()> {
    let painter = Painter::new(std::io::stdout().is_terminal());

    // イベントは再描画の後に表示する
    let pending: Rc<RefCell<Vec<CalendarEvent>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&pending);
    calendar.subscribe(move |event: &CalendarEvent| sink.borrow_mut().push(event.clone()));

    info!(mode = ?calendar.config().mode, "Starting CLI mode");

    let mut keybindings = default_keybindings();

    // Trigger completion on '/' key
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Char('/'),
        ReedlineEvent::Edit(vec![reedline::EditCommand::InsertChar('/'), reedline::EditCommand::Complete]),
    );

    let menu = Box::new(
        ColumnarMenu::default()
            .with_name("command_menu")
            .with_columns(1)
            .with_column_width(Some(50))
            .with_only_buffer_difference(false),
    );

    let hinter = DefaultHinter::default().with_style(Style::new().dimmed());

    let mut line_editor = Reedline::create()
        .with_completer(Box::new(CommandCompleter))
        .with_menu(ReedlineMenu::EngineCompleter(menu))
        .with_hinter(Box::new(hinter))
        .with_edit_mode(Box::new(Emacs::new(keybindings)));

    redraw(&painter, &calendar)?;
    print_welcome();

    loop {
        let prompt = CalendarPrompt::of(&calendar);
        let signal = line_editor.read_line(&prompt);

        match signal {
            Ok(Signal::Success(line)) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }

                match execute(&mut calendar, input) {
                    Ok(Flow::Exit) => {
                        println!("\n👋 さようなら！\n");
                        break;
                    }
                    Ok(Flow::Redraw) => {
                        redraw(&painter, &calendar)?;
                    }
                    Ok(Flow::Stay) => {}
                    Err(e) => {
                        eprintln!("\n❌ エラー: {}\n", e);
                    }
                }

                for event in pending.borrow_mut().drain(..) {
                    print_event(&event);
                }
            }
            Ok(Signal::CtrlC) => {
                println!("^C");
                continue;
            }
            Ok(Signal::CtrlD) => {
                println!("\n👋 さようなら！\n");
                break;
            }
            Err(err) => {
                eprintln!("\n❌ エラー: {}\n", err);
                break;
            }
        }
    }

    Ok(())
}

/// Default keybindings for reedline
fn default_keybindings() -> Keybindings {
    let mut keybindings = Keybindings::new();
    // Tab key triggers completion
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::Edit(vec![reedline::EditCommand::Complete]),
    );
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Enter, ReedlineEvent::Submit);
    // Esc key clears/closes menus
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Esc, ReedlineEvent::Esc);
    keybindings.add_binding(KeyModifiers::CONTROL, KeyCode::Char('c'), ReedlineEvent::CtrlC);
    keybindings.add_binding(KeyModifiers::CONTROL, KeyCode::Char('d'), ReedlineEvent::CtrlD);
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Up, ReedlineEvent::Up);
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Down, ReedlineEvent::Down);
    keybindings
}

/// Apply one input line to the calendar
fn execute(calendar: &mut Calendar, input: &str) -> Result<Flow> {
    let flow = match Command::parse(input)? {
        Command::Next => {
            calendar.next();
            Flow::Redraw
        }
        Command::Prev => {
            calendar.prev();
            Flow::Redraw
        }
        Command::Days => {
            calendar.switch_to_days();
            Flow::Redraw
        }
        Command::Months => {
            calendar.switch_to_months();
            Flow::Redraw
        }
        Command::Years => {
            calendar.switch_to_years();
            Flow::Redraw
        }
        Command::Month(month) => {
            calendar.choose_month_number(month);
            Flow::Redraw
        }
        Command::Year(year) => {
            calendar.choose_year(year);
            Flow::Redraw
        }
        Command::Click(day) => {
            let date = day.resolve(calendar.anchor())?;
            if !calendar.select_day(date) {
                println!("\n🚫 {} は選択できません\n", date);
                return Ok(Flow::Stay);
            }
            Flow::Redraw
        }
        Command::Info(day) => {
            let date = day.resolve(calendar.anchor())?;
            calendar.right_click(date);
            print_day_info(calendar, date);
            Flow::Stay
        }
        Command::Clear => {
            calendar.clear_selection();
            Flow::Redraw
        }
        Command::Selection => {
            print_selection(calendar);
            Flow::Stay
        }
        Command::Json => {
            println!("{}", serde_json::to_string_pretty(&calendar.render())?);
            Flow::Stay
        }
        Command::Help => {
            print_help();
            Flow::Stay
        }
        Command::Exit => Flow::Exit,
    };
    Ok(flow)
}

/// Clear the terminal and paint the calendar
fn redraw(painter: &Painter, calendar: &Calendar) -> Result<()> {
    let mut stdout = std::io::stdout();
    if std::io::stdout().is_terminal() {
        crossterm::execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
    }
    writeln!(stdout, "{}", painter.render(&calendar.render()))?;
    stdout.flush()?;
    Ok(())
}

/// 非対話モード: 現在の表示を一度だけ出力して終了
///
/// # 使用例
/// ```bash
/// calgrid --print
/// calgrid --print --json
/// ```
pub fn run_print(calendar: &Calendar, json: bool) -> anyhow::Result<()> {
    let rendered = calendar.render();
    if json {
        println!("{}", serde_json::to_string_pretty(&rendered)?);
    } else {
        let painter = Painter::new(std::io::stdout().is_terminal());
        print!("{}", painter.render(&rendered));
    }
    Ok(())
}

fn print_event(event: &CalendarEvent) {
    match event {
        CalendarEvent::SelectionChanged(dates) => {
            let list: Vec<String> = dates.iter().map(|d| d.to_string()).collect();
            println!("📣 selection: [{}]", list.join(", "));
        }
        CalendarEvent::RangeChanged(range) => {
            if !range.is_empty() {
                println!("📣 range: {}", range);
            }
        }
        CalendarEvent::ViewChanged { .. } | CalendarEvent::DayContextMenu(_) => {}
    }
}

fn print_day_info(calendar: &Calendar, date: NaiveDate) {
    println!();
    println!("📅 {}", date.format("%Y-%m-%d (%a)"));
    println!("  今日: {}", if calendar.is_today(date) { "はい" } else { "いいえ" });
    println!("  週末: {}", if calendar.is_weekend(date) { "はい" } else { "いいえ" });
    println!("  無効: {}", if calendar.is_disabled(date) { "はい" } else { "いいえ" });
    match calendar.legend_color(date) {
        Some(color) => println!("  凡例: {} ({})", color, calendar.legend_info(date).join(", ")),
        None => println!("  凡例: なし"),
    }
    println!();
}

fn print_selection(calendar: &Calendar) {
    println!();
    println!("🗂  モード: {:?}", calendar.config().mode);
    let dates: Vec<String> = calendar.selected_dates().iter().map(|d| d.to_string()).collect();
    println!("  選択: [{}]", dates.join(", "));
    println!("  範囲: {}", calendar.range());
    println!();
}

/// Print welcome message
fn print_welcome() {
    println!("日付または日にちを入力してクリック、/help でコマンド一覧");
    println!();
}

/// Print help message
fn print_help() {
    println!();
    println!("📖 利用可能なコマンド:");
    for (cmd, desc) in COMMANDS {
        println!("  {} - {}", cmd, desc);
    }
    println!();
    println!("💡 ヒント: / から入力するとコマンド候補が表示されます");
    println!("💡 日にちだけを入力すると表示中の月の日付をクリックします (例: 15)");
    println!();
}
