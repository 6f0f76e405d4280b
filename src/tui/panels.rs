use std::time::{Duration, Instant};

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::aggregate::{aggregate, ChartFilter};
use crate::errors::KharchaError;
use crate::parse::parse_filter;
use crate::record::{Category, NOTE_PLACEHOLDER};
use crate::store::Store;
use crate::KharchaConfig;

use super::actions::{widget_action, widget_editing_action, EditingAction, TuiAction};
use super::editor::Editor;
use super::TuiWidget;

const NOTICE_TTL: Duration = Duration::from_secs(2);

/// Section visibility. The list and the chart are never shown together;
/// nothing is shown until the first toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Panel {
    Hidden,
    List,
    Chart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterKind {
    Day,
    Month,
}

/// The interactive browse view: expense list, category chart, and a
/// one-line status area for transient notices and the filter editor.
pub struct ExpensePanels<'a> {
    store: &'a mut Store,
    config: &'a KharchaConfig,
    panel: Panel,
    selected: usize,
    filter: ChartFilter,
    editing: Option<FilterKind>,
    editor: Editor,
    notice: Option<(String, Instant)>,
}

impl<'a> ExpensePanels<'a> {
    pub fn new(store: &'a mut Store, config: &'a KharchaConfig) -> Self {
        Self {
            store,
            config,
            panel: Panel::Hidden,
            selected: 0,
            filter: ChartFilter::All,
            editing: None,
            editor: Editor::default(),
            notice: None,
        }
    }

    fn toggle(&mut self, panel: Panel) {
        self.panel = if self.panel == panel {
            Panel::Hidden
        } else {
            panel
        };
    }

    fn select_previous(&mut self) {
        if self.panel == Panel::List {
            self.selected = self.selected.saturating_sub(1);
        }
    }

    fn select_next(&mut self) {
        if self.panel == Panel::List && self.selected + 1 < self.store.records().len() {
            self.selected += 1;
        }
    }

    fn delete_selected(&mut self) {
        if self.panel != Panel::List {
            return;
        }
        match self.store.remove(self.selected) {
            Ok(removed) => {
                let len = self.store.records().len();
                if self.selected >= len {
                    self.selected = len.saturating_sub(1);
                }
                self.show_notice(&format!("Deleted {}", removed.name));
            }
            // Stale index, nothing to delete.
            Err(KharchaError::IndexOutOfRange { .. }) => {}
            Err(err) => self.show_notice(&err.to_string()),
        }
    }

    fn start_filter(&mut self, kind: FilterKind) {
        if self.panel != Panel::Chart {
            return;
        }
        self.editing = Some(kind);
        self.editor.start_editing(String::new());
    }

    fn apply_filter(&mut self) {
        let input = self.editor.stop_editing();
        let Some(kind) = self.editing.take() else {
            return;
        };
        match parse_filter(&input) {
            Ok(filter) => {
                let kind_matches = matches!(
                    (kind, &filter),
                    (FilterKind::Day, ChartFilter::Day(_))
                        | (FilterKind::Month, ChartFilter::Month { .. })
                );
                if kind_matches {
                    self.filter = filter;
                } else {
                    self.show_notice(match kind {
                        FilterKind::Day => "Expected a full date (YYYY-MM-DD)",
                        FilterKind::Month => "Expected a month (YYYY-MM)",
                    });
                }
            }
            Err(err) => self.show_notice(&err.to_string()),
        }
    }

    fn show_notice(&mut self, message: &str) {
        self.notice = Some((message.to_string(), Instant::now()));
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(""),
            Line::from("e  show expense list"),
            Line::from("c  show category chart"),
            Line::from("q  quit"),
        ];
        let help = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .title("kharcha"),
        );
        frame.render_widget(help, area);
    }

    fn render_list(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Expenses");
        if self.store.records().is_empty() {
            let empty = Paragraph::new("No expenses recorded yet").block(block);
            frame.render_widget(empty, area);
            return;
        }

        let header = Row::new(["#", "Name", "Amount", "Date", "Category", "Note"])
            .style(Style::default().bg(Color::DarkGray));
        let currency = self.config.currency;
        let rows: Vec<Row> = self
            .store
            .records()
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let amount = Line::from(format!("{:.2}{}", record.amount, currency))
                    .alignment(Alignment::Right);
                let note = record
                    .note
                    .clone()
                    .unwrap_or_else(|| NOTE_PLACEHOLDER.to_string());
                let row = Row::new(vec![
                    Cell::new(index.to_string()),
                    Cell::new(record.name.clone()),
                    Cell::new(amount),
                    Cell::new(record.date.to_string()),
                    Cell::new(record.category.to_string())
                        .style(Style::default().fg(record.category.color())),
                    Cell::new(note),
                ]);
                if index == self.selected {
                    row.style(Style::default().add_modifier(Modifier::REVERSED))
                } else {
                    row
                }
            })
            .collect();
        let widths = [
            Constraint::Length(4),
            Constraint::Min(12),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Min(8),
        ];
        let table = Table::new(rows, widths).header(header).block(block);
        frame.render_widget(table, area);
    }

    fn render_chart(&self, frame: &mut Frame, area: Rect) {
        let title = format!("Spending by category ({})", self.filter);
        let block = Block::default().borders(Borders::ALL).title(title);

        let totals = aggregate(self.store.records(), &self.filter);
        if totals.is_empty() {
            let empty = Paragraph::new("No expenses match this filter").block(block);
            frame.render_widget(empty, area);
            return;
        }

        let mut entries: Vec<(Category, Decimal)> = totals.into_iter().collect();
        entries.sort_by_key(|(category, _)| *category);

        // The chart is rebuilt from the totals on every draw, so a filter
        // change fully replaces the previous chart.
        let bars: Vec<Bar> = entries
            .iter()
            .map(|(category, total)| {
                Bar::default()
                    .label(Line::from(category.to_string()))
                    .value(total.round().to_u64().unwrap_or(0))
                    .text_value(format!("{:.2}", total))
                    .style(Style::default().fg(category.color()))
                    .value_style(Style::default().fg(Color::Black).bg(category.color()))
            })
            .collect();
        let chart = BarChart::default()
            .block(block)
            .bar_width(9)
            .bar_gap(2)
            .data(BarGroup::default().bars(&bars));
        frame.render_widget(chart, area);
    }

    fn render_status(&mut self, frame: &mut Frame, area: Rect) {
        if let Some(kind) = self.editing {
            let prompt = match kind {
                FilterKind::Day => "Day filter: ",
                FilterKind::Month => "Month filter: ",
            };
            let line = format!("{}{}", prompt, self.editor.value());
            frame.render_widget(Paragraph::new(line), area);
            frame.set_cursor(
                area.x + prompt.len() as u16 + self.editor.cursor_position() as u16,
                area.y,
            );
            return;
        }

        if let Some((_, since)) = &self.notice {
            if since.elapsed() > NOTICE_TTL {
                self.notice = None;
            }
        }
        let line = match &self.notice {
            Some((message, _)) => message.clone(),
            None => match self.panel {
                Panel::Hidden => String::new(),
                Panel::List => "j/k move  d delete  c chart  q quit".to_string(),
                Panel::Chart => "f day filter  m month filter  a all  e list  q quit".to_string(),
            },
        };
        let status = Paragraph::new(line).style(Style::default().fg(Color::Gray));
        frame.render_widget(status, area);
    }
}

impl TuiWidget for ExpensePanels<'_> {
    fn handle_events(&mut self) -> Option<TuiAction> {
        if self.editor.is_editing() {
            match widget_editing_action()? {
                EditingAction::InsertChar(c) => self.editor.insert_char(c),
                EditingAction::DeleteLeft => self.editor.delete_left(),
                EditingAction::DeleteRight => self.editor.delete_right(),
                EditingAction::MoveLeft => self.editor.move_left(),
                EditingAction::MoveRight => self.editor.move_right(),
                EditingAction::CancelEditing => {
                    self.editing = None;
                    self.editor.stop_editing();
                }
                EditingAction::StopEditing => self.apply_filter(),
            }
        } else {
            match widget_action()? {
                TuiAction::MoveUp => self.select_previous(),
                TuiAction::MoveDown => self.select_next(),
                TuiAction::ToTop => self.selected = 0,
                TuiAction::ToBottom => {
                    self.selected = self.store.records().len().saturating_sub(1);
                }
                TuiAction::Delete => self.delete_selected(),
                TuiAction::ShowList => self.toggle(Panel::List),
                TuiAction::ShowChart => self.toggle(Panel::Chart),
                TuiAction::FilterDay => self.start_filter(FilterKind::Day),
                TuiAction::FilterMonth => self.start_filter(FilterKind::Month),
                TuiAction::FilterAll => {
                    if self.panel == Panel::Chart {
                        self.filter = ChartFilter::All;
                    }
                }
                TuiAction::Exit => return Some(TuiAction::Exit),
            }
        }
        None
    }

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(frame.size());
        match self.panel {
            Panel::Hidden => self.render_help(frame, chunks[0]),
            Panel::List => self.render_list(frame, chunks[0]),
            Panel::Chart => self.render_chart(frame, chunks[0]),
        }
        self.render_status(frame, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::str::FromStr;

    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;
    use crate::record::ExpenseRecord;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("kharcha-panels-{}-{}.json", tag, std::process::id()))
    }

    fn record(name: &str) -> ExpenseRecord {
        ExpenseRecord {
            name: name.to_string(),
            amount: Decimal::from_str("5").unwrap(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            category: Category::Food,
            note: None,
        }
    }

    #[test]
    fn test_panels_start_hidden_and_toggle_exclusively() {
        let path = temp_path("toggle");
        let _ = fs::remove_file(&path);
        let mut store = Store::load(path.clone());
        let config = KharchaConfig::default();
        let mut panels = ExpensePanels::new(&mut store, &config);

        assert_eq!(panels.panel, Panel::Hidden);
        panels.toggle(Panel::List);
        assert_eq!(panels.panel, Panel::List);
        panels.toggle(Panel::Chart);
        assert_eq!(panels.panel, Panel::Chart);
        panels.toggle(Panel::Chart);
        assert_eq!(panels.panel, Panel::Hidden);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_applying_day_filter_updates_chart_filter() {
        let path = temp_path("day-filter");
        let _ = fs::remove_file(&path);
        let mut store = Store::load(path.clone());
        let config = KharchaConfig::default();
        let mut panels = ExpensePanels::new(&mut store, &config);

        panels.toggle(Panel::Chart);
        panels.start_filter(FilterKind::Day);
        panels.editor.start_editing("2024-05-01".to_string());
        panels.apply_filter();

        let expected = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(panels.filter, ChartFilter::Day(expected));
        assert!(panels.editing.is_none());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_mismatched_filter_kind_is_rejected_with_notice() {
        let path = temp_path("kind-mismatch");
        let _ = fs::remove_file(&path);
        let mut store = Store::load(path.clone());
        let config = KharchaConfig::default();
        let mut panels = ExpensePanels::new(&mut store, &config);

        panels.toggle(Panel::Chart);
        panels.start_filter(FilterKind::Month);
        panels.editor.start_editing("2024-05-01".to_string());
        panels.apply_filter();

        assert_eq!(panels.filter, ChartFilter::All);
        assert!(panels.notice.is_some());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_delete_on_empty_list_is_a_no_op() {
        let path = temp_path("delete-empty");
        let _ = fs::remove_file(&path);
        let mut store = Store::load(path.clone());
        let config = KharchaConfig::default();
        let mut panels = ExpensePanels::new(&mut store, &config);

        panels.toggle(Panel::List);
        panels.delete_selected();
        assert!(panels.notice.is_none());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_delete_clamps_selection_to_last_record() {
        let path = temp_path("delete-clamp");
        let _ = fs::remove_file(&path);
        let mut store = Store::load(path.clone());
        store.add(record("First")).unwrap();
        store.add(record("Second")).unwrap();
        let config = KharchaConfig::default();
        let mut panels = ExpensePanels::new(&mut store, &config);

        panels.toggle(Panel::List);
        panels.selected = 1;
        panels.delete_selected();
        assert_eq!(panels.selected, 0);
        assert_eq!(panels.store.records().len(), 1);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_filter_keys_are_ignored_outside_chart_panel() {
        let path = temp_path("filter-guard");
        let _ = fs::remove_file(&path);
        let mut store = Store::load(path.clone());
        let config = KharchaConfig::default();
        let mut panels = ExpensePanels::new(&mut store, &config);

        panels.toggle(Panel::List);
        panels.start_filter(FilterKind::Day);
        assert!(panels.editing.is_none());

        let _ = fs::remove_file(&path);
    }
}
