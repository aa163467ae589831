use colored::Colorize;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::cli::load_installments;
use crate::error::Result;
use crate::fmt::{money, number};
use crate::models::Installment;
use crate::reports::{self, MonthSummary};

const HEADER_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const FOOTER_STYLE: Style = Style::new().fg(Color::DarkGray);
const SECTION_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);
const AMOUNT_STYLE: Style = Style::new().fg(Color::Rgb(80, 220, 100));
const HEADER_ROW_STYLE: Style = Style::new()
    .fg(Color::DarkGray)
    .add_modifier(Modifier::BOLD);

struct Dashboard {
    source: String,
    records: Vec<Installment>,
    /// Available month keys, most recent first.
    months: Vec<String>,
    selected: usize,
    summary: MonthSummary,
    offset: usize,
    visible_rows: usize,
}

impl Dashboard {
    fn new(source: String, records: Vec<Installment>, months: Vec<String>) -> Self {
        let summary = reports::month_summary(&records, &months[0]);
        Self {
            source,
            records,
            months,
            selected: 0,
            summary,
            offset: 0,
            visible_rows: 10,
        }
    }

    fn select(&mut self, idx: usize) {
        self.selected = idx;
        self.summary = reports::month_summary(&self.records, &self.months[idx]);
        self.offset = 0;
    }

    /// Returns true when the dashboard should close.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            // months[0] is the most recent, so Right moves toward it
            KeyCode::Right if self.selected > 0 => self.select(self.selected - 1),
            KeyCode::Left if self.selected + 1 < self.months.len() => {
                self.select(self.selected + 1)
            }
            KeyCode::Down => {
                if self.offset + self.visible_rows < self.summary.rows.len() {
                    self.offset += 1;
                }
            }
            KeyCode::Up => self.offset = self.offset.saturating_sub(1),
            _ => {}
        }
        false
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let border_style = Style::default().fg(Color::DarkGray);

        let [header_area, sep1, metrics_area, sep2, chart_area, table_area, footer_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(9),
                Constraint::Fill(1),
                Constraint::Length(1),
            ])
            .areas(area);

        let title = format!(
            " Expense Dashboard \u{2014} {}  ({} of {})   {}",
            self.summary.month,
            self.selected + 1,
            self.months.len(),
            self.source,
        );
        frame.render_widget(Paragraph::new(title).style(HEADER_STYLE), header_area);

        let sep_line = "\u{2501}".repeat(area.width as usize);
        let sep_widget = Paragraph::new(sep_line.as_str()).style(border_style);
        frame.render_widget(sep_widget.clone(), sep1);
        frame.render_widget(sep_widget, sep2);

        self.draw_metrics(frame, metrics_area);
        self.draw_chart(frame, chart_area);
        self.draw_table(frame, table_area);

        let hint = if self.months.len() > 1 {
            " \u{2190}/\u{2192} month  \u{2191}/\u{2193} scroll  q quit"
        } else {
            " \u{2191}/\u{2193} scroll  q quit"
        };
        frame.render_widget(Paragraph::new(hint).style(FOOTER_STYLE), footer_area);
    }

    fn draw_metrics(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let [c1, c2, c3] = Layout::horizontal([
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Percentage(34),
        ])
        .areas(area);

        let metric = |label: &str, value: String| {
            Paragraph::new(vec![
                Line::from(Span::styled(format!(" {label}"), SECTION_STYLE)),
                Line::from(Span::styled(format!(" {value}"), AMOUNT_STYLE)),
            ])
        };
        frame.render_widget(metric("Total Spent", money(self.summary.total)), c1);
        frame.render_widget(
            metric("Transactions", number(self.summary.count as i64)),
            c2,
        );
        frame.render_widget(metric("Average", money(self.summary.average)), c3);
    }

    fn draw_chart(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let bars: Vec<Bar> = self
            .summary
            .by_payment
            .iter()
            .map(|p| {
                Bar::default()
                    .value(p.total.max(0.0).round() as u64)
                    .text_value(money(p.total))
                    .label(Line::from(p.method.clone()))
                    .style(AMOUNT_STYLE)
            })
            .collect();

        let block = Block::default()
            .title("By Payment Method")
            .title_style(SECTION_STYLE);
        let chart = BarChart::default()
            .block(block)
            .data(BarGroup::default().bars(&bars))
            .bar_width(14)
            .bar_gap(2);
        frame.render_widget(chart, area);
    }

    fn draw_table(&mut self, frame: &mut Frame, area: ratatui::layout::Rect) {
        // block title + header row
        self.visible_rows = area.height.saturating_sub(2).max(1) as usize;

        let header = Row::new(vec![
            "Item",
            "Installment",
            "Amount",
            "Payment Method",
            "Due Date",
        ])
        .style(HEADER_ROW_STYLE);

        let rows: Vec<Row> = self
            .summary
            .rows
            .iter()
            .skip(self.offset)
            .take(self.visible_rows)
            .map(|r| {
                Row::new(vec![
                    Cell::from(r.item.clone()),
                    Cell::from(r.label()),
                    Cell::from(Span::styled(money(r.amount), AMOUNT_STYLE)),
                    Cell::from(r.payment_method.clone()),
                    Cell::from(r.due_date.format("%d/%m/%Y").to_string()),
                ])
            })
            .collect();

        let shown = self.summary.rows.len().min(self.offset + self.visible_rows);
        let title = if self.summary.rows.len() > self.visible_rows {
            format!(
                "Expense Detail ({}\u{2013}{} of {})",
                self.offset + 1,
                shown,
                self.summary.rows.len()
            )
        } else {
            format!("Expense Detail ({})", self.summary.rows.len())
        };

        let widths = [
            Constraint::Fill(2),
            Constraint::Length(11),
            Constraint::Length(15),
            Constraint::Fill(1),
            Constraint::Length(10),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().title(title).title_style(SECTION_STYLE));
        frame.render_widget(table, area);
    }
}

pub fn run(file: &str, due_day: Option<u32>) -> Result<()> {
    let records = load_installments(file, due_day)?;
    let months = reports::month_keys(&records);
    if months.is_empty() {
        println!("{}", "No valid expense rows found in the file.".yellow());
        return Ok(());
    }
    let mut dashboard = Dashboard::new(file.to_string(), records, months);

    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        hook(info);
    }));

    let mut terminal = ratatui::init();

    let result: Result<()> = loop {
        if let Err(e) = terminal.draw(|frame| dashboard.draw(frame)) {
            break Err(e.into());
        }

        match event::read() {
            Err(e) => break Err(e.into()),
            Ok(Event::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
                {
                    break Ok(());
                }
                if dashboard.handle_key(key.code) {
                    break Ok(());
                }
            }
            _ => {}
        }
    };

    drop(terminal);
    ratatui::restore();
    result
}
