//! TUI dashboard using ratatui.

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use league_core::types::{Holdings, Leaderboard};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame, Terminal,
};
use rust_decimal::Decimal;
use std::io;
use std::time::Duration;
use tracing::debug;

/// Why the state callback is being asked for a new state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Regular redraw
    Poll,
    /// The user pressed 'r'
    Refresh,
}

/// Dashboard state.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub username: String,
    pub league: Option<String>,
    pub holdings: Holdings,
    /// Cache age / expiry of the holdings
    pub holdings_note: String,
    pub leaderboard: Leaderboard,
    pub schedule: Vec<String>,
    pub messages: Vec<String>,
}

/// TUI Dashboard.
pub struct Dashboard {
    refresh_ms: u64,
}

fn profit_color(value: Decimal) -> Color {
    if value >= Decimal::ZERO {
        Color::Green
    } else {
        Color::Red
    }
}

impl Dashboard {
    /// Create a new dashboard.
    pub fn new(refresh_ms: u64) -> Self {
        Self { refresh_ms }
    }

    /// Run the dashboard until 'q' or Esc.
    pub fn run<F>(&self, mut get_state: F) -> io::Result<()>
    where
        F: FnMut(Tick) -> DashboardState,
    {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.run_loop(&mut terminal, &mut get_state);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        res
    }

    fn run_loop<B, F>(&self, terminal: &mut Terminal<B>, get_state: &mut F) -> io::Result<()>
    where
        B: Backend,
        F: FnMut(Tick) -> DashboardState,
    {
        let mut tick = Tick::Poll;
        loop {
            let state = get_state(tick);
            terminal.draw(|f| self.ui(f, &state))?;
            tick = Tick::Poll;

            if event::poll(Duration::from_millis(self.refresh_ms))? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => {
                            debug!("Dashboard quit");
                            return Ok(());
                        }
                        KeyCode::Char('r') => tick = Tick::Refresh,
                        _ => {}
                    }
                }
            }
        }
    }

    fn ui(&self, frame: &mut Frame, state: &DashboardState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(4), // Totals
                Constraint::Min(8),    // Holdings
                Constraint::Length(10), // Standings
                Constraint::Length(7), // Messages
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0], state);
        self.render_totals(frame, chunks[1], state);
        self.render_holdings(frame, chunks[2], state);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[3]);
        self.render_leaderboard(frame, bottom[0], state);
        self.render_schedule(frame, bottom[1], state);

        self.render_messages(frame, chunks[4], state);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let league = state.league.as_deref().unwrap_or("no league selected");
        let header = Paragraph::new(vec![Line::from(vec![
            Span::styled(
                "Fantasy Stock League",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(&state.username, Style::default().fg(Color::Cyan)),
            Span::raw(" | "),
            Span::raw(league),
            Span::raw(" | 'r' refresh, 'q' quit"),
        ])])
        .block(Block::default().borders(Borders::ALL).title("League"));
        frame.render_widget(header, area);
    }

    fn render_totals(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let holdings = &state.holdings;
        let profit = holdings.total_all_time_profit();

        let totals = Paragraph::new(vec![
            Line::from(vec![
                Span::raw("Net worth: "),
                Span::styled(
                    format!("${:.2}", holdings.net_worth()),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  |  Cash: "),
                Span::raw(format!("${:.2}", holdings.current_balance)),
                Span::raw("  |  Stocks: "),
                Span::raw(format!("${:.2}", holdings.stock_value())),
                Span::raw("  |  All-time: "),
                Span::styled(
                    format!("${:.2}", profit),
                    Style::default().fg(profit_color(profit)),
                ),
            ]),
            Line::from(Span::styled(
                state.holdings_note.as_str(),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(Block::default().borders(Borders::ALL).title("Portfolio"));
        frame.render_widget(totals, area);
    }

    fn render_holdings(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let header_cells = ["Ticker", "Shares", "Avg", "Current", "Value", "Profit", "Profit %"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD)));
        let header = Row::new(header_cells).height(1);

        let rows = state.holdings.stocks.iter().map(|h| {
            let (profit, percent) = match (h.all_time_profit(), h.all_time_profit_percent()) {
                (Some(p), Some(pct)) => (format!("${:.2}", p), format!("{:.2}%", pct)),
                _ => ("n/a".to_string(), "n/a".to_string()),
            };
            let color = profit_color(h.all_time_profit().unwrap_or_default());

            Row::new(vec![
                Cell::from(h.ticker.clone()),
                Cell::from(h.shares.normalize().to_string()),
                Cell::from(format!("${:.2}", h.avg_price_per_share)),
                Cell::from(format!("${:.2}", h.current_price)),
                Cell::from(format!("${:.2}", h.market_value())),
                Cell::from(profit).style(Style::default().fg(color)),
                Cell::from(percent).style(Style::default().fg(color)),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(14),
                Constraint::Percentage(12),
                Constraint::Percentage(14),
                Constraint::Percentage(14),
                Constraint::Percentage(16),
                Constraint::Percentage(15),
                Constraint::Percentage(15),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("My Stocks"));

        frame.render_widget(table, area);
    }

    fn render_leaderboard(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let rows = state
            .leaderboard
            .leaderboard
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if entry.is_current_user {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from(format!("{}", i + 1)),
                    Cell::from(entry.username.clone()),
                    Cell::from(entry.record()),
                    Cell::from(format!("${:.2}", entry.net_worth)),
                ])
                .style(style)
            });

        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Percentage(40),
                Constraint::Length(7),
                Constraint::Percentage(40),
            ],
        )
        .block(Block::default().borders(Borders::ALL).title("Leaderboard"));
        frame.render_widget(table, area);
    }

    fn render_schedule(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let lines: Vec<Line> = state.schedule.iter().map(|l| Line::from(l.as_str())).collect();
        let paragraph =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Schedule"));
        frame.render_widget(paragraph, area);
    }

    fn render_messages(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let messages: Vec<Line> = state
            .messages
            .iter()
            .rev()
            .take(5)
            .map(|m| Line::from(m.as_str()))
            .collect();

        let paragraph =
            Paragraph::new(messages).block(Block::default().borders(Borders::ALL).title("Log"));
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use league_core::types::{Holding, LeaderboardEntry};
    use ratatui::backend::TestBackend;
    use rust_decimal_macros::dec;

    fn render(state: &DashboardState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let dashboard = Dashboard::new(250);
        terminal.draw(|f| dashboard.ui(f, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_renders_holdings_and_standings() {
        let state = DashboardState {
            username: "alice".to_string(),
            league: Some("Friday Traders".to_string()),
            holdings: Holdings {
                stocks: vec![Holding {
                    ticker: "AAA".to_string(),
                    name: "Alpha".to_string(),
                    shares: dec!(5),
                    avg_price_per_share: dec!(10),
                    current_price: dec!(12),
                    start_price: dec!(10),
                    daily_change: None,
                    daily_change_percent: None,
                }],
                current_balance: dec!(9950),
                total_stock_value: None,
                net_worth: None,
            },
            holdings_note: "cached 2m ago".to_string(),
            leaderboard: Leaderboard {
                leaderboard: vec![LeaderboardEntry {
                    username: "bob".to_string(),
                    wins: 2,
                    losses: 1,
                    net_worth: dec!(10500),
                    is_current_user: false,
                }],
            },
            schedule: vec!["Week 1: alice vs bob ✗ (Lost)".to_string()],
            messages: vec!["Bought 5 AAA".to_string()],
        };

        let screen = render(&state);
        assert!(screen.contains("Friday Traders"));
        assert!(screen.contains("AAA"));
        assert!(screen.contains("$10010.00"));
        assert!(screen.contains("20.00%"));
        assert!(screen.contains("bob"));
        assert!(screen.contains("2-1"));
        assert!(screen.contains("Bought 5 AAA"));
    }

    #[test]
    fn test_renders_empty_state() {
        let screen = render(&DashboardState::default());
        assert!(screen.contains("no league selected"));
        assert!(screen.contains("$0.00"));
    }
}
