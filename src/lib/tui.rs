use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::Constraint,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
};
use std::io;

use crate::lib::classifier::TargetType;
use crate::lib::consolidation::ConsolidationReport;

struct RecommendationRow {
    subnets: String,
    target: &'static str,
    replaces: String,
    ports: String,
    security_groups: String,
}

fn rows_for(report: &ConsolidationReport) -> Vec<RecommendationRow> {
    let mut rows = Vec::new();

    for recommendation in report.recommendations() {
        let subnets = recommendation.subnets().join(", ");
        for target in [TargetType::Alb, TargetType::Nlb, TargetType::Elb] {
            for clb in recommendation.lbs_of(target) {
                rows.push(RecommendationRow {
                    subnets: subnets.clone(),
                    target: target.as_str(),
                    replaces: clb.replaces().join(", "),
                    ports: clb.ports().join(", "),
                    security_groups: clb.security_groups().join(", "),
                });
            }
        }
    }

    rows
}

pub fn display_recommendations_table(report: &ConsolidationReport) -> io::Result<()> {
    let data = rows_for(report);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, data);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    data: Vec<RecommendationRow>,
) -> io::Result<()> {
    let mut state = TableState::default();
    state.select(Some(0));

    loop {
        terminal.draw(|f| {
            let area = f.area();

            // Create the table
            let header_cells = ["Subnets", "Type", "Replaces", "Ports", "Security Groups"]
                .iter()
                .map(|h| {
                    Cell::from(*h).style(
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )
                });
            let header = Row::new(header_cells)
                .style(Style::default().bg(Color::DarkGray))
                .height(1);

            let rows = data.iter().map(|item| {
                let cells = vec![
                    Cell::from(item.subnets.clone()),
                    Cell::from(item.target),
                    Cell::from(item.replaces.clone()),
                    Cell::from(item.ports.clone()),
                    Cell::from(item.security_groups.clone()),
                ];
                Row::new(cells).height(1)
            });

            let table = Table::new(
                rows,
                [
                    Constraint::Percentage(20),
                    Constraint::Percentage(8),
                    Constraint::Percentage(28),
                    Constraint::Percentage(16),
                    Constraint::Percentage(28),
                ],
            )
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Proposed Load Balancer Consolidation (Press 'q' to quit) "),
            )
            .row_highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol(">> ");

            f.render_stateful_widget(table, area, &mut state);
        })?;

        // Handle input
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Down | KeyCode::Char('j') => {
                        let i = match state.selected() {
                            Some(i) => {
                                if i >= data.len() - 1 {
                                    0
                                } else {
                                    i + 1
                                }
                            }
                            None => 0,
                        };
                        state.select(Some(i));
                    }
                    KeyCode::Up | KeyCode::Char('k') => {
                        let i = match state.selected() {
                            Some(i) => {
                                if i == 0 {
                                    data.len() - 1
                                } else {
                                    i - 1
                                }
                            }
                            None => 0,
                        };
                        state.select(Some(i));
                    }
                    _ => {}
                }
            }
        }
    }
}
