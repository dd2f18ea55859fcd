//! Python Library Showcase - Terminal User Interface
//!
//! Five slides, each with an interactive mock of a Python library.
//! App logic lives in `pyshowcase::tui::app`.

#![forbid(unsafe_code)]

#[cfg(feature = "tui")]
fn main() -> std::process::ExitCode {
    use clap::Parser;
    use pyshowcase::cli::{init_logging, Args};
    use pyshowcase::tui::ShowcaseApp;
    use pyshowcase::ShowcaseResult;

    fn start(args: &Args) -> ShowcaseResult<()> {
        let config = args.resolve()?;
        init_logging(&config.logging)?;
        let app = ShowcaseApp::from_config(&config)?;
        tui::run(app, config.frame_interval())?;
        Ok(())
    }

    match start(&Args::parse()) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("showcase_tui: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "tui"))]
fn main() {
    eprintln!("TUI feature not enabled. Run with --features tui");
    std::process::exit(1);
}

#[cfg(feature = "tui")]
mod tui {
    use crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use pyshowcase::demos::chart::python_listing;
    use pyshowcase::demos::numeric_array::format_matrix;
    use pyshowcase::demos::web_admin::{Page, Record};
    use pyshowcase::demos::{
        ArrayScene, ArrayState, ChartScene, ChartState, ChartType, DataFrameScene,
        DataFrameState, DemoKind, FilterMode, Operation, TrainingPhase, TrainingRun,
        TrainingState, WebAdminScene, WebAdminState,
    };
    use pyshowcase::presentation::ActiveScene;
    use pyshowcase::tui::{PanelTab, ShowcaseApp};
    use ratatui::{
        backend::{Backend, CrosstermBackend},
        layout::{Constraint, Direction, Layout, Rect},
        style::{Color, Modifier, Style},
        symbols,
        text::{Line, Span},
        widgets::{
            Axis, BarChart, Block, Borders, Cell, Chart, Dataset, Gauge, GraphType,
            LegendPosition, Paragraph, Row, Sparkline, Table, Tabs, Wrap,
        },
        Frame, Terminal,
    };
    use std::io;
    use std::time::{Duration, Instant};

    /// Run the TUI application, redrawing every `frame`.
    pub fn run(mut app: ShowcaseApp, frame: Duration) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = event_loop(&mut terminal, &mut app, frame);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop<B: Backend>(
        terminal: &mut Terminal<B>,
        app: &mut ShowcaseApp,
        frame: Duration,
    ) -> io::Result<()> {
        let mut last_update = Instant::now();

        loop {
            let start = Instant::now();
            terminal.draw(|f| ui(f, app))?;

            let timeout = frame.saturating_sub(start.elapsed());
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        app.handle_key(key.code);
                    }
                }
            }

            if app.should_quit {
                return Ok(());
            }

            let now = Instant::now();
            app.update(now.duration_since(last_update));
            last_update = now;
        }
    }

    fn ui(f: &mut Frame, app: &ShowcaseApp) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(12),
                Constraint::Length(3),
            ])
            .split(f.area());

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[1]);

        render_title(f, chunks[0], app);
        render_slide(f, body[0], app);
        render_panel(f, body[1], app);
        render_status(f, chunks[2], app);
    }

    fn render_title(f: &mut Frame, area: Rect, app: &ShowcaseApp) {
        let p = &app.presentation;
        let title = Paragraph::new(vec![Line::from(vec![
            Span::styled(
                " PYTHON LIBRARY SHOWCASE ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(
                p.active_kind().library(),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(" | "),
            Span::styled(
                format!("{} / {}", p.current_index() + 1, p.total_slides()),
                Style::default().fg(Color::White),
            ),
        ])])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Keys: [←/→] Slide  [1-5] Jump  [Tab] Panel  [R] Reset  [Q] Quit"),
        );
        f.render_widget(title, area);
    }

    fn render_slide(f: &mut Frame, area: Rect, app: &ShowcaseApp) {
        let slide = app.presentation.current_slide();
        let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

        let mut lines = vec![
            Line::from(Span::styled(slide.title.clone(), heading)),
            Line::from(Span::styled(
                slide.subtitle.clone(),
                Style::default().fg(Color::Gray),
            )),
            Line::default(),
            Line::from(slide.description.clone()),
            Line::default(),
        ];
        lines.extend(slide.points.iter().map(|point| {
            Line::from(vec![
                Span::styled(" • ", Style::default().fg(Color::Yellow)),
                Span::raw(point.clone()),
            ])
        }));
        if !slide.demo_description.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                slide.demo_description.clone(),
                Style::default().add_modifier(Modifier::ITALIC),
            )));
        }
        if !slide.code_example.is_empty() {
            lines.push(Line::default());
            lines.extend(code_lines(&slide.code_example));
        }

        let nav = match (app.presentation.is_first(), app.presentation.is_last()) {
            (true, _) => "Next →",
            (_, true) => "← Previous",
            _ => "← Previous | Next →",
        };

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(nav));
        f.render_widget(paragraph, area);
    }

    fn code_lines(code: &str) -> Vec<Line<'static>> {
        code.lines()
            .map(|line| Line::from(Span::styled(line.to_string(), Style::default().fg(Color::Green))))
            .collect()
    }

    fn render_panel(f: &mut Frame, area: Rect, app: &ShowcaseApp) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(5)])
            .split(area);

        let tabs = Tabs::new(PanelTab::ALL.iter().map(|tab| tab.title()))
            .select(app.tab.index())
            .block(Block::default().borders(Borders::ALL).title("Demo"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(tabs, chunks[0]);

        match app.tab {
            PanelTab::Controls => render_controls(f, chunks[1], app),
            PanelTab::Demo => render_demo(f, chunks[1], app),
            PanelTab::Code => render_code(f, chunks[1], app),
        }
    }

    fn render_controls(f: &mut Frame, area: Rect, app: &ShowcaseApp) {
        let controls = app.presentation.controls();
        let lines: Vec<Line> = app
            .panel
            .rows(&controls)
            .into_iter()
            .map(|row| {
                let marker = if row.selected { "> " } else { "  " };
                let label_style = if row.selected {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                let state_color = if row.highlighted {
                    Color::Green
                } else {
                    Color::Gray
                };
                Line::from(vec![
                    Span::raw(marker),
                    Span::styled(row.label, label_style),
                    Span::raw(": "),
                    Span::styled(row.state, Style::default().fg(state_color)),
                ])
            })
            .collect();

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("[↑/↓] Select  [Space] Toggle  [+/-] Adjust"),
        );
        f.render_widget(paragraph, area);
    }

    fn render_demo(f: &mut Frame, area: Rect, app: &ShowcaseApp) {
        match app.presentation.scene() {
            ActiveScene::NumericArray {
                state,
                scene: Some(scene),
            } => render_arrays(f, area, state, scene),
            ActiveScene::DataFrame {
                state,
                scene: Some(scene),
            } => render_dataframe(f, area, state, scene),
            ActiveScene::Chart {
                state,
                scene: Some(scene),
            } => render_chart(f, area, state, scene),
            ActiveScene::WebAdmin {
                state,
                scene: Some(scene),
            } => render_web_admin(f, area, state, scene),
            ActiveScene::Training {
                state,
                run: Some(run),
            } => render_training(f, area, state, run),
            idle => render_idle(f, area, idle.kind()),
        }
    }

    fn render_idle(f: &mut Frame, area: Rect, kind: DemoKind) {
        let text = Paragraph::new(vec![
            Line::default(),
            Line::from(Span::styled(
                format!("{kind} demo is stopped."),
                Style::default().fg(Color::Gray),
            )),
            Line::from("Switch it on from the Controls tab to run it."),
        ])
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(text, area);
    }

    const fn operation_symbol(operation: Operation) -> &'static str {
        match operation {
            Operation::Addition => "+",
            Operation::Multiplication => "*",
        }
    }

    fn render_arrays(f: &mut Frame, area: Rect, state: &ArrayState, scene: &ArrayScene) {
        let label = Style::default().fg(Color::Cyan);
        let mut lines = vec![Line::from(Span::styled("A =", label))];
        lines.extend(format_matrix(&scene.lhs).lines().map(|l| Line::from(l.to_string())));
        lines.push(Line::from(Span::styled("B =", label)));
        lines.extend(format_matrix(&scene.rhs).lines().map(|l| Line::from(l.to_string())));
        lines.push(Line::from(Span::styled(
            format!("A {} B =", operation_symbol(scene.operation)),
            label,
        )));
        lines.extend(
            format_matrix(&scene.result)
                .lines()
                .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Yellow)))),
        );

        if state.show_performance {
            let speedup = if scene.vectorized_ms > 0.0 {
                scene.interpreted_ms / scene.vectorized_ms
            } else {
                0.0
            };
            lines.push(Line::default());
            lines.push(Line::from(vec![
                Span::raw(format!("Python loops: {:.1} ms  ", scene.interpreted_ms)),
                Span::raw(format!("NumPy: {:.1} ms  ", scene.vectorized_ms)),
                Span::styled(
                    format!("({speedup:.0}x faster)"),
                    Style::default().fg(Color::Green),
                ),
            ]));
        }

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("np.{}", scene.operation.name())),
        );
        f.render_widget(paragraph, area);
    }

    fn render_dataframe(f: &mut Frame, area: Rect, state: &DataFrameState, scene: &DataFrameScene) {
        let constraints = if state.show_charts {
            [Constraint::Percentage(60), Constraint::Percentage(40)]
        } else {
            [Constraint::Percentage(100), Constraint::Length(0)]
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let filter = match state.filter {
            FilterMode::Value => "all rows",
            FilterMode::ColumnB => "B in ['A', 'B']",
        };
        let rows = scene.filtered.iter().map(|row| {
            Row::new(vec![
                Cell::from(row.id.to_string()),
                Cell::from(row.column_a.to_string()),
                Cell::from(row.column_b.to_string()),
                Cell::from(row.column_c.to_string()),
            ])
        });
        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Length(6),
                Constraint::Length(6),
                Constraint::Length(7),
            ],
        )
        .header(
            Row::new(vec!["id", "A", "B", "C"])
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title(format!(
            "df ({filter}): {} of {} rows",
            scene.filtered.len(),
            scene.rows.len()
        )));
        f.render_widget(table, chunks[0]);

        if state.show_charts {
            let labels: Vec<String> = scene
                .category_counts
                .iter()
                .map(|(category, _)| category.to_string())
                .collect();
            let data: Vec<(&str, u64)> = labels
                .iter()
                .zip(&scene.category_counts)
                .map(|(label, (_, count))| (label.as_str(), *count as u64))
                .collect();
            let bars = BarChart::default()
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("value_counts('B')"),
                )
                .data(data.as_slice())
                .bar_width(3)
                .bar_style(Style::default().fg(Color::Yellow));
            f.render_widget(bars, chunks[1]);
        }
    }

    fn render_chart(f: &mut Frame, area: Rect, state: &ChartState, scene: &ChartScene) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let sin = scene.sin_series();
        let cos = scene.cos_series();
        let graph_type = match scene.chart_type {
            ChartType::Line => GraphType::Line,
            ChartType::Bar => GraphType::Bar,
        };
        let datasets = vec![
            Dataset::default()
                .name("sin(x)")
                .marker(symbols::Marker::Braille)
                .graph_type(graph_type)
                .style(Style::default().fg(Color::Blue))
                .data(&sin),
            Dataset::default()
                .name("cos(x)")
                .marker(symbols::Marker::Braille)
                .graph_type(graph_type)
                .style(Style::default().fg(Color::Red))
                .data(&cos),
        ];

        let x_max = sin.last().map_or(1.0, |(x, _)| *x);
        let mut x_axis = Axis::default().title("X").bounds([0.0, x_max]);
        let mut y_axis = Axis::default().title("Y").bounds([-5.5, 5.5]);
        if state.show_grid {
            x_axis = x_axis.labels(vec!["0".to_string(), format!("{x_max:.0}")]);
            y_axis = y_axis.labels(vec!["-5", "0", "5"]);
        }

        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Trigonometric Functions"),
            )
            .x_axis(x_axis)
            .y_axis(y_axis)
            .legend_position(state.show_legend.then_some(LegendPosition::TopRight));
        f.render_widget(chart, chunks[0]);

        let listing = Paragraph::new(code_lines(&python_listing(state)))
            .block(Block::default().borders(Borders::ALL).title("plot.py"));
        f.render_widget(listing, chunks[1]);
    }

    fn record_header(record: &Record) -> Line<'static> {
        Line::from(vec![
            Span::styled(
                record.title.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  by {} on {}", record.author, record.created),
                Style::default().fg(Color::Gray),
            ),
        ])
    }

    fn render_web_admin(f: &mut Frame, area: Rect, state: &WebAdminState, scene: &WebAdminScene) {
        match scene.page(state) {
            Page::Admin(records) => {
                let rows = records.iter().map(|r| {
                    Row::new(vec![
                        r.id.to_string(),
                        r.title.clone(),
                        r.author.clone(),
                        r.created.to_string(),
                    ])
                });
                let table = Table::new(
                    rows,
                    [
                        Constraint::Length(4),
                        Constraint::Min(10),
                        Constraint::Length(8),
                        Constraint::Length(11),
                    ],
                )
                .header(
                    Row::new(vec!["ID", "Title", "Author", "Created"])
                        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                )
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Django administration: Articles"),
                );
                f.render_widget(table, area);
            }
            Page::List(records) => {
                let mut lines = Vec::with_capacity(records.len() * 3);
                for record in records {
                    lines.push(record_header(record));
                    lines.push(Line::from(record.excerpt()));
                    lines.push(Line::default());
                }
                let paragraph = Paragraph::new(lines)
                    .wrap(Wrap { trim: true })
                    .block(Block::default().borders(Borders::ALL).title("/articles/"));
                f.render_widget(paragraph, area);
            }
            Page::Detail(record) => {
                let (title, lines) = match record {
                    Some(record) => (
                        format!("/articles/{}/", record.id),
                        vec![
                            record_header(record),
                            Line::default(),
                            Line::from(record.content.clone()),
                        ],
                    ),
                    None => (
                        "/articles/".to_string(),
                        vec![Line::from("No articles yet.")],
                    ),
                };
                let paragraph = Paragraph::new(lines)
                    .wrap(Wrap { trim: true })
                    .block(Block::default().borders(Borders::ALL).title(title));
                f.render_widget(paragraph, area);
            }
        }
    }

    fn render_training(f: &mut Frame, area: Rect, state: &TrainingState, run: &TrainingRun) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Min(3),
            ])
            .split(area);

        let (phase, color) = match run.phase() {
            TrainingPhase::Running => ("Training", Color::Yellow),
            TrainingPhase::Finished => ("Done", Color::Green),
            TrainingPhase::Cancelled => ("Cancelled", Color::Red),
        };
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(phase))
            .gauge_style(Style::default().fg(color))
            .ratio(run.progress().clamp(0.0, 1.0))
            .label(format!("Epoch {}/{}", run.epoch(), run.total_epochs()));
        f.render_widget(gauge, chunks[0]);

        let metrics = Paragraph::new(vec![
            Line::from(vec![
                Span::raw("Accuracy: "),
                Span::styled(
                    run.accuracy()
                        .map_or_else(|| "-".to_string(), |a| format!("{:.1}%", a * 100.0)),
                    Style::default().fg(Color::Green),
                ),
            ]),
            Line::from(vec![
                Span::raw("Loss: "),
                Span::styled(
                    run.loss().map_or_else(|| "-".to_string(), |l| format!("{l:.4}")),
                    Style::default().fg(Color::Red),
                ),
            ]),
        ])
        .block(Block::default().borders(Borders::ALL).title("model.fit()"));
        f.render_widget(metrics, chunks[1]);

        let bottom = if state.show_loss {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(chunks[2])
        } else {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(100), Constraint::Length(0)])
                .split(chunks[2])
        };

        let layers: Vec<Line> = run.layers().iter().map(|l| Line::from(l.clone())).collect();
        let summary = Paragraph::new(layers)
            .block(Block::default().borders(Borders::ALL).title("model.summary()"));
        f.render_widget(summary, bottom[0]);

        if state.show_loss {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let data: Vec<u64> = run
                .history()
                .iter()
                .map(|m| (m.loss * 1000.0).round() as u64)
                .collect();
            let sparkline = Sparkline::default()
                .block(Block::default().borders(Borders::ALL).title("Loss"))
                .data(&data)
                .style(Style::default().fg(Color::Red));
            f.render_widget(sparkline, bottom[1]);
        }
    }

    fn render_code(f: &mut Frame, area: Rect, app: &ShowcaseApp) {
        let snippets = app.snippets();
        let (title, lines) = match snippets.get(app.snippet) {
            Some(snippet) => (
                format!(
                    "[{}/{}] {} ({})  [↑/↓] Next",
                    app.snippet + 1,
                    snippets.len(),
                    snippet.name,
                    snippet.language
                ),
                code_lines(&snippet.code),
            ),
            None => ("Code".to_string(), vec![Line::from("No code listings.")]),
        };
        let paragraph =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, app: &ShowcaseApp) {
        let scene = app.presentation.scene();
        let (running, color) = if scene.is_idle() {
            ("[STOPPED]", Color::Yellow)
        } else {
            ("[RUNNING]", Color::Green)
        };
        let status = Paragraph::new(vec![Line::from(vec![
            Span::styled(running, Style::default().fg(color)),
            Span::raw(" | "),
            Span::styled("Frame: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", app.frame_count),
                Style::default().fg(Color::White),
            ),
            Span::raw(" | "),
            Span::styled("Panel: ", Style::default().fg(Color::Gray)),
            Span::styled(app.tab.title(), Style::default().fg(Color::Cyan)),
        ])])
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(status, area);
    }

}
