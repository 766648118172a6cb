use chrono::Days;
use chrono::Local;
use chrono::NaiveDate;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::style::Style;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui_date_list::core::crossterm_input::input_event_from_crossterm;
use ratatui_date_list::core::theme::Theme;
use ratatui_date_list::dates::DateRange;
use ratatui_date_list::provider::EveryFourthDay;
use ratatui_date_list::view::DateList;
use ratatui_date_list::view::DateListAction;
use ratatui_date_list::view::DateListOptions;
use ratatui_date_list::view::HorizontalAlignment;
use std::io;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

type Provider = EveryFourthDay;

fn main() -> io::Result<()> {
    // Logs go to stderr; redirect it (`2>log`) or the alternate screen gets scribbled on.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    let today = Local::now().date_naive();
    let start = today.checked_sub_days(Days::new(365)).unwrap_or(today);
    let range = DateRange::until_today(start).map_err(io::Error::other)?;

    let mut list = DateList::with_provider(range, Provider::new(), |date, data, selected| {
        let mut spans = vec![Span::raw(date.format("%a %Y-%m-%d").to_string())];
        if let Some(tag) = data {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(tag.clone(), Style::default().dim()));
        }
        if selected {
            spans.push(Span::raw("  ✓"));
        }
        Line::from(spans)
    })
    // Only days with an annotation can be picked.
    .with_should_select(|_, data| data.is_some())
    .with_options(DateListOptions {
        alignment: HorizontalAlignment::Leading,
        ..Default::default()
    });

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal, &mut list);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    res
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    list: &mut DateList<Provider>,
) -> io::Result<()> {
    let theme = Theme::default();
    let mut selected: Option<NaiveDate> = None;
    let mut status = String::new();

    loop {
        terminal.draw(|f| {
            let area = f.area();
            let [main, status_area] = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .areas(area);

            let block = Block::default()
                .title("DateList (q to quit)")
                .borders(Borders::ALL);
            let inner = block.inner(main);
            f.render_widget(block, main);

            let buf = f.buffer_mut();
            list.render(inner, buf, &theme, selected);

            let help = list
                .options()
                .bindings
                .help()
                .iter()
                .map(|b| b.help_text())
                .collect::<Vec<_>>()
                .join(" • ");
            let picked = selected.map_or_else(|| "none".to_string(), |d| d.to_string());
            let pct = list.viewport().percent_y().unwrap_or(100);
            let line = format!("selected={picked}  {pct}%  {status}  {help}");
            buf.set_span(
                status_area.x,
                status_area.y,
                &Span::styled(line, theme.text_muted),
                status_area.width,
            );
        })?;

        if !crossterm::event::poll(Duration::from_millis(50))? {
            continue;
        }
        let ev = crossterm::event::read()?;
        if let Event::Key(key) = &ev {
            if matches!(key.code, KeyCode::Char('q')) {
                return Ok(());
            }
        }

        let Some(ev) = input_event_from_crossterm(ev) else {
            continue;
        };
        let action = list.handle_event(ev, selected);
        status = match action {
            DateListAction::SelectionRejected(date) => format!("{date} has no tag"),
            DateListAction::SelectionChanged(_) | DateListAction::Redraw | DateListAction::None => {
                String::new()
            }
        };
        action.apply(&mut selected);
    }
}
