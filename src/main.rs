//! reqterm - Actor-based terminal HTTP client
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async HTTP execution

use std::fs;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use reqterm::constants::{APP_NAME, APP_VERSION, LOG_FILE_NAME};
use reqterm::messages::ui_events::{key_to_ui_event, InputMode, Panel};
use reqterm::ui::{console_color, cursor_x, method_color, panel_border, render_annotated, render_input, status_color};
use reqterm::{
    AppActor, AppConfig, ClientConfig, NetworkActor, NetworkCommand, NetworkResponse, RenderState,
    RequestExecutor, RequestStore, ResponseFormatter, UiEvent,
};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    fs::create_dir_all(config.data_dir()).with_context(|| {
        format!("Failed to create data directory {}", config.data_dir().display())
    })?;

    // Initialize logging to file; the terminal belongs to the UI
    let file_appender = tracing_appender::rolling::never(config.data_dir(), LOG_FILE_NAME);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();
    tracing::info!(version = APP_VERSION, data_dir = %config.data_dir().display(), "Starting {}", APP_NAME);

    // A corrupt store is fatal, before the terminal is taken over
    let store = RequestStore::open(config.store_path())
        .with_context(|| format!("Failed to load saved requests from {}", config.store_path().display()))?;
    let executor = RequestExecutor::new(ClientConfig::default()).context("Failed to build HTTP client")?;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(executor, Arc::new(ResponseFormatter::default()), net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(Arc::new(store), net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Exiting");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.active_panel,
                    current_state.input_mode,
                    current_state.show_save_dialog,
                ) {
                    if matches!(event, UiEvent::Quit) {
                        let _ = ui_tx.send(event);
                        break;
                    }
                    let _ = ui_tx.send(event);
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }

        // Yield so the actors progress between frames
        tokio::task::yield_now().await;
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();
    let body_height = if state.method.has_body() { 5 } else { 0 };

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),           // Method + URL
            Constraint::Length(body_height), // Body (POST only)
            Constraint::Min(0),              // Response + saved list
            Constraint::Length(1),           // Console
            Constraint::Length(1),           // Key hints
        ])
        .split(area);

    draw_request_line(f, state, main_chunks[0]);
    if state.method.has_body() {
        draw_body_panel(f, state, main_chunks[1]);
    }

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(main_chunks[2]);
    draw_response(f, state, middle[0]);
    draw_saved_list(f, state, middle[1]);

    draw_console(f, state, main_chunks[3]);
    draw_status_bar(f, state, main_chunks[4]);

    if state.show_save_dialog {
        draw_save_dialog(f, state, area);
    }
}

fn draw_request_line(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(10), Constraint::Min(0)])
        .split(area);

    let method = Paragraph::new(Span::styled(
        state.method.as_str(),
        Style::default().fg(method_color(state.method)).bold(),
    ))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(panel_border(state.active_panel == Panel::Method, false))
            .title(" Method "),
    );
    f.render_widget(method, chunks[0]);

    let is_focused = state.active_panel == Panel::Url;
    let editing = is_focused && state.input_mode == InputMode::Editing;
    let loading = if state.is_loading { " [...]" } else { "" };
    let input = render_input(
        &state.url,
        format!(" URL{} ", loading),
        panel_border(is_focused, editing),
    );
    f.render_widget(input, chunks[1]);

    if editing {
        set_cursor(f, &state.url, state.cursor_position, chunks[1]);
    }
}

fn draw_body_panel(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Body;
    let editing = is_focused && state.input_mode == InputMode::Editing;

    let body = render_input(&state.body, String::from(" Body (JSON) "), panel_border(is_focused, editing))
        .wrap(Wrap { trim: false });
    f.render_widget(body, area);

    if editing {
        set_cursor(f, &state.body, state.cursor_position, area);
    }
}

fn set_cursor(f: &mut Frame, text: &str, byte_pos: usize, area: Rect) {
    f.set_cursor_position(Position::new(cursor_x(area, text, byte_pos), area.y + 1));
}

fn draw_response(f: &mut Frame, state: &RenderState, area: Rect) {
    let status_text = match &state.status {
        Some(status) => Span::styled(
            format!(" {} ", status),
            Style::default().fg(status_color(status)).bold(),
        ),
        None => Span::raw(" Response "),
    };

    let time_text = if state.time_ms > 0 {
        format!(" {}ms ", state.time_ms)
    } else {
        String::new()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(panel_border(state.active_panel == Panel::Response, false))
        .title(status_text)
        .title_bottom(Line::from(time_text).right_aligned());

    let response = Paragraph::new(render_annotated(&state.response))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.response_scroll, 0));
    f.render_widget(response, area);
}

fn draw_saved_list(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Saved;

    let items: Vec<ListItem> = state
        .saved_names
        .iter()
        .map(|name| ListItem::new(name.as_str()))
        .collect();

    let highlight_style = if is_focused {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(panel_border(is_focused, false))
                .title(format!(" Saved ({}) ", state.saved_names.len())),
        )
        .highlight_style(highlight_style)
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    if !state.saved_names.is_empty() {
        list_state.select(Some(state.selected_saved));
    }
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_console(f: &mut Frame, state: &RenderState, area: Rect) {
    let console = Paragraph::new(state.console.text.as_str())
        .style(Style::default().fg(console_color(state.console.level)));
    f.render_widget(console, area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.show_save_dialog {
        " Enter:save | Esc:cancel "
    } else if state.is_loading {
        " Loading... | C-x:cancel "
    } else if state.input_mode == InputMode::Editing {
        " ESC:stop editing | arrows:move | Enter:send | Tab:next field "
    } else {
        " Tab:panel | e:edit | m/C-t:method | s:send | C-s:save | C-a:saved | q:quit "
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_save_dialog(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(50, 20, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Save Request (Enter to save, Esc to cancel) ")
        .style(Style::default().bg(Color::Black));

    let input = Paragraph::new(state.save_name.as_str()).block(block);

    f.render_widget(Clear, popup_area);
    f.render_widget(input, popup_area);

    set_cursor(f, &state.save_name, state.save_name.len(), popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
