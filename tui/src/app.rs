use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use unicode_width::UnicodeWidthStr;

use lectern_core::{Generated, Generator, PipelineEvent, PipelinePhase};

pub struct App {
    running: bool,
    input: String,
    /// A request is in flight; input is ignored until it terminates.
    busy: bool,
    phase: PipelinePhase,
    messages: Vec<String>,
    generator: Arc<Generator>,
    events: UnboundedReceiver<PipelineEvent>,
}

pub async fn run_interactive(
    generator: Arc<Generator>,
    events: UnboundedReceiver<PipelineEvent>,
) -> Result<()> {
    App::new(generator, events).run().await
}

impl App {
    pub fn new(generator: Arc<Generator>, events: UnboundedReceiver<PipelineEvent>) -> Self {
        Self {
            running: true,
            input: String::new(),
            busy: false,
            phase: PipelinePhase::Idle,
            messages: vec!["Type a lesson topic and press Enter to generate a deck.".to_string()],
            generator,
            events,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        while self.running {
            terminal.draw(|f| self.draw(f))?;

            tokio::select! {
                maybe_event = self.events.recv() => {
                    if let Some(event) = maybe_event {
                        self.handle_pipeline_event(event);
                    }
                }
                key_ready = tokio::task::spawn_blocking(|| {
                    event::poll(std::time::Duration::from_millis(100))
                }) => {
                    if let Ok(Ok(true)) = key_ready {
                        if let Ok(Event::Key(key)) = event::read() {
                            self.handle_key(key.code, key.modifiers);
                        }
                    }
                }
            }
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Char('q') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Char(c) if !self.busy => self.input.push(c),
            KeyCode::Backspace if !self.busy => {
                self.input.pop();
            }
            _ => {}
        }
    }

    fn submit(&mut self) {
        if self.busy {
            return;
        }
        let topic = self.input.trim().to_string();
        if topic.is_empty() {
            self.messages.push("Please enter a lesson topic.".to_string());
            return;
        }

        self.messages.push(format!("Generating a deck for: {topic}"));
        self.input.clear();
        self.busy = true;
        self.phase = PipelinePhase::Idle;

        let generator = self.generator.clone();
        tokio::spawn(async move {
            // Outcomes arrive over the event channel.
            let _ = generator.generate(&topic).await;
        });
    }

    fn handle_pipeline_event(&mut self, event: PipelineEvent) {
        match event {
            PipelineEvent::Phase(phase) => {
                self.phase = phase;
            }
            PipelineEvent::SlidesSkipped(count) => {
                self.messages
                    .push(format!("Note: {count} outline block(s) could not be used."));
            }
            PipelineEvent::Finished(generated) => {
                self.push_success(&generated);
                self.busy = false;
            }
            PipelineEvent::Failed(message) => {
                self.messages.push(format!("Error: {message}"));
                self.busy = false;
            }
        }
    }

    fn push_success(&mut self, generated: &Generated) {
        let Generated {
            link, slide_count, ..
        } = generated;
        self.messages.push(format!(
            "Your presentation is ready ({slide_count} slides). Download it here:"
        ));
        self.messages.push(format!("  {}", link.url));
        self.messages.push(format!(
            "The link expires at {}.",
            link.expires_at.format("%Y-%m-%d %H:%M UTC")
        ));
    }

    fn draw(&self, f: &mut Frame) {
        let size = f.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(size);

        let log = Paragraph::new(self.messages.join("\n"))
            .block(Block::default().title("Lectern").borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        f.render_widget(log, chunks[0]);

        let title = if self.busy {
            format!("Working: {}", self.phase.label())
        } else {
            "Lesson topic (Enter to generate, Ctrl+Q to quit)".to_string()
        };
        let input = Paragraph::new(self.input.as_str())
            .block(Block::default().title(title).borders(Borders::ALL));
        f.render_widget(input, chunks[1]);

        if !self.busy {
            let cursor_x = chunks[1].x + 1 + self.input.as_str().width() as u16;
            f.set_cursor_position((cursor_x, chunks[1].y + 1));
        }
    }
}
