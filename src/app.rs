//! Application orchestration layer
//!
//! Wires the input thread, the carousel slot, transition timers and the renderer into one
//! async loop. Navigation state lives in the controller; this layer only routes events.

pub mod runtime;

use crate::carousel::{CarouselSlot, ChannelScheduler, Clock, TransitionTicket};
use crate::config::CarouselConfig;
use crate::error::{CarouselError, Result};
use crate::input::InputAction;
use crate::render::ui::{UIRenderer, ViewState};
use crate::render::RenderLoopState;
use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(20);
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Application orchestrator - coordinates components without duplicating their state
pub struct Application {
    slot: CarouselSlot<ChannelScheduler>,
    ticket_rx: Option<UnboundedReceiver<TransitionTicket>>,
    ui_renderer: Box<dyn UIRenderer>,
    view_state: ViewState,
    render_state: RenderLoopState,
    clock: Clock,
}

impl Application {
    /// One carousel item per title.
    pub fn new(
        titles: Vec<String>,
        config: CarouselConfig,
        ui_renderer: Box<dyn UIRenderer>,
    ) -> Result<Self> {
        let clock = Clock::new();
        let (scheduler, ticket_rx) = ChannelScheduler::new(clock);
        let slot = CarouselSlot::new(titles.len(), config, scheduler)?;

        Ok(Self {
            slot,
            ticket_rx: Some(ticket_rx),
            ui_renderer,
            view_state: ViewState::new(titles, 0, 0),
            render_state: RenderLoopState::new(),
            clock,
        })
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    pub fn slot(&self) -> &CarouselSlot<ChannelScheduler> {
        &self.slot
    }

    /// Show the carousel section with a freshly built controller.
    pub fn activate(&mut self) -> Result<()> {
        let controller = self.slot.activate()?;
        self.view_state.reset(controller.display_state());
        self.render_state.request_redraw();
        Ok(())
    }

    /// Run the application until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        self.ui_renderer.initialize()?;
        let result = self.event_loop().await;
        self.slot.deactivate();
        self.ui_renderer.cleanup()?;
        result
    }

    async fn event_loop(&mut self) -> Result<()> {
        let (width, height) = self.ui_renderer.get_terminal_size()?;
        self.view_state.update_terminal_size(width, height);
        self.activate()?;
        self.present()?;

        let mut ticket_rx = self
            .ticket_rx
            .take()
            .ok_or_else(|| CarouselError::other("transition channel already in use"))?;
        let (input_tx, mut input_rx) = mpsc::unbounded_channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let input_thread = runtime::spawn_input_thread(
            input_tx,
            Arc::clone(&shutdown),
            INPUT_POLL_INTERVAL,
            self.clock,
        );
        let mut frames = tokio::time::interval(FRAME_INTERVAL);

        info!("carousel running with {} items", self.slot.item_count());
        let outcome = loop {
            tokio::select! {
                maybe_action = input_rx.recv() => {
                    let Some(action) = maybe_action else {
                        warn!("input thread stopped");
                        break Ok(());
                    };
                    match self.handle_action(action) {
                        Ok(true) => {}
                        Ok(false) => break Ok(()),
                        Err(err) => break Err(err),
                    }
                }
                Some(ticket) = ticket_rx.recv() => {
                    self.handle_ticket(ticket);
                }
                _ = frames.tick() => {
                    let now = self.clock.now();
                    self.render_state.tick(&mut self.view_state, now);
                }
            }

            if let Err(err) = self.present() {
                break Err(err);
            }
        };

        shutdown.store(true, Ordering::SeqCst);
        let _ = tokio::task::spawn_blocking(move || input_thread.join()).await;
        self.ticket_rx = Some(ticket_rx);
        outcome
    }

    /// Route one input action. Returns false if the application should quit.
    pub fn handle_action(&mut self, action: InputAction) -> Result<bool> {
        let now = self.clock.now();
        self.render_state
            .process_action(action, &mut self.slot, &mut self.view_state, now)
    }

    pub fn handle_ticket(&mut self, ticket: TransitionTicket) -> bool {
        self.render_state
            .finish_transition(ticket, &mut self.slot, &mut self.view_state)
    }

    /// Render if anything changed since the last frame.
    pub fn present(&mut self) -> Result<()> {
        if self.render_state.take_redraw() {
            let now = self.clock.now();
            self.ui_renderer.render(&self.view_state, now)?;
        }
        Ok(())
    }

    /// Wait for the next transition ticket. Used when driving the application without a terminal.
    pub async fn next_ticket(&mut self) -> Option<TransitionTicket> {
        match self.ticket_rx.as_mut() {
            Some(rx) => rx.recv().await,
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::render::ui::MockUIRenderer;

    fn titles(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("Card {i}")).collect()
    }

    fn fast_config() -> CarouselConfig {
        CarouselConfig::builder()
            .transition_duration_ms(5)
            .min_command_interval_ms(0)
            .build()
            .unwrap()
    }

    fn right() -> InputAction {
        InputAction::Key {
            key: Key::ArrowRight,
            timestamp: 0,
        }
    }

    #[test]
    fn rejects_empty_title_list() {
        let result = Application::new(
            Vec::new(),
            CarouselConfig::default(),
            Box::new(MockUIRenderer::new()),
        );
        assert!(matches!(result, Err(CarouselError::EmptyCarousel)));
    }

    #[tokio::test]
    async fn key_navigation_unlocks_after_ticket() {
        let mut app =
            Application::new(titles(3), fast_config(), Box::new(MockUIRenderer::new())).unwrap();
        app.activate().unwrap();

        assert!(app.handle_action(right()).unwrap());
        assert_eq!(app.view_state().display.active_index, 1);
        assert!(app.view_state().transitioning);

        let ticket = tokio::time::timeout(Duration::from_secs(2), app.next_ticket())
            .await
            .expect("transition ticket should arrive")
            .unwrap();
        assert!(app.handle_ticket(ticket));
        assert!(!app.view_state().transitioning);
        assert!(!app.slot().controller().unwrap().is_animating());
    }

    #[tokio::test]
    async fn reload_ignores_tickets_from_previous_controller() {
        let mut app =
            Application::new(titles(3), fast_config(), Box::new(MockUIRenderer::new())).unwrap();
        app.activate().unwrap();
        app.handle_action(right()).unwrap();

        app.handle_action(InputAction::Reload).unwrap();
        assert_eq!(app.view_state().display.active_index, 0);

        let stale = tokio::time::timeout(Duration::from_secs(2), app.next_ticket())
            .await
            .expect("ticket from the discarded controller still fires")
            .unwrap();
        assert!(!app.handle_ticket(stale));
        assert_eq!(app.slot().generation(), 2);
    }

    #[tokio::test]
    async fn quit_action_stops() {
        let mut app =
            Application::new(titles(2), fast_config(), Box::new(MockUIRenderer::new())).unwrap();
        app.activate().unwrap();
        assert!(!app.handle_action(InputAction::Quit).unwrap());
    }

    #[tokio::test]
    async fn present_renders_only_when_dirty() {
        let mut app =
            Application::new(titles(2), fast_config(), Box::new(MockUIRenderer::new())).unwrap();
        app.activate().unwrap();
        app.present().unwrap();
        assert!(!app.render_state.take_redraw());

        app.handle_action(right()).unwrap();
        assert!(app.render_state.take_redraw());
    }
}
