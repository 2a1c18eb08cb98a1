//! Ownership of the live controller for one carousel section.
//!
//! The section host holds a [`CarouselSlot`] instead of a global controller. Showing the
//! section builds a brand-new controller (back at index 0), hiding it drops the
//! controller, and at most one controller is live per slot.

use crate::carousel::controller::CarouselController;
use crate::carousel::scheduler::TransitionScheduler;
use crate::config::CarouselConfig;
use crate::error::{CarouselError, Result};
use log::debug;

#[derive(Debug)]
pub struct CarouselSlot<S: TransitionScheduler + Clone> {
    item_count: usize,
    config: CarouselConfig,
    scheduler: S,
    live: Option<CarouselController<S>>,
    generation: u64,
}

impl<S: TransitionScheduler + Clone> CarouselSlot<S> {
    /// Every controller built by this slot gets its own clone of `scheduler`.
    pub fn new(item_count: usize, config: CarouselConfig, scheduler: S) -> Result<Self> {
        if item_count == 0 {
            return Err(CarouselError::EmptyCarousel);
        }
        config.validate()?;

        Ok(Self {
            item_count,
            config,
            scheduler,
            live: None,
            generation: 0,
        })
    }

    /// Build a fresh controller, discarding the current one.
    pub fn activate(&mut self) -> Result<&mut CarouselController<S>> {
        let controller =
            CarouselController::new(self.item_count, self.config.clone(), self.scheduler.clone())?;
        if let Some(previous) = self.live.replace(controller) {
            debug!(
                "discarding carousel #{} at index {}",
                previous.instance(),
                previous.current_index()
            );
        }
        self.generation += 1;

        self.live
            .as_mut()
            .ok_or_else(|| CarouselError::other("carousel slot lost its controller"))
    }

    /// Rebuild the section from scratch, as when it is shown again.
    pub fn reload(&mut self) -> Result<&mut CarouselController<S>> {
        self.activate()
    }

    /// Drop the live controller. Returns whether one existed.
    pub fn deactivate(&mut self) -> bool {
        self.live.take().is_some()
    }

    pub fn is_active(&self) -> bool {
        self.live.is_some()
    }

    pub fn controller(&self) -> Option<&CarouselController<S>> {
        self.live.as_ref()
    }

    pub fn controller_mut(&mut self) -> Option<&mut CarouselController<S>> {
        self.live.as_mut()
    }

    /// Number of controllers built so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }
}
