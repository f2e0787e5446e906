//! Effect lifecycle: mounting, frame scheduling and teardown.

use std::time::{Duration, Instant};

use glyphrain_core::{AnimationSpeed, Theme, Viewport};
use rand::Rng;

use crate::{
    rain::{RainSettings, RainState},
    surface::Surface,
    ticker::Ticker,
};

/// The rain effect before it is mounted.
///
/// Holds the settings and random source that outlive individual mounts.
/// Drawing only happens through the [`Mounted`] guard.
#[derive(Debug)]
pub struct RainEffect<R> {
    settings: RainSettings,
    speed: AnimationSpeed,
    rng: R,
    frames: u64,
    mounted: bool,
}

impl<R: Rng> RainEffect<R> {
    pub fn new(settings: RainSettings, speed: AnimationSpeed, rng: R) -> Self {
        Self {
            settings,
            speed,
            rng,
            frames: 0,
            mounted: false,
        }
    }

    pub fn settings(&self) -> &RainSettings {
        &self.settings
    }

    /// Frames drawn over the lifetime of this effect.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Attach the effect to a surface and start its frame timer.
    ///
    /// With no surface the guard is inert: it never draws and reports no
    /// pending frames.
    pub fn mount<S: Surface>(&mut self, surface: Option<S>, now: Instant) -> Mounted<'_, S, R> {
        let active = match surface {
            Some(mut surface) => {
                surface.set_layer_opacity(self.settings.layer_opacity);
                let viewport = surface.viewport();
                let rain = RainState::new(viewport, self.settings.cell_size);
                let mut ticker = Ticker::new(self.speed.frame_interval());
                ticker.start(now);
                tracing::info!(
                    width = viewport.width,
                    height = viewport.height,
                    columns = rain.columns(),
                    speed = self.speed.name(),
                    "rain effect mounted"
                );
                self.mounted = true;
                Some(Active {
                    surface,
                    rain,
                    ticker,
                })
            }
            None => {
                tracing::debug!("no drawing surface available, rain effect disabled");
                None
            }
        };

        Mounted {
            effect: self,
            active,
        }
    }
}

/// Resources held while mounted.
#[derive(Debug)]
struct Active<S> {
    surface: S,
    rain: RainState,
    ticker: Ticker,
}

/// A mounted rain effect.
///
/// Owns the surface, drop state and frame timer. All of them are released
/// when the guard is dropped or [`Mounted::unmount`] is called, after which
/// nothing can draw on the surface.
#[derive(Debug)]
pub struct Mounted<'a, S, R> {
    effect: &'a mut RainEffect<R>,
    active: Option<Active<S>>,
}

impl<S: Surface, R: Rng> Mounted<'_, S, R> {
    /// True if the effect has a surface to draw on.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// True if frames are being scheduled.
    pub fn is_running(&self) -> bool {
        self.active.as_ref().is_some_and(|a| a.ticker.is_running())
    }

    pub fn surface(&self) -> Option<&S> {
        self.active.as_ref().map(|a| &a.surface)
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.active.as_mut().map(|a| &mut a.surface)
    }

    pub fn rain(&self) -> Option<&RainState> {
        self.active.as_ref().map(|a| &a.rain)
    }

    /// Draw a frame if one is due. Returns whether anything was drawn.
    pub fn tick(&mut self, now: Instant, theme: Theme) -> bool {
        let due = self
            .active
            .as_mut()
            .is_some_and(|active| active.ticker.poll(now));
        if due {
            self.frame(theme);
        }
        due
    }

    /// Draw one frame immediately, regardless of the timer.
    pub fn frame(&mut self, theme: Theme) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let effect = &mut *self.effect;
        active
            .rain
            .step(&mut active.surface, theme, &effect.settings, &mut effect.rng);
        effect.frames += 1;
    }

    /// Follow a viewport resize.
    pub fn on_resize(&mut self, viewport: Viewport) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        active.surface.set_viewport(viewport);
        active.rain.resize(viewport);
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            columns = active.rain.columns(),
            "rain effect resized"
        );
    }

    /// Stop scheduling frames. The surface keeps its last image.
    pub fn pause(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.ticker.stop();
        }
    }

    /// Resume scheduling frames, the first one due at `now`.
    pub fn resume(&mut self, now: Instant) {
        if let Some(active) = self.active.as_mut() {
            active.ticker.start(now);
        }
    }

    /// Change the frame cadence.
    pub fn set_speed(&mut self, speed: AnimationSpeed) {
        self.effect.speed = speed;
        if let Some(active) = self.active.as_mut() {
            active.ticker.set_interval(speed.frame_interval());
        }
    }

    /// Time until the next frame is due, if one is scheduled.
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        self.active
            .as_ref()
            .and_then(|active| active.ticker.until_next(now))
    }

    /// Tear down the effect and hand back the surface.
    pub fn unmount(mut self) -> Option<S> {
        self.release()
    }
}

impl<S, R> Mounted<'_, S, R> {
    fn release(&mut self) -> Option<S> {
        let mut active = self.active.take()?;
        active.ticker.stop();
        self.effect.mounted = false;
        tracing::info!(frames = self.effect.frames, "rain effect unmounted");
        Some(active.surface)
    }
}

impl<S, R> Drop for Mounted<'_, S, R> {
    fn drop(&mut self) {
        self.release();
    }
}
