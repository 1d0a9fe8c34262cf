use crate::{Clock, CountdownFormat, CountdownText, DisplaySurface, ExpiryTarget};

/// Renders the time left until an [`ExpiryTarget`] into a display surface.
///
/// Each call to [`ExpirationRenderer::render`] recomputes the text from the
/// target and a fresh reading of the clock, so calls may be repeated or
/// skipped freely.
pub struct ExpirationRenderer<C, S> {
    target: ExpiryTarget,
    clock: C,
    surface: S,
    format: CountdownFormat,
}

impl<C: Clock, S: DisplaySurface> ExpirationRenderer<C, S> {
    pub fn new(target: ExpiryTarget, clock: C, surface: S, format: CountdownFormat) -> Self {
        Self {
            target,
            clock,
            surface,
            format,
        }
    }

    /// Builds a renderer from a page's expiry attribute. A missing or
    /// unparseable attribute leaves the element inert.
    pub fn from_attribute(
        attribute: Option<&str>,
        clock: C,
        surface: S,
        format: CountdownFormat,
    ) -> Option<Self> {
        let attribute = attribute?;
        match ExpiryTarget::parse(attribute) {
            Some(target) => Some(Self::new(target, clock, surface, format)),
            None => {
                log::debug!("Ignoring unparseable expiry attribute {:?}", attribute);
                None
            }
        }
    }

    pub fn target(&self) -> ExpiryTarget {
        self.target
    }

    pub fn format(&self) -> CountdownFormat {
        self.format
    }

    /// Computes the text for the current instant without touching the surface.
    pub fn current_text(&self) -> CountdownText {
        self.format
            .format(self.target.remaining_millis(self.clock.now()))
    }

    pub fn render(&mut self) -> CountdownText {
        let text = self.current_text();
        self.surface.set_text(text.as_str());
        text
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Granularity, ManualClock, SmoothingBand};
    use chrono::{Duration, TimeZone, Utc};

    fn renderer_at(
        offset_millis: i64,
        format: CountdownFormat,
    ) -> (ExpirationRenderer<ManualClock, String>, ManualClock) {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let clock = ManualClock::new(now);
        let target = ExpiryTarget::new(now + Duration::milliseconds(offset_millis));
        (
            ExpirationRenderer::new(target, clock.clone(), String::new(), format),
            clock,
        )
    }

    #[test]
    fn writes_remaining_time_to_surface() {
        let (mut renderer, _) = renderer_at(90_061_000, CountdownFormat::default());
        assert_eq!(renderer.render().as_str(), "1d 1h 1m 1s");
        assert_eq!(renderer.into_surface(), "1d 1h 1m 1s");
    }

    #[test]
    fn just_elapsed_target_renders_expired() {
        let (mut renderer, _) = renderer_at(-1, CountdownFormat::default());
        assert_eq!(renderer.render(), CountdownText::Expired);
        assert_eq!(renderer.into_surface(), "Expired");
    }

    #[test]
    fn ten_minute_boundary_depends_on_smoothing() {
        let (mut exact, _) = renderer_at(600_000, CountdownFormat::default());
        assert_eq!(exact.render().as_str(), "10m 0s");

        let smoothed_format =
            CountdownFormat::new(Granularity::Seconds).with_smoothing(SmoothingBand::ten_minutes());
        let (mut smoothed, _) = renderer_at(600_000, smoothed_format);
        assert_eq!(smoothed.render().as_str(), "10 minutes remaining");
    }

    #[test]
    fn rendering_twice_at_same_instant_is_identical() {
        let (mut renderer, _) = renderer_at(123_456_789, CountdownFormat::default());
        let first = renderer.render();
        let second = renderer.render();
        assert_eq!(first, second);
    }

    #[test]
    fn remaining_time_decreases_as_clock_advances() {
        let (renderer, clock) = renderer_at(3 * 86_400_000 + 17, CountdownFormat::default());
        let mut previous = renderer.target().remaining_millis(clock.now());

        for step in [1, 999, 1_000, 59_000, 3_600_000, 86_400_000] {
            clock.advance(Duration::milliseconds(step));
            let remaining = renderer.target().remaining_millis(clock.now());
            assert!(remaining < previous);
            previous = remaining;
        }

        clock.advance(Duration::days(3));
        assert!(renderer.current_text().is_expired());
    }

    #[test]
    fn missing_or_bad_attribute_is_inert() {
        let clock = ManualClock::new(Utc.timestamp_millis_opt(0).unwrap());
        assert!(ExpirationRenderer::from_attribute(
            None,
            clock.clone(),
            String::new(),
            CountdownFormat::default()
        )
        .is_none());
        assert!(ExpirationRenderer::from_attribute(
            Some("never"),
            clock.clone(),
            String::new(),
            CountdownFormat::default()
        )
        .is_none());

        let renderer = ExpirationRenderer::from_attribute(
            Some("45000"),
            clock,
            String::new(),
            CountdownFormat::default(),
        )
        .unwrap();
        assert_eq!(renderer.current_text().as_str(), "45s");
    }
}
