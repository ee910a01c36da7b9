//! Feedrate channels
//!
//! One channel per axis group. The slider and the text field are views of a
//! single committed value: every mutation clamps to `[1, max]` first, then
//! mirrors the result into the text and the preference store.

use jogkit_core::{AxisGroup, InputError, Position};
use jogkit_settings::{feedrate_key, PreferenceStore, DEFAULT_FEEDRATE};
use std::fmt;
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Lowest feedrate a channel accepts, in mm/min
pub const MIN_FEEDRATE: u32 = 1;

/// Bounded jog feedrate of one axis group
pub struct FeedrateChannel {
    group: AxisGroup,
    max: u32,
    current: u32,
    displayed_text: String,
    prefs: Arc<dyn PreferenceStore>,
}

impl FeedrateChannel {
    /// Create the channel for `group`
    ///
    /// The upper bound comes from the machine's declared maximum feedrates.
    /// The starting value is the stored preference, clamped to the bounds.
    pub fn new(group: AxisGroup, maximums: &Position, prefs: Arc<dyn PreferenceStore>) -> Self {
        let max = group.max_feedrate(maximums).max(MIN_FEEDRATE);
        let stored = prefs.get_int(feedrate_key(group), DEFAULT_FEEDRATE);
        let current = clamp_to(i64::from(stored), max);

        tracing::debug!(
            "{} feedrate channel: {} mm/min (bounds {}..={}, stored {})",
            group,
            current,
            MIN_FEEDRATE,
            max,
            stored
        );

        Self {
            group,
            max,
            current,
            displayed_text: current.to_string(),
            prefs,
        }
    }

    /// Axis group this channel controls
    pub fn group(&self) -> AxisGroup {
        self.group
    }

    /// Committed feedrate, in mm/min
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Text currently shown in the feedrate field
    pub fn displayed_text(&self) -> &str {
        &self.displayed_text
    }

    /// Upper bound derived from the machine's declared maximum
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Accepted feedrate range
    pub fn bounds(&self) -> RangeInclusive<u32> {
        MIN_FEEDRATE..=self.max
    }

    /// Slider moved to `value`
    ///
    /// Returns the committed (clamped) feedrate.
    pub fn set_from_continuous_control(&mut self, value: i64) -> u32 {
        let clamped = clamp_to(value, self.max);
        if i64::from(clamped) != value {
            tracing::debug!("{} feedrate {} clamped to {}", self.group, value, clamped);
        }
        self.commit(clamped);
        clamped
    }

    /// Text field committed with `text`
    ///
    /// Empty (or all-whitespace) text is ignored and returns `Ok(None)`.
    /// Non-numeric text is rejected and left in the field as typed; the
    /// committed value does not change.
    pub fn set_from_text(&mut self, text: &str) -> Result<Option<u32>, InputError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        match trimmed.parse::<i64>() {
            Ok(value) => Ok(Some(self.set_from_continuous_control(value))),
            Err(_) => {
                self.displayed_text = text.to_string();
                Err(InputError::MalformedInput {
                    input: text.to_string(),
                })
            }
        }
    }

    /// Operator typed into the field without committing
    pub fn edit_text(&mut self, text: &str) {
        self.displayed_text = text.to_string();
    }

    /// Field lost input focus: commit whatever it holds
    pub fn on_focus_lost(&mut self) -> Result<Option<u32>, InputError> {
        let text = self.displayed_text.clone();
        self.set_from_text(&text)
    }

    fn commit(&mut self, value: u32) {
        self.current = value;
        self.displayed_text = value.to_string();

        let key = feedrate_key(self.group);
        // `max` is derived from an f64 truncated into u32 and may exceed i32.
        let stored = i32::try_from(value).unwrap_or(i32::MAX);
        if let Err(e) = self.prefs.put_int(key, stored) {
            tracing::warn!("Failed to store preference {}: {}", key, e);
        }
    }
}

impl fmt::Debug for FeedrateChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedrateChannel")
            .field("group", &self.group)
            .field("max", &self.max)
            .field("current", &self.current)
            .field("displayed_text", &self.displayed_text)
            .finish_non_exhaustive()
    }
}

fn clamp_to(value: i64, max: u32) -> u32 {
    value.clamp(i64::from(MIN_FEEDRATE), i64::from(max)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use jogkit_settings::{
        MemoryPreferences, SettingsError, SettingsResult, FEEDRATE_XY_KEY, FEEDRATE_Z_KEY,
    };

    fn maximums() -> Position {
        Position::from_xyz(5000.0, 4000.0, 800.0)
    }

    fn channel(group: AxisGroup) -> (FeedrateChannel, MemoryPreferences) {
        let prefs = MemoryPreferences::new();
        let channel = FeedrateChannel::new(group, &maximums(), Arc::new(prefs.clone()));
        (channel, prefs)
    }

    struct ReadOnlyPreferences;

    impl PreferenceStore for ReadOnlyPreferences {
        fn get_int(&self, _key: &str, default: i32) -> i32 {
            default
        }

        fn put_int(&self, _key: &str, _value: i32) -> SettingsResult<()> {
            Err(SettingsError::SaveError("read-only".to_string()))
        }
    }

    #[test]
    fn test_bounds_from_declared_maximum() {
        let (xy, _) = channel(AxisGroup::Xy);
        assert_eq!(xy.bounds(), 1..=4000);
        assert_eq!(xy.current(), 480);
        assert_eq!(xy.displayed_text(), "480");

        let (z, _) = channel(AxisGroup::Z);
        assert_eq!(z.max(), 800);
    }

    #[test]
    fn test_stored_value_is_clamped_on_load() {
        let prefs = MemoryPreferences::with_values([(FEEDRATE_Z_KEY, 9000)]);
        let z = FeedrateChannel::new(AxisGroup::Z, &maximums(), Arc::new(prefs));
        assert_eq!(z.current(), 800);
        assert_eq!(z.displayed_text(), "800");

        let prefs = MemoryPreferences::with_values([(FEEDRATE_Z_KEY, -5)]);
        let z = FeedrateChannel::new(AxisGroup::Z, &maximums(), Arc::new(prefs));
        assert_eq!(z.current(), 1);
    }

    #[test]
    fn test_continuous_control_in_bounds_mirrors_text() {
        let (mut xy, prefs) = channel(AxisGroup::Xy);
        for value in [1, 2, 480, 1234, 4000] {
            assert_eq!(xy.set_from_continuous_control(value), value as u32);
            assert_eq!(xy.displayed_text(), value.to_string());
            assert_eq!(prefs.get(FEEDRATE_XY_KEY), Some(value as i32));
        }
    }

    #[test]
    fn test_continuous_control_clamps() {
        let (mut xy, _) = channel(AxisGroup::Xy);
        assert_eq!(xy.set_from_continuous_control(0), 1);
        assert_eq!(xy.set_from_continuous_control(-100), 1);
        assert_eq!(xy.set_from_continuous_control(4001), 4000);
        assert_eq!(xy.set_from_continuous_control(i64::MAX), 4000);
        assert_eq!(xy.displayed_text(), "4000");
    }

    #[test]
    fn test_empty_text_is_ignored() {
        let (mut xy, prefs) = channel(AxisGroup::Xy);
        xy.set_from_continuous_control(600);

        assert_eq!(xy.set_from_text(""), Ok(None));
        assert_eq!(xy.set_from_text("   "), Ok(None));
        assert_eq!(xy.current(), 600);
        assert_eq!(xy.displayed_text(), "600");
        assert_eq!(prefs.get(FEEDRATE_XY_KEY), Some(600));
    }

    #[test]
    fn test_malformed_text_is_left_as_typed() {
        let (mut xy, _) = channel(AxisGroup::Xy);
        let err = xy.set_from_text("abc").unwrap_err();
        assert_eq!(
            err,
            InputError::MalformedInput {
                input: "abc".to_string()
            }
        );
        assert_eq!(xy.current(), 480);
        assert_eq!(xy.displayed_text(), "abc");

        // The next slider change corrects the field.
        xy.set_from_continuous_control(700);
        assert_eq!(xy.displayed_text(), "700");
    }

    #[test]
    fn test_text_commit_clamps_and_normalizes() {
        let (mut z, prefs) = channel(AxisGroup::Z);
        assert_eq!(z.set_from_text(" 250 "), Ok(Some(250)));
        assert_eq!(z.displayed_text(), "250");

        assert_eq!(z.set_from_text("99999"), Ok(Some(800)));
        assert_eq!(z.displayed_text(), "800");
        assert_eq!(prefs.get(FEEDRATE_Z_KEY), Some(800));
    }

    #[test]
    fn test_focus_lost_commits_field() {
        let (mut xy, _) = channel(AxisGroup::Xy);
        xy.edit_text("1500");
        assert_eq!(xy.current(), 480);
        assert_eq!(xy.on_focus_lost(), Ok(Some(1500)));
        assert_eq!(xy.current(), 1500);

        xy.edit_text("fast");
        assert!(xy.on_focus_lost().is_err());
        assert_eq!(xy.current(), 1500);
        assert_eq!(xy.displayed_text(), "fast");
    }

    #[test]
    fn test_store_failure_keeps_value() {
        let mut xy =
            FeedrateChannel::new(AxisGroup::Xy, &maximums(), Arc::new(ReadOnlyPreferences));
        assert_eq!(xy.set_from_continuous_control(900), 900);
        assert_eq!(xy.current(), 900);
        assert_eq!(xy.displayed_text(), "900");
    }
}
