//! Leaderboard settings component.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use super::document::{cast_boolean, SettingsDocument};
use crate::error::CoreError;
use crate::validation::presence;

/// Key of the leaderboard subtree in the course settings document.
pub const COMPONENT_KEY: &str = "course_leaderboard_component";

/// Number of users shown when the course has not configured one.
pub const DEFAULT_DISPLAY_USER_COUNT: i64 = 30;

const TITLE: &[&str] = &[COMPONENT_KEY, "title"];
const DISPLAY_USER_COUNT: &[&str] = &[COMPONENT_KEY, "display_user_count"];
const GROUP_ENABLED: &[&str] = &[COMPONENT_KEY, "group_leaderboard", "enabled"];
const GROUP_TITLE: &[&str] = &[COMPONENT_KEY, "group_leaderboard", "title"];

/// Effective leaderboard settings with defaults applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct LeaderboardSettings {
    pub title: Option<String>,
    #[validate(range(min = 0))]
    pub display_user_count: i64,
    pub enable_group_leaderboard: bool,
    pub group_leaderboard_title: Option<String>,
}

/// Typed accessors over the leaderboard part of a settings document.
pub struct LeaderboardComponent<'a> {
    settings: &'a mut SettingsDocument,
}

impl<'a> LeaderboardComponent<'a> {
    pub fn new(settings: &'a mut SettingsDocument) -> Self {
        Self { settings }
    }

    /// Custom leaderboard title, `None` when the default title applies.
    pub fn title(&self) -> Option<&str> {
        self.settings.get_str(TITLE)
    }

    /// Set the title; a blank title clears it.
    pub fn set_title(&mut self, title: Option<String>) {
        self.settings.set(TITLE, presence(title).map(Value::String));
    }

    pub fn display_user_count(&self) -> i64 {
        self.settings
            .get_i64(DISPLAY_USER_COUNT)
            .unwrap_or(DEFAULT_DISPLAY_USER_COUNT)
    }

    pub fn set_display_user_count(&mut self, count: i64) {
        self.settings.set(DISPLAY_USER_COUNT, Some(Value::from(count)));
    }

    /// Group leaderboard is disabled unless explicitly enabled.
    pub fn enable_group_leaderboard(&self) -> bool {
        self.settings.get_bool(GROUP_ENABLED) == Some(true)
    }

    /// Enable or disable the group leaderboard from a form-style value
    /// (`true`, `"1"`, `"0"`, ...). A blank value clears the setting.
    pub fn set_enable_group_leaderboard(&mut self, option: &Value) {
        self.settings
            .set(GROUP_ENABLED, cast_boolean(option).map(Value::Bool));
    }

    pub fn group_leaderboard_title(&self) -> Option<&str> {
        self.settings.get_str(GROUP_TITLE)
    }

    /// Set the group leaderboard title; a blank title clears it.
    pub fn set_group_leaderboard_title(&mut self, title: Option<String>) {
        self.settings.set(GROUP_TITLE, presence(title).map(Value::String));
    }

    pub fn snapshot(&self) -> LeaderboardSettings {
        LeaderboardSettings {
            title: self.title().map(str::to_string),
            display_user_count: self.display_user_count(),
            enable_group_leaderboard: self.enable_group_leaderboard(),
            group_leaderboard_title: self.group_leaderboard_title().map(str::to_string),
        }
    }

    /// Validate the current values (display count must not be negative).
    pub fn validate(&self) -> Result<LeaderboardSettings, CoreError> {
        let snapshot = self.snapshot();
        snapshot.validate()?;
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn defaults_on_empty_settings() {
        let mut doc = SettingsDocument::default();
        let component = LeaderboardComponent::new(&mut doc);
        assert_eq!(component.title(), None);
        assert_eq!(component.display_user_count(), 30);
        assert!(!component.enable_group_leaderboard());
        assert_eq!(component.group_leaderboard_title(), None);
    }

    #[test]
    fn blank_title_is_stored_as_unset() {
        let mut doc = SettingsDocument::default();
        let mut component = LeaderboardComponent::new(&mut doc);
        component.set_title(Some("Hall of Fame".into()));
        assert_eq!(component.title(), Some("Hall of Fame"));
        component.set_title(Some("   ".into()));
        assert_eq!(component.title(), None);
    }

    #[test]
    fn group_toggle_accepts_form_values() {
        let mut doc = SettingsDocument::default();
        let mut component = LeaderboardComponent::new(&mut doc);
        component.set_enable_group_leaderboard(&json!("1"));
        assert!(component.enable_group_leaderboard());
        component.set_enable_group_leaderboard(&json!("0"));
        assert!(!component.enable_group_leaderboard());
        component.set_enable_group_leaderboard(&json!(true));
        assert!(component.enable_group_leaderboard());
    }

    #[test]
    fn values_live_under_component_key() {
        let mut doc = SettingsDocument::default();
        {
            let mut component = LeaderboardComponent::new(&mut doc);
            component.set_display_user_count(10);
            component.set_group_leaderboard_title(Some("Teams".into()));
        }
        assert_eq!(
            doc.as_value(),
            &json!({
                "course_leaderboard_component": {
                    "display_user_count": 10,
                    "group_leaderboard": {"title": "Teams"}
                }
            })
        );
    }

    #[test]
    fn negative_display_count_fails_validation() {
        let mut doc = SettingsDocument::default();
        let mut component = LeaderboardComponent::new(&mut doc);
        component.set_display_user_count(-1);
        assert_matches!(
            component.validate(),
            Err(CoreError::Validation(msg)) if msg.contains("display_user_count")
        );
    }

    #[test]
    fn zero_display_count_is_valid() {
        let mut doc = SettingsDocument::default();
        let mut component = LeaderboardComponent::new(&mut doc);
        component.set_display_user_count(0);
        let settings = component.validate().unwrap();
        assert_eq!(settings.display_user_count, 0);
    }
}
