//! Global admin settings
//!
//! Runtime-changeable site configuration, persisted as component-scoped
//! key/value rows. The availability chain receives an immutable snapshot of
//! this struct per evaluation; it never reads the table itself.

use serde::{Deserialize, Serialize};

/// Snapshot of the booking component's global settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    /// Users with the overbook capability may book past capacity
    pub allow_overbooking: bool,
    /// Option detail pages are visible without login; login buttons then
    /// carry a return URL back to the option
    pub show_details_to_all: bool,
    /// After login, send the user on to the option's course
    pub redirect_on_login_to_course: bool,
    /// Bootstrap color suffix for the login button
    pub login_button_style: String,
    /// Site-wide shortcode kill switch
    pub shortcodes_off: bool,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            allow_overbooking: false,
            show_details_to_all: false,
            redirect_on_login_to_course: false,
            login_button_style: "warning".to_string(),
            shortcodes_off: false,
        }
    }
}

impl GlobalSettings {
    /// Apply one persisted key/value row onto the snapshot.
    ///
    /// Unknown keys are ignored so newer rows don't break older binaries.
    pub fn apply(&mut self, name: &str, value: &str) {
        match name {
            "allow_overbooking" => self.allow_overbooking = parse_bool(value),
            "show_details_to_all" => self.show_details_to_all = parse_bool(value),
            "redirect_on_login_to_course" => self.redirect_on_login_to_course = parse_bool(value),
            "login_button_style" => self.login_button_style = value.to_string(),
            "shortcodes_off" => self.shortcodes_off = parse_bool(value),
            _ => {}
        }
    }

    /// Fold persisted rows over the defaults.
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut settings = Self::default();
        for (name, value) in rows {
            settings.apply(name, value);
        }
        settings
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = GlobalSettings::default();
        assert!(!settings.allow_overbooking);
        assert!(!settings.shortcodes_off);
        assert_eq!(settings.login_button_style, "warning");
    }

    #[test]
    fn test_from_rows_overrides_defaults() {
        let settings = GlobalSettings::from_rows([
            ("allow_overbooking", "1"),
            ("shortcodes_off", "true"),
            ("unknown_key", "whatever"),
        ]);
        assert!(settings.allow_overbooking);
        assert!(settings.shortcodes_off);
        assert!(!settings.show_details_to_all);
    }
}
