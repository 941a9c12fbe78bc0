//! Configuration display command

use crate::config::Settings;
use crate::display::format_settings;

/// Print the effective settings
pub fn handle_config_command(settings: &Settings) {
    print!("{}", format_settings(settings));
}
