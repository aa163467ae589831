use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_path, Settings};

pub fn run(due_day: Option<u32>) -> Result<()> {
    match due_day {
        Some(day) => {
            save_settings(&Settings { due_day: day })?;
            println!("Default due day set to {day}.");
        }
        None => {
            let settings = load_settings();
            println!("Settings file: {}", settings_path().display());
            println!("Due day: {}", settings.due_day);
        }
    }
    Ok(())
}
