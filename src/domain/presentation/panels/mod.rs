mod banners;
mod diagnostics_panel;
mod help_panel;
mod hud_panel;
mod result_panel;
mod settings_panel;
mod start_panel;

pub use banners::show_banner;
pub use diagnostics_panel::show_diagnostics_panel;
pub use help_panel::show_help_panel;
pub use hud_panel::show_hud_panel;
pub use result_panel::show_result_panel;
pub use settings_panel::show_settings_panel;
pub use start_panel::show_start_panel;
