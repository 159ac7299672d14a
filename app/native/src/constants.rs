//! Application-wide constants.

/// Application name used for configuration directories and temporary file prefixes.
pub const APP_NAME: &str = "codepaper";

/// Default font used for both the header and the code body.
pub const DEFAULT_FONT_PATH: &str = "resources/JetBrainsMonoNerdFont-Regular.ttf";

/// Default font size, in pixels, of the code body before scaling.
pub const DEFAULT_FONT_SIZE: f32 = 50.0;

/// Height of the header banner in pixels.
pub const DEFAULT_HEADER_HEIGHT: u32 = 70;

/// Maximum number of source lines shown on one wallpaper.
pub const DEFAULT_MAX_LINES: usize = 40;

/// Files with a line at least this long (in characters) are not rendered.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 500;

/// Resolution used to rasterize header icons.
pub const DEFAULT_ICON_DPI: f32 = 384.0;

/// Directory the generated wallpapers are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "out";

/// Name of the built-in theme.
pub const DEFAULT_THEME: &str = "ayu-mirage";
