//! Static files shipped next to every generated document.

pub const STYLESHEET: &str = include_str!("../../assets/styles.css");
pub const SCRIPT: &str = include_str!("../../assets/main.js");

pub const STYLESHEET_FILE: &str = "styles.css";
pub const SCRIPT_FILE: &str = "script.js";

/// `(file name, contents)` for every asset.
pub fn assets() -> [(&'static str, &'static str); 2] {
    [(STYLESHEET_FILE, STYLESHEET), (SCRIPT_FILE, SCRIPT)]
}
