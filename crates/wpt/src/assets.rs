//! Stylesheet and client script attached to documents with test blocks.

pub const STYLE_KEY: &str = "style-wpt";
pub const SCRIPT_KEY: &str = "script-wpt";

pub const WPT_STYLE: &str = include_str!("../assets/wpt.css");
const WPT_SCRIPT: &str = include_str!("../assets/wpt.js");

/// The client script, parameterized with the results path it queries.
pub fn wpt_script(prefix: Option<&str>) -> String {
    let mut path = prefix.unwrap_or("/").to_string();
    if !path.starts_with('/') {
        path.insert(0, '/');
    }
    if !path.ends_with('/') {
        path.push('/');
    }
    let path = path.replace('\\', "\\\\").replace('"', "\\\"");
    format!("let wptPath = \"{path}\";\n{WPT_SCRIPT}")
}
