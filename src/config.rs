//! Saved command-line defaults.
//!
//! Flags live in plain text files, one or more per line, `#` starting a
//! comment. The global file is read first, then `.codinggrc` in the current
//! directory, then the real command line.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::editor::WrapMode;
use crate::gutter::GutterMode;
use crate::tabs::TabOptions;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub tab_size: Option<usize>,
    pub no_expand_tabs: bool,
    pub no_welcome: bool,
    pub wrap: Option<WrapMode>,
    pub gutter: Option<GutterMode>,
    pub perf: bool,
    pub debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge `other` over `self`: switches accumulate, values from `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            tab_size: other.tab_size.or(self.tab_size),
            no_expand_tabs: self.no_expand_tabs || other.no_expand_tabs,
            no_welcome: self.no_welcome || other.no_welcome,
            wrap: other.wrap.or(self.wrap),
            gutter: other.gutter.or(self.gutter),
            perf: self.perf || other.perf,
            debug_log: other.debug_log.clone().or_else(|| self.debug_log.clone()),
        }
    }

    pub fn editor_config(&self) -> EditorConfig {
        let defaults = EditorConfig::default();
        EditorConfig {
            tab_size: self.tab_size.filter(|&n| n > 0).unwrap_or(defaults.tab_size),
            expand_tabs: !self.no_expand_tabs,
            show_welcome: !self.no_welcome,
            wrap: self.wrap.unwrap_or(defaults.wrap),
            gutter: self.gutter.unwrap_or(defaults.gutter),
        }
    }
}

/// Editing behavior after all flag sources are merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorConfig {
    /// Spaces inserted by Tab, and the tab stop width.
    pub tab_size: usize,
    /// Tab inserts spaces instead of `\t`.
    pub expand_tabs: bool,
    /// Open the welcome tab when no files are given.
    pub show_welcome: bool,
    pub wrap: WrapMode,
    pub gutter: GutterMode,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_size: 4,
            expand_tabs: true,
            show_welcome: true,
            wrap: WrapMode::Word,
            gutter: GutterMode::Viewport,
        }
    }
}

impl EditorConfig {
    pub const fn tab_options(&self) -> TabOptions {
        TabOptions {
            wrap: self.wrap,
            tab_size: self.tab_size,
            gutter: self.gutter,
        }
    }

    /// Text inserted by the Tab key.
    pub fn tab_text(&self) -> String {
        if self.expand_tabs {
            " ".repeat(self.tab_size)
        } else {
            "\t".to_string()
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("codingg").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("codingg")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("codingg").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("codingg")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".codinggrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# codingg defaults (saved with --save)".to_string()];
    if let Some(n) = flags.tab_size {
        lines.push(format!("--tab-size {n}"));
    }
    if flags.no_expand_tabs {
        lines.push("--no-expand-tabs".to_string());
    }
    if flags.no_welcome {
        lines.push("--no-welcome".to_string());
    }
    if let Some(wrap) = flags.wrap {
        lines.push(format!("--wrap {}", wrap_name(wrap)));
    }
    if let Some(gutter) = flags.gutter {
        lines.push(format!("--gutter {}", gutter_name(gutter)));
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(path) = &flags.debug_log {
        lines.push(format!("--debug-log {}", path.display()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick known flags out of raw arguments. Unknown tokens (file names,
/// `--save`) are skipped; bad values leave the flag unset.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value)),
            _ => (token, None),
        };
        let takes_value = matches!(name, "--tab-size" | "--wrap" | "--gutter" | "--debug-log");
        let value = if !takes_value {
            None
        } else if inline.is_some() {
            inline
        } else {
            i += 1;
            tokens.get(i).map(String::as_str)
        };
        match (name, value) {
            ("--no-expand-tabs", _) => flags.no_expand_tabs = true,
            ("--no-welcome", _) => flags.no_welcome = true,
            ("--perf", _) => flags.perf = true,
            ("--tab-size", Some(v)) => flags.tab_size = v.parse().ok().filter(|&n| n > 0),
            ("--wrap", Some(v)) => flags.wrap = parse_wrap(v),
            ("--gutter", Some(v)) => flags.gutter = parse_gutter(v),
            ("--debug-log", Some(v)) => flags.debug_log = Some(PathBuf::from(v)),
            _ => {}
        }
        i += 1;
    }
    flags
}

fn parse_wrap(s: &str) -> Option<WrapMode> {
    match s {
        "none" => Some(WrapMode::None),
        "char" => Some(WrapMode::Char),
        "word" => Some(WrapMode::Word),
        _ => None,
    }
}

const fn wrap_name(mode: WrapMode) -> &'static str {
    match mode {
        WrapMode::None => "none",
        WrapMode::Char => "char",
        WrapMode::Word => "word",
    }
}

fn parse_gutter(s: &str) -> Option<GutterMode> {
    match s {
        "viewport" => Some(GutterMode::Viewport),
        "line-count" => Some(GutterMode::LineCount),
        _ => None,
    }
}

const fn gutter_name(mode: GutterMode) -> &'static str {
    match mode {
        GutterMode::Viewport => "viewport",
        GutterMode::LineCount => "line-count",
    }
}
