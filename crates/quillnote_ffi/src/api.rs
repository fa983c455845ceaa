//! FFI use-case API for the Flutter editor screens.
//!
//! # Responsibility
//! - Expose toolbar edits, tag entry, save gating and preview rendering
//!   as sync calls the UI thread can make on every interaction.
//! - Translate between Dart's UTF-16 selection offsets and core's UTF-8
//!   byte offsets.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Out-of-range offsets are clamped, never rejected.

use log::warn;
use quillnote_core::preview::{excerpt, render_html};
use quillnote_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, NoteDraft,
    SelectionRange, ToolbarCommand,
};

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One toolbar button as shown by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarButton {
    /// Stable command name accepted by `toolbar_apply`.
    pub command: String,
    /// Button caption.
    pub label: String,
}

/// Result of one toolbar edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarEditResponse {
    /// Whether the command was recognized and applied.
    pub ok: bool,
    /// New content buffer (unchanged input when `ok` is false).
    pub content: String,
    /// Selection to restore after the next frame, in UTF-16 code units.
    pub selection_start: u32,
    pub selection_end: u32,
    /// Empty on success; error text otherwise.
    pub message: String,
}

/// Lists toolbar buttons in display order.
#[flutter_rust_bridge::frb(sync)]
pub fn toolbar_buttons() -> Vec<ToolbarButton> {
    ToolbarCommand::ALL
        .iter()
        .map(|command| ToolbarButton {
            command: command.label().to_ascii_lowercase(),
            label: command.label().to_string(),
        })
        .collect()
}

/// Applies a toolbar command to `content` at the given selection.
///
/// # FFI contract
/// - Sync call, pure.
/// - Offsets are UTF-16 code units as reported by the text field.
/// - The host restores focus and the returned selection after it has
///   rebuilt the text field with the new content.
#[flutter_rust_bridge::frb(sync)]
pub fn toolbar_apply(
    command: String,
    content: String,
    selection_start: u32,
    selection_end: u32,
) -> ToolbarEditResponse {
    let command = match command.parse::<ToolbarCommand>() {
        Ok(command) => command,
        Err(err) => {
            warn!("event=toolbar_apply module=ffi status=error reason=unknown_command");
            return ToolbarEditResponse {
                ok: false,
                content,
                selection_start,
                selection_end,
                message: err.to_string(),
            };
        }
    };

    let selection = SelectionRange::new(
        utf16_to_byte_offset(&content, selection_start),
        utf16_to_byte_offset(&content, selection_end),
    );
    let edit = command.apply(&content, selection);
    ToolbarEditResponse {
        ok: true,
        selection_start: byte_to_utf16_offset(&edit.buffer, edit.selection.start),
        selection_end: byte_to_utf16_offset(&edit.buffer, edit.selection.end),
        content: edit.buffer,
        message: String::new(),
    }
}

/// Adds one tag to `tags` using draft rules (trim, skip blank/duplicate).
#[flutter_rust_bridge::frb(sync)]
pub fn draft_add_tag(tags: Vec<String>, raw: String) -> Vec<String> {
    let mut draft = NoteDraft::with_values(String::new(), String::new(), tags);
    draft.add_tag(&raw);
    draft.tags().to_vec()
}

/// Returns empty string when the draft may be saved, else the reason.
#[flutter_rust_bridge::frb(sync)]
pub fn draft_validate(title: String, content: String) -> String {
    match NoteDraft::with_values(title, content, Vec::new()).validate() {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Renders markdown for the live preview pane.
#[flutter_rust_bridge::frb(sync)]
pub fn markdown_preview_html(content: String) -> String {
    render_html(&content)
}

/// Plain-text excerpt for list rows, or empty string.
#[flutter_rust_bridge::frb(sync)]
pub fn note_excerpt(content: String) -> String {
    excerpt(&content).unwrap_or_default()
}

fn utf16_to_byte_offset(text: &str, utf16_offset: u32) -> usize {
    let target = utf16_offset as usize;
    let mut units = 0;
    for (byte_idx, ch) in text.char_indices() {
        if units >= target {
            return byte_idx;
        }
        units += ch.len_utf16();
    }
    text.len()
}

fn byte_to_utf16_offset(text: &str, byte_offset: usize) -> u32 {
    let clamped = byte_offset.min(text.len());
    let units: usize = text
        .char_indices()
        .take_while(|(idx, _)| *idx < clamped)
        .map(|(_, ch)| ch.len_utf16())
        .sum();
    u32::try_from(units).unwrap_or(u32::MAX)
}
