//! Markdown toolbar commands and the editing session that applies them.
//!
//! # Responsibility
//! - Map each toolbar button to one text-range edit with fixed arguments.
//! - Hold the host input's selection and the caret restore that must wait
//!   for the host to commit the new buffer.
//!
//! # Invariants
//! - Commands carry no state and perform no I/O.
//! - A scheduled caret restore is applied only by `after_render`, never in
//!   the same update that mutated the buffer.

use crate::draft::NoteDraft;
use crate::editor::text_range::{prefix_current_line, wrap_selection, SelectionRange, TextEdit};
use log::debug;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// One toolbar button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarCommand {
    Heading1,
    Heading2,
    Heading3,
    Bold,
    Italic,
    List,
    Quote,
    Code,
    HorizontalRule,
    Link,
}

/// Primitive edit a command resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    Wrap {
        before: &'static str,
        after: &'static str,
    },
    PrefixLine {
        prefix: &'static str,
    },
}

impl ToolbarCommand {
    /// Buttons in toolbar display order.
    pub const ALL: [ToolbarCommand; 10] = [
        Self::Heading1,
        Self::Heading2,
        Self::Heading3,
        Self::Bold,
        Self::Italic,
        Self::List,
        Self::Quote,
        Self::Code,
        Self::HorizontalRule,
        Self::Link,
    ];

    pub fn action(self) -> ToolbarAction {
        match self {
            Self::Heading1 => ToolbarAction::PrefixLine { prefix: "# " },
            Self::Heading2 => ToolbarAction::PrefixLine { prefix: "## " },
            Self::Heading3 => ToolbarAction::PrefixLine { prefix: "### " },
            Self::Bold => ToolbarAction::Wrap {
                before: "**",
                after: "**",
            },
            Self::Italic => ToolbarAction::Wrap {
                before: "_",
                after: "_",
            },
            Self::List => ToolbarAction::PrefixLine { prefix: "- " },
            Self::Quote => ToolbarAction::PrefixLine { prefix: "> " },
            Self::Code => ToolbarAction::PrefixLine { prefix: "```" },
            Self::HorizontalRule => ToolbarAction::PrefixLine { prefix: "---\n" },
            Self::Link => ToolbarAction::Wrap {
                before: "[",
                after: "](url)",
            },
        }
    }

    /// Button caption.
    pub fn label(self) -> &'static str {
        match self {
            Self::Heading1 => "H1",
            Self::Heading2 => "H2",
            Self::Heading3 => "H3",
            Self::Bold => "Bold",
            Self::Italic => "Italic",
            Self::List => "List",
            Self::Quote => "Quote",
            Self::Code => "Code",
            Self::HorizontalRule => "HR",
            Self::Link => "Link",
        }
    }

    /// Applies this command to `buffer` at `selection`.
    ///
    /// Line-prefix commands act on the line holding `selection.start`.
    pub fn apply(self, buffer: &str, selection: SelectionRange) -> TextEdit {
        match self.action() {
            ToolbarAction::Wrap { before, after } => {
                wrap_selection(buffer, selection, before, after)
            }
            ToolbarAction::PrefixLine { prefix } => {
                prefix_current_line(buffer, selection.start, prefix)
            }
        }
    }
}

impl Display for ToolbarCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for unknown toolbar command names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl Display for UnknownCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown toolbar command `{}`; expected h1|h2|h3|bold|italic|list|quote|code|hr|link",
            self.0
        )
    }
}

impl std::error::Error for UnknownCommand {}

impl FromStr for ToolbarCommand {
    type Err = UnknownCommand;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "h1" => Ok(Self::Heading1),
            "h2" => Ok(Self::Heading2),
            "h3" => Ok(Self::Heading3),
            "bold" => Ok(Self::Bold),
            "italic" => Ok(Self::Italic),
            "list" => Ok(Self::List),
            "quote" => Ok(Self::Quote),
            "code" => Ok(Self::Code),
            "hr" => Ok(Self::HorizontalRule),
            "link" => Ok(Self::Link),
            _ => Err(UnknownCommand(value.to_string())),
        }
    }
}

/// Toolbar state bound to one draft's content input.
///
/// The host reports selection changes through `set_selection`, runs
/// commands through `apply`, and calls `after_render` once its input
/// reflects the new buffer to learn where focus and selection go.
#[derive(Debug, Default)]
pub struct EditorSession {
    selection: SelectionRange,
    pending_restore: Option<SelectionRange>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the host input's current selection.
    pub fn set_selection(&mut self, selection: SelectionRange) {
        self.selection = selection;
    }

    pub fn selection(&self) -> SelectionRange {
        self.selection
    }

    /// Whether a caret restore is waiting for the next render commit.
    pub fn has_pending_restore(&self) -> bool {
        self.pending_restore.is_some()
    }

    /// Runs `command` against the draft content and schedules the restore.
    pub fn apply(&mut self, command: ToolbarCommand, draft: &mut NoteDraft) {
        let edit = command.apply(draft.content(), self.selection);
        debug!(
            "event=toolbar_apply module=editor status=ok command={} content_len={}",
            command.label(),
            edit.buffer.len()
        );
        draft.set_content(edit.buffer);
        self.pending_restore = Some(edit.selection);
    }

    /// Drains the scheduled restore after the host committed its render.
    ///
    /// Returns the selection the host must focus and re-apply, or `None`
    /// when no command ran since the last call.
    pub fn after_render(&mut self) -> Option<SelectionRange> {
        let restore = self.pending_restore.take()?;
        self.selection = restore;
        Some(restore)
    }
}

#[cfg(test)]
mod tests {
    use super::{EditorSession, ToolbarAction, ToolbarCommand};
    use crate::draft::NoteDraft;
    use crate::editor::text_range::SelectionRange;

    #[test]
    fn command_table_matches_button_arguments() {
        assert_eq!(
            ToolbarCommand::Heading2.action(),
            ToolbarAction::PrefixLine { prefix: "## " }
        );
        assert_eq!(
            ToolbarCommand::Code.action(),
            ToolbarAction::PrefixLine { prefix: "```" }
        );
        assert_eq!(
            ToolbarCommand::Link.action(),
            ToolbarAction::Wrap {
                before: "[",
                after: "](url)"
            }
        );
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("HR".parse::<ToolbarCommand>(), Ok(ToolbarCommand::HorizontalRule));
        assert_eq!(" bold ".parse::<ToolbarCommand>(), Ok(ToolbarCommand::Bold));
        assert!("strike".parse::<ToolbarCommand>().is_err());
    }

    #[test]
    fn every_label_parses_back_to_its_command() {
        for command in ToolbarCommand::ALL {
            assert_eq!(command.label().parse::<ToolbarCommand>(), Ok(command));
        }
    }

    #[test]
    fn horizontal_rule_inserts_own_line() {
        let edit = ToolbarCommand::HorizontalRule.apply("abc", SelectionRange::caret(2));
        assert_eq!(edit.buffer, "---\nabc");
        assert_eq!(edit.selection, SelectionRange::caret(6));
    }

    #[test]
    fn session_defers_restore_until_after_render() {
        let mut draft = NoteDraft::with_values("t", "link here", Vec::new());
        let mut session = EditorSession::new();
        session.set_selection(SelectionRange::new(0, 4));

        session.apply(ToolbarCommand::Link, &mut draft);
        assert_eq!(draft.content(), "[link](url) here");
        assert!(session.has_pending_restore());
        assert_eq!(session.selection(), SelectionRange::new(0, 4));

        assert_eq!(session.after_render(), Some(SelectionRange::new(1, 5)));
        assert_eq!(session.selection(), SelectionRange::new(1, 5));
        assert_eq!(session.after_render(), None);
    }
}
