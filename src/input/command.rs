//! Command definitions for keyboard input handling.
//!
//! Physical keys that are not typed into the virtual keyboard are mapped
//! to a [`Command`]. Mouse clicks on status-bar buttons produce the same
//! commands, so both paths share one handler.

/// Every user action outside text entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // =========================================================================
    // Global
    // =========================================================================
    /// Quit the application (Ctrl+C, q)
    Quit,
    /// Close the error banner or the export panel (Esc)
    Dismiss,

    // =========================================================================
    // Screen navigation
    // =========================================================================
    /// Next screen in the list (Right)
    NextScreen,
    /// Previous screen in the list (Left)
    PreviousScreen,

    // =========================================================================
    // Hotspot focus traversal
    // =========================================================================
    /// Focus the next hotspot (Tab)
    FocusNext,
    /// Focus the previous hotspot (Shift+Tab)
    FocusPrevious,
    /// Activate the focused hotspot (Enter, Space)
    ActivateFocused,

    // =========================================================================
    // Tools
    // =========================================================================
    /// Switch between run and author mode (a)
    ToggleAuthorMode,
    /// Capture the phone canvas to a PNG (c)
    Capture,
    /// Serialize the hotspot map and copy it (x)
    Export,
}

impl Command {
    /// Short label for buttons and the help line.
    pub fn label(&self) -> &'static str {
        match self {
            Command::Quit => "quit",
            Command::Dismiss => "dismiss",
            Command::NextScreen => "next",
            Command::PreviousScreen => "prev",
            Command::FocusNext => "focus",
            Command::FocusPrevious => "focus back",
            Command::ActivateFocused => "activate",
            Command::ToggleAuthorMode => "mode",
            Command::Capture => "capture",
            Command::Export => "export",
        }
    }
}
