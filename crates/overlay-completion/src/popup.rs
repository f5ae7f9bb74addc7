//! Popup measurement and placement around the caret.
//!
//! Sizes are in terminal cells: widths come from Unicode display widths, so wide CJK characters
//! take two columns and combining marks none. Lines longer than the maximum width wrap.

use unicode_width::UnicodeWidthStr;

/// Popup layout knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupOptions {
    /// Lines wrap at this many columns.
    pub max_width: usize,
    /// Rows kept free between the caret line and the popup.
    pub caret_margin: usize,
}

impl Default for PopupOptions {
    fn default() -> Self {
        Self {
            max_width: 80,
            caret_margin: 0,
        }
    }
}

/// Where the caret is in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupAnchor {
    /// Viewport row of the caret line (0-based).
    pub caret_row: usize,
    /// Total viewport rows.
    pub viewport_rows: usize,
}

/// Measured popup size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PopupSize {
    /// Columns.
    pub width: usize,
    /// Rows, after wrapping.
    pub height: usize,
}

/// Final popup position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Anchored below the caret line, starting at viewport row `top`.
    Below {
        /// First row.
        top: usize,
    },
    /// Anchored above the caret line, starting at viewport row `top`.
    Above {
        /// First row.
        top: usize,
    },
    /// Nothing fits.
    Hidden,
}

/// Placement decision plus the content variant it was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupLayout {
    /// Position.
    pub placement: Placement,
    /// Size of the placed content.
    pub size: PopupSize,
    /// Whether the parameter sub-panel is shown.
    pub with_parameters: bool,
}

impl PopupLayout {
    /// Whether the popup is on screen.
    pub fn is_visible(&self) -> bool {
        self.placement != Placement::Hidden
    }
}

/// Measure `lines` wrapped at `max_width` columns.
pub fn measure<S: AsRef<str>>(lines: &[S], max_width: usize) -> PopupSize {
    let max_width = max_width.max(1);
    lines.iter().fold(PopupSize::default(), |size, line| {
        let width = line.as_ref().width();
        PopupSize {
            width: size.width.max(width.min(max_width)),
            height: size.height + width.div_ceil(max_width).max(1),
        }
    })
}

/// Place content of `height` rows below the caret, else above it.
pub fn place(height: usize, anchor: PopupAnchor, options: PopupOptions) -> Placement {
    let below_top = anchor.caret_row + 1 + options.caret_margin;
    let space_below = anchor.viewport_rows.saturating_sub(below_top);
    let space_above = anchor.caret_row.saturating_sub(options.caret_margin);

    if height <= space_below {
        Placement::Below { top: below_top }
    } else if height <= space_above {
        Placement::Above {
            top: space_above - height,
        }
    } else {
        Placement::Hidden
    }
}

/// Place a popup, dropping the parameter sub-panel when the full content fits nowhere.
///
/// `full` includes the parameter lines, `compact` does not.
pub fn place_popup<S: AsRef<str>>(
    full: &[S],
    compact: &[S],
    anchor: PopupAnchor,
    options: PopupOptions,
) -> PopupLayout {
    let size = measure(full, options.max_width);
    let placement = place(size.height, anchor, options);
    if placement != Placement::Hidden || full.len() == compact.len() {
        return PopupLayout {
            placement,
            size,
            with_parameters: true,
        };
    }

    let size = measure(compact, options.max_width);
    let placement = place(size.height, anchor, options);
    if placement == Placement::Hidden {
        log::trace!("popup of {} rows fits neither above nor below", size.height);
    }
    PopupLayout {
        placement,
        size,
        with_parameters: false,
    }
}
