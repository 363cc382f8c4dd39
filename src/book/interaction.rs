//! Pointer interaction
//!
//! Hover state is local UI state kept apart from the animation. A click on
//! a page that is still on the right opens it (and everything before it);
//! a click on an opened page turns the book back to that page.

/// Pointer signals a page can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Enter,
    Leave,
    Click,
}

/// Cursor the interaction layer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}

/// Page a click on `page` requests.
#[inline]
#[must_use]
pub fn click_target(page: usize, opened: bool) -> usize {
    if opened { page } else { page + 1 }
}

#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    highlighted: Option<usize>,
}

impl InteractionState {
    /// Applies a pointer event to `page`; returns the requested page on click.
    pub fn handle(&mut self, page: usize, opened: bool, event: PointerEvent) -> Option<usize> {
        match event {
            PointerEvent::Enter => {
                self.highlighted = Some(page);
                None
            }
            PointerEvent::Leave => {
                if self.highlighted == Some(page) {
                    self.highlighted = None;
                }
                None
            }
            PointerEvent::Click => {
                self.highlighted = None;
                Some(click_target(page, opened))
            }
        }
    }

    #[must_use]
    pub fn is_highlighted(&self, page: usize) -> bool {
        self.highlighted == Some(page)
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        if self.highlighted.is_some() {
            Cursor::Pointer
        } else {
            Cursor::Default
        }
    }
}
