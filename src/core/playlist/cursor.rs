//=========================================================================
// Playlist Cursor
//=========================================================================
//
// Modulo position tracking over a fixed item list.
//
// The item list itself lives in the host; the core only tracks which
// index is current. List mutation at runtime is not supported.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::warn;

//=== AdvanceOutcome ======================================================

/// Result of a cursor advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved to `index`; `wrapped` is true when the move passed the end of
    /// the list.
    Advanced { index: usize, wrapped: bool },

    /// The list is empty; nothing changed.
    NoItems,
}

//=== PlaylistCursor ======================================================

/// Monotonic modulo cursor over `item_count` playlist entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaylistCursor {
    index: usize,
    item_count: usize,
}

impl PlaylistCursor {
    /// Creates a cursor at index 0.
    pub fn new(item_count: usize) -> Self {
        Self { index: 0, item_count }
    }

    //--- Advancing --------------------------------------------------------

    /// Moves to the next item, wrapping modulo the item count.
    pub fn advance(&mut self) -> AdvanceOutcome {
        if self.item_count == 0 {
            warn!("playlist advance requested but no items are available");
            return AdvanceOutcome::NoItems;
        }

        self.index = (self.index + 1) % self.item_count;
        AdvanceOutcome::Advanced {
            index: self.index,
            wrapped: self.index == 0,
        }
    }

    /// Moves the cursor back to the first item.
    pub fn rewind(&mut self) {
        self.index = 0;
    }

    //--- Queries ----------------------------------------------------------

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// True when the cursor sits on the final item of a non-empty list.
    pub fn is_last(&self) -> bool {
        self.item_count > 0 && self.index + 1 == self.item_count
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_walks_the_list_in_order() {
        let mut cursor = PlaylistCursor::new(3);

        assert_eq!(
            cursor.advance(),
            AdvanceOutcome::Advanced { index: 1, wrapped: false }
        );
        assert_eq!(
            cursor.advance(),
            AdvanceOutcome::Advanced { index: 2, wrapped: false }
        );
        assert_eq!(
            cursor.advance(),
            AdvanceOutcome::Advanced { index: 0, wrapped: true }
        );
    }

    /// After N advances the cursor is back where it started.
    #[test]
    fn n_advances_return_to_start() {
        for n in 1..6 {
            let mut cursor = PlaylistCursor::new(n);
            let start = cursor.index();

            for _ in 0..n {
                cursor.advance();
            }

            assert_eq!(cursor.index(), start, "list of {}", n);
        }
    }

    #[test]
    fn empty_list_reports_no_items_and_never_moves() {
        let mut cursor = PlaylistCursor::new(0);

        for _ in 0..5 {
            assert_eq!(cursor.advance(), AdvanceOutcome::NoItems);
            assert_eq!(cursor.index(), 0);
        }
    }

    #[test]
    fn single_item_list_always_wraps() {
        let mut cursor = PlaylistCursor::new(1);

        assert_eq!(
            cursor.advance(),
            AdvanceOutcome::Advanced { index: 0, wrapped: true }
        );
    }

    #[test]
    fn is_last_flags_only_the_final_item() {
        let mut cursor = PlaylistCursor::new(2);
        assert!(!cursor.is_last());

        cursor.advance();
        assert!(cursor.is_last());

        cursor.advance();
        assert!(!cursor.is_last());
    }

    #[test]
    fn is_last_is_false_for_empty_list() {
        assert!(!PlaylistCursor::new(0).is_last());
    }

    #[test]
    fn rewind_returns_to_zero() {
        let mut cursor = PlaylistCursor::new(4);
        cursor.advance();
        cursor.advance();

        cursor.rewind();
        assert_eq!(cursor.index(), 0);
    }
}
