/// Which kind of bracket instruction was processed most recently.
///
/// Needed to tell "entering a new sibling loop" apart from "opening a deeper
/// loop" on `[`, and to know whether the just-closed loop's counter is still
/// on the path on `]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    Open,
    Close,
}

/// Tracks the current loop-nesting path while a Brainfuck stream is scanned.
///
/// The path is the sibling index at each currently-open nesting depth:
/// `[1, 2]` means "inside the 2nd loop nested inside the 1st top-level loop".
/// Each `[`/`]` yields a label derived from the path (values joined by `_`),
/// unique per loop as long as the input's brackets are balanced. Matching
/// open and close brackets yield the same label.
///
/// Unbalanced input is not an error: a pop past the bottom of the path is a
/// no-op and the label degrades to `"0"` (genuine sibling counters start at
/// 1, so the degenerate label never collides with a real one).
#[derive(Debug, Clone)]
pub struct LoopTracker {
    path: Vec<u32>,
    last: Bracket,
}

impl Default for LoopTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopTracker {
    pub fn new() -> Self {
        // Open, so the first bracket of a stream starts a new depth.
        Self {
            path: Vec::new(),
            last: Bracket::Open,
        }
    }

    /// Process a `[` and return the opened loop's label.
    ///
    /// After a close, this open is the next sibling at the current depth;
    /// otherwise it starts a new, deeper level.
    pub fn open(&mut self) -> String {
        if self.last == Bracket::Close {
            match self.path.last_mut() {
                Some(count) => *count += 1,
                None => self.path.push(1),
            }
        } else {
            self.path.push(1);
        }
        self.last = Bracket::Open;
        self.label()
    }

    /// Process a `]` and return the closed loop's label.
    ///
    /// After another close, the inner loop's counter is popped first; that
    /// restores the path as it stood inside the loop now being closed, which
    /// is exactly the label its `[` produced. Directly after an open, the
    /// path already names the loop being closed and nothing is popped.
    pub fn close(&mut self) -> String {
        if self.last == Bracket::Close {
            self.path.pop();
        }
        self.last = Bracket::Close;
        self.label()
    }

    fn label(&self) -> String {
        if self.path.is_empty() {
            return "0".to_string();
        }
        self.path
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join("_")
    }
}
