use super::Command;

/// Undo/redo history over committed drawing commands.
///
/// Two stacks: `committed` is the drawing (render order = insertion order),
/// `redoable` holds commands popped by undo. Any fresh commit invalidates
/// the redo stack. Commands are moved whole; nothing in here mutates them.
#[derive(Debug, Default)]
pub struct CommandHistory {
    committed: Vec<Command>,
    redoable: Vec<Command>,
}

impl CommandHistory {
    /// Creates a new empty history.
    pub fn new() -> Self {
        Self {
            committed: Vec::new(),
            redoable: Vec::new(),
        }
    }

    /// Append a command to the drawing and clear the redo stack.
    pub fn commit(&mut self, command: Command) {
        self.committed.push(command);
        self.redoable.clear();
    }

    /// Move the newest committed command onto the redo stack.
    ///
    /// Returns `false` (and does nothing) when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.committed.pop() {
            Some(command) => {
                self.redoable.push(command);
                true
            }
            None => false,
        }
    }

    /// Move the newest undone command back onto the drawing.
    ///
    /// Returns `false` (and does nothing) when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.redoable.pop() {
            Some(command) => {
                self.committed.push(command);
                true
            }
            None => false,
        }
    }

    /// Drop the whole drawing and the redo stack.
    pub fn clear(&mut self) {
        self.committed.clear();
        self.redoable.clear();
    }

    /// The committed drawing, in render order.
    pub fn committed(&self) -> &[Command] {
        &self.committed
    }

    /// Returns true if there are commands that can be undone.
    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    /// Returns true if there are commands that can be redone.
    pub fn can_redo(&self) -> bool {
        !self.redoable.is_empty()
    }

    /// Number of commands waiting on the redo stack.
    pub fn redoable_len(&self) -> usize {
        self.redoable.len()
    }

    /// In-progress access for the interaction machine: the stroke being
    /// drawn is always the newest committed entry.
    pub(crate) fn last_committed_mut(&mut self) -> Option<&mut Command> {
        self.committed.last_mut()
    }
}
