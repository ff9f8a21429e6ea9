//! Two-stack undo/redo invoker.

/// An action on `S` that carries enough captured state to be reversed.
///
/// `revert` is only ever called on a command whose last `apply` succeeded,
/// with `S` in exactly the state that `apply` left behind.
pub trait Reversible<S> {
    type Error;

    fn apply(&mut self, state: &mut S) -> Result<(), Self::Error>;

    fn revert(&mut self, state: &mut S);
}

#[derive(Debug)]
pub struct CommandHistory<C> {
    undo_stack: Vec<C>,
    redo_stack: Vec<C>,
}

impl<C> Default for CommandHistory<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> CommandHistory<C> {
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Apply `command` and record it. A new action invalidates the redo stack.
    /// A failed command is dropped and the history left untouched.
    pub fn execute_command<S>(&mut self, mut command: C, state: &mut S) -> Result<(), C::Error>
    where
        C: Reversible<S>,
    {
        command.apply(state)?;
        self.push_executed(command);
        Ok(())
    }

    /// Record a command the caller already applied.
    pub fn push_executed(&mut self, command: C) {
        self.undo_stack.push(command);
        self.redo_stack.clear();
    }

    /// Revert the most recent command. Returns false on an empty stack.
    pub fn undo<S>(&mut self, state: &mut S) -> bool
    where
        C: Reversible<S>,
    {
        let Some(mut command) = self.undo_stack.pop() else {
            return false;
        };
        command.revert(state);
        self.redo_stack.push(command);
        true
    }

    /// Re-apply the most recently undone command. Returns false on an empty
    /// stack, or if the command no longer applies (it then stays redoable).
    pub fn redo<S>(&mut self, state: &mut S) -> bool
    where
        C: Reversible<S>,
    {
        let Some(mut command) = self.redo_stack.pop() else {
            return false;
        };
        if command.apply(state).is_err() {
            tracing::warn!("redo failed, command kept on the redo stack");
            self.redo_stack.push(command);
            return false;
        }
        self.undo_stack.push(command);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
