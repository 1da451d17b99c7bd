// src/core/queue.rs

//! Pending commands chained with `&&`.

use crate::constants::CHAIN_OPERATOR;

/// Pending commands of one owner, flattened into a single `&&` chain on
/// execution. A failing command aborts the rest of the chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandQueue {
    commands: Vec<String>,
}

impl CommandQueue {
    /// An empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `command` to the end of the chain.
    pub fn queue(&mut self, command: impl Into<String>) {
        self.commands.push(command.into());
    }

    /// The pending commands joined with ` && `, or `""` when nothing is queued.
    pub fn queued_commands(&self) -> String {
        self.commands.join(CHAIN_OPERATOR)
    }

    /// Returns the joined chain and leaves the queue empty.
    pub fn take_joined(&mut self) -> String {
        let joined = self.queued_commands();
        self.commands.clear();
        joined
    }

    /// Number of pending commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_queue_joins_to_empty_string() {
        assert_eq!(CommandQueue::new().queued_commands(), "");
    }

    #[test]
    fn test_queue_one_command() {
        let mut queue = CommandQueue::new();
        queue.queue("ls");
        assert_eq!(queue.queued_commands(), "ls");
    }

    #[test]
    fn test_queue_multiple_commands() {
        let mut queue = CommandQueue::new();
        queue.queue("ls");
        queue.queue("cat");
        assert_eq!(queue.queued_commands(), "ls && cat");
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_take_joined_resets() {
        let mut queue = CommandQueue::new();
        queue.queue("a");
        queue.queue("b");
        assert_eq!(queue.take_joined(), "a && b");
        assert!(queue.is_empty());
        assert_eq!(queue.queued_commands(), "");
    }
}
