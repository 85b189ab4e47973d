//! Commands bound to strokes
//!
//! A command is one of three variants. `Disabled` marks a stroke explicitly
//! unbound, `Functional` wraps a callback found directly in a keymap table, and
//! `Named` wraps a callback registered under a unique name in the
//! [`CommandRegistry`](super::CommandRegistry). Callbacks receive the live editor,
//! which is obtained through an [`EditorAccessor`] at execution time.

use std::fmt;
use std::rc::Rc;

use super::config::KeymapError;

/// Callback invoked with the live editor instance
pub type CommandFn<E> = Rc<dyn Fn(&mut E)>;

/// Supplies the live editor for a context, if one currently exists
pub trait EditorAccessor {
    type Editor;

    /// The editor instance, or `None` once it has been torn down
    fn editor(&mut self) -> Option<&mut Self::Editor>;
}

impl<E> EditorAccessor for Option<E> {
    type Editor = E;

    fn editor(&mut self) -> Option<&mut E> {
        self.as_mut()
    }
}

/// The type tag of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Disabled,
    Functional,
    Named,
}

/// An executable command
pub enum Command<E> {
    /// Stroke is bound to `false`: do nothing
    Disabled,
    /// Callback stored directly in a keymap table
    Functional(CommandFn<E>),
    /// Callback registered by name
    Named(NamedCommand<E>),
}

impl<E> Command<E> {
    /// Wrap a closure as a functional command
    pub fn functional(function: impl Fn(&mut E) + 'static) -> Self {
        Command::Functional(Rc::new(function))
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Disabled => CommandKind::Disabled,
            Command::Functional(_) => CommandKind::Functional,
            Command::Named(_) => CommandKind::Named,
        }
    }

    /// Name of the command, for named commands only
    pub fn name(&self) -> Option<&str> {
        match self {
            Command::Named(named) => Some(named.name()),
            _ => None,
        }
    }

    /// Execute against the editor supplied by `accessor`.
    ///
    /// A missing editor is not an error: the call is skipped.
    pub fn execute<A>(&self, accessor: &mut A)
    where
        A: EditorAccessor<Editor = E> + ?Sized,
    {
        let function = match self {
            Command::Disabled => return,
            Command::Functional(function) => function,
            Command::Named(named) => &named.function,
        };

        match accessor.editor() {
            Some(editor) => function(editor),
            None => {
                tracing::debug!(
                    command = self.name().unwrap_or("<function>"),
                    "No live editor, skipping command"
                );
            }
        }
    }
}

impl<E> Clone for Command<E> {
    fn clone(&self) -> Self {
        match self {
            Command::Disabled => Command::Disabled,
            Command::Functional(function) => Command::Functional(Rc::clone(function)),
            Command::Named(named) => Command::Named(named.clone()),
        }
    }
}

impl<E> fmt::Debug for Command<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Disabled => write!(f, "Disabled"),
            Command::Functional(_) => write!(f, "Functional(<fn>)"),
            Command::Named(named) => f.debug_tuple("Named").field(&named.name).finish(),
        }
    }
}

/// Two commands are equal when they are the same variant and share the callback
impl<E> PartialEq for Command<E> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Command::Disabled, Command::Disabled) => true,
            (Command::Functional(a), Command::Functional(b)) => Rc::ptr_eq(a, b),
            (Command::Named(a), Command::Named(b)) => a == b,
            _ => false,
        }
    }
}

/// A command with a unique name and its callback
pub struct NamedCommand<E> {
    name: String,
    function: CommandFn<E>,
}

impl<E> NamedCommand<E> {
    /// Create a named command, rejecting blank names
    pub fn new(
        name: impl Into<String>,
        function: impl Fn(&mut E) + 'static,
    ) -> Result<Self, KeymapError> {
        Self::from_rc(name, Rc::new(function))
    }

    /// Create a named command from an already shared callback
    pub fn from_rc(name: impl Into<String>, function: CommandFn<E>) -> Result<Self, KeymapError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(KeymapError::InvalidCommandName(name));
        }
        Ok(Self { name, function })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn function(&self) -> &CommandFn<E> {
        &self.function
    }
}

impl<E> Clone for NamedCommand<E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            function: Rc::clone(&self.function),
        }
    }
}

impl<E> fmt::Debug for NamedCommand<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedCommand")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<E> PartialEq for NamedCommand<E> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Rc::ptr_eq(&self.function, &other.function)
    }
}

impl<E> From<NamedCommand<E>> for Command<E> {
    fn from(named: NamedCommand<E>) -> Self {
        Command::Named(named)
    }
}
