//! Core types for popup actions.

use std::fmt;

/// Unique identifier for an action.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionId(pub String);

impl ActionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ActionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ActionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The single capability an action provides: do something with the text.
pub trait ActionHandler {
    fn invoke(&self, text: &str) -> anyhow::Result<()>;
}

impl<F> ActionHandler for F
where
    F: Fn(&str) -> anyhow::Result<()>,
{
    fn invoke(&self, text: &str) -> anyhow::Result<()> {
        self(text)
    }
}

/// A popup button: identity, presentation metadata and behavior.
pub struct Action {
    /// Unique identifier.
    pub id: ActionId,
    /// Short label (button tooltip).
    pub label: String,
    /// Description of what this action does.
    pub description: String,
    handler: Box<dyn ActionHandler>,
}

impl Action {
    /// An action backed by a closure.
    pub fn new<F>(id: impl Into<ActionId>, label: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str) -> anyhow::Result<()> + 'static,
    {
        Self::with_handler(id, label, f)
    }

    /// An action backed by any handler type.
    pub fn with_handler(
        id: impl Into<ActionId>,
        label: impl Into<String>,
        handler: impl ActionHandler + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: String::new(),
            handler: Box::new(handler),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Run this action against `text`.
    pub fn run(&self, text: &str) -> anyhow::Result<()> {
        self.handler.invoke(text)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_closure_handler_receives_text() {
        let seen = Rc::new(RefCell::new(String::new()));
        let sink = seen.clone();
        let action = Action::new("echo", "Echo", move |text: &str| {
            sink.borrow_mut().push_str(text);
            Ok(())
        });

        action.run("hello").unwrap();
        assert_eq!(*seen.borrow(), "hello");
    }

    #[test]
    fn test_handler_error_propagates() {
        let action = Action::new("fail", "Fail", |_: &str| -> anyhow::Result<()> {
            anyhow::bail!("no clipboard")
        });
        let err = action.run("x").unwrap_err();
        assert_eq!(err.to_string(), "no clipboard");
    }

    #[test]
    fn test_action_id_display() {
        assert_eq!(ActionId::from("copy").to_string(), "copy");
    }
}
