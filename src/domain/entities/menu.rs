use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::application::errors::MenuError;

/// One follow-up option attached to a menu reply.
///
/// Serialized as a two-element `[label, command]` array, which is the shape
/// menu definition documents use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuButton(String, String);

impl MenuButton {
    pub fn new(label: impl Into<String>, command: impl Into<String>) -> Self {
        Self(label.into(), command.into())
    }

    pub fn label(&self) -> &str {
        &self.0
    }

    pub fn command(&self) -> &str {
        &self.1
    }
}

/// One command's reply content plus its follow-up options, in source order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    pub text: String,
    #[serde(default)]
    pub buttons: Vec<MenuButton>,
}

/// Mapping from command id to menu node. Loaded once at startup and never
/// mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct MenuTree {
    nodes: HashMap<String, MenuNode>,
}

impl MenuTree {
    /// Parse a menu definition document and validate it.
    ///
    /// Every button target must name an existing node; cycles are legal
    /// (menus normally loop back to their root).
    pub fn from_json(content: &str) -> Result<Self, MenuError> {
        let nodes: HashMap<String, MenuNode> =
            serde_json::from_str(content).map_err(|e| MenuError::Parse(e.to_string()))?;
        let tree = Self { nodes };
        tree.validate()?;
        Ok(tree)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, MenuError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    fn validate(&self) -> Result<(), MenuError> {
        for (id, node) in &self.nodes {
            for button in &node.buttons {
                if !self.nodes.contains_key(button.command()) {
                    return Err(MenuError::DanglingTarget {
                        node: id.clone(),
                        target: button.command().to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, command: &str) -> Option<&MenuNode> {
        self.nodes.get(command)
    }

    pub fn commands(&self) -> impl Iterator<Item = &String> {
        self.nodes.keys()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Built-in menu used when no definition file is present
    pub fn default_tree() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(
            "menu".to_string(),
            MenuNode {
                text: "Main menu. Pick a topic:".to_string(),
                buttons: vec![
                    MenuButton::new("HR contacts", "hr"),
                    MenuButton::new("Vacation", "vacation"),
                    MenuButton::new("Sick leave", "sick"),
                    MenuButton::new("Payroll", "payroll"),
                ],
            },
        );
        nodes.insert(
            "hr".to_string(),
            MenuNode {
                text: "HR team: hr@company.example, ext. 100. Office hours 9:00-18:00, Mon-Fri."
                    .to_string(),
                buttons: vec![MenuButton::new("Back", "menu")],
            },
        );
        nodes.insert(
            "vacation".to_string(),
            MenuNode {
                text: "Vacation requests go through the employee portal at least two weeks in \
                       advance. Agree on dates with your manager first."
                    .to_string(),
                buttons: vec![MenuButton::new("Back", "menu")],
            },
        );
        nodes.insert(
            "sick".to_string(),
            MenuNode {
                text: "If you are ill, tell your manager before 10:00 and hand your sick note to \
                       HR within three days of returning."
                    .to_string(),
                buttons: vec![MenuButton::new("Back", "menu")],
            },
        );
        nodes.insert(
            "payroll".to_string(),
            MenuNode {
                text: "Salary is paid on the 5th and 20th. For payslip questions write to \
                       payroll@company.example."
                    .to_string(),
                buttons: vec![MenuButton::new("Back", "menu")],
            },
        );
        Self { nodes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_menu_document() {
        let tree = MenuTree::from_json(
            r#"{"root": {"text": "Main menu", "buttons": [["HR", "hr"]]}, "hr": {"text": "HR info"}}"#,
        )
        .unwrap();

        let root = tree.get("root").unwrap();
        assert_eq!(root.text, "Main menu");
        assert_eq!(root.buttons.len(), 1);
        assert_eq!(root.buttons[0].label(), "HR");
        assert_eq!(root.buttons[0].command(), "hr");
        assert!(tree.get("hr").unwrap().buttons.is_empty());
    }

    #[test]
    fn rejects_dangling_button_target() {
        let err = MenuTree::from_json(
            r#"{"root": {"text": "Main menu", "buttons": [["HR", "missing"]]}}"#,
        )
        .unwrap_err();

        match err {
            MenuError::DanglingTarget { node, target } => {
                assert_eq!(node, "root");
                assert_eq!(target, "missing");
            }
            other => panic!("expected DanglingTarget, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_document() {
        assert!(matches!(
            MenuTree::from_json(r#"{"root": "not a node"}"#),
            Err(MenuError::Parse(_))
        ));
    }

    #[test]
    fn cycles_are_allowed() {
        let tree = MenuTree::from_json(
            r#"{
                "menu": {"text": "Top", "buttons": [["HR", "hr"]]},
                "hr": {"text": "HR", "buttons": [["Back", "menu"]]}
            }"#,
        );
        assert!(tree.is_ok());
    }

    #[test]
    fn default_tree_has_no_dangling_targets() {
        let tree = MenuTree::default_tree();
        assert!(!tree.is_empty());
        assert!(tree.validate().is_ok());
    }
}
