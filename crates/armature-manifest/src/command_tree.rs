//! Command-tree derivation from discovered handlers.
//!
//! Handlers arrive in discovery order (directory-then-lexicographic) and
//! that order is the author's intended menu order; nothing here re-sorts.
//! Files sharing a group collapse into one submenu named after the group,
//! and a separator is emitted between adjacent top-level entries that
//! originate from different groups, never leading or trailing.

use std::collections::HashSet;

use tracing::debug;

use armature_scan::{ParameterDirective, SourceFile};
use smallvec::SmallVec;

use crate::errors::SchemaError;
use crate::types::{CommandNode, MenuNode, ParameterSpec, SubmenuNode};

/// Derived command structure for one plugin.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandTree {
    /// No command handlers; the main entry is the whole plugin.
    Empty,
    /// Exactly one top-level handler: invoked directly through `main`,
    /// without a `menu` field in the manifest.
    Single(CommandNode),
    Menu(Vec<MenuNode>),
}

/// Build the menu tree for the given handlers.
pub fn build_command_tree(handlers: &[SourceFile]) -> Result<CommandTree, SchemaError> {
    if handlers.is_empty() {
        return Ok(CommandTree::Empty);
    }

    if handlers.len() == 1 && handlers[0].group.is_empty() {
        debug!("Single top-level handler, skipping menu derivation");
        return Ok(CommandTree::Single(command_node(&handlers[0])?));
    }

    // Top-level entries tagged with their origin group so separator
    // boundaries can be computed afterwards. Root-level commands share the
    // `None` origin.
    let mut top: Vec<(Option<String>, MenuNode)> = Vec::new();

    for handler in handlers {
        let node = command_node(handler)?;
        if handler.group.is_empty() {
            top.push((None, MenuNode::Command(node)));
            continue;
        }

        let head = handler.group[0].clone();
        let index = top
            .iter()
            .position(|(origin, _)| origin.as_deref() == Some(head.as_str()))
            .unwrap_or_else(|| {
                top.push((
                    Some(head.clone()),
                    MenuNode::Submenu(SubmenuNode {
                        name: head.clone(),
                        menu: Vec::new(),
                    }),
                ));
                top.len() - 1
            });
        let MenuNode::Submenu(submenu) = &mut top[index].1 else {
            unreachable!("origin-tagged entries are submenus");
        };
        descend(&mut submenu.menu, &handler.group[1..]).push(MenuNode::Command(node));
    }

    let mut menu = Vec::with_capacity(top.len());
    let mut previous: Option<Option<String>> = None;
    for (origin, node) in top {
        if let Some(prev) = &previous {
            if *prev != origin {
                menu.push(MenuNode::separator());
            }
        }
        previous = Some(origin);
        menu.push(node);
    }

    debug!("Derived menu with {} top-level entries", menu.len());
    Ok(CommandTree::Menu(menu))
}

/// Walk (creating as needed) the submenu chain for a nested group path and
/// return the child list commands get pushed into.
fn descend<'a>(mut children: &'a mut Vec<MenuNode>, path: &[String]) -> &'a mut Vec<MenuNode> {
    for part in path {
        let current = children;
        let index = current
            .iter()
            .position(|node| matches!(node, MenuNode::Submenu(sub) if sub.name == *part))
            .unwrap_or_else(|| {
                current.push(MenuNode::Submenu(SubmenuNode {
                    name: part.clone(),
                    menu: Vec::new(),
                }));
                current.len() - 1
            });
        let MenuNode::Submenu(child) = &mut current[index] else {
            unreachable!("just matched or pushed a submenu");
        };
        children = &mut child.menu;
    }
    children
}

/// Build one command node, resolving its display name and parameters.
fn command_node(handler: &SourceFile) -> Result<CommandNode, SchemaError> {
    let name = handler
        .annotations
        .display_name
        .clone()
        .unwrap_or_else(|| {
            humanize(handler.export_name.as_deref().unwrap_or_else(|| handler.stem()))
        });

    let mut seen = HashSet::new();
    let mut parameters: SmallVec<[ParameterSpec; 4]> = SmallVec::new();
    for directive in &handler.annotations.parameters {
        if !seen.insert(directive.key.as_str()) {
            return Err(SchemaError::DuplicateParameterKey {
                command: name,
                key: directive.key.clone(),
            });
        }
        parameters.push(parameter_spec(directive));
    }

    let (parameters, parameter_only) = if parameters.is_empty() {
        (None, None)
    } else {
        (
            Some(parameters),
            Some(handler.annotations.parameter_only),
        )
    };

    Ok(CommandNode {
        name,
        command: handler.handler_ref(),
        parameters,
        parameter_only,
    })
}

fn parameter_spec(directive: &ParameterDirective) -> ParameterSpec {
    ParameterSpec {
        key: directive.key.clone(),
        name: directive
            .name
            .clone()
            .unwrap_or_else(|| humanize(&directive.key)),
        description: directive.description.clone(),
        optional: directive.optional,
        allow_freeform: directive.allow_freeform,
    }
}

/// Turn an export symbol or file stem into a display name:
/// `insertBigImage` / `insert-big-image` / `insert_big_image` all become
/// "Insert Big Image".
pub fn humanize(raw: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    for chunk in raw.split(|c: char| c == '-' || c == '_' || c.is_whitespace()) {
        if chunk.is_empty() {
            continue;
        }
        let mut word = String::new();
        let mut prev_lower = false;
        for ch in chunk.chars() {
            if ch.is_uppercase() && prev_lower {
                words.push(std::mem::take(&mut word));
            }
            prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
            word.push(ch);
        }
        if !word.is_empty() {
            words.push(word);
        }
    }

    words
        .into_iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
