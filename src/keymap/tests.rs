//! Integration tests for the keymap system

use std::cell::RefCell;
use std::rc::Rc;

use super::*;

/// Embedded default keymaps YAML for testing
const DEFAULT_KEYMAPS_YAML: &str = include_str!("../../keymaps.yaml");

fn stroke(raw: &str) -> Stroke {
    Stroke::parse(raw).unwrap()
}

fn values(strokes: &[Stroke]) -> Vec<String> {
    strokes.iter().map(Stroke::value).collect()
}

#[test]
fn test_embedded_yaml_parses() {
    let keymaps = parse_keymaps_yaml::<()>(DEFAULT_KEYMAPS_YAML)
        .expect("Embedded keymaps.yaml should parse successfully");

    assert!(!keymaps.is_empty(), "Should have keymaps");
    assert!(keymaps.contains("basic"));
    assert!(keymaps.contains("pcDefault"));
}

#[test]
fn test_pc_default_inherits_basic() {
    let keymaps = default_keymaps::<()>();
    let strokes = values(&keymaps.resolve_bindings("pcDefault"));

    let own = strokes.iter().position(|s| s == "Ctrl-A").unwrap();
    let inherited = strokes.iter().position(|s| s == "Left").unwrap();
    assert!(own < inherited, "own bindings come before inherited ones");
    assert!(!strokes.iter().any(|s| s == FALLTHROUGH));
}

#[test]
fn test_mac_default_keeps_duplicates_from_parents() {
    let keymaps = default_keymaps::<()>();
    let strokes = values(&keymaps.resolve_bindings("macDefault"));

    // Alt-Backspace is bound in macDefault itself and again in emacsy
    assert_eq!(strokes.iter().filter(|s| *s == "Alt-Backspace").count(), 2);
}

#[test]
fn test_default_resolves_like_platform_keymap() {
    let keymaps = default_keymaps::<()>();
    assert_eq!(
        values(&keymaps.resolve_bindings(DEFAULT_KEYMAP)),
        values(&keymaps.resolve_bindings(platform_keymap()))
    );
}

#[test]
fn test_emacs_chains_are_multi_strokes() {
    let keymaps = default_keymaps::<()>();
    let strokes = keymaps.resolve_bindings("emacs");

    let save = strokes
        .iter()
        .find(|s| s.value() == "Ctrl-X Ctrl-S")
        .expect("emacs binds Ctrl-X Ctrl-S");
    assert!(save.is_multi());
    assert_eq!(
        keymaps.classify_binding("emacs", &stroke("Alt-Left")),
        BindingKind::Boolean
    );
}

#[test]
fn test_named_command_executes_through_keymap() {
    #[derive(Default)]
    struct Editor {
        log: Vec<&'static str>,
    }

    let keymaps = default_keymaps::<Editor>();
    let mut registry = CommandRegistry::new();
    registry
        .register_named("selectAll", |e: &mut Editor| e.log.push("selectAll"))
        .unwrap();

    let command = keymaps
        .command_for("pcDefault", &stroke("Ctrl-A"), &registry)
        .expect("Ctrl-A is bound to selectAll");
    assert_eq!(command.name(), Some("selectAll"));

    let mut area = Some(Editor::default());
    command.execute(&mut area);
    assert_eq!(area.unwrap().log, vec!["selectAll"]);
}

#[test]
fn test_functional_binding_sees_live_editor() {
    let calls = Rc::new(RefCell::new(0));
    let seen = Rc::clone(&calls);

    let mut keymaps = KeymapSet::<String>::new();
    keymaps
        .entry("custom")
        .bind_function(&stroke("Ctrl-Enter"), move |text: &mut String| {
            *seen.borrow_mut() += 1;
            text.push('\n');
        })
        .set_fallthrough(["basic"]);

    let registry = CommandRegistry::new();
    let command = keymaps
        .command_for("custom", &stroke("Ctrl-Enter"), &registry)
        .unwrap();
    assert_eq!(command.kind(), CommandKind::Functional);

    let mut live = Some(String::from("a"));
    command.execute(&mut live);
    let mut gone: Option<String> = None;
    command.execute(&mut gone);

    assert_eq!(live.as_deref(), Some("a\n"));
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn test_parse_of_composed_value_round_trips() {
    let parts: Vec<Stroke> = ["Shift-Ctrl-Z", "Cmd-[", "Alt-F4"]
        .iter()
        .map(|r| stroke(r))
        .collect();
    let composed = Stroke::compose(&parts).unwrap();
    let reparsed = Stroke::parse(&composed.value()).unwrap();
    assert_eq!(reparsed, Stroke::Multi(composed));
}
