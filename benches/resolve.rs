//! Benchmarks for keymap resolution and stroke parsing
//!
//! Run with: cargo bench resolve

use keybridge::keymap::{default_keymaps, KeyMapTable, KeyMapValue, KeymapSet, Stroke};
use keybridge::{CommandRegistry, EditorSession};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

// ============================================================================
// Stroke parsing
// ============================================================================

#[divan::bench(args = ["Ctrl-A", "Shift-Cmd-Ctrl-Alt-F12", "Ctrl-X Ctrl-S", "ctrl--"])]
fn parse_stroke(raw: &str) {
    divan::black_box(Stroke::parse(divan::black_box(raw)).ok());
}

// ============================================================================
// Fallthrough resolution
// ============================================================================

/// A linear chain of `depth` keymaps, each with 20 bindings
fn chain(depth: usize) -> KeymapSet<()> {
    let mut set = KeymapSet::new();
    for level in 0..depth {
        let mut table = KeyMapTable::new();
        for n in 1..=20 {
            table.set(
                format!("Ctrl-Alt-F{}", n),
                KeyMapValue::Command(format!("cmd{}_{}", level, n)),
            );
        }
        if level + 1 < depth {
            table.set_fallthrough([format!("map{}", level + 1)]);
        }
        set.insert(format!("map{}", level), table);
    }
    set
}

#[divan::bench(args = [1, 4, 16, 64])]
fn resolve_chain(bencher: divan::Bencher, depth: usize) {
    let set = chain(depth);
    bencher.bench_local(|| divan::black_box(set.resolve_bindings("map0")));
}

#[divan::bench(args = ["pcDefault", "macDefault", "emacs"])]
fn resolve_shipped(bencher: divan::Bencher, name: &str) {
    let set = default_keymaps::<()>();
    bencher.bench_local(|| divan::black_box(set.resolve_bindings(name)));
}

#[divan::bench(args = [1, 16, 64])]
fn command_for_deepest(bencher: divan::Bencher, depth: usize) {
    let set = chain(depth);
    let registry = CommandRegistry::new();
    let stroke = Stroke::parse("Ctrl-Alt-F20").unwrap();
    bencher.bench_local(|| divan::black_box(set.command_for("map0", &stroke, &registry)));
}

// ============================================================================
// Session dispatch
// ============================================================================

#[divan::bench]
fn session_chord(bencher: divan::Bencher) {
    let mut session = EditorSession::<()>::with_defaults();
    session.set_active_keymap("emacs").unwrap();
    session.define_command("save", |_| {}).unwrap();
    let ctrl_x = "Ctrl-X".parse().unwrap();
    let ctrl_s = "Ctrl-S".parse().unwrap();
    let mut editor = Some(());

    bencher.bench_local(|| {
        session.handle_keystroke(ctrl_x, &mut editor);
        divan::black_box(session.handle_keystroke(ctrl_s, &mut editor))
    });
}
