//! A toy button that exposes its events as listener groups.
//!
//! This example shows:
//! - Groups of different arity on one type
//! - Removing a listener by id and by reference
//! - A listener that unregisters itself through a `SharedGroup`
//! - A failing listener stopping the broadcast

use std::{cell::Cell, fmt, rc::Rc};

use rusty_listeners::{FireError, ListenerGroup, SharedGroup, listener};

// ============================================================================
// Events
// ============================================================================

#[derive(Debug)]
struct Disabled;

impl fmt::Display for Disabled {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "button is disabled")
    }
}

struct Button {
    label: String,
    /// Fired with the click position.
    clicked: ListenerGroup<i32, Disabled>,
    /// Fired with no arguments when the pointer enters.
    hovered: SharedGroup<()>,
}

impl Button {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            clicked: ListenerGroup::new(2),
            hovered: SharedGroup::new(0),
        }
    }

    fn click(&self, x: i32, y: i32) -> Result<(), FireError<Disabled>> {
        println!("[{}] click at ({x}, {y})", self.label);
        self.clicked.fire(&[x, y])
    }

    fn hover(&self) {
        println!("[{}] hover", self.label);
        // Hover listeners cannot fail.
        let _ = self.hovered.fire(&[]);
    }
}

fn main() {
    let mut button = Button::new("OK");

    // ========================================================================
    // Click listeners
    // ========================================================================

    let logger = button
        .clicked
        .add(|x: &i32, y: &i32| println!("  logger: clicked at {x},{y}"))
        .expect("logger takes two arguments");

    let clicks = Rc::new(Cell::new(0));
    let counter = Rc::clone(&clicks);
    let count_clicks = listener::shared(move |_: &i32, _: &i32| counter.set(counter.get() + 1));
    button
        .clicked
        .add_shared(&count_clicks)
        .expect("counter takes two arguments");

    if let Err(err) = button.clicked.add(|x: &i32| println!("  never: {x}")) {
        println!("rejected one-argument listener: {err}");
    }

    button.click(1, 2).expect("no listener fails yet");

    button.clicked.remove(logger).expect("logger is registered");
    button.click(3, 4).expect("no listener fails yet");

    // ========================================================================
    // Self-removing hover listener
    // ========================================================================

    let once = button.hovered.downgrade();
    let own_id = Rc::new(Cell::new(None));
    let slot = Rc::clone(&own_id);
    let id = button
        .hovered
        .add(move || {
            println!("  first hover only");
            if let (Some(group), Some(id)) = (once.upgrade(), slot.get()) {
                let _ = group.remove(id);
            }
        })
        .expect("hover listeners take no arguments");
    own_id.set(Some(id));

    button.hover();
    button.hover();

    // ========================================================================
    // Failure
    // ========================================================================

    button
        .clicked
        .add(|_: &i32, _: &i32| -> Result<(), Disabled> { Err(Disabled) })
        .expect("guard takes two arguments");
    button
        .clicked
        .add(|_: &i32, _: &i32| println!("  not reached"))
        .expect("takes two arguments");

    match button.click(5, 6) {
        Err(FireError::Listener { id, source }) => println!("{id} stopped the click: {source}"),
        other => println!("unexpected: {other:?}"),
    }

    button
        .clicked
        .remove_shared(&count_clicks)
        .expect("counter is registered");
    println!("counted {} clicks", clicks.get());
}
