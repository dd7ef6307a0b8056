// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Exclusive capture on a gesture signal.
//!
//! Two subscribers listen to the back signal. A dialog captures it, consumes one gesture,
//! then lets a second one continue to the subscribers with `resume`.
//!
//! Run:
//! - `cargo run -p understory_demos --example signal_capture`

use std::cell::Cell;

use understory_signal::{GestureKind, Gestures, Notice, handler};

fn main() {
    let gestures = Gestures::new();

    for name in ["toolbar", "history"] {
        gestures
            .back
            .subscribe(handler(move |n: &Notice<'_, GestureKind>| {
                println!("  {name} saw {:?}", n.data);
            }));
    }

    println!("== Broadcast ==");
    gestures.emit(GestureKind::Back);

    let consumed = Cell::new(0);
    let dialog = gestures.back.capture(handler(move |n: &Notice<'_, GestureKind>| {
        consumed.set(consumed.get() + 1);
        if consumed.get() == 1 {
            println!("  dialog consumed {:?}", n.data);
        } else {
            println!("  dialog passes {:?} on", n.data);
            n.subject.resume(*n.data);
        }
    }));

    println!("== Captured ==");
    gestures.emit(GestureKind::Back);
    println!("== Captured, resumed ==");
    gestures.emit(GestureKind::Back);

    gestures.back.release(dialog);
    println!("== Released ==");
    gestures.emit(GestureKind::Back);
}
